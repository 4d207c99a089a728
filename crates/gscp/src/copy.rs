//! Single-file copy dispatch.
//!
//! A classified source/destination pair maps onto one of four strategies.
//! Local I/O goes through `tokio::fs`; everything remote goes through the
//! injected (or lazily constructed) [`Client`].

use crate::error::{CopyError, CopyResult};
use crate::location::{classify, Location, LocationRef};
use crate::options::CopyOptions;
use gscp_store::{Client, RemoteObject, StoreError};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::fs;

/// Transfer strategy for one source/destination pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyStrategy {
    LocalToLocal,
    Upload,
    Download,
    RemoteToRemote,
}

impl CopyStrategy {
    /// Strategy implied by a classified pair.
    pub fn for_pair(src: &Location, dst: &Location) -> Self {
        match (src, dst) {
            (Location::Local(_), Location::Local(_)) => CopyStrategy::LocalToLocal,
            (Location::Local(_), Location::Remote(_)) => CopyStrategy::Upload,
            (Location::Remote(_), Location::Local(_)) => CopyStrategy::Download,
            (Location::Remote(_), Location::Remote(_)) => CopyStrategy::RemoteToRemote,
        }
    }
}

/// Copy a single file.
///
/// `src` and `dst` may each be a local path, a `gs://` URI, or a
/// [`RemoteObject`] handle; the transfer strategy is inferred from the pair.
/// Existing destinations are overwritten and missing local parent directories
/// are created. When both endpoints are local no remote client is constructed
/// at all.
pub async fn copy_file(
    src: impl Into<LocationRef>,
    dst: impl Into<LocationRef>,
    options: &CopyOptions,
) -> CopyResult<()> {
    let src = classify(&src.into())?;
    let dst = classify(&dst.into())?;
    let client = resolve_client(options, src.is_remote() || dst.is_remote())?;
    copy_pair(&src, &dst, client.as_ref(), options.quiet).await
}

/// Resolve the client for an invocation: none when every endpoint is local,
/// otherwise the supplied one or a fresh default with ambient credentials.
pub(crate) fn resolve_client(
    options: &CopyOptions,
    any_remote: bool,
) -> CopyResult<Option<Client>> {
    if !any_remote {
        return Ok(None);
    }
    if let Some(client) = &options.client {
        return Ok(Some(client.clone()));
    }

    #[cfg(feature = "gcs")]
    {
        Ok(Some(Client::new()))
    }
    #[cfg(not(feature = "gcs"))]
    {
        Err(CopyError::Transfer(StoreError::ConfigError(
            "remote endpoint given but no client supplied and the gcs feature is disabled"
                .to_string(),
        )))
    }
}

/// Copy one already-classified pair, logging elapsed time on failure.
pub(crate) async fn copy_pair(
    src: &Location,
    dst: &Location,
    client: Option<&Client>,
    quiet: bool,
) -> CopyResult<()> {
    let start = Instant::now();

    let result = match (src, dst) {
        (Location::Local(s), Location::Local(d)) => copy_local(s, d).await,
        (Location::Local(s), Location::Remote(d)) => upload(s, d, required(client)?).await,
        (Location::Remote(s), Location::Local(d)) => download(s, d, required(client)?).await,
        (Location::Remote(s), Location::Remote(d)) => {
            remote_to_remote(s, d, required(client)?).await
        }
    };

    match &result {
        Ok(()) => {
            if !quiet {
                tracing::info!(src = %src, dst = %dst, "copied");
            }
        }
        Err(error) => {
            tracing::error!(
                src = %src,
                error = %error,
                elapsed_s = start.elapsed().as_secs_f64(),
                "copy failed"
            );
        }
    }

    result
}

fn required(client: Option<&Client>) -> CopyResult<&Client> {
    client.ok_or_else(|| {
        CopyError::Transfer(StoreError::ConfigError(
            "remote endpoint reached without a resolved client".to_string(),
        ))
    })
}

fn not_found_or_io(err: std::io::Error, path: &Path) -> CopyError {
    if err.kind() == std::io::ErrorKind::NotFound {
        CopyError::NotFound(path.display().to_string())
    } else {
        CopyError::IoError(err)
    }
}

/// An existing destination directory receives the source file name.
async fn resolve_local_target(dst: &Path, file_name: Option<&OsStr>) -> PathBuf {
    let dst_is_dir = fs::metadata(dst).await.map(|m| m.is_dir()).unwrap_or(false);
    match file_name {
        Some(name) if dst_is_dir => dst.join(name),
        _ => dst.to_path_buf(),
    }
}

/// local file -> local file
async fn copy_local(src: &Path, dst: &Path) -> CopyResult<()> {
    fs::metadata(src).await.map_err(|e| not_found_or_io(e, src))?;

    let dst = resolve_local_target(dst, src.file_name()).await;
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::copy(src, &dst).await?;
    Ok(())
}

/// local file -> remote object
async fn upload(src: &Path, dst: &RemoteObject, client: &Client) -> CopyResult<()> {
    fs::metadata(src).await.map_err(|e| not_found_or_io(e, src))?;

    let dst = match src.file_name().and_then(OsStr::to_str) {
        Some(name) if dst.is_dir_like() => dst.join(name),
        _ => dst.clone(),
    };
    client.upload_file(src, &dst).await?;
    Ok(())
}

/// remote object -> local file
async fn download(src: &RemoteObject, dst: &Path, client: &Client) -> CopyResult<()> {
    let dst = resolve_local_target(dst, src.file_name().map(OsStr::new)).await;
    client.download_file(src, &dst).await?;
    Ok(())
}

/// remote object -> remote object
async fn remote_to_remote(src: &RemoteObject, dst: &RemoteObject, client: &Client) -> CopyResult<()> {
    let dst = match src.file_name() {
        Some(name) if dst.is_dir_like() && !src.is_dir_like() => dst.join(name),
        _ => dst.clone(),
    };
    client.copy_object(src, &dst).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(path: &str) -> Location {
        Location::Local(PathBuf::from(path))
    }

    fn remote(uri: &str) -> Location {
        Location::Remote(RemoteObject::parse(uri).unwrap())
    }

    #[test]
    fn test_strategy_for_pair() {
        let l = local("/tmp/a");
        let r = remote("gs://bkt/a");
        assert_eq!(CopyStrategy::for_pair(&l, &l), CopyStrategy::LocalToLocal);
        assert_eq!(CopyStrategy::for_pair(&l, &r), CopyStrategy::Upload);
        assert_eq!(CopyStrategy::for_pair(&r, &l), CopyStrategy::Download);
        assert_eq!(CopyStrategy::for_pair(&r, &r), CopyStrategy::RemoteToRemote);
    }

    #[test]
    fn test_no_client_resolved_for_local_pair() {
        let options = CopyOptions::default();
        let client = resolve_client(&options, false).unwrap();
        assert!(client.is_none());
    }

    #[test]
    fn test_supplied_client_wins() {
        let options = CopyOptions::default().with_client(Client::in_memory());
        let client = resolve_client(&options, true).unwrap();
        assert!(client.is_some());
    }
}
