//! Recursive directory copies and batch copies.
//!
//! Both operations reduce to a list of classified (source, destination)
//! pairs which is then run through a bounded-concurrency batch runner. Per
//! the single-file dispatcher, every pair is independent and idempotent, so
//! completion order is free; the runner stops scheduling new copies after
//! the first failure.

use crate::copy::{copy_pair, resolve_client};
use crate::error::{CopyError, CopyResult};
use crate::location::{classify, Location, LocationRef};
use crate::options::CopyOptions;
use futures::stream;
use futures::TryStreamExt;
use gscp_store::Client;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock};
use tokio::task;
use walkdir::WalkDir;

/// Destination shape for [`copy_files`].
#[derive(Debug, Clone)]
pub enum DestinationSpec {
    /// A single destination directory; each source's path is flattened into
    /// a single-level name under it.
    Directory(LocationRef),
    /// One destination per source, paired by position. The lengths must
    /// match.
    Paired(Vec<LocationRef>),
}

impl From<&str> for DestinationSpec {
    fn from(text: &str) -> Self {
        DestinationSpec::Directory(LocationRef::from(text))
    }
}

impl From<String> for DestinationSpec {
    fn from(text: String) -> Self {
        DestinationSpec::Directory(LocationRef::from(text))
    }
}

impl From<&Path> for DestinationSpec {
    fn from(path: &Path) -> Self {
        DestinationSpec::Directory(LocationRef::from(path))
    }
}

impl From<PathBuf> for DestinationSpec {
    fn from(path: PathBuf) -> Self {
        DestinationSpec::Directory(LocationRef::from(path))
    }
}

impl From<gscp_store::RemoteObject> for DestinationSpec {
    fn from(obj: gscp_store::RemoteObject) -> Self {
        DestinationSpec::Directory(LocationRef::from(obj))
    }
}

impl From<LocationRef> for DestinationSpec {
    fn from(location: LocationRef) -> Self {
        DestinationSpec::Directory(location)
    }
}

impl<T: Into<LocationRef>> From<Vec<T>> for DestinationSpec {
    fn from(locations: Vec<T>) -> Self {
        DestinationSpec::Paired(locations.into_iter().map(Into::into).collect())
    }
}

/// Copy a directory recursively.
///
/// Both endpoints are directory roots; a trailing separator on either is
/// insignificant. Every file reachable under the source root is copied,
/// preserving relative structure — this is not a sync: destination files
/// with no counterpart in the source are left untouched, and like-named
/// files are overwritten unconditionally. A missing or empty source root
/// completes as a zero-file no-op.
pub async fn copy_dir(
    src: impl Into<LocationRef>,
    dst: impl Into<LocationRef>,
    options: &CopyOptions,
) -> CopyResult<()> {
    let src = classify(&src.into())?;
    let dst = classify(&dst.into())?;
    let client = resolve_client(options, src.is_remote() || dst.is_remote())?;

    let pairs = match &src {
        Location::Local(root) => enumerate_local(root)
            .await?
            .into_iter()
            .map(|(path, rel)| (Location::Local(path), rebase(&dst, &rel)))
            .collect(),
        Location::Remote(prefix) => {
            let objects = match &client {
                Some(client) => client.list_prefix(prefix).await?,
                // resolve_client returned a client for any remote endpoint
                None => Vec::new(),
            };
            let base = prefix.key_trimmed().to_string();
            objects
                .into_iter()
                .map(|obj| {
                    let rel = obj
                        .key_trimmed()
                        .strip_prefix(&base)
                        .unwrap_or(obj.key_trimmed())
                        .trim_start_matches('/')
                        .to_string();
                    (Location::Remote(obj), rebase(&dst, &rel))
                })
                .collect()
        }
    };

    run_batch(pairs, client, options).await
}

/// Copy a list of files.
///
/// With a [`DestinationSpec::Directory`] destination every source is copied
/// under it using its flattened name; with [`DestinationSpec::Paired`] the
/// sequences are zipped by position and a length mismatch fails before any
/// file is touched. Each pair is classified independently, so localities may
/// differ across the batch; one client serves every remote endpoint.
pub async fn copy_files(
    srcs: impl IntoIterator<Item = impl Into<LocationRef>>,
    dsts: impl Into<DestinationSpec>,
    options: &CopyOptions,
) -> CopyResult<()> {
    let srcs: Vec<LocationRef> = srcs.into_iter().map(Into::into).collect();

    let pairs = match dsts.into() {
        DestinationSpec::Directory(dir) => {
            let dir = classify(&dir)?;
            srcs.iter()
                .map(|src| {
                    let name = flatten(&src.display_text());
                    Ok((classify(src)?, rebase(&dir, &name)))
                })
                .collect::<CopyResult<Vec<_>>>()?
        }
        DestinationSpec::Paired(dsts) => {
            if dsts.len() != srcs.len() {
                return Err(CopyError::LengthMismatch {
                    srcs: srcs.len(),
                    dsts: dsts.len(),
                });
            }
            srcs.iter()
                .zip(&dsts)
                .map(|(src, dst)| Ok((classify(src)?, classify(dst)?)))
                .collect::<CopyResult<Vec<_>>>()?
        }
    };

    let any_remote = pairs
        .iter()
        .any(|(src, dst)| src.is_remote() || dst.is_remote());
    let client = resolve_client(options, any_remote)?;

    run_batch(pairs, client, options).await
}

static NON_NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9A-Za-z_.-]+").expect("valid pattern"));

/// Flatten a path or URI into a single-level file name.
///
/// Runs of characters outside `[0-9A-Za-z_.-]` collapse to `-` and outer
/// `-` are trimmed, so `a/b/c.txt` becomes `a-b-c.txt` and
/// `gs://bkt/some/blob/` becomes `gs-bkt-some-blob`.
pub fn flatten(text: &str) -> String {
    NON_NAME_CHARS
        .replace_all(text, "-")
        .trim_matches('-')
        .to_string()
}

/// Join a `/`-separated relative key under a destination root.
fn rebase(dst_root: &Location, rel: &str) -> Location {
    match dst_root {
        Location::Local(root) => {
            let mut path = root.clone();
            path.extend(rel.split('/').filter(|seg| !seg.is_empty()));
            Location::Local(path)
        }
        Location::Remote(obj) => Location::Remote(obj.join(rel)),
    }
}

/// Enumerate all files under a local root as (absolute path, relative key)
/// pairs. A missing root yields an empty listing.
async fn enumerate_local(root: &Path) -> CopyResult<Vec<(PathBuf, String)>> {
    let root = root.to_path_buf();
    task::spawn_blocking(move || {
        if !root.is_dir() {
            return Ok(Vec::new());
        }
        let mut files = Vec::new();
        for entry in WalkDir::new(&root) {
            let entry = entry.map_err(|e| CopyError::IoError(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(&root)
                .map_err(|e| CopyError::IoError(std::io::Error::other(e)))?;
            files.push((entry.path().to_path_buf(), path_to_key(rel)));
        }
        Ok(files)
    })
    .await
    .map_err(|e| CopyError::IoError(std::io::Error::other(e)))?
}

fn path_to_key(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Run per-file copies with bounded concurrency, aborting on the first
/// failure. Dropping the returned future stops scheduling further copies;
/// at most the in-flight files are left partial.
async fn run_batch(
    pairs: Vec<(Location, Location)>,
    client: Option<Client>,
    options: &CopyOptions,
) -> CopyResult<()> {
    let total = pairs.len();
    let completed = Arc::new(AtomicUsize::new(0));
    let quiet = options.quiet;
    let limit = options.concurrency.max(1);

    stream::iter(pairs.into_iter().map(Ok))
        .try_for_each_concurrent(limit, |(src, dst)| {
            let client = client.clone();
            let completed = Arc::clone(&completed);
            async move {
                copy_pair(&src, &dst, client.as_ref(), true).await?;
                let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                if !quiet {
                    tracing::info!(src = %src, n, total, "copied");
                }
                Ok(())
            }
        })
        .await
}
