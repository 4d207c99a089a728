//! Location references and classification.
//!
//! Callers hand the copy operations any of three endpoint forms: a textual
//! path/URI, a structured filesystem path, or a pre-built [`RemoteObject`]
//! handle. [`classify`] normalizes each into a tagged [`Location`] — a pure
//! function of the textual form, with no existence checks and no I/O.

use crate::error::{CopyError, CopyResult};
use gscp_store::object::SCHEME;
use gscp_store::RemoteObject;
use percent_encoding::percent_decode_str;
use std::fmt;
use std::path::{Path, PathBuf};

/// Caller-supplied reference to a copy endpoint.
///
/// Ephemeral: consumed by classification at the start of an operation.
#[derive(Debug, Clone)]
pub enum LocationRef {
    /// A plain path or URI in textual form.
    Text(String),
    /// A structured filesystem path. Always local.
    Path(PathBuf),
    /// A pre-built remote handle. Always remote.
    Remote(RemoteObject),
}

impl LocationRef {
    /// Textual form used for logging and name flattening.
    pub fn display_text(&self) -> String {
        match self {
            LocationRef::Text(text) => text.clone(),
            LocationRef::Path(path) => path.display().to_string(),
            LocationRef::Remote(obj) => obj.uri(),
        }
    }
}

impl From<&str> for LocationRef {
    fn from(text: &str) -> Self {
        LocationRef::Text(text.to_string())
    }
}

impl From<String> for LocationRef {
    fn from(text: String) -> Self {
        LocationRef::Text(text)
    }
}

impl From<&Path> for LocationRef {
    fn from(path: &Path) -> Self {
        LocationRef::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for LocationRef {
    fn from(path: PathBuf) -> Self {
        LocationRef::Path(path)
    }
}

impl From<RemoteObject> for LocationRef {
    fn from(obj: RemoteObject) -> Self {
        LocationRef::Remote(obj)
    }
}

impl From<&RemoteObject> for LocationRef {
    fn from(obj: &RemoteObject) -> Self {
        LocationRef::Remote(obj.clone())
    }
}

/// A classified copy endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Local(PathBuf),
    Remote(RemoteObject),
}

impl Location {
    pub fn is_remote(&self) -> bool {
        matches!(self, Location::Remote(_))
    }

    /// Final path segment, if one exists.
    pub fn file_name(&self) -> Option<String> {
        match self {
            Location::Local(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            Location::Remote(obj) => obj.file_name().map(String::from),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Local(path) => write!(f, "{}", path.display()),
            Location::Remote(obj) => write!(f, "{}", obj),
        }
    }
}

/// Classify a location reference as local or remote.
///
/// A `gs://` prefix identifies a remote object, `file://` a local path with
/// percent-decoding applied, and any other `scheme://` prefix is rejected.
/// Everything else is a local path. Trailing separators are preserved; they
/// mark directory-like endpoints but never change the classification.
pub fn classify(location: &LocationRef) -> CopyResult<Location> {
    match location {
        LocationRef::Text(text) => classify_text(text),
        LocationRef::Path(path) => Ok(Location::Local(path.clone())),
        LocationRef::Remote(obj) => Ok(Location::Remote(obj.clone())),
    }
}

fn classify_text(text: &str) -> CopyResult<Location> {
    if text.starts_with(&format!("{}://", SCHEME)) {
        let obj = RemoteObject::parse(text)
            .map_err(|_| CopyError::Classification(text.to_string()))?;
        return Ok(Location::Remote(obj));
    }

    if let Some(rest) = text.strip_prefix("file://") {
        let decoded = percent_decode_str(rest).decode_utf8_lossy();
        return Ok(Location::Local(PathBuf::from(decoded.into_owned())));
    }

    if has_uri_scheme(text) {
        return Err(CopyError::Classification(text.to_string()));
    }

    Ok(Location::Local(PathBuf::from(text)))
}

/// `scheme://` prefix test, scheme characters per RFC 3986.
fn has_uri_scheme(text: &str) -> bool {
    let Some((scheme, _)) = text.split_once("://") else {
        return false;
    };
    scheme
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
}
