//! Remote object handle.
//!
//! A `RemoteObject` addresses one object (or key prefix) in a bucket. It is a
//! plain value: no client attached, no I/O performed. Trailing `/` on the key
//! is preserved verbatim (it marks a directory-like key) but never affects
//! joins or relative-path computation.

use crate::error::{StoreError, StoreResult};
use std::fmt;

/// URI scheme for remote objects.
pub const SCHEME: &str = "gs";

/// A (bucket, key) pair addressing an object in the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteObject {
    bucket: String,
    key: String,
}

impl RemoteObject {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        RemoteObject {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Parse a `gs://bucket/key` URI.
    ///
    /// The key part may be empty (`gs://bucket`) to address the bucket root.
    pub fn parse(uri: &str) -> StoreResult<Self> {
        let rest = uri
            .strip_prefix(&format!("{}://", SCHEME))
            .ok_or_else(|| StoreError::InvalidUri(uri.to_string()))?;

        let (bucket, key) = match rest.split_once('/') {
            Some((bucket, key)) => (bucket, key),
            None => (rest, ""),
        };

        if bucket.is_empty() {
            return Err(StoreError::InvalidUri(uri.to_string()));
        }

        Ok(RemoteObject::new(bucket, key))
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Key with insignificant leading/trailing separators removed.
    pub fn key_trimmed(&self) -> &str {
        self.key.trim_matches('/')
    }

    /// True when the key addresses a prefix rather than a single object:
    /// empty (bucket root) or explicitly marked with a trailing `/`.
    pub fn is_dir_like(&self) -> bool {
        self.key.is_empty() || self.key.ends_with('/')
    }

    /// Last path segment of the key, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.key_trimmed().rsplit('/').next().filter(|s| !s.is_empty())
    }

    /// Join a relative key under this one, never doubling separators.
    pub fn join(&self, rel: &str) -> Self {
        let base = self.key_trimmed();
        let rel = rel.trim_matches('/');
        let key = match (base.is_empty(), rel.is_empty()) {
            (true, _) => rel.to_string(),
            (_, true) => base.to_string(),
            (false, false) => format!("{}/{}", base, rel),
        };
        RemoteObject::new(&self.bucket, key)
    }

    /// `gs://bucket/key` form (key rendered verbatim).
    pub fn uri(&self) -> String {
        if self.key.is_empty() {
            format!("{}://{}", SCHEME, self.bucket)
        } else {
            format!("{}://{}/{}", SCHEME, self.bucket, self.key)
        }
    }
}

impl fmt::Display for RemoteObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri())
    }
}
