//! Remote store client.
//!
//! `Client` is a cheap-to-clone handle that resolves one `ObjectStore` per
//! bucket through a [`BucketProvider`] and caches it for the lifetime of the
//! handle. The default provider builds a Google Cloud Storage store from
//! ambient credentials (`GoogleCloudStorageBuilder::from_env`); an in-memory
//! provider is available for tests and local development.

use crate::error::{StoreError, StoreResult};
use crate::object::RemoteObject;
use bytes::Bytes;
use futures::{StreamExt, TryStreamExt};
use object_store::path::Path as ObjectPath;
use object_store::Error as ObjectStoreError;
use object_store::{ObjectStore, ObjectStoreExt, PutPayload, Result as ObjectResult};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Resolves the `ObjectStore` backing a bucket.
///
/// Construction must not perform I/O; credential negotiation happens lazily
/// inside the returned store on first use.
pub trait BucketProvider: Send + Sync {
    fn store_for(&self, bucket: &str) -> StoreResult<Arc<dyn ObjectStore>>;
}

/// Google Cloud Storage provider using ambient credentials.
#[cfg(feature = "gcs")]
struct GcsProvider;

#[cfg(feature = "gcs")]
impl BucketProvider for GcsProvider {
    fn store_for(&self, bucket: &str) -> StoreResult<Arc<dyn ObjectStore>> {
        let store = object_store::gcp::GoogleCloudStorageBuilder::from_env()
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| StoreError::ConfigError(e.to_string()))?;
        Ok(Arc::new(store))
    }
}

/// In-memory provider: every bucket maps to its own `InMemory` store for the
/// lifetime of the client. Useful for tests and local development.
struct MemoryProvider;

impl BucketProvider for MemoryProvider {
    fn store_for(&self, _bucket: &str) -> StoreResult<Arc<dyn ObjectStore>> {
        Ok(Arc::new(object_store::memory::InMemory::new()))
    }
}

/// Handle to the remote store.
///
/// Clones share the same per-bucket store cache, so a clone handed to a
/// concurrent transfer reuses already-negotiated stores. Safe for concurrent
/// use; the mutex only guards bucket lookup, never a transfer.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    provider: Box<dyn BucketProvider>,
    stores: Mutex<HashMap<String, Arc<dyn ObjectStore>>>,
}

impl Client {
    /// Client over Google Cloud Storage with ambient credentials.
    #[cfg(feature = "gcs")]
    pub fn new() -> Self {
        Self::with_provider(GcsProvider)
    }

    /// Client over per-bucket in-memory stores.
    pub fn in_memory() -> Self {
        Self::with_provider(MemoryProvider)
    }

    /// Client over a custom bucket provider.
    pub fn with_provider(provider: impl BucketProvider + 'static) -> Self {
        Client {
            inner: Arc::new(ClientInner {
                provider: Box::new(provider),
                stores: Mutex::new(HashMap::new()),
            }),
        }
    }

    fn store(&self, bucket: &str) -> StoreResult<Arc<dyn ObjectStore>> {
        let mut stores = self
            .inner
            .stores
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(store) = stores.get(bucket) {
            return Ok(Arc::clone(store));
        }
        let store = self.inner.provider.store_for(bucket)?;
        stores.insert(bucket.to_string(), Arc::clone(&store));
        Ok(store)
    }

    /// Upload raw bytes to `dst`, overwriting any existing object.
    pub async fn put_bytes(&self, dst: &RemoteObject, data: Bytes) -> StoreResult<()> {
        let store = self.store(dst.bucket())?;
        let location = ObjectPath::from(dst.key_trimmed().to_string());
        let size = data.len();
        let start = Instant::now();

        let result: ObjectResult<_> = store.put(&location, PutPayload::from(data)).await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                uri = %dst,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "put failed"
            );
            StoreError::UploadFailed(e.to_string())
        })?;

        tracing::debug!(
            uri = %dst,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "put successful"
        );

        Ok(())
    }

    /// Download the full content of `src`.
    pub async fn get_bytes(&self, src: &RemoteObject) -> StoreResult<Bytes> {
        let store = self.store(src.bucket())?;
        let location = ObjectPath::from(src.key_trimmed().to_string());
        let start = Instant::now();

        let result: ObjectResult<_> = store.get(&location).await;

        let result = result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StoreError::NotFound(src.uri()),
            other => {
                tracing::error!(
                    error = %other,
                    uri = %src,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "get failed"
                );
                StoreError::DownloadFailed(other.to_string())
            }
        })?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| StoreError::DownloadFailed(e.to_string()))?;

        tracing::debug!(
            uri = %src,
            size_bytes = bytes.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "get successful"
        );

        Ok(bytes)
    }

    /// Upload a local file to `dst`, returning the number of bytes sent.
    ///
    /// The file is read fully into memory and uploaded in a single put. Less
    /// optimal for very large files, but keeps the store integration simple.
    pub async fn upload_file(&self, src: &Path, dst: &RemoteObject) -> StoreResult<u64> {
        let data = fs::read(src).await?;
        let size = data.len() as u64;
        self.put_bytes(dst, Bytes::from(data)).await?;
        Ok(size)
    }

    /// Download `src` to a local file, creating missing parent directories.
    /// Returns the number of bytes written.
    pub async fn download_file(&self, src: &RemoteObject, dst: &Path) -> StoreResult<u64> {
        let store = self.store(src.bucket())?;
        let location = ObjectPath::from(src.key_trimmed().to_string());

        let result: ObjectResult<_> = store.get(&location).await;
        let result = result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StoreError::NotFound(src.uri()),
            other => StoreError::DownloadFailed(other.to_string()),
        })?;

        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(dst).await?;
        let mut written: u64 = 0;
        let mut stream = result.into_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| StoreError::DownloadFailed(e.to_string()))?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(written)
    }

    /// Copy `src` to `dst` within the store.
    ///
    /// Same-bucket copies are server-side; cross-bucket copies fall back to
    /// streaming the object through memory.
    pub async fn copy_object(&self, src: &RemoteObject, dst: &RemoteObject) -> StoreResult<()> {
        let start = Instant::now();

        if src.bucket() == dst.bucket() {
            let store = self.store(src.bucket())?;
            let from = ObjectPath::from(src.key_trimmed().to_string());
            let to = ObjectPath::from(dst.key_trimmed().to_string());

            let result: ObjectResult<_> = store.copy(&from, &to).await;
            result.map_err(|e| match e {
                ObjectStoreError::NotFound { .. } => StoreError::NotFound(src.uri()),
                other => StoreError::CopyFailed(other.to_string()),
            })?;

            tracing::debug!(
                src = %src,
                dst = %dst,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "server-side copy successful"
            );
        } else {
            let data = self.get_bytes(src).await?;
            self.put_bytes(dst, data).await?;

            tracing::debug!(
                src = %src,
                dst = %dst,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "cross-bucket copy successful"
            );
        }

        Ok(())
    }

    /// List all objects under a key prefix, recursively.
    ///
    /// Prefixes are path-segment delimited: `gs://b/dir` matches `dir/...`
    /// but not `dir2/...`.
    pub async fn list_prefix(&self, prefix: &RemoteObject) -> StoreResult<Vec<RemoteObject>> {
        let store = self.store(prefix.bucket())?;
        let trimmed = prefix.key_trimmed();
        let prefix_path = (!trimmed.is_empty()).then(|| ObjectPath::from(trimmed.to_string()));

        let metas: Vec<_> = store
            .list(prefix_path.as_ref())
            .try_collect()
            .await
            .map_err(|e| StoreError::ListFailed(e.to_string()))?;

        Ok(metas
            .into_iter()
            .map(|meta| RemoteObject::new(prefix.bucket(), meta.location.to_string()))
            .collect())
    }

    /// Head-based existence check for a single object.
    pub async fn exists(&self, obj: &RemoteObject) -> StoreResult<bool> {
        let store = self.store(obj.bucket())?;
        let location = ObjectPath::from(obj.key_trimmed().to_string());
        match store.head(&location).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StoreError::BackendError(e.to_string())),
        }
    }
}

#[cfg(feature = "gcs")]
impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}
