use std::path::Path;

/// Initialize test logging once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Client backed by per-bucket in-memory stores.
pub fn memory_client() -> gscp::Client {
    gscp::Client::in_memory()
}

/// Write a local file, creating missing parent directories.
pub async fn write_local(path: &Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.unwrap();
    }
    tokio::fs::write(path, contents).await.unwrap();
}
