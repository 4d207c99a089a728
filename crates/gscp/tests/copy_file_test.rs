mod helpers;

use bytes::Bytes;
use gscp::{copy_file, CopyError, CopyOptions, RemoteObject};
use helpers::{init_tracing, memory_client, write_local};
use tempfile::tempdir;

fn obj(uri: &str) -> RemoteObject {
    RemoteObject::parse(uri).unwrap()
}

#[tokio::test]
async fn test_local_to_local_creates_missing_parents() {
    init_tracing();
    let dir = tempdir().unwrap();
    let src = dir.path().join("src/x.txt");
    let dst = dir.path().join("dst/x.txt");
    write_local(&src, b"hello").await;

    copy_file(src, dst.clone(), &CopyOptions::default())
        .await
        .unwrap();

    assert_eq!(tokio::fs::read(&dst).await.unwrap(), b"hello");
}

#[tokio::test]
async fn test_local_to_local_overwrites() {
    init_tracing();
    let dir = tempdir().unwrap();
    let src = dir.path().join("src.txt");
    let dst = dir.path().join("dst.txt");
    write_local(&src, b"new content").await;
    write_local(&dst, b"old content").await;

    copy_file(src, dst.clone(), &CopyOptions::default())
        .await
        .unwrap();

    assert_eq!(tokio::fs::read(&dst).await.unwrap(), b"new content");
}

#[tokio::test]
async fn test_local_to_local_into_existing_directory() {
    init_tracing();
    let dir = tempdir().unwrap();
    let src = dir.path().join("x.txt");
    let dst_dir = dir.path().join("dst");
    write_local(&src, b"hello").await;
    tokio::fs::create_dir_all(&dst_dir).await.unwrap();

    copy_file(src, dst_dir.clone(), &CopyOptions::default())
        .await
        .unwrap();

    assert_eq!(
        tokio::fs::read(dst_dir.join("x.txt")).await.unwrap(),
        b"hello"
    );
}

#[tokio::test]
async fn test_missing_local_source_is_not_found() {
    init_tracing();
    let dir = tempdir().unwrap();
    let src = dir.path().join("missing.txt");
    let dst = dir.path().join("dst.txt");

    let result = copy_file(src, dst.clone(), &CopyOptions::default()).await;

    assert!(matches!(result, Err(CopyError::NotFound(_))));
    assert!(!dst.exists());
}

#[tokio::test]
async fn test_upload_round_trip() {
    init_tracing();
    let client = memory_client();
    let options = CopyOptions::default().with_client(client.clone());
    let dir = tempdir().unwrap();
    let src = dir.path().join("x.txt");
    write_local(&src, b"uploaded bytes").await;

    copy_file(src, "gs://bkt/dir/x.txt", &options).await.unwrap();

    let data = client.get_bytes(&obj("gs://bkt/dir/x.txt")).await.unwrap();
    assert_eq!(&data[..], b"uploaded bytes");
}

#[tokio::test]
async fn test_upload_to_directory_like_key_appends_file_name() {
    init_tracing();
    let client = memory_client();
    let options = CopyOptions::default().with_client(client.clone());
    let dir = tempdir().unwrap();
    let src = dir.path().join("x.txt");
    write_local(&src, b"data").await;

    copy_file(src, "gs://bkt/dir/", &options).await.unwrap();

    assert!(client.exists(&obj("gs://bkt/dir/x.txt")).await.unwrap());
}

#[tokio::test]
async fn test_download_round_trip() {
    init_tracing();
    let client = memory_client();
    let options = CopyOptions::default().with_client(client.clone());
    client
        .put_bytes(&obj("gs://bkt/x.txt"), Bytes::from_static(b"downloaded"))
        .await
        .unwrap();

    let dir = tempdir().unwrap();
    let dst = dir.path().join("deep/nested/x.txt");

    copy_file("gs://bkt/x.txt", dst.clone(), &options)
        .await
        .unwrap();

    assert_eq!(tokio::fs::read(&dst).await.unwrap(), b"downloaded");
}

#[tokio::test]
async fn test_download_into_existing_directory() {
    init_tracing();
    let client = memory_client();
    let options = CopyOptions::default().with_client(client.clone());
    client
        .put_bytes(&obj("gs://bkt/dir/x.txt"), Bytes::from_static(b"data"))
        .await
        .unwrap();

    let dir = tempdir().unwrap();

    copy_file("gs://bkt/dir/x.txt", dir.path().to_path_buf(), &options)
        .await
        .unwrap();

    assert_eq!(
        tokio::fs::read(dir.path().join("x.txt")).await.unwrap(),
        b"data"
    );
}

#[tokio::test]
async fn test_missing_remote_source_is_not_found() {
    init_tracing();
    let client = memory_client();
    let options = CopyOptions::default().with_client(client);
    let dir = tempdir().unwrap();

    let result = copy_file("gs://bkt/missing.txt", dir.path().join("x.txt"), &options).await;

    assert!(matches!(result, Err(CopyError::NotFound(_))));
}

#[tokio::test]
async fn test_remote_to_remote_same_bucket() {
    init_tracing();
    let client = memory_client();
    let options = CopyOptions::default().with_client(client.clone());
    client
        .put_bytes(&obj("gs://bkt/a.txt"), Bytes::from_static(b"payload"))
        .await
        .unwrap();

    copy_file("gs://bkt/a.txt", "gs://bkt/b.txt", &options)
        .await
        .unwrap();

    let data = client.get_bytes(&obj("gs://bkt/b.txt")).await.unwrap();
    assert_eq!(&data[..], b"payload");
}

#[tokio::test]
async fn test_remote_to_remote_across_buckets() {
    init_tracing();
    let client = memory_client();
    let options = CopyOptions::default().with_client(client.clone());
    client
        .put_bytes(&obj("gs://bkt-a/a.txt"), Bytes::from_static(b"payload"))
        .await
        .unwrap();

    copy_file("gs://bkt-a/a.txt", "gs://bkt-b/b.txt", &options)
        .await
        .unwrap();

    let data = client.get_bytes(&obj("gs://bkt-b/b.txt")).await.unwrap();
    assert_eq!(&data[..], b"payload");
}

#[tokio::test]
async fn test_remote_to_remote_directory_like_destination() {
    init_tracing();
    let client = memory_client();
    let options = CopyOptions::default().with_client(client.clone());
    client
        .put_bytes(&obj("gs://bkt/src/a.txt"), Bytes::from_static(b"payload"))
        .await
        .unwrap();

    copy_file("gs://bkt/src/a.txt", "gs://bkt/dst/", &options)
        .await
        .unwrap();

    assert!(client.exists(&obj("gs://bkt/dst/a.txt")).await.unwrap());
}

#[tokio::test]
async fn test_remote_handle_endpoints() {
    init_tracing();
    let client = memory_client();
    let options = CopyOptions::default().with_client(client.clone());
    let dir = tempdir().unwrap();
    let src = dir.path().join("x.txt");
    write_local(&src, b"via handle").await;

    let handle = RemoteObject::new("bkt", "handles/x.txt");
    copy_file(src, handle.clone(), &options).await.unwrap();

    let data = client.get_bytes(&handle).await.unwrap();
    assert_eq!(&data[..], b"via handle");
}
