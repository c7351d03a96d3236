//! tus uploads

use fbshare_client::FileBrowserError;
use fbshare_core::domain::RemotePath;
use wiremock::{
    matchers::{body_bytes, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use crate::common;

fn local_file(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
    let file = dir.path().join(name);
    std::fs::write(&file, content).unwrap();
    file
}

async fn mount_patch(server: &MockServer, route: &str, offset: u64, body: &[u8], next: u64) {
    Mock::given(method("PATCH"))
        .and(path(route))
        .and(header("Upload-Offset", offset.to_string().as_str()))
        .and(header("Content-Type", "application/offset+octet-stream"))
        .and(header("X-Auth", common::TOKEN))
        .and(body_bytes(body.to_vec()))
        .respond_with(
            ResponseTemplate::new(204).insert_header("Upload-Offset", next.to_string().as_str()),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_upload_in_chunks_via_location() {
    let (server, client) = common::setup_filebrowser_mock().await;
    let mut client = client.with_chunk_size(4);
    let dir = tempfile::tempdir().unwrap();
    let file = local_file(&dir, "data.bin", b"0123456789");

    Mock::given(method("POST"))
        .and(path("/api/tus/backup/data.bin"))
        .and(header("Tus-Resumable", "1.0.0"))
        .and(header("Upload-Length", "10"))
        .and(header("X-Auth", common::TOKEN))
        .respond_with(
            ResponseTemplate::new(201).insert_header("Location", "/api/tus/session/xyz"),
        )
        .expect(1)
        .mount(&server)
        .await;

    mount_patch(&server, "/api/tus/session/xyz", 0, b"0123", 4).await;
    mount_patch(&server, "/api/tus/session/xyz", 4, b"4567", 8).await;
    mount_patch(&server, "/api/tus/session/xyz", 8, b"89", 10).await;

    client
        .upload(&file, &RemotePath::new("backup/data.bin").unwrap())
        .await
        .expect("upload");
}

#[tokio::test]
async fn test_upload_without_location_uses_endpoint() {
    let (server, mut client) = common::setup_filebrowser_mock().await;
    let dir = tempfile::tempdir().unwrap();
    let file = local_file(&dir, "small.txt", b"hello tus");

    common::mount_tus_single_chunk(&server, "docs/small.txt", 9).await;

    client
        .upload(&file, &RemotePath::new("docs/small.txt").unwrap())
        .await
        .expect("upload");
}

#[tokio::test]
async fn test_upload_empty_file_sends_no_chunks() {
    let (server, mut client) = common::setup_filebrowser_mock().await;
    let dir = tempfile::tempdir().unwrap();
    let file = local_file(&dir, "empty.txt", b"");

    Mock::given(method("POST"))
        .and(path("/api/tus/empty.txt"))
        .and(header("Upload-Length", "0"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    client
        .upload(&file, &RemotePath::new("empty.txt").unwrap())
        .await
        .expect("empty upload");
}

#[tokio::test]
async fn test_upload_conflict_on_create() {
    let (server, mut client) = common::setup_filebrowser_mock().await;
    let dir = tempfile::tempdir().unwrap();
    let file = local_file(&dir, "dup.txt", b"abc");

    Mock::given(method("POST"))
        .and(path("/api/tus/dup.txt"))
        .respond_with(ResponseTemplate::new(409))
        .mount(&server)
        .await;

    let err = client
        .upload(&file, &RemotePath::new("dup.txt").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        FileBrowserError::UnexpectedStatus {
            operation: "upload creation",
            status: 409
        }
    ));
}

#[tokio::test]
async fn test_upload_offset_mismatch() {
    let (server, client) = common::setup_filebrowser_mock().await;
    let mut client = client.with_chunk_size(4);
    let dir = tempfile::tempdir().unwrap();
    let file = local_file(&dir, "f.bin", b"abcdefgh");

    Mock::given(method("POST"))
        .and(path("/api/tus/f.bin"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/tus/f.bin"))
        .respond_with(ResponseTemplate::new(204).insert_header("Upload-Offset", "2"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client
        .upload(&file, &RemotePath::new("f.bin").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        FileBrowserError::OffsetMismatch {
            expected: 4,
            actual: 2
        }
    ));
}

#[tokio::test]
async fn test_upload_chunk_rejected() {
    let (server, mut client) = common::setup_filebrowser_mock().await;
    let dir = tempfile::tempdir().unwrap();
    let file = local_file(&dir, "f.bin", b"abc");

    Mock::given(method("POST"))
        .and(path("/api/tus/f.bin"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/tus/f.bin"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client
        .upload(&file, &RemotePath::new("f.bin").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        FileBrowserError::UnexpectedStatus {
            operation: "upload chunk",
            status: 500
        }
    ));
}

#[tokio::test]
async fn test_upload_missing_local_file_makes_no_requests() {
    let (server, mut client) = common::setup_filebrowser_mock().await;
    let dir = tempfile::tempdir().unwrap();

    let err = client
        .upload(
            &dir.path().join("absent.bin"),
            &RemotePath::new("absent.bin").unwrap(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, FileBrowserError::LocalFileMissing(_)));
    assert!(common::request_log(&server).await.is_empty());
}
