//! End-to-end save-and-share against a mocked File Browser
//!
//! The same mock server plays the external file host (`/files/...`) and the
//! File Browser API (`/api/...`).

use std::sync::Arc;

use fbshare_client::{save_and_share, FileBrowserClient, HttpFetcher};
use fbshare_core::domain::{ActionParams, ShareParams, ShareResult};
use fbshare_core::usecases::SaveAndShareUseCase;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use crate::common;

const CONTENT: &[u8] = b"%PDF-1.4 quarterly numbers";
const REMOTE: &str = "uploads/report.pdf";

fn to_uploads(name: &str) -> String {
    format!("uploads/{name}")
}

async fn run(server: &MockServer, cache: &tempfile::TempDir, params: &ActionParams) -> ShareResult {
    let fetcher = Arc::new(HttpFetcher::new(cache.path()));
    let client = FileBrowserClient::new(common::credentials(server)).unwrap();
    let url = format!("{}/files/report.pdf", server.uri());

    SaveAndShareUseCase::new(fetcher, Box::new(client))
        .execute(&url, to_uploads, params)
        .await
        .expect("save and share")
}

async fn mount_delete(server: &MockServer, times: u64) {
    Mock::given(method("DELETE"))
        .and(path(format!("/api/resources/{REMOTE}")))
        .respond_with(ResponseTemplate::new(200))
        .expect(times)
        .mount(server)
        .await;
}

async fn mount_no_upload(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(format!("/api/tus/{REMOTE}")))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_absent_resource_is_uploaded_and_shared() {
    let server = MockServer::start().await;
    common::mount_login(&server).await;
    common::mount_source_file(&server, "/files/report.pdf", CONTENT).await;
    common::mount_missing_resource(&server, REMOTE).await;
    common::mount_tus_single_chunk(&server, REMOTE, CONTENT.len() as u64).await;
    common::mount_share(&server, REMOTE, "Qm9vaw").await;
    mount_delete(&server, 0).await;

    let cache = tempfile::tempdir().unwrap();
    let result = run(&server, &cache, &ActionParams::default()).await;

    assert_eq!(result.hash.as_str(), "Qm9vaw");
    assert_eq!(result.view_url, format!("{}/share/Qm9vaw", server.uri()));
    assert_eq!(
        result.download_url,
        format!("{}/api/public/dl/Qm9vaw", server.uri())
    );
    assert!(result.view_url.contains(result.hash.as_str()));
    assert!(result.download_url.contains(result.hash.as_str()));
}

#[tokio::test]
async fn test_matching_remote_is_not_uploaded_again() {
    let server = MockServer::start().await;
    common::mount_login(&server).await;
    common::mount_source_file(&server, "/files/report.pdf", CONTENT).await;
    common::mount_resource(&server, REMOTE, CONTENT.len() as u64).await;
    common::mount_share(&server, REMOTE, "same").await;
    mount_delete(&server, 0).await;
    mount_no_upload(&server).await;

    let cache = tempfile::tempdir().unwrap();
    let params = ActionParams {
        file_size: CONTENT.len() as i64,
        ..Default::default()
    };
    let result = run(&server, &cache, &params).await;
    assert_eq!(result.hash.as_str(), "same");
}

#[tokio::test]
async fn test_unknown_size_keeps_existing_remote() {
    let server = MockServer::start().await;
    common::mount_login(&server).await;
    common::mount_source_file(&server, "/files/report.pdf", CONTENT).await;
    common::mount_resource(&server, REMOTE, 1).await;
    common::mount_share(&server, REMOTE, "keep").await;
    mount_delete(&server, 0).await;
    mount_no_upload(&server).await;

    let cache = tempfile::tempdir().unwrap();
    run(&server, &cache, &ActionParams::default()).await;
}

#[tokio::test]
async fn test_size_mismatch_deletes_before_upload() {
    let server = MockServer::start().await;
    common::mount_login(&server).await;
    common::mount_source_file(&server, "/files/report.pdf", CONTENT).await;
    common::mount_resource(&server, REMOTE, 3).await;
    mount_delete(&server, 1).await;
    common::mount_tus_single_chunk(&server, REMOTE, CONTENT.len() as u64).await;
    common::mount_share(&server, REMOTE, "new").await;

    let cache = tempfile::tempdir().unwrap();
    let params = ActionParams {
        file_size: CONTENT.len() as i64,
        ..Default::default()
    };
    run(&server, &cache, &params).await;

    let log = common::request_log(&server).await;
    let delete = log
        .iter()
        .position(|r| r.starts_with("DELETE"))
        .expect("delete sent");
    let create = log
        .iter()
        .position(|r| r.starts_with("POST /api/tus"))
        .expect("upload sent");
    assert!(delete < create, "{log:?}");
}

#[tokio::test]
async fn test_force_replaces_matching_remote() {
    let server = MockServer::start().await;
    common::mount_login(&server).await;
    common::mount_source_file(&server, "/files/report.pdf", CONTENT).await;
    common::mount_resource(&server, REMOTE, CONTENT.len() as u64).await;
    mount_delete(&server, 1).await;
    common::mount_tus_single_chunk(&server, REMOTE, CONTENT.len() as u64).await;
    common::mount_share(&server, REMOTE, "forced").await;

    let cache = tempfile::tempdir().unwrap();
    let params = ActionParams {
        file_size: CONTENT.len() as i64,
        force: true,
        share: ShareParams::unrestricted(),
    };
    run(&server, &cache, &params).await;
}

#[tokio::test]
async fn test_share_failure_leaves_upload_in_place() {
    let server = MockServer::start().await;
    common::mount_login(&server).await;
    common::mount_source_file(&server, "/files/report.pdf", CONTENT).await;
    common::mount_missing_resource(&server, REMOTE).await;
    common::mount_tus_single_chunk(&server, REMOTE, CONTENT.len() as u64).await;
    Mock::given(method("POST"))
        .and(path(format!("/api/share/{REMOTE}")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_delete(&server, 0).await;

    let cache = tempfile::tempdir().unwrap();
    let fetcher = Arc::new(HttpFetcher::new(cache.path()));
    let client = FileBrowserClient::new(common::credentials(&server)).unwrap();
    let err = SaveAndShareUseCase::new(fetcher, Box::new(client))
        .execute(
            &format!("{}/files/report.pdf", server.uri()),
            to_uploads,
            &ActionParams::default(),
        )
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Failed to create share"), "{err:#}");
}

#[tokio::test]
async fn test_download_failure_stops_before_remote_calls() {
    let server = MockServer::start().await;
    common::mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/files/report.pdf"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let cache = tempfile::tempdir().unwrap();
    let fetcher = Arc::new(HttpFetcher::new(cache.path()));
    let client = FileBrowserClient::new(common::credentials(&server)).unwrap();
    let err = SaveAndShareUseCase::new(fetcher, Box::new(client))
        .execute(
            &format!("{}/files/report.pdf", server.uri()),
            to_uploads,
            &ActionParams::default(),
        )
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Failed to download file"));
    let log = common::request_log(&server).await;
    assert!(log.iter().all(|r| !r.contains("/api/")), "{log:?}");
}

#[tokio::test]
async fn test_save_and_share_entry_point() {
    let server = MockServer::start().await;
    // Unique per run: the entry point caches under the system temp dir
    let route = format!("/fbshare-e2e-{}/entry.pdf", server.address().port());
    common::mount_login(&server).await;
    common::mount_source_file(&server, &route, CONTENT).await;
    common::mount_missing_resource(&server, "uploads/entry.pdf").await;
    common::mount_tus_single_chunk(&server, "uploads/entry.pdf", CONTENT.len() as u64).await;
    common::mount_share(&server, "uploads/entry.pdf", "EnTrY").await;

    let url = format!("{}{}", server.uri(), route);
    let result = save_and_share(
        &common::credentials(&server),
        &url,
        to_uploads,
        &ActionParams::default(),
    )
    .await
    .expect("save_and_share");

    assert!(result.view_url.ends_with("/share/EnTrY"));
    assert!(result.download_url.ends_with("/api/public/dl/EnTrY"));

    let cached = std::env::temp_dir().join(route.trim_start_matches('/'));
    let _ = std::fs::remove_dir_all(cached.parent().unwrap());
}
