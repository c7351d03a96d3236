//! Shared test helpers for File Browser integration tests
//!
//! Each helper mounts wiremock endpoints mirroring the File Browser API.
//! Remote paths are passed without a leading slash, as callers write them.

use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fbshare_client::client::FileBrowserClient;
use fbshare_core::domain::Credentials;

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "secret";
pub const TOKEN: &str = "test-token";

pub fn credentials(server: &MockServer) -> Credentials {
    Credentials::new(server.uri(), USERNAME, PASSWORD)
}

/// Starts a mock server with `POST /api/login` returning [`TOKEN`], and a
/// client pointing at it
pub async fn setup_filebrowser_mock() -> (MockServer, FileBrowserClient) {
    let server = MockServer::start().await;
    mount_login(&server).await;
    let client = FileBrowserClient::new(credentials(&server)).expect("client");
    (server, client)
}

pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(serde_json::json!({
            "username": USERNAME,
            "password": PASSWORD,
            "recaptcha": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(TOKEN))
        .mount(server)
        .await;
}

/// Mounts `GET /api/resources/{remote}` describing an existing file
pub async fn mount_resource(server: &MockServer, remote: &str, size: u64) {
    let name = remote.rsplit('/').next().unwrap_or(remote);
    Mock::given(method("GET"))
        .and(path(format!("/api/resources/{remote}")))
        .and(header("X-Auth", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "path": format!("/{remote}"),
            "name": name,
            "size": size,
            "extension": ".pdf",
            "modified": "2025-03-01T12:00:00Z",
            "mode": 420,
            "isDir": false,
            "isSymlink": false,
            "type": "pdf"
        })))
        .mount(server)
        .await;
}

/// Mounts `GET /api/resources/{remote}` answering 404
pub async fn mount_missing_resource(server: &MockServer, remote: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/api/resources/{remote}")))
        .respond_with(ResponseTemplate::new(404).set_body_string("404 Not Found"))
        .mount(server)
        .await;
}

/// Mounts `POST /api/share/{remote}` returning `hash`
pub async fn mount_share(server: &MockServer, remote: &str, hash: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/api/share/{remote}")))
        .and(header("X-Auth", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "hash": hash,
            "path": format!("/{remote}"),
            "userID": 1,
            "expire": 0
        })))
        .mount(server)
        .await;
}

/// Mounts a tus creation (no `Location`) plus one PATCH for `len` bytes
///
/// Both expect exactly one call.
pub async fn mount_tus_single_chunk(server: &MockServer, remote: &str, len: u64) {
    let tus_path = format!("/api/tus/{remote}");

    Mock::given(method("POST"))
        .and(path(tus_path.clone()))
        .and(header("Tus-Resumable", "1.0.0"))
        .and(header("Upload-Length", len.to_string().as_str()))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(tus_path))
        .and(header("Upload-Offset", "0"))
        .respond_with(
            ResponseTemplate::new(204)
                .insert_header("Tus-Resumable", "1.0.0")
                .insert_header("Upload-Offset", len.to_string().as_str()),
        )
        .expect(1)
        .mount(server)
        .await;
}

/// Serves `content` at `GET {route}` on the external file host
pub async fn mount_source_file(server: &MockServer, route: &str, content: &[u8]) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.to_vec()))
        .mount(server)
        .await;
}

/// HTTP methods and paths of every request the server received, in order
pub async fn request_log(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| format!("{} {}", r.method, r.url.path()))
        .collect()
}
