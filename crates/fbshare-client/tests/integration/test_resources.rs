//! Resource metadata and deletion

use fbshare_client::FileBrowserError;
use fbshare_core::domain::RemotePath;
use wiremock::{
    matchers::{method, path},
    Mock, ResponseTemplate,
};

use crate::common;

#[tokio::test]
async fn test_get_existing_resource() {
    let (server, mut client) = common::setup_filebrowser_mock().await;
    common::mount_resource(&server, "uploads/report.pdf", 2048).await;

    let path = RemotePath::new("/uploads/report.pdf").unwrap();
    let resource = client.get_resource(&path).await.expect("get resource");

    assert!(resource.exists);
    assert_eq!(resource.size, 2048);
    assert_eq!(resource.path, path);
    assert_eq!(resource.name.as_deref(), Some("report.pdf"));
    assert_eq!(resource.kind.as_deref(), Some("pdf"));
    assert!(resource.modified.is_some());
    assert!(!resource.is_dir);
}

#[tokio::test]
async fn test_get_missing_resource_is_not_an_error() {
    let (server, mut client) = common::setup_filebrowser_mock().await;
    common::mount_missing_resource(&server, "uploads/new.pdf").await;

    let resource = client
        .get_resource(&RemotePath::new("uploads/new.pdf").unwrap())
        .await
        .expect("404 maps to a missing resource");

    assert!(!resource.exists);
    assert_eq!(resource.size, 0);
}

#[tokio::test]
async fn test_get_resource_server_error() {
    let (server, mut client) = common::setup_filebrowser_mock().await;
    Mock::given(method("GET"))
        .and(path("/api/resources/broken.pdf"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client
        .get_resource(&RemotePath::new("broken.pdf").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        FileBrowserError::UnexpectedStatus {
            operation: "resource",
            status: 500
        }
    ));
}

#[tokio::test]
async fn test_get_resource_invalid_json() {
    let (server, mut client) = common::setup_filebrowser_mock().await;
    Mock::given(method("GET"))
        .and(path("/api/resources/odd.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = client
        .get_resource(&RemotePath::new("odd.pdf").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, FileBrowserError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_path_segments_are_percent_encoded() {
    let (server, mut client) = common::setup_filebrowser_mock().await;
    Mock::given(method("GET"))
        .and(path("/api/resources/my%20docs/q%3F%231.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "size": 7,
            "isDir": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resource = client
        .get_resource(&RemotePath::new("my docs/q?#1.pdf").unwrap())
        .await
        .unwrap();
    assert_eq!(resource.size, 7);
}

#[tokio::test]
async fn test_delete_resource() {
    let (server, mut client) = common::setup_filebrowser_mock().await;
    Mock::given(method("DELETE"))
        .and(path("/api/resources/uploads/old.pdf"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client
        .delete_resource(&RemotePath::new("uploads/old.pdf").unwrap())
        .await
        .expect("delete");
}

#[tokio::test]
async fn test_delete_missing_resource_succeeds() {
    let (server, mut client) = common::setup_filebrowser_mock().await;
    Mock::given(method("DELETE"))
        .and(path("/api/resources/gone.pdf"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    client
        .delete_resource(&RemotePath::new("gone.pdf").unwrap())
        .await
        .expect("404 on delete is success");
}

#[tokio::test]
async fn test_delete_forbidden() {
    let (server, mut client) = common::setup_filebrowser_mock().await;
    Mock::given(method("DELETE"))
        .and(path("/api/resources/locked.pdf"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = client
        .delete_resource(&RemotePath::new("locked.pdf").unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "delete request failed with status code: 403");
}
