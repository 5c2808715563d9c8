use futures_util::TryStreamExt;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::auth::{AuthError, DriveAuth};
use crate::gdrive::DriveDirectory;
use crate::remote::{EntryKind, RemoteDirectory, RemoteError};
use crate::tests::{fast_config, md5_hex};
use crate::walker::WalkError;
use crate::{mirror, MirrorError, MirrorOptions, MirrorRequest};

const FOLDER: &str = "application/vnd.google-apps.folder";

async fn drive(server: &MockServer) -> DriveDirectory {
    let auth = DriveAuth::with_api_base(
        "test-token",
        &format!("{}/drive/v3/", server.uri()),
    )
    .unwrap();
    DriveDirectory::new(auth)
}

fn list_query(parent: &str) -> String {
    format!("'{parent}' in parents and trashed = false")
}

#[tokio::test]
async fn metadata_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drive/v3/files/F1"))
        .and(header("authorization", "Bearer test-token"))
        .and(query_param("fields", "id,name,mimeType,md5Checksum"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "F1",
            "name": "report.pdf",
            "mimeType": "application/pdf",
            "md5Checksum": "abc123"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let entry = drive(&server).await.get_metadata("F1").await.unwrap();

    assert_eq!(entry.id, "F1");
    assert_eq!(entry.name, "report.pdf");
    assert_eq!(entry.kind, EntryKind::File);
    assert_eq!(entry.fingerprint, "abc123");
}

#[tokio::test]
async fn folder_metadata_has_empty_fingerprint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drive/v3/files/R"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "R",
            "name": "root",
            "mimeType": FOLDER
        })))
        .mount(&server)
        .await;

    let entry = drive(&server).await.get_metadata("R").await.unwrap();

    assert_eq!(entry.kind, EntryKind::Container);
    assert_eq!(entry.fingerprint, "");
}

#[tokio::test]
async fn listing_follows_page_tokens_and_skips_native_docs() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drive/v3/files"))
        .and(query_param("q", list_query("R")))
        .and(query_param("pageSize", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nextPageToken": "p2",
            "files": [
                {"id": "a", "name": "a.txt", "mimeType": "text/plain", "md5Checksum": "m-a"},
                {"id": "doc", "name": "notes", "mimeType": "application/vnd.google-apps.document"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/drive/v3/files"))
        .and(query_param("q", list_query("R")))
        .and(query_param("pageToken", "p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "files": [
                {"id": "S", "name": "sub", "mimeType": FOLDER}
            ]
        })))
        .with_priority(1)
        .mount(&server)
        .await;

    let remote = drive(&server).await;

    let first = remote.list_children("R", None, 2).await.unwrap();
    assert_eq!(first.entries.len(), 1);
    assert_eq!(first.entries[0].id, "a");
    assert_eq!(first.continuation(), Some("p2"));

    let second = remote.list_children("R", Some("p2"), 2).await.unwrap();
    assert_eq!(second.entries.len(), 1);
    assert_eq!(second.entries[0].kind, EntryKind::Container);
    assert_eq!(second.continuation(), None);
}

#[tokio::test]
async fn content_is_fetched_with_alt_media() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drive/v3/files/F1"))
        .and(query_param("alt", "media"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"file body".to_vec()))
        .mount(&server)
        .await;

    let stream = drive(&server).await.fetch_content("F1").await.unwrap();
    let chunks: Vec<bytes::Bytes> = stream.try_collect().await.unwrap();

    assert_eq!(chunks.concat(), b"file body");
}

#[tokio::test]
async fn http_errors_are_mapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drive/v3/files/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/drive/v3/files/busy"))
        .respond_with(ResponseTemplate::new(503).set_body_string("backend error"))
        .mount(&server)
        .await;

    let remote = drive(&server).await;

    assert!(matches!(
        remote.get_metadata("gone").await,
        Err(RemoteError::NotFound(id)) if id == "gone"
    ));
    assert!(matches!(
        remote.fetch_content("busy").await,
        Err(RemoteError::Status { status: 503, .. })
    ));
}

#[tokio::test]
async fn native_document_root_is_rejected_before_download() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drive/v3/files/DOC"))
        .and(query_param("fields", "id,name,mimeType,md5Checksum"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "DOC",
            "name": "notes",
            "mimeType": "application/vnd.google-apps.document"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/drive/v3/files/DOC"))
        .and(query_param("alt", "media"))
        .respond_with(ResponseTemplate::new(403))
        .with_priority(1)
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let request = MirrorRequest {
        root_id: "DOC".into(),
        root_local_path: dir.path().join("notes"),
        list_path: dir.path().join("list.json"),
    };
    let options = MirrorOptions { transfer: fast_config(), ..Default::default() };

    let err = mirror(&drive(&server).await, &request, &options)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        MirrorError::Walk(WalkError::Metadata {
            source: RemoteError::NotDownloadable { .. },
            ..
        })
    ));
    assert!(!request.list_path.exists());
}

#[test]
fn empty_token_is_rejected() {
    assert!(matches!(DriveAuth::new("  "), Err(AuthError::EmptyToken)));
}

#[tokio::test]
async fn mirrors_drive_folder_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drive/v3/files/R"))
        .and(query_param("fields", "id,name,mimeType,md5Checksum"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "R", "name": "root", "mimeType": FOLDER
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/drive/v3/files"))
        .and(query_param("q", list_query("R")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "files": [
                {"id": "a", "name": "a.txt", "mimeType": "text/plain", "md5Checksum": md5_hex(b"alpha")},
                {"id": "S", "name": "sub", "mimeType": FOLDER}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/drive/v3/files"))
        .and(query_param("q", list_query("S")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "files": [
                {"id": "b", "name": "b.txt", "mimeType": "text/plain", "md5Checksum": md5_hex(b"beta")}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    for (id, body) in [("a", "alpha"), ("b", "beta")] {
        Mock::given(method("GET"))
            .and(path(format!("/drive/v3/files/{id}")))
            .and(query_param("alt", "media"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;
    }

    let dir = tempfile::tempdir().unwrap();
    let request = MirrorRequest {
        root_id: "R".into(),
        root_local_path: dir.path().join("out"),
        list_path: dir.path().join("list.json"),
    };
    let options = MirrorOptions { transfer: fast_config(), ..Default::default() };
    let remote = drive(&server).await;

    let summary = mirror(&remote, &request, &options).await.unwrap();
    // 第二次运行只读本地任务列表
    mirror(&remote, &request, &options).await.unwrap();

    assert_eq!(summary.downloaded, 2);
    assert_eq!(std::fs::read(dir.path().join("out/sub/b.txt")).unwrap(), b"beta");
}
