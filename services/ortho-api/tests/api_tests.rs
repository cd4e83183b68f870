//! HTTP-level tests driving the router directly.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use ortho_api::config::ServiceConfig;
use ortho_api::create_router;
use ortho_api::state::AppState;
use test_utils::{zip_archive, GeoTiffFixture, TempStorage};

// ============================================================================
// Helper functions
// ============================================================================

fn app(storage: &TempStorage) -> Router {
    let state = AppState::new(ServiceConfig::new(storage.root()), None);
    create_router(Arc::new(state))
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn send_json(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let (status, body) = send(app, method, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

// ============================================================================
// Processing
// ============================================================================

#[tokio::test]
async fn test_process_then_get_bounds() {
    let storage = TempStorage::new();
    storage.add_orthophoto_project("p1", &GeoTiffFixture::utm33n());
    let app = app(&storage);

    let (status, body) = send_json(&app, "POST", "/projects/p1/process/").await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Unzipped and processed successfully");
    assert!(body["png_path"]
        .as_str()
        .unwrap()
        .ends_with("odm_orthophoto/odm_orthophoto.png"));
    assert!(body["bounds_json_path"].as_str().unwrap().ends_with("bounds.json"));

    let request = Request::builder()
        .uri("/projects/p1/bounds")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    let served = response.into_body().collect().await.unwrap().to_bytes();

    // Byte for byte what the pipeline wrote, indentation and key order included
    let on_disk = std::fs::read(storage.project_dir("p1").join("bounds.json")).unwrap();
    assert_eq!(served.as_ref(), on_disk.as_slice());

    let text = std::str::from_utf8(&served).unwrap();
    assert!(text.starts_with("{\n    \"top_left\": {\n        \"lat\": "));
    let top_left = text.find("\"top_left\"").unwrap();
    let bottom_right = text.find("\"bottom_right\"").unwrap();
    let center = text.find("\"center\"").unwrap();
    assert!(top_left < bottom_right && bottom_right < center);

    let bounds: Value = serde_json::from_slice(&served).unwrap();
    assert_eq!(bounds, body["bounds"]);
}

#[tokio::test]
async fn test_process_without_trailing_slash() {
    let storage = TempStorage::new();
    storage.add_orthophoto_project("p1", &GeoTiffFixture::utm33n());

    let (status, _) = send_json(&app(&storage), "POST", "/projects/p1/process").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_process_missing_archive() {
    let storage = TempStorage::new();
    storage.project_dir("p1");

    let (status, body) = send_json(&app(&storage), "POST", "/projects/p1/process/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "all.zip file not found in project folder");
}

#[tokio::test]
async fn test_process_archive_without_orthophoto() {
    let storage = TempStorage::new();
    storage.add_archive("p1", &zip_archive(&[("readme.txt", b"nothing here")]));

    let (status, body) = send_json(&app(&storage), "POST", "/projects/p1/process/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["detail"],
        "GeoTIFF file odm_orthophoto.tif not found in odm_orthophoto/"
    );
}

#[tokio::test]
async fn test_process_corrupt_archive_is_server_error() {
    let storage = TempStorage::new();
    storage.add_archive("p1", b"not a zip");

    let (status, body) = send_json(&app(&storage), "POST", "/projects/p1/process/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().starts_with("Archive extraction failed"));
}

#[tokio::test]
async fn test_bounds_before_processing() {
    let storage = TempStorage::new();
    storage.project_dir("p1");

    let (status, body) = send_json(&app(&storage), "GET", "/projects/p1/bounds").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "bounds.json not found in the project folder");
}

// ============================================================================
// Storage inspection
// ============================================================================

#[tokio::test]
async fn test_check_storage_root() {
    let storage = TempStorage::new();
    storage.project_dir("b");
    storage.project_dir("a");
    let app = app(&storage);

    let (status, body) = send_json(&app, "GET", "/check-storage").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Path is accessible.");
    assert_eq!(body["files"], serde_json::json!(["projects"]));

    let (status, body) = send_json(&app, "GET", "/check-storage?subpath=projects").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["files"], serde_json::json!(["a", "b"]));
}

#[tokio::test]
async fn test_check_storage_traversal() {
    let storage = TempStorage::new();

    let (status, body) =
        send_json(&app(&storage), "GET", "/check-storage?subpath=../../etc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Subpath is outside the allowed storage directory.");
}

#[tokio::test]
async fn test_check_storage_missing_and_file() {
    let storage = TempStorage::new();
    std::fs::write(storage.root().join("notes.txt"), b"x").unwrap();
    let app = app(&storage);

    let (status, body) = send_json(&app, "GET", "/check-storage?subpath=absent").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].as_str().unwrap().starts_with("Path does not exist: "));

    let (status, body) = send_json(&app, "GET", "/check-storage?subpath=notes.txt").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().starts_with("Path is not a directory: "));
}

// ============================================================================
// Orthophoto
// ============================================================================

#[tokio::test]
async fn test_orthophoto_served_after_processing() {
    let storage = TempStorage::new();
    let fixture = GeoTiffFixture::utm33n();
    storage.add_orthophoto_project("p1", &fixture);
    let app = app(&storage);

    let (status, _) = send(&app, "GET", "/projects/p1/orthophoto").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send_json(&app, "POST", "/projects/p1/process/").await;

    let request = Request::builder()
        .uri("/projects/p1/orthophoto?size=small")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");

    // Small files are returned at full size
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let png = image::load_from_memory(&body).unwrap();
    assert_eq!((png.width(), png.height()), (fixture.width, fixture.height));
}

#[tokio::test]
async fn test_orthophoto_unknown_size() {
    let storage = TempStorage::new();
    let (status, body) =
        send_json(&app(&storage), "GET", "/projects/p1/orthophoto?size=huge").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("size"));
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_and_ready() {
    let storage = TempStorage::new();
    let app = app(&storage);

    let (status, body) = send_json(&app, "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send_json(&app, "GET", "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], true);
}

#[tokio::test]
async fn test_not_ready_without_storage_root() {
    let storage = TempStorage::new();
    let state = AppState::new(ServiceConfig::new(storage.root().join("missing")), None);
    let app = create_router(Arc::new(state));

    let (status, body) = send_json(&app, "GET", "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["ready"], false);
}

#[tokio::test]
async fn test_metrics_without_recorder() {
    let storage = TempStorage::new();
    let (status, body) = send(&app(&storage), "GET", "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}
