//! Enhancement API integration tests.
//!
//! Run with: `cargo test -p pixlift-api --test enhance_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{setup_test_app, ProviderScript, TEST_BASE_URL};

fn image_form() -> MultipartForm {
    MultipartForm::new().add_part(
        "image",
        Part::bytes(b"fake image bytes".to_vec())
            .file_name("photo.jpg")
            .mime_type("image/jpeg"),
    )
}

#[tokio::test]
async fn test_enhance_succeeds_end_to_end() {
    let app = setup_test_app(ProviderScript::SucceedAfter(2)).await;
    let client = app.client();

    let response = client.post("/api/enhance").multipart(image_form()).await;
    assert_eq!(response.status_code(), 200);

    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);

    let filename = body["filename"].as_str().unwrap();
    assert!(filename.starts_with("enhanced_"));
    assert!(filename.ends_with(".jpg"));
    assert_eq!(
        body["localUrl"].as_str().unwrap(),
        format!("{}/{}", TEST_BASE_URL, filename)
    );
    assert!(body["originalUrl"].as_str().unwrap().contains("/artifact.jpg"));

    // Exactly as many status calls as the mock needed to report success.
    assert_eq!(app.poll_calls(), 2);

    // Spooled upload removed after processing.
    assert_eq!(app.spooled_upload_count(), 0);

    // The localUrl path resolves to the stored artifact.
    let artifact = client.get(&format!("/{}", filename)).await;
    assert_eq!(artifact.status_code(), 200);
    assert_eq!(artifact.as_bytes().to_vec(), b"enhanced-bytes".to_vec());
}

#[tokio::test]
async fn test_enhance_without_image_field_returns_400() {
    let app = setup_test_app(ProviderScript::SucceedAfter(1)).await;

    let form = MultipartForm::new().add_text("scaleRatio", "4");
    let response = app.client().post("/api/enhance").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body, serde_json::json!({"error": "No file uploaded"}));

    // No provider traffic for a rejected request.
    assert_eq!(app.poll_calls(), 0);
}

#[tokio::test]
async fn test_enhance_with_empty_image_field_returns_400() {
    let app = setup_test_app(ProviderScript::SucceedAfter(1)).await;

    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(Vec::new())
            .file_name("empty.jpg")
            .mime_type("image/jpeg"),
    );
    let response = app.client().post("/api/enhance").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "No file uploaded");
}

#[tokio::test]
async fn test_enhance_provider_error_returns_500_and_cleans_up() {
    let app = setup_test_app(ProviderScript::FailImmediately).await;

    let response = app.client().post("/api/enhance").multipart(image_form()).await;

    assert_eq!(response.status_code(), 500);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Image enhancement failed");
    assert!(body["details"].as_str().unwrap().contains("error status"));

    // Terminal error on the first poll: no further attempts.
    assert_eq!(app.poll_calls(), 1);

    // Spooled upload removed on the failure path.
    assert_eq!(app.spooled_upload_count(), 0);
}

#[tokio::test]
async fn test_enhance_polling_timeout_after_attempt_budget() {
    let app = setup_test_app(ProviderScript::AlwaysPending).await;

    let response = app.client().post("/api/enhance").multipart(image_form()).await;

    assert_eq!(response.status_code(), 500);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Image enhancement failed");
    assert!(body["details"].as_str().unwrap().contains("polling attempts"));

    // The configured attempt budget (3 in tests) is exhausted exactly.
    assert_eq!(app.poll_calls(), 3);
    assert_eq!(app.spooled_upload_count(), 0);
}

#[tokio::test]
async fn test_get_unknown_artifact_returns_404() {
    let app = setup_test_app(ProviderScript::SucceedAfter(1)).await;

    let response = app.client().get("/enhanced_12345_aaaa.jpg").await;

    assert_eq!(response.status_code(), 404);
    let body: serde_json::Value = response.json();
    assert_eq!(body, serde_json::json!({"error": "File not found"}));
}

#[tokio::test]
async fn test_get_non_artifact_name_returns_404() {
    let app = setup_test_app(ProviderScript::SucceedAfter(1)).await;

    let response = app.client().get("/favicon.ico").await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = setup_test_app(ProviderScript::SucceedAfter(1)).await;
    let client = app.client();

    let response = client.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let response = client.get("/health/ready").await;
    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn test_concurrent_requests_produce_distinct_filenames() {
    let app = setup_test_app(ProviderScript::SucceedAfter(1)).await;
    let client = app.client();

    let mut names = std::collections::HashSet::new();
    for _ in 0..10 {
        let response = client.post("/api/enhance").multipart(image_form()).await;
        assert_eq!(response.status_code(), 200);
        let body: serde_json::Value = response.json();
        assert!(names.insert(body["filename"].as_str().unwrap().to_string()));
    }
    assert_eq!(names.len(), 10);
}
