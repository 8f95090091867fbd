//! Resize endpoint tests.

use http::StatusCode;
use image::ImageFormat;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::{
    PUBLIC_URL_BASE, Part, TestApp, dimensions_of, image_bytes, serve_remote,
};

#[tokio::test]
async fn test_resize_uploaded_jpeg_by_width() {
    let app = TestApp::new().await;
    let user = Uuid::new_v4();
    let photo = image_bytes(800, 600, ImageFormat::Jpeg);

    let data = app.upload_resize(user, "photo.jpg", &photo, "400").await;

    assert_eq!(data["type"], "resize");
    assert_eq!(data["name"], "photo.jpg");
    assert_eq!(data["path"], "images/tok1/photo.jpg");
    assert_eq!(data["output_path"], "images/tok1/photo-resized.jpg");
    assert_eq!(data["user_id"], user.to_string());
    assert!(data["album_id"].is_null());
    assert_eq!(data["data"], json!({ "w": "400" }));
    assert_eq!(
        data["output_url"],
        format!("{PUBLIC_URL_BASE}/images/tok1/photo-resized.jpg")
    );

    assert!(app.public_path("images/tok1/photo.jpg").is_file());
    assert_eq!(
        dimensions_of(&app.public_path("images/tok1/photo-resized.jpg")),
        (400, 300)
    );
}

#[tokio::test]
async fn test_resize_remote_png_by_percent() {
    let app = TestApp::new().await;
    let user = Uuid::new_v4();
    let base = serve_remote(vec![("pic.png", image_bytes(200, 200, ImageFormat::Png))]).await;
    let token = app.token_for(user);
    let url = format!("{base}/pic.png");

    let response = app
        .multipart(
            "/api/v1/image/resize",
            &[
                Part::Text("image", &url),
                Part::Text("w", "10%"),
                Part::Text("h", "20%"),
            ],
            &token,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    let data = &response.body["data"];
    assert_eq!(data["name"], "pic.png");
    assert_eq!(data["output_path"], "images/tok1/pic-resized.png");
    assert_eq!(data["data"], json!({ "w": "10%", "h": "20%" }));
    assert_eq!(
        dimensions_of(&app.public_path("images/tok1/pic-resized.png")),
        (20, 40)
    );
}

#[tokio::test]
async fn test_resize_accepts_json_body_with_numeric_width() {
    let app = TestApp::new().await;
    let user = Uuid::new_v4();
    let base = serve_remote(vec![("wide.png", image_bytes(100, 50, ImageFormat::Png))]).await;
    let token = app.token_for(user);

    let response = app
        .request(
            "POST",
            "/api/v1/image/resize",
            Some(json!({ "image": format!("{base}/wide.png"), "w": 50 })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(
        dimensions_of(&app.public_path("images/tok1/wide-resized.png")),
        (50, 25)
    );
}

#[tokio::test]
async fn test_resize_requires_token() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/v1/image/resize",
            Some(json!({ "image": "http://example.test/a.png", "w": "10" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.working_dir_count(), 0);
}

#[tokio::test]
async fn test_resize_rejects_invalid_width_without_side_effects() {
    let app = TestApp::new().await;
    let user = Uuid::new_v4();
    let token = app.token_for(user);
    let photo = image_bytes(10, 10, ImageFormat::Png);

    for w in ["abc", "0", "10%x", "-5"] {
        let response = app
            .multipart(
                "/api/v1/image/resize",
                &[Part::File("image", "a.png", &photo), Part::Text("w", w)],
                &token,
            )
            .await;
        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY, "w = {w}");
        assert_eq!(response.body["error"], "VALIDATION_ERROR");
    }

    assert_eq!(app.working_dir_count(), 0);
    assert_eq!(app.store.record_count().await, 0);
}

#[tokio::test]
async fn test_resize_rejects_mixed_dimension_modes() {
    let app = TestApp::new().await;
    let token = app.token_for(Uuid::new_v4());
    let photo = image_bytes(10, 10, ImageFormat::Png);

    let response = app
        .multipart(
            "/api/v1/image/resize",
            &[
                Part::File("image", "a.png", &photo),
                Part::Text("w", "50%"),
                Part::Text("h", "20"),
            ],
            &token,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.working_dir_count(), 0);
}

#[tokio::test]
async fn test_resize_into_foreign_album_is_forbidden() {
    let app = TestApp::new().await;
    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();
    let album_id = app.create_album(owner, "Holidays").await;
    let photo = image_bytes(10, 10, ImageFormat::Png);

    let response = app
        .multipart(
            "/api/v1/image/resize",
            &[
                Part::File("image", "a.png", &photo),
                Part::Text("w", "5"),
                Part::Text("album_id", &album_id),
            ],
            &app.token_for(intruder),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["message"], "Unauthorized");
    assert_eq!(app.working_dir_count(), 0);
    assert_eq!(app.store.record_count().await, 0);
}

#[tokio::test]
async fn test_resize_into_own_album() {
    let app = TestApp::new().await;
    let user = Uuid::new_v4();
    let album_id = app.create_album(user, "Holidays").await;
    let photo = image_bytes(20, 4, ImageFormat::Png);

    let response = app
        .multipart(
            "/api/v1/image/resize",
            &[
                Part::File("image", "a.png", &photo),
                Part::Text("w", "10"),
                Part::Text("album_id", &album_id),
            ],
            &app.token_for(user),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["data"]["album_id"], album_id.as_str());
    assert_eq!(
        response.body["data"]["data"],
        json!({ "w": "10", "album_id": album_id })
    );
}

#[tokio::test]
async fn test_resize_non_image_upload_cleans_up() {
    let app = TestApp::new().await;
    let token = app.token_for(Uuid::new_v4());

    let response = app
        .multipart(
            "/api/v1/image/resize",
            &[
                Part::File("image", "notes.png", b"definitely not an image"),
                Part::Text("w", "10"),
            ],
            &token,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["error"], "INVALID_IMAGE");
    assert_eq!(app.working_dir_count(), 0);
    assert_eq!(app.store.record_count().await, 0);
}

#[tokio::test]
async fn test_resize_non_image_upload_kept_when_cleanup_disabled() {
    let app = TestApp::with_config(|c| c.storage.cleanup.remove_on_failure = false).await;
    let token = app.token_for(Uuid::new_v4());

    let response = app
        .multipart(
            "/api/v1/image/resize",
            &[
                Part::File("image", "notes.png", b"definitely not an image"),
                Part::Text("w", "10"),
            ],
            &token,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.working_dir_count(), 1);
    assert_eq!(app.store.record_count().await, 0);
}

#[tokio::test]
async fn test_resize_unreachable_url_is_bad_gateway() {
    let app = TestApp::new().await;
    let base = serve_remote(Vec::new()).await;
    let token = app.token_for(Uuid::new_v4());
    let url = format!("{base}/missing.png");

    let response = app
        .multipart(
            "/api/v1/image/resize",
            &[Part::Text("image", &url), Part::Text("w", "10")],
            &token,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.body["error"], "ACQUIRE_FAILED");
    assert_eq!(app.working_dir_count(), 0);
}

#[tokio::test]
async fn test_resize_rejects_non_http_url() {
    let app = TestApp::new().await;
    let token = app.token_for(Uuid::new_v4());

    let response = app
        .multipart(
            "/api/v1/image/resize",
            &[Part::Text("image", "file:///etc/passwd"), Part::Text("w", "10")],
            &token,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.working_dir_count(), 0);
}

#[tokio::test]
async fn test_resized_file_is_served_publicly() {
    let app = TestApp::new().await;
    let photo = image_bytes(40, 40, ImageFormat::Png);
    let data = app
        .upload_resize(Uuid::new_v4(), "square.png", &photo, "20")
        .await;

    let output_path = data["output_path"].as_str().expect("output_path");
    let (status, bytes) = app.get_raw(&format!("/{output_path}")).await;

    assert_eq!(status, StatusCode::OK);
    let served = image::load_from_memory(&bytes).expect("served bytes decode");
    assert_eq!((served.width(), served.height()), (20, 20));
}

#[tokio::test]
async fn test_resize_rejects_overlong_file_name() {
    let app = TestApp::new().await;
    let token = app.token_for(Uuid::new_v4());
    let photo = image_bytes(8, 8, ImageFormat::Jpeg);
    let name = format!("{}.jpg", "a".repeat(246));

    let response = app
        .multipart(
            "/api/v1/image/resize",
            &[Part::File("image", &name, &photo), Part::Text("w", "4")],
            &token,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert_eq!(app.working_dir_count(), 0);
}

#[tokio::test]
async fn test_resize_rejects_oversize_target_area() {
    let app = TestApp::new().await;
    let token = app.token_for(Uuid::new_v4());
    let dot = image_bytes(1, 1, ImageFormat::Png);

    let response = app
        .multipart(
            "/api/v1/image/resize",
            &[
                Part::File("image", "dot.png", &dot),
                Part::Text("w", "20000"),
                Part::Text("h", "20000"),
            ],
            &token,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert_eq!(app.working_dir_count(), 0);
    assert_eq!(app.store.record_count().await, 0);
}
