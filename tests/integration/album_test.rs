//! Album endpoint tests.

use http::StatusCode;
use image::ImageFormat;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::{Part, TestApp, image_bytes};

#[tokio::test]
async fn test_album_crud() {
    let app = TestApp::new().await;
    let user = Uuid::new_v4();
    let token = app.token_for(user);

    let id = app.create_album(user, "  Summer  ").await;

    let show = app
        .request("GET", &format!("/api/v1/album/{id}"), None, Some(&token))
        .await;
    assert_eq!(show.status, StatusCode::OK);
    assert_eq!(show.body["data"]["name"], "Summer");
    assert_eq!(show.body["data"]["user_id"], user.to_string());

    let renamed = app
        .request(
            "PUT",
            &format!("/api/v1/album/{id}"),
            Some(json!({ "name": "Winter" })),
            Some(&token),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.body["data"]["name"], "Winter");

    let listed = app
        .request("GET", "/api/v1/album", None, Some(&token))
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["data"]["total"], 1);

    let deleted = app
        .request("DELETE", &format!("/api/v1/album/{id}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = app
        .request("GET", &format!("/api/v1/album/{id}"), None, Some(&token))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_album_rejects_blank_name() {
    let app = TestApp::new().await;
    let token = app.token_for(Uuid::new_v4());

    let response = app
        .request(
            "POST",
            "/api/v1/album",
            Some(json!({ "name": "" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_album_malformed_body_uses_error_shape() {
    let app = TestApp::new().await;
    let user = Uuid::new_v4();
    let token = app.token_for(user);

    let create = app
        .request(
            "POST",
            "/api/v1/album",
            Some(json!({ "title": "wrong field" })),
            Some(&token),
        )
        .await;
    assert_eq!(create.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(create.body["error"], "VALIDATION_ERROR");
    assert!(create.body["message"].is_string());

    let id = app.create_album(user, "Kept").await;
    let rename = app
        .request(
            "PUT",
            &format!("/api/v1/album/{id}"),
            Some(json!({ "name": 42 })),
            Some(&token),
        )
        .await;
    assert_eq!(rename.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(rename.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_foreign_album_is_forbidden() {
    let app = TestApp::new().await;
    let id = app.create_album(Uuid::new_v4(), "Mine").await;
    let intruder = app.token_for(Uuid::new_v4());

    let show = app
        .request("GET", &format!("/api/v1/album/{id}"), None, Some(&intruder))
        .await;
    assert_eq!(show.status, StatusCode::FORBIDDEN);

    let rename = app
        .request(
            "PUT",
            &format!("/api/v1/album/{id}"),
            Some(json!({ "name": "Stolen" })),
            Some(&intruder),
        )
        .await;
    assert_eq!(rename.status, StatusCode::FORBIDDEN);

    let delete = app
        .request("DELETE", &format!("/api/v1/album/{id}"), None, Some(&intruder))
        .await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_album_delete_cascades_to_records() {
    let app = TestApp::new().await;
    let user = Uuid::new_v4();
    let token = app.token_for(user);
    let album_id = app.create_album(user, "Doomed").await;
    let png = image_bytes(10, 10, ImageFormat::Png);

    let response = app
        .multipart(
            "/api/v1/image/resize",
            &[
                Part::File("image", "a.png", &png),
                Part::Text("w", "5"),
                Part::Text("album_id", &album_id),
            ],
            &token,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let record_id = response.body["data"]["id"].as_str().expect("id").to_string();

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/v1/album/{album_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let show = app
        .request(
            "GET",
            &format!("/api/v1/image/{record_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(show.status, StatusCode::NOT_FOUND);
    assert_eq!(app.store.record_count().await, 0);
    assert!(app.public_path("images/tok1/a-resized.png").is_file());
}
