//! Manipulation record endpoint tests: listing, showing, and deleting.

use http::StatusCode;
use image::ImageFormat;
use uuid::Uuid;

use crate::helpers::{Part, TestApp, image_bytes};

#[tokio::test]
async fn test_list_returns_only_own_records_newest_first() {
    let app = TestApp::new().await;
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let png = image_bytes(10, 10, ImageFormat::Png);

    let first = app.upload_resize(alice, "first.png", &png, "5").await;
    let second = app.upload_resize(alice, "second.png", &png, "5").await;
    app.upload_resize(bob, "bob.png", &png, "5").await;

    let response = app
        .request("GET", "/api/v1/image", None, Some(&app.token_for(alice)))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let page = &response.body["data"];
    assert_eq!(page["total"], 2);
    let items = page["items"].as_array().expect("items");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], second["id"]);
    assert_eq!(items[1]["id"], first["id"]);
}

#[tokio::test]
async fn test_list_paginates() {
    let app = TestApp::new().await;
    let user = Uuid::new_v4();
    let png = image_bytes(10, 10, ImageFormat::Png);
    for name in ["a.png", "b.png", "c.png"] {
        app.upload_resize(user, name, &png, "5").await;
    }

    let response = app
        .request(
            "GET",
            "/api/v1/image?page=2&per_page=2",
            None,
            Some(&app.token_for(user)),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let page = &response.body["data"];
    assert_eq!(page["total"], 3);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["page"], 2);
    let items = page["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "a.png");
}

#[tokio::test]
async fn test_show_own_record() {
    let app = TestApp::new().await;
    let user = Uuid::new_v4();
    let png = image_bytes(10, 10, ImageFormat::Png);
    let created = app.upload_resize(user, "a.png", &png, "5").await;
    let id = created["id"].as_str().expect("id");

    let response = app
        .request(
            "GET",
            &format!("/api/v1/image/{id}"),
            None,
            Some(&app.token_for(user)),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"], created);
}

#[tokio::test]
async fn test_foreign_record_is_forbidden() {
    let app = TestApp::new().await;
    let owner = Uuid::new_v4();
    let png = image_bytes(10, 10, ImageFormat::Png);
    let created = app.upload_resize(owner, "a.png", &png, "5").await;
    let id = created["id"].as_str().expect("id");
    let intruder = app.token_for(Uuid::new_v4());

    let show = app
        .request("GET", &format!("/api/v1/image/{id}"), None, Some(&intruder))
        .await;
    assert_eq!(show.status, StatusCode::FORBIDDEN);
    assert_eq!(show.body["message"], "Unauthorized");

    let destroy = app
        .request("DELETE", &format!("/api/v1/image/{id}"), None, Some(&intruder))
        .await;
    assert_eq!(destroy.status, StatusCode::FORBIDDEN);
    assert_eq!(app.store.record_count().await, 1);
}

#[tokio::test]
async fn test_missing_record_is_not_found() {
    let app = TestApp::new().await;
    let token = app.token_for(Uuid::new_v4());
    let id = Uuid::new_v4();

    let show = app
        .request("GET", &format!("/api/v1/image/{id}"), None, Some(&token))
        .await;
    assert_eq!(show.status, StatusCode::NOT_FOUND);

    let destroy = app
        .request("DELETE", &format!("/api/v1/image/{id}"), None, Some(&token))
        .await;
    assert_eq!(destroy.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_destroy_keeps_files_by_default() {
    let app = TestApp::new().await;
    let user = Uuid::new_v4();
    let png = image_bytes(10, 10, ImageFormat::Png);
    let created = app.upload_resize(user, "a.png", &png, "5").await;
    let id = created["id"].as_str().expect("id");
    let token = app.token_for(user);

    let response = app
        .request("DELETE", &format!("/api/v1/image/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let show = app
        .request("GET", &format!("/api/v1/image/{id}"), None, Some(&token))
        .await;
    assert_eq!(show.status, StatusCode::NOT_FOUND);
    assert!(app.public_path("images/tok1/a-resized.png").is_file());
}

#[tokio::test]
async fn test_destroy_removes_files_when_configured() {
    let app = TestApp::with_config(|c| c.storage.cleanup.remove_on_delete = true).await;
    let user = Uuid::new_v4();
    let png = image_bytes(10, 10, ImageFormat::Png);
    let created = app.upload_resize(user, "a.png", &png, "5").await;
    let id = created["id"].as_str().expect("id");

    let response = app
        .request(
            "DELETE",
            &format!("/api/v1/image/{id}"),
            None,
            Some(&app.token_for(user)),
        )
        .await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(!app.public_path("images/tok1").exists());
}

#[tokio::test]
async fn test_by_album_lists_album_records() {
    let app = TestApp::new().await;
    let user = Uuid::new_v4();
    let token = app.token_for(user);
    let album_id = app.create_album(user, "Trip").await;
    let png = image_bytes(10, 10, ImageFormat::Png);

    app.upload_resize(user, "loose.png", &png, "5").await;
    let response = app
        .multipart(
            "/api/v1/image/resize",
            &[
                Part::File("image", "in-album.png", &png),
                Part::Text("w", "5"),
                Part::Text("album_id", &album_id),
            ],
            &token,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let listed = app
        .request(
            "GET",
            &format!("/api/v1/image/by-album/{album_id}"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(listed.status, StatusCode::OK);
    let items = listed.body["data"]["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "in-album.png");
}

#[tokio::test]
async fn test_by_album_foreign_album_is_forbidden() {
    let app = TestApp::new().await;
    let album_id = app.create_album(Uuid::new_v4(), "Private").await;

    let response = app
        .request(
            "GET",
            &format!("/api/v1/image/by-album/{album_id}"),
            None,
            Some(&app.token_for(Uuid::new_v4())),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
