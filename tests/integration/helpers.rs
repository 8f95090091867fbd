//! Shared test helpers for integration tests.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::Path;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::routing::get;
use http::{Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use pixelhub_api::auth::JwtEncoder;
use pixelhub_core::config::{AppConfig, DatabaseProvider};
use pixelhub_database::MemoryStore;
use pixelhub_storage::token::SequenceTokenSource;

/// Base URL used for public file links in tests.
pub const PUBLIC_URL_BASE: &str = "http://images.test";

const BOUNDARY: &str = "pixelhub-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store, for direct inspection
    pub store: MemoryStore,
    /// Application config
    pub config: AppConfig,
    encoder: JwtEncoder,
    public_root: TempDir,
}

impl TestApp {
    /// Create a new test application with default settings.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a new test application, adjusting configuration first.
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let public_root = tempfile::tempdir().expect("Failed to create public root");

        let mut config = AppConfig::default();
        config.database.provider = DatabaseProvider::Memory;
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.storage.public_root = public_root.path().to_string_lossy().into_owned();
        config.storage.public_url_base = PUBLIC_URL_BASE.to_string();
        config.storage.max_upload_size_bytes = 4 * 1024 * 1024;
        config.storage.fetch.timeout_seconds = 5;
        adjust(&mut config);

        let store = MemoryStore::new();
        let state = pixelhub_api::build_state(
            config.clone(),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(SequenceTokenSource::new("tok")),
        )
        .await
        .expect("Failed to build state");

        Self {
            router: pixelhub_api::build_app(state),
            store,
            encoder: JwtEncoder::new(&config.auth),
            config,
            public_root,
        }
    }

    /// Mint a bearer token for `user_id`.
    pub fn token_for(&self, user_id: Uuid) -> String {
        self.encoder.issue(user_id).expect("Failed to issue token")
    }

    /// Absolute path of a public-root-relative path.
    pub fn public_path(&self, relative: &str) -> PathBuf {
        self.public_root.path().join(relative)
    }

    /// Number of working directories under `images/`.
    pub fn working_dir_count(&self) -> usize {
        std::fs::read_dir(self.public_path("images"))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    /// Make a JSON HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        self.send(req.body(Body::from(body_str)).expect("Failed to build request"))
            .await
    }

    /// Make a `multipart/form-data` POST request to the test app
    pub async fn multipart(&self, path: &str, parts: &[Part<'_>], token: &str) -> TestResponse {
        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::from(multipart_body(parts)))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Fetch a raw (non-JSON) response.
    pub async fn get_raw(&self, path: &str) -> (StatusCode, Vec<u8>) {
        let req = Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");
        (status, bytes.to_vec())
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Resize an uploaded image as `user_id`, asserting success.
    pub async fn upload_resize(&self, user_id: Uuid, name: &str, bytes: &[u8], w: &str) -> Value {
        let token = self.token_for(user_id);
        let response = self
            .multipart(
                "/api/v1/image/resize",
                &[Part::File("image", name, bytes), Part::Text("w", w)],
                &token,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Resize failed: {:?}",
            response.body
        );
        response.body["data"].clone()
    }

    /// Create an album as `user_id`, returning its ID.
    pub async fn create_album(&self, user_id: Uuid, name: &str) -> String {
        let token = self.token_for(user_id);
        let response = self
            .request(
                "POST",
                "/api/v1/album",
                Some(serde_json::json!({ "name": name })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["data"]["id"]
            .as_str()
            .expect("album id")
            .to_string()
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// One multipart form field.
pub enum Part<'a> {
    /// `name`, value
    Text(&'a str, &'a str),
    /// `name`, file name, content
    File(&'a str, &'a str, &'a [u8]),
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, file_name, content) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(content);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Encode a solid-color image of the given size.
pub fn image_bytes(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([120, 80, 40]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format)
        .expect("Failed to encode test image");
    out.into_inner()
}

/// Decoded dimensions of a file on disk.
pub fn dimensions_of(path: &std::path::Path) -> (u32, u32) {
    let img = image::open(path).expect("Failed to open output image");
    (img.width(), img.height())
}

/// Serve `files` over HTTP on an ephemeral port, returning the base URL.
pub async fn serve_remote(files: Vec<(&'static str, Vec<u8>)>) -> String {
    let files: Arc<HashMap<String, Vec<u8>>> = Arc::new(
        files
            .into_iter()
            .map(|(name, bytes)| (name.to_string(), bytes))
            .collect(),
    );

    let router = Router::new().route(
        "/files/{name}",
        get(move |Path(name): Path<String>| {
            let files = Arc::clone(&files);
            async move {
                match files.get(&name) {
                    Some(bytes) => {
                        ([(CONTENT_TYPE, "application/octet-stream")], bytes.clone()).into_response()
                    }
                    None => StatusCode::NOT_FOUND.into_response(),
                }
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind remote server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    format!("http://{addr}/files")
}
