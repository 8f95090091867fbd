//! # pixelhub-api
//!
//! HTTP API layer for PixelHub built on Axum.
//!
//! Provides the REST endpoints, bearer token verification, middleware
//! (CORS, logging), extractors, DTOs, and error mapping.

pub mod app;
pub mod auth;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state};
pub use state::AppState;
