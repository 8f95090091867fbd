//! # pixelhub-core
//!
//! Core crate for PixelHub. Contains configuration schemas, pagination
//! types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other PixelHub crates.

pub mod config;
pub mod error;
#[cfg(feature = "axum")]
pub mod http;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
