//! Maps domain `AppError` to HTTP responses.
//!
//! The `IntoResponse` impl lives in `pixelhub_core::http` (orphan rule);
//! it is re-exported here.

pub use pixelhub_core::http::{ApiErrorResponse, status_for};
