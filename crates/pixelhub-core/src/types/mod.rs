//! Core type definitions used across the PixelHub workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
