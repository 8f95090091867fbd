//! Album management.

pub mod service;

pub use service::AlbumService;
