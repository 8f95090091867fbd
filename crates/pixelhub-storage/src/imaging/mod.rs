//! Image decode, resize and save.

pub mod backend;
pub mod rust_backend;

pub use backend::{DecodedImage, Dimensions, ImageBackend};
pub use rust_backend::RustImageBackend;
