//! Album domain entities.

pub mod model;

pub use model::{Album, CreateAlbum};
