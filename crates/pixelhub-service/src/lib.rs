//! # pixelhub-service
//!
//! Business logic for PixelHub. Services hold `Arc`s to the store traits
//! and storage components and are shared across handlers.

pub mod album;
pub mod context;
pub mod dimension;
pub mod guard;
pub mod manipulation;

pub use album::AlbumService;
pub use context::RequestContext;
pub use dimension::{DimensionSpec, resolve};
pub use manipulation::{ManipulationService, ResizeRequest, ResizeService};
