//! Image manipulation services.

pub mod records;
pub mod resize;

pub use records::ManipulationService;
pub use resize::{ResizeRequest, ResizeService};
