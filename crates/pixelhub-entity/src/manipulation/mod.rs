//! Image manipulation domain entities.

pub mod kind;
pub mod model;

pub use kind::ManipulationType;
pub use model::{CreateManipulation, ManipulationRecord};
