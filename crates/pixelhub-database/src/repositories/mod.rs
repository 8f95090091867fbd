//! PostgreSQL-backed store implementations.

pub mod album;
pub mod manipulation;

pub use album::AlbumRepository;
pub use manipulation::ManipulationRepository;
