//! # pixelhub-database
//!
//! Record store traits plus their PostgreSQL and in-memory
//! implementations, connection management and migrations.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{AlbumStore, ManipulationStore};
