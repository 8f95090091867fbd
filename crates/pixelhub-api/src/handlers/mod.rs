//! HTTP request handlers.

pub mod album;
pub mod health;
pub mod manipulation;
