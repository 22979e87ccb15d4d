//! Repositories: SeaORM-backed (PostgreSQL/SQLite) and in-memory.

mod memory;

#[cfg(feature = "database")]
mod connections;
#[cfg(feature = "database")]
pub mod entity;
#[cfg(feature = "database")]
mod sea_base;
#[cfg(feature = "database")]
mod sea_repo;

pub use memory::{InMemoryListingRepository, InMemoryUserRepository};

#[cfg(feature = "database")]
pub use connections::{ConnectionPool, DatabaseConfig};
#[cfg(feature = "database")]
pub use sea_repo::{SeaListingRepository, SeaUserRepository};
