//! # RecycleHub Infrastructure
//!
//! Concrete implementations of the ports defined in `recyclehub-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory repositories only
//! - `database` - PostgreSQL/SQLite repositories via SeaORM
//! - `auth` - JWT + Argon2 authentication

pub mod database;
pub mod media;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use database::{InMemoryListingRepository, InMemoryUserRepository};
pub use media::LocalMediaStore;

#[cfg(feature = "database")]
pub use database::{ConnectionPool, DatabaseConfig, SeaListingRepository, SeaUserRepository};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
