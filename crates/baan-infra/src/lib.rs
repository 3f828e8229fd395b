//! # Baan Infrastructure
//!
//! Concrete implementations of the ports defined in `baan-core`:
//! database repositories, authentication services and the object-storage
//! client.

pub mod auth;
pub mod database;
pub mod media;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, DatabaseConnections};
pub use media::{HttpMediaStore, InMemoryMediaStore, MediaConfig};
