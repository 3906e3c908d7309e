//! # SprintBoard Shared Library
//!
//! This crate contains the types and database logic shared between the
//! SprintBoard API server and its tooling.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their CRUD operations
//! - `auth`: Password hashing and session-token utilities
//! - `db`: Connection pool, migrations, and the seed routine

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the SprintBoard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
