//! # TaskCoach Shared Library
//!
//! Shared types and business primitives used by the TaskCoach API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and input types
//! - `store`: Record store traits and their PostgreSQL implementations
//! - `auth`: JWT credentials and password hashing
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;
pub mod store;

/// Current version of the TaskCoach shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
