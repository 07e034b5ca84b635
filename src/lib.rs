/// Library crate entry point.
/// Exposes internal modules for integration tests.
/// Production binary uses src/main.rs.

pub mod acl;
pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
