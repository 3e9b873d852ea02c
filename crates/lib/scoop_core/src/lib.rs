//! # scoop_core
//!
//! Core domain logic for Scoop: credential hashing, session tokens,
//! repositories and the user/product services built on top of them.

pub mod auth;
pub mod error;
pub mod migrate;
pub mod models;
pub mod repository;
pub mod service;
pub mod session;
pub mod validation;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
