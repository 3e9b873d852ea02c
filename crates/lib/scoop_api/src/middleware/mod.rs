//! Request middleware for protected routes.

pub mod auth;
pub mod permission;
