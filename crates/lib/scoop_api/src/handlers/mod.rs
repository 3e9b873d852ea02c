//! Request handlers.

pub mod health;
pub mod products;
pub mod users;
