//! Authentication and authorization logic.
//!
//! Provides password hashing, role derivation, grant checks and session
//! secret resolution that can be shared by the HTTP layer and the services.

pub mod password;
pub mod permission;
pub mod role;
pub mod secret;

use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Session store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Corrupt session payload: {0}")]
    CorruptSession(String),

    #[error("Invalid hash cost {0}: must be between 4 and 31")]
    InvalidCost(u32),

    #[error("Internal error: {0}")]
    Internal(String),
}
