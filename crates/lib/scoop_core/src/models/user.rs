//! User domain model.

use serde::{Deserialize, Serialize};

use super::auth::{Grant, Identity};

/// Persisted principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password_hash: String,
    pub grants: Vec<Grant>,
}

impl User {
    /// Build the session identity for this user.
    pub fn identity(&self) -> Identity {
        Identity {
            subject_id: self.username.clone(),
            grants: self.grants.clone(),
        }
    }
}
