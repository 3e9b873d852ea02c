//! Authentication domain models.
//!
//! `Identity` and `Grant` keep the `username`/`authorizations`/`appname`
//! field names on the wire so cached sessions stay readable by every node.

use serde::{Deserialize, Serialize};

use crate::auth::role::Role;

/// A permission pair held by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    #[serde(rename = "appname")]
    pub app_name: String,
    pub role: Role,
}

impl Grant {
    pub fn new(app_name: impl Into<String>, role: Role) -> Self {
        Self {
            app_name: app_name.into(),
            role,
        }
    }
}

/// Authenticated principal materialized from a valid session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(rename = "username")]
    pub subject_id: String,
    #[serde(rename = "authorizations", default)]
    pub grants: Vec<Grant>,
}

/// Opaque bearer credential handed to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub value: String,
    pub expires_in_secs: u64,
}
