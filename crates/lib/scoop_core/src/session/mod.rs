//! Session tokens backed by an expiring key-value cache.
//!
//! The store issues opaque UUIDv4 tokens and maps each one to the
//! JSON-serialized [`Identity`] it grants. Expiry is enforced entirely by the
//! cache backend.

pub mod memory;
pub mod redis;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::debug;
use uuid::Uuid;

use crate::auth::AuthError;
use crate::models::auth::{Identity, SessionToken};

/// Upper bound for a single cache round trip.
pub const CACHE_TIMEOUT: Duration = Duration::from_secs(5);

/// Key-value cache with per-key expiry.
#[async_trait]
pub trait SessionCache: Send + Sync {
    /// Store `value` under `key` for `ttl_secs` seconds.
    async fn set_ex(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), AuthError>;

    /// Fetch the live value under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, AuthError>;
}

/// Issues and resolves session tokens.
#[derive(Clone)]
pub struct TokenStore {
    cache: Arc<dyn SessionCache>,
    timeout: Duration,
}

impl TokenStore {
    pub fn new(cache: Arc<dyn SessionCache>) -> Self {
        Self {
            cache,
            timeout: CACHE_TIMEOUT,
        }
    }

    /// Override the per-call cache timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create a token for `identity` that lives for `ttl_secs` seconds.
    pub async fn issue(
        &self,
        identity: &Identity,
        ttl_secs: u64,
    ) -> Result<SessionToken, AuthError> {
        if ttl_secs == 0 {
            return Err(AuthError::Internal("session ttl must be positive".into()));
        }
        let value = serde_json::to_string(identity)
            .map_err(|e| AuthError::Internal(format!("serialize identity: {e}")))?;
        let token = Uuid::new_v4().to_string();

        timeout(self.timeout, self.cache.set_ex(&token, value, ttl_secs))
            .await
            .map_err(|_| AuthError::StoreUnavailable("cache write timed out".into()))??;

        debug!(subject = %identity.subject_id, ttl_secs, "issued session token");
        Ok(SessionToken {
            value: token,
            expires_in_secs: ttl_secs,
        })
    }

    /// Look up the identity behind `token`.
    ///
    /// Unknown and expired tokens resolve to `Ok(None)`. A stored value that
    /// no longer deserializes is reported as [`AuthError::CorruptSession`].
    pub async fn resolve(&self, token: &str) -> Result<Option<Identity>, AuthError> {
        let stored = timeout(self.timeout, self.cache.get(token))
            .await
            .map_err(|_| AuthError::StoreUnavailable("cache read timed out".into()))??;

        let Some(raw) = stored else {
            return Ok(None);
        };
        serde_json::from_str::<Identity>(&raw)
            .map(Some)
            .map_err(|e| AuthError::CorruptSession(e.to_string()))
    }
}
