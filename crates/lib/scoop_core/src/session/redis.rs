//! Redis-backed session cache.
//!
//! Uses a [`ConnectionManager`], which multiplexes one reconnecting
//! connection across all request tasks.

use ::redis::Client;
use ::redis::aio::ConnectionManager;
use async_trait::async_trait;
use tracing::{info, warn};

use super::SessionCache;
use crate::auth::AuthError;

/// Session cache stored in Redis with `SETEX`/`GET`.
#[derive(Clone)]
pub struct RedisSessionCache {
    conn: ConnectionManager,
}

impl RedisSessionCache {
    /// Connect to Redis at `url` and verify the connection with `PING`.
    pub async fn connect(url: &str) -> Result<Self, AuthError> {
        let client = Client::open(url)
            .map_err(|e| AuthError::StoreUnavailable(format!("invalid redis url: {e}")))?;
        let mut conn = ConnectionManager::new(client)
            .await
            .map_err(|e| AuthError::StoreUnavailable(format!("connect to redis: {e}")))?;

        let pong: String = ::redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| AuthError::StoreUnavailable(format!("redis ping: {e}")))?;
        if pong != "PONG" {
            return Err(AuthError::StoreUnavailable(format!(
                "unexpected ping reply: {pong}"
            )));
        }

        info!("redis session cache connected");
        Ok(Self { conn })
    }
}

#[async_trait]
impl SessionCache for RedisSessionCache {
    async fn set_ex(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), AuthError> {
        let mut conn = self.conn.clone();
        ::redis::cmd("SETEX")
            .arg(key)
            .arg(ttl_secs)
            .arg(value)
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| {
                warn!("redis SETEX failed: {e}");
                AuthError::StoreUnavailable(format!("redis setex: {e}"))
            })
    }

    async fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        let mut conn = self.conn.clone();
        ::redis::cmd("GET")
            .arg(key)
            .query_async::<Option<String>>(&mut conn)
            .await
            .map_err(|e| {
                warn!("redis GET failed: {e}");
                AuthError::StoreUnavailable(format!("redis get: {e}"))
            })
    }
}
