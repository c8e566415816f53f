use std::sync::Arc;

use authkit_core::{RefreshTokenStore, RefreshTokenStoreError};
use redis::{Commands, Connection};
use tokio::sync::RwLock;

/// Refresh-token ledger backed by Redis. A record lives from issuance until
/// revocation deletes it or the token-lifetime TTL expires it, so the
/// keyspace stays bounded without any sweeping.
#[derive(Clone)]
pub struct RedisRefreshTokenStore {
    conn: Arc<RwLock<Connection>>,
}

impl RedisRefreshTokenStore {
    pub fn new(conn: Arc<RwLock<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl RefreshTokenStore for RedisRefreshTokenStore {
    async fn record(&self, token: String, ttl_seconds: u64) -> Result<(), RefreshTokenStoreError> {
        let key = get_key(&token);

        let mut conn = self.conn.write().await;
        conn.set_ex(key, true, ttl_seconds)
            .map_err(|e| RefreshTokenStoreError::DatabaseError(e.to_string()))
    }

    async fn revoke(&self, token: &str) -> Result<(), RefreshTokenStoreError> {
        let key = get_key(token);
        let mut conn = self.conn.write().await;
        conn.del(&key)
            .map_err(|e| RefreshTokenStoreError::DatabaseError(e.to_string()))
    }

    async fn is_live(&self, token: &str) -> Result<bool, RefreshTokenStoreError> {
        let key = get_key(token);
        let mut conn = self.conn.write().await;
        conn.exists(&key)
            .map_err(|e| RefreshTokenStoreError::DatabaseError(e.to_string()))
    }
}

// Namespaced keys keep refresh-token records apart from anything else
// sharing the Redis instance.
const REFRESH_TOKEN_KEY_PREFIX: &str = "refresh_token:";

fn get_key(token: &str) -> String {
    format!("{}{}", REFRESH_TOKEN_KEY_PREFIX, token)
}
