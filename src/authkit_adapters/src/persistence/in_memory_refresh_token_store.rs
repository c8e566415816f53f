use std::sync::Arc;

use async_trait::async_trait;
use authkit_core::{RefreshTokenStore, RefreshTokenStoreError};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

/// Refresh-token ledger in process memory, with lazy expiry. Only a token
/// that was recorded and neither revoked nor expired reads as live.
#[derive(Clone, Default)]
pub struct InMemoryRefreshTokenStore {
    entries: Arc<DashMap<String, DateTime<Utc>>>,
}

#[async_trait]
impl RefreshTokenStore for InMemoryRefreshTokenStore {
    async fn record(&self, token: String, ttl_seconds: u64) -> Result<(), RefreshTokenStoreError> {
        let expires_at = Utc::now() + Duration::seconds(ttl_seconds as i64);
        self.entries.insert(token, expires_at);
        Ok(())
    }

    async fn revoke(&self, token: &str) -> Result<(), RefreshTokenStoreError> {
        self.entries.remove(token);
        Ok(())
    }

    async fn is_live(&self, token: &str) -> Result<bool, RefreshTokenStoreError> {
        match self.entries.get(token) {
            Some(entry) if *entry.value() > Utc::now() => Ok(true),
            Some(entry) => {
                // Release the read guard before removing; remove on the same
                // shard while the guard is held deadlocks.
                drop(entry);
                drop(self.entries.remove(token));
                Ok(false)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn recorded_token_is_live_and_an_unknown_one_is_not() {
        let store = InMemoryRefreshTokenStore::default();
        store.record("token-a".to_string(), 3600).await.unwrap();

        assert!(store.is_live("token-a").await.unwrap());
        assert!(!store.is_live("token-b").await.unwrap());
    }

    #[tokio::test]
    async fn revocation_kills_the_token() {
        let store = InMemoryRefreshTokenStore::default();
        store.record("token-a".to_string(), 3600).await.unwrap();

        store.revoke("token-a").await.unwrap();
        assert!(!store.is_live("token-a").await.unwrap());
    }

    #[tokio::test]
    async fn expired_entries_read_as_dead() {
        let store = InMemoryRefreshTokenStore::default();
        store.record("token-a".to_string(), 0).await.unwrap();

        assert!(!store.is_live("token-a").await.unwrap());
        // The lazy sweep dropped the entry.
        assert!(store.entries.is_empty());
    }
}
