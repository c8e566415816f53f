use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{email::Email, user::User};

// UserRepository port trait and errors
#[derive(Debug, Error)]
pub enum UserRepositoryError {
    #[error("A user with this email already exists")]
    AlreadyExists,
    #[error("User not found")]
    NotFound,
    #[error("Concurrent modification of user {0}")]
    VersionConflict(Uuid),
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserRepositoryError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::AlreadyExists, Self::AlreadyExists) => true,
            (Self::NotFound, Self::NotFound) => true,
            (Self::VersionConflict(a), Self::VersionConflict(b)) => a == b,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Persistence boundary for the [`User`] aggregate.
///
/// `add` and `update` durably append the aggregate's drained pending events.
/// Implementations must reject an `update` whose aggregate was hydrated from
/// a stream that has since grown (optimistic concurrency), so two racing
/// login attempts cannot both observe the same pre-increment failure count.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, UserRepositoryError>;
    async fn get_by_google_id(&self, google_id: &str)
    -> Result<Option<User>, UserRepositoryError>;
    async fn add(&self, user: &mut User) -> Result<(), UserRepositoryError>;
    async fn update(&self, user: &mut User) -> Result<(), UserRepositoryError>;
}

// RefreshTokenStore port trait and errors
#[derive(Debug, Error)]
pub enum RefreshTokenStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Server-side ledger of issued refresh tokens. A token is live from
/// `record` until `revoke` (rotation or logout) or until its TTL passes;
/// anything else - fabricated, replayed after rotation, or expired - is
/// dead. Revocation deletes the record, so the store stays bounded by the
/// token lifetime.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    async fn record(&self, token: String, ttl_seconds: u64) -> Result<(), RefreshTokenStoreError>;
    async fn revoke(&self, token: &str) -> Result<(), RefreshTokenStoreError>;
    async fn is_live(&self, token: &str) -> Result<bool, RefreshTokenStoreError>;
}
