//! Shared mocks for the use-case tests.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use authkit_core::{
    Clock, Email, GoogleTokenVerifier, GoogleUserInfo, GoogleVerifierError, MfaService,
    MfaServiceError, Password, PasswordHasher, PasswordHasherError, Role, TokenPrincipal,
    TokenService, TokenServiceError, User, UserEvent, UserRepository, UserRepositoryError,
};
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

pub fn fixed_now() -> DateTime<Utc> {
    "2026-08-01T10:00:00Z".parse().unwrap()
}

#[derive(Clone)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Event-stream-backed repository mock with the same optimistic-concurrency
/// contract as the real adapters.
#[derive(Clone, Default)]
pub struct InMemoryUsers {
    streams: Arc<RwLock<HashMap<Uuid, Vec<UserEvent>>>>,
}

impl InMemoryUsers {
    pub async fn snapshot(&self, id: Uuid) -> Option<User> {
        let streams = self.streams.read().await;
        let events = streams.get(&id)?.clone();
        Some(User::from_events(events).expect("stored stream is hydratable"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn get_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError> {
        let streams = self.streams.read().await;
        for events in streams.values() {
            let user = User::from_events(events.clone())
                .map_err(|e| UserRepositoryError::UnexpectedError(e.to_string()))?;
            if user.email() == email {
                return Ok(Some(user));
            }
        }
        Ok(None)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, UserRepositoryError> {
        let streams = self.streams.read().await;
        match streams.get(&id) {
            Some(events) => User::from_events(events.clone())
                .map(Some)
                .map_err(|e| UserRepositoryError::UnexpectedError(e.to_string())),
            None => Ok(None),
        }
    }

    async fn get_by_google_id(
        &self,
        google_id: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        let streams = self.streams.read().await;
        for events in streams.values() {
            let user = User::from_events(events.clone())
                .map_err(|e| UserRepositoryError::UnexpectedError(e.to_string()))?;
            if user.google_id() == Some(google_id) {
                return Ok(Some(user));
            }
        }
        Ok(None)
    }

    async fn add(&self, user: &mut User) -> Result<(), UserRepositoryError> {
        if self.get_by_email(user.email()).await?.is_some() {
            return Err(UserRepositoryError::AlreadyExists);
        }
        let mut streams = self.streams.write().await;
        streams.insert(user.id(), user.take_pending_events());
        Ok(())
    }

    async fn update(&self, user: &mut User) -> Result<(), UserRepositoryError> {
        let mut streams = self.streams.write().await;
        let stream = streams
            .get_mut(&user.id())
            .ok_or(UserRepositoryError::NotFound)?;
        if stream.len() as u64 != user.persisted_version() {
            return Err(UserRepositoryError::VersionConflict(user.id()));
        }
        stream.extend(user.take_pending_events());
        Ok(())
    }
}

/// Hasher that prefixes instead of hashing; good enough to tell a right
/// password from a wrong one.
#[derive(Clone)]
pub struct FakeHasher;

impl FakeHasher {
    pub fn hash_of(plain: &str) -> String {
        format!("hashed:{plain}")
    }
}

#[async_trait]
impl PasswordHasher for FakeHasher {
    async fn hash(&self, password: &Password) -> Result<String, PasswordHasherError> {
        Ok(Self::hash_of(password.expose()))
    }

    async fn verify(&self, password: &Password, hash: &str) -> Result<bool, PasswordHasherError> {
        Ok(hash == Self::hash_of(password.expose()))
    }
}

/// Token service with transparent token strings and an in-memory ledger of
/// issued refresh tokens. Only tokens it handed out are ever live.
#[derive(Clone, Default)]
pub struct FakeTokens {
    counter: Arc<AtomicU64>,
    live: Arc<RwLock<HashSet<String>>>,
    revocations: Arc<AtomicU64>,
}

impl FakeTokens {
    pub fn access_token_for(user_id: Uuid) -> String {
        format!("access:{user_id}")
    }

    /// Simulates a token whose signature still verifies but whose `exp` has
    /// passed: `claims_from_expired_token` accepts it, the strict validators
    /// do not.
    pub fn expired_access_token_for(user_id: Uuid) -> String {
        format!("expired:{user_id}")
    }

    /// How many times a refresh token was revoked.
    pub fn revoked_count(&self) -> u64 {
        self.revocations.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl TokenService for FakeTokens {
    fn generate_access_token(&self, user: &User) -> Result<String, TokenServiceError> {
        Ok(Self::access_token_for(user.id()))
    }

    async fn issue_refresh_token(&self) -> Result<String, TokenServiceError> {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        let token = format!("refresh:{n}");
        self.live.write().await.insert(token.clone());
        Ok(token)
    }

    fn generate_mfa_pending_token(&self, user_id: Uuid) -> Result<String, TokenServiceError> {
        Ok(format!("mfa:{user_id}"))
    }

    fn validate_access_token(&self, token: &str) -> Result<TokenPrincipal, TokenServiceError> {
        let id = token
            .strip_prefix("access:")
            .ok_or(TokenServiceError::InvalidToken)?;
        let user_id = id.parse().map_err(|_| TokenServiceError::InvalidToken)?;
        Ok(TokenPrincipal {
            user_id,
            roles: vec![Role::User],
        })
    }

    fn claims_from_expired_token(
        &self,
        token: &str,
    ) -> Result<TokenPrincipal, TokenServiceError> {
        let id = token
            .strip_prefix("access:")
            .or_else(|| token.strip_prefix("expired:"))
            .ok_or(TokenServiceError::InvalidToken)?;
        let user_id = id.parse().map_err(|_| TokenServiceError::InvalidToken)?;
        Ok(TokenPrincipal {
            user_id,
            roles: vec![Role::User],
        })
    }

    fn validate_mfa_pending_token(&self, token: &str) -> Result<Uuid, TokenServiceError> {
        let id = token
            .strip_prefix("mfa:")
            .ok_or(TokenServiceError::WrongTokenUse)?;
        id.parse().map_err(|_| TokenServiceError::InvalidToken)
    }

    async fn revoke_refresh_token(&self, token: &str) -> Result<(), TokenServiceError> {
        self.live.write().await.remove(token);
        self.revocations.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn is_refresh_token_live(&self, token: &str) -> Result<bool, TokenServiceError> {
        Ok(self.live.read().await.contains(token))
    }
}

pub const VALID_MFA_CODE: &str = "123456";
pub const FAKE_MFA_SECRET: &str = "JBSWY3DPEHPK3PXPJBSWY3DPEHPK3PXP";

/// MFA service that accepts exactly one code, regardless of secret.
#[derive(Clone)]
pub struct FakeMfa;

impl MfaService for FakeMfa {
    fn generate_secret(&self) -> String {
        FAKE_MFA_SECRET.to_string()
    }

    fn validate_code(&self, _secret: &str, code: &str) -> Result<bool, MfaServiceError> {
        Ok(code == VALID_MFA_CODE)
    }

    fn enrollment_uri(&self, email: &Email, secret: &str) -> Result<String, MfaServiceError> {
        Ok(format!("otpauth://totp/authkit:{email}?secret={secret}&issuer=authkit"))
    }
}

/// Verifier that accepts a single known ID token.
#[derive(Clone)]
pub struct FakeGoogleVerifier {
    pub valid_token: String,
    pub info: GoogleUserInfo,
}

#[async_trait]
impl GoogleTokenVerifier for FakeGoogleVerifier {
    async fn verify(&self, id_token: &str) -> Result<GoogleUserInfo, GoogleVerifierError> {
        if id_token == self.valid_token {
            Ok(self.info.clone())
        } else {
            Err(GoogleVerifierError::InvalidToken("unknown token".to_string()))
        }
    }
}
