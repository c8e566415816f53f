//! Infrastructure implementations of the authentication ports.

pub mod authentication;
pub mod clock;
pub mod config;
pub mod hashing;
pub mod mfa;
pub mod persistence;

pub use authentication::google_token_verifier::GoogleTokeninfoVerifier;
pub use authentication::jwt_token_service::JwtTokenService;
pub use clock::SystemClock;
pub use config::{GoogleAuthConfig, TokenConfig};
pub use hashing::argon2_password_hasher::Argon2PasswordHasher;
pub use mfa::totp_mfa_service::TotpMfaService;
pub use persistence::in_memory_refresh_token_store::InMemoryRefreshTokenStore;
pub use persistence::in_memory_user_repository::InMemoryUserRepository;
pub use persistence::redis_refresh_token_store::RedisRefreshTokenStore;
