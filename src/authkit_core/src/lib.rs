pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::{Email, EmailError},
    events::UserEvent,
    google::GoogleUserInfo,
    lockout::LockoutPolicy,
    password::{Password, PasswordError},
    role::Role,
    user::{User, UserError},
};

pub use ports::{
    repositories::{
        RefreshTokenStore, RefreshTokenStoreError, UserRepository, UserRepositoryError,
    },
    services::{
        Clock, GoogleTokenVerifier, GoogleVerifierError, MfaService, MfaServiceError,
        PasswordHasher, PasswordHasherError, TokenPrincipal, TokenService, TokenServiceError,
    },
};
