//! # Authkit - Authentication Engine Library
//!
//! This is a facade crate that re-exports all public APIs from the
//! authentication engine components. Use this crate to get access to the
//! whole engine in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! authkit = { path = "../authkit" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `User`, `UserEvent`, etc.
//! - **Port traits**: `UserRepository`, `TokenService`, `MfaService`, etc.
//! - **Use cases**: `SignupUseCase`, `LocalLoginUseCase`, etc.
//! - **Adapters**: `JwtTokenService`, `TotpMfaService`, `RedisRefreshTokenStore`, etc.

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and port traits
pub mod core {
    pub use authkit_core::*;
}

// Re-export most commonly used core types at the root level
pub use authkit_core::{
    Email, EmailError, GoogleUserInfo, LockoutPolicy, Password, PasswordError, Role, User,
    UserError, UserEvent,
};

// ============================================================================
// Port Traits
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use authkit_core::{
        Clock, GoogleTokenVerifier, GoogleVerifierError, MfaService, MfaServiceError,
        PasswordHasher, PasswordHasherError, RefreshTokenStore, RefreshTokenStoreError,
        TokenPrincipal, TokenService, TokenServiceError, UserRepository, UserRepositoryError,
    };
}

// Re-export port traits at root level
pub use authkit_core::{
    Clock, GoogleTokenVerifier, GoogleVerifierError, MfaService, MfaServiceError, PasswordHasher,
    PasswordHasherError, RefreshTokenStore, RefreshTokenStoreError, TokenPrincipal, TokenService,
    TokenServiceError, UserRepository, UserRepositoryError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use authkit_application::*;
}

// Re-export use cases at root level
pub use authkit_application::{
    AuthenticationError, AuthenticationOutcome, ChangePasswordUseCase, GoogleLoginUseCase,
    LocalLoginUseCase, LogoutUseCase, MfaEnrollment, MfaEnrollmentUseCase, RefreshTokenUseCase,
    SignupUseCase, UpdateProfileUseCase, UserSummary, VerifyMfaUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Token issuance and third-party verification
    pub mod authentication {
        pub use authkit_adapters::authentication::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use authkit_adapters::persistence::*;
    }

    /// Password hashing
    pub mod hashing {
        pub use authkit_adapters::hashing::*;
    }

    /// TOTP multi-factor authentication
    pub mod mfa {
        pub use authkit_adapters::mfa::*;
    }

    /// Configuration
    pub mod config {
        pub use authkit_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use authkit_adapters::{
    Argon2PasswordHasher, GoogleAuthConfig, GoogleTokeninfoVerifier, InMemoryRefreshTokenStore,
    InMemoryUserRepository, JwtTokenService, RedisRefreshTokenStore, SystemClock, TokenConfig,
    TotpMfaService,
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
