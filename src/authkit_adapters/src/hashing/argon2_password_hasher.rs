use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher as _, SaltString, rand_core},
};
use async_trait::async_trait;
use authkit_core::{Password, PasswordHasher, PasswordHasherError};
use secrecy::{ExposeSecret, Secret};

/// Argon2id password hashing behind the [`PasswordHasher`] port.
///
/// Hashing and verification run on the blocking pool; both take tens of
/// milliseconds by construction and would stall the async executor.
#[derive(Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

fn hasher() -> Result<Argon2<'static>, PasswordHasherError> {
    let params = Params::new(15000, 2, 1, None)
        .map_err(|e| PasswordHasherError::HashingError(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: &Password) -> Result<String, PasswordHasherError> {
        let password = Secret::from(password.expose().to_owned());
        let current_span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt = SaltString::generate(rand_core::OsRng);
                hasher()?
                    .hash_password(password.expose_secret().as_bytes(), &salt)
                    .map(|h| h.to_string())
                    .map_err(|e| PasswordHasherError::HashingError(e.to_string()))
            })
        })
        .await
        .map_err(|e| PasswordHasherError::HashingError(e.to_string()))?
    }

    #[tracing::instrument(name = "Verifying password hash", skip_all)]
    async fn verify(&self, password: &Password, hash: &str) -> Result<bool, PasswordHasherError> {
        let password = Secret::from(password.expose().to_owned());
        let hash = hash.to_owned();
        let current_span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let parsed = PasswordHash::new(&hash)
                    .map_err(|e| PasswordHasherError::HashingError(e.to_string()))?;
                match hasher()?.verify_password(password.expose_secret().as_bytes(), &parsed) {
                    Ok(()) => Ok(true),
                    Err(argon2::password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(PasswordHasherError::HashingError(e.to_string())),
                }
            })
        })
        .await
        .map_err(|e| PasswordHasherError::HashingError(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password(plain: &str) -> Password {
        Password::try_from(Secret::from(plain.to_string())).unwrap()
    }

    #[tokio::test]
    async fn hash_then_verify_accepts_the_original_password() {
        let hasher = Argon2PasswordHasher;
        let hash = hasher.hash(&password("password123")).await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify(&password("password123"), &hash).await.unwrap());
    }

    #[tokio::test]
    async fn verify_rejects_a_different_password() {
        let hasher = Argon2PasswordHasher;
        let hash = hasher.hash(&password("password123")).await.unwrap();

        assert!(!hasher.verify(&password("password124"), &hash).await.unwrap());
    }

    #[tokio::test]
    async fn hashing_is_salted() {
        let hasher = Argon2PasswordHasher;
        let first = hasher.hash(&password("password123")).await.unwrap();
        let second = hasher.hash(&password("password123")).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn garbage_hash_is_an_error_not_a_mismatch() {
        let hasher = Argon2PasswordHasher;
        let result = hasher.verify(&password("password123"), "not-a-phc-string").await;
        assert!(result.is_err());
    }
}
