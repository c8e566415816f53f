use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password must not be empty")]
    Empty,
    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters long")]
    TooShort,
}

/// Plaintext password, wrapped so it never appears in logs or debug output.
///
/// Only the password hasher port is expected to call [`Password::expose`];
/// the rest of the system works with stored hashes.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = PasswordError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        let plain = value.expose_secret();
        if plain.trim().is_empty() {
            return Err(PasswordError::Empty);
        }
        if plain.len() < MIN_PASSWORD_LENGTH {
            return Err(PasswordError::TooShort);
        }
        Ok(Self(value))
    }
}
