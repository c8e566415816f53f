use super::email::Email;

/// Verified claims extracted from a Google ID token.
///
/// Constructed only by a [`GoogleTokenVerifier`](crate::ports::services::GoogleTokenVerifier)
/// implementation after signature, audience and issuer checks have passed.
#[derive(Debug, Clone, PartialEq)]
pub struct GoogleUserInfo {
    /// Google's stable account identifier (the `sub` claim).
    pub subject: String,
    pub email: Email,
    pub name: String,
    pub picture: Option<String>,
    /// The Workspace domain (`hd` claim), absent for consumer accounts.
    pub hosted_domain: Option<String>,
}
