use secrecy::Secret;

/// Signing key, issuer and lifetimes for the JWT token service.
#[derive(Clone)]
pub struct TokenConfig {
    pub jwt_secret: Secret<String>,
    pub issuer: String,
    pub access_token_ttl_seconds: i64,
    pub mfa_pending_token_ttl_seconds: i64,
    /// Lifetime of refresh tokens; revocation entries carry the same TTL so
    /// the blacklist never outlives the tokens it tracks.
    pub refresh_token_ttl_seconds: u64,
}

impl TokenConfig {
    pub fn new(jwt_secret: Secret<String>, issuer: impl Into<String>) -> Self {
        Self {
            jwt_secret,
            issuer: issuer.into(),
            access_token_ttl_seconds: 60 * 60,
            mfa_pending_token_ttl_seconds: 5 * 60,
            refresh_token_ttl_seconds: 30 * 24 * 60 * 60,
        }
    }
}

/// OAuth client identity used when validating Google ID tokens.
#[derive(Clone)]
pub struct GoogleAuthConfig {
    pub client_id: String,
    /// Base URL of the tokeninfo endpoint; overridable so tests can point it
    /// at a local mock server.
    pub tokeninfo_base_url: String,
}

impl GoogleAuthConfig {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            tokeninfo_base_url: "https://oauth2.googleapis.com".to_string(),
        }
    }
}
