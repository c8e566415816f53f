use async_trait::async_trait;
use authkit_core::{Email, GoogleTokenVerifier, GoogleUserInfo, GoogleVerifierError};
use chrono::Utc;
use serde::Deserialize;

use crate::config::GoogleAuthConfig;

const ACCEPTED_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// Google ID-token verification through the tokeninfo endpoint.
///
/// The endpoint checks the signature against Google's current keys; this
/// adapter re-checks audience, issuer and expiry, because tokeninfo accepts
/// any token Google ever signed, including ones minted for other clients.
pub struct GoogleTokeninfoVerifier {
    http_client: reqwest::Client,
    config: GoogleAuthConfig,
}

/// Wire format of the tokeninfo response; numeric fields arrive as strings.
#[derive(Debug, Deserialize)]
struct TokeninfoResponse {
    aud: String,
    iss: String,
    exp: String,
    sub: String,
    email: String,
    email_verified: String,
    name: String,
    picture: Option<String>,
    hd: Option<String>,
}

impl GoogleTokeninfoVerifier {
    pub fn new(http_client: reqwest::Client, config: GoogleAuthConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }
}

#[async_trait]
impl GoogleTokenVerifier for GoogleTokeninfoVerifier {
    #[tracing::instrument(name = "Verifying Google ID token", skip_all)]
    async fn verify(&self, id_token: &str) -> Result<GoogleUserInfo, GoogleVerifierError> {
        let url = format!("{}/tokeninfo", self.config.tokeninfo_base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| GoogleVerifierError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GoogleVerifierError::InvalidToken(
                "rejected by tokeninfo".to_string(),
            ));
        }

        let info: TokeninfoResponse = response
            .json()
            .await
            .map_err(|e| GoogleVerifierError::InvalidToken(e.to_string()))?;

        if info.aud != self.config.client_id {
            return Err(GoogleVerifierError::InvalidToken(
                "audience mismatch".to_string(),
            ));
        }
        if !ACCEPTED_ISSUERS.contains(&info.iss.as_str()) {
            return Err(GoogleVerifierError::InvalidToken(format!(
                "unexpected issuer {}",
                info.iss
            )));
        }

        let exp: i64 = info
            .exp
            .parse()
            .map_err(|_| GoogleVerifierError::InvalidToken("malformed exp".to_string()))?;
        if exp <= Utc::now().timestamp() {
            return Err(GoogleVerifierError::InvalidToken("token expired".to_string()));
        }

        if info.email_verified != "true" {
            return Err(GoogleVerifierError::InvalidToken(
                "email not verified by Google".to_string(),
            ));
        }

        let email = Email::try_from(info.email)
            .map_err(|e| GoogleVerifierError::InvalidToken(e.to_string()))?;

        Ok(GoogleUserInfo {
            subject: info.sub,
            email,
            name: info.name,
            picture: info.picture,
            hosted_domain: info.hd,
        })
    }
}
