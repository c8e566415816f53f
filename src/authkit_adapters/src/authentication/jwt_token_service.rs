use async_trait::async_trait;
use authkit_core::{
    RefreshTokenStore, Role, TokenPrincipal, TokenService, TokenServiceError, User,
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::RngCore;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::TokenConfig;

/// Discriminates what a signed token is good for. An MFA-pending token is
/// only ever exchangeable for a completed MFA challenge, never for resource
/// access, no matter how valid its signature is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum TokenUse {
    Access,
    Mfa,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iss: String,
    #[serde(default)]
    roles: Vec<Role>,
    token_use: TokenUse,
    iat: usize,
    exp: usize,
    jti: String,
}

/// HS256 JWT issuance and validation, plus opaque refresh tokens ledgered
/// in a [`RefreshTokenStore`] from issuance to revocation.
#[derive(Clone)]
pub struct JwtTokenService<R> {
    refresh_tokens: R,
    config: TokenConfig,
}

impl<R> JwtTokenService<R> {
    pub fn new(refresh_tokens: R, config: TokenConfig) -> Self {
        Self {
            refresh_tokens,
            config,
        }
    }

    fn secret_bytes(&self) -> &[u8] {
        self.config.jwt_secret.expose_secret().as_bytes()
    }

    fn encode_claims(&self, claims: &Claims) -> Result<String, TokenServiceError> {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(self.secret_bytes()),
        )
        .map_err(|e| TokenServiceError::UnexpectedError(e.to_string()))
    }

    fn decode_claims(&self, token: &str, validate_exp: bool) -> Result<Claims, TokenServiceError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.validate_exp = validate_exp;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|_| TokenServiceError::InvalidToken)
    }

    fn claims_for(&self, sub: String, roles: Vec<Role>, token_use: TokenUse) -> Claims {
        let ttl_seconds = match token_use {
            TokenUse::Access => self.config.access_token_ttl_seconds,
            TokenUse::Mfa => self.config.mfa_pending_token_ttl_seconds,
        };
        let now = Utc::now();
        let exp = now + Duration::seconds(ttl_seconds);

        Claims {
            sub,
            iss: self.config.issuer.clone(),
            roles,
            token_use,
            iat: now.timestamp().max(0) as usize,
            exp: exp.timestamp().max(0) as usize,
            jti: Uuid::new_v4().to_string(),
        }
    }

    fn principal_from(claims: Claims) -> Result<TokenPrincipal, TokenServiceError> {
        let user_id = claims
            .sub
            .parse()
            .map_err(|_| TokenServiceError::InvalidToken)?;
        Ok(TokenPrincipal {
            user_id,
            roles: claims.roles,
        })
    }
}

#[async_trait]
impl<R: RefreshTokenStore> TokenService for JwtTokenService<R> {
    fn generate_access_token(&self, user: &User) -> Result<String, TokenServiceError> {
        let mut roles: Vec<Role> = user.roles().iter().copied().collect();
        roles.sort_by_key(|r| r.to_string());
        let claims = self.claims_for(user.id().to_string(), roles, TokenUse::Access);
        self.encode_claims(&claims)
    }

    async fn issue_refresh_token(&self) -> Result<String, TokenServiceError> {
        let mut bytes = [0u8; 32];
        rand::rng().fill_bytes(&mut bytes);
        let token = URL_SAFE_NO_PAD.encode(bytes);
        self.refresh_tokens
            .record(token.clone(), self.config.refresh_token_ttl_seconds)
            .await
            .map_err(|e| TokenServiceError::StoreError(e.to_string()))?;
        Ok(token)
    }

    fn generate_mfa_pending_token(&self, user_id: Uuid) -> Result<String, TokenServiceError> {
        let claims = self.claims_for(user_id.to_string(), Vec::new(), TokenUse::Mfa);
        self.encode_claims(&claims)
    }

    fn validate_access_token(&self, token: &str) -> Result<TokenPrincipal, TokenServiceError> {
        let claims = self.decode_claims(token, true)?;
        if claims.token_use != TokenUse::Access {
            return Err(TokenServiceError::WrongTokenUse);
        }
        Self::principal_from(claims)
    }

    fn claims_from_expired_token(
        &self,
        token: &str,
    ) -> Result<TokenPrincipal, TokenServiceError> {
        let claims = self.decode_claims(token, false)?;
        if claims.token_use != TokenUse::Access {
            return Err(TokenServiceError::WrongTokenUse);
        }
        Self::principal_from(claims)
    }

    fn validate_mfa_pending_token(&self, token: &str) -> Result<Uuid, TokenServiceError> {
        let claims = self.decode_claims(token, true)?;
        if claims.token_use != TokenUse::Mfa {
            return Err(TokenServiceError::WrongTokenUse);
        }
        claims.sub.parse().map_err(|_| TokenServiceError::InvalidToken)
    }

    async fn revoke_refresh_token(&self, token: &str) -> Result<(), TokenServiceError> {
        self.refresh_tokens
            .revoke(token)
            .await
            .map_err(|e| TokenServiceError::StoreError(e.to_string()))
    }

    async fn is_refresh_token_live(&self, token: &str) -> Result<bool, TokenServiceError> {
        self.refresh_tokens
            .is_live(token)
            .await
            .map_err(|e| TokenServiceError::StoreError(e.to_string()))
    }
}
