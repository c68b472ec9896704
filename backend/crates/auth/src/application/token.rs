//! Token codec
//!
//! HS256 JWTs carrying [`Claims`]. The codec checks signature and expiry
//! only; callers decide which [`TokenKind`] they accept.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::entity::token::{Claims, TokenPair};
use crate::domain::value_object::{UserId, token_kind::TokenKind};
use crate::error::{AuthError, AuthResult};

#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: AuthConfig,
}

impl TokenCodec {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(&config.jwt_secret),
            decoding_key: DecodingKey::from_secret(&config.jwt_secret),
            validation,
            config: config.clone(),
        }
    }

    /// Mint one token of the given kind, expiring after the configured lifetime
    pub fn issue(&self, user_id: UserId, kind: TokenKind) -> AuthResult<String> {
        let exp = now_secs()? + self.config.ttl_for(kind).as_secs();
        let claims = Claims {
            user_id,
            kind,
            exp,
            jti: Uuid::new_v4().to_string(),
        };
        self.sign(&claims)
    }

    pub fn issue_pair(&self, user_id: UserId) -> AuthResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue(user_id, TokenKind::Access)?,
            refresh_token: self.issue(user_id, TokenKind::Refresh)?,
        })
    }

    pub(crate) fn sign(&self, claims: &Claims) -> AuthResult<String> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("token encoding failed: {}", e)))
    }

    /// Verify signature and expiry
    ///
    /// `TokenExpired` once `now > exp`, `InvalidToken` for anything else.
    pub fn parse(&self, token: &str) -> AuthResult<Claims> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }

    /// [`parse`](Self::parse) plus a check on the `type` claim
    pub fn parse_kind(&self, token: &str, expected: TokenKind) -> AuthResult<Claims> {
        let claims = self.parse(token)?;
        if claims.kind != expected {
            return Err(AuthError::WrongTokenKind);
        }
        Ok(claims)
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

pub(crate) fn now_secs() -> AuthResult<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|_| AuthError::Internal("system clock before Unix epoch".to_string()))
}
