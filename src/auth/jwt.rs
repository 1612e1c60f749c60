//! HS256 access and refresh tokens

use crate::config::JwtConfig;
use crate::core::error::{BookstoreError, BookstoreResult};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(default)]
    pub roles: Vec<String>,
    pub kind: TokenKind,
}

/// Pair of tokens handed to a signed-in client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "Token")]
pub struct TokenDto {
    pub username: String,
    pub authenticated: bool,
    pub created: DateTime<Utc>,
    pub expiration: DateTime<Utc>,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct TokenProvider {
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
    validation: Validation,
    issuer: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenProvider {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);

        Self {
            encoding_key: Arc::new(EncodingKey::from_secret(config.secret.as_bytes())),
            decoding_key: Arc::new(DecodingKey::from_secret(config.secret.as_bytes())),
            validation,
            issuer: config.issuer.clone(),
            access_ttl: Duration::seconds(config.access_token_ttl_secs),
            refresh_ttl: Duration::seconds(config.refresh_token_ttl_secs),
        }
    }

    /// Issue a fresh access/refresh pair for `username`
    pub fn create_tokens(&self, username: &str, roles: &[String]) -> BookstoreResult<TokenDto> {
        let created = Utc::now();
        let expiration = created + self.access_ttl;
        let access_token = self.sign(username, roles, TokenKind::Access, created, expiration)?;
        let refresh_token = self.sign(
            username,
            roles,
            TokenKind::Refresh,
            created,
            created + self.refresh_ttl,
        )?;

        Ok(TokenDto {
            username: username.to_string(),
            authenticated: true,
            created,
            expiration,
            access_token,
            refresh_token,
        })
    }

    /// Exchange a refresh token for a new pair
    pub fn refresh_tokens(&self, refresh_token: &str) -> BookstoreResult<TokenDto> {
        let claims = self.validate(refresh_token, TokenKind::Refresh)?;
        self.create_tokens(&claims.sub, &claims.roles)
    }

    /// Decode and check a token of the expected kind.
    ///
    /// A leading `Bearer ` is accepted.
    pub fn validate(&self, token: &str, kind: TokenKind) -> BookstoreResult<Claims> {
        let token = strip_bearer(token);
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| BookstoreError::Unauthenticated(format!("Expired or invalid JWT token: {}", e)))?;

        if data.claims.kind != kind {
            return Err(BookstoreError::Unauthenticated(
                "Expired or invalid JWT token".to_string(),
            ));
        }
        Ok(data.claims)
    }

    fn sign(
        &self,
        username: &str,
        roles: &[String],
        kind: TokenKind,
        issued: DateTime<Utc>,
        expires: DateTime<Utc>,
    ) -> BookstoreResult<String> {
        let claims = Claims {
            sub: username.to_string(),
            iss: self.issuer.clone(),
            iat: issued.timestamp(),
            exp: expires.timestamp(),
            roles: roles.to_vec(),
            kind,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| BookstoreError::Internal(format!("Failed to sign JWT: {}", e)))
    }
}

pub fn strip_bearer(value: &str) -> &str {
    let value = value.trim();
    value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .unwrap_or(value)
        .trim()
}
