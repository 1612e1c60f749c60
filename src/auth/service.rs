//! Sign-in and token refresh

use super::jwt::{TokenDto, TokenProvider};
use super::password::PasswordHasher;
use super::users::UserStore;
use crate::core::error::{BookstoreError, BookstoreResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

const INVALID_CREDENTIALS: &str = "Invalid username/password supplied!";
const INVALID_CLIENT_REQUEST: &str = "Invalid client request!";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename = "AccountCredentials")]
pub struct AccountCredentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl AccountCredentials {
    fn is_blank(&self) -> bool {
        self.username.trim().is_empty() || self.password.is_empty()
    }
}

pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    tokens: Arc<TokenProvider>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, hasher: PasswordHasher, tokens: Arc<TokenProvider>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub fn tokens(&self) -> &Arc<TokenProvider> {
        &self.tokens
    }

    pub async fn sign_in(&self, credentials: Option<AccountCredentials>) -> BookstoreResult<TokenDto> {
        let credentials = credentials
            .filter(|c| !c.is_blank())
            .ok_or_else(|| BookstoreError::Unauthorized(INVALID_CLIENT_REQUEST.to_string()))?;

        let user = self
            .users
            .find_by_username(&credentials.username)
            .await?
            .filter(|user| user.enabled);
        let Some(user) = user else {
            warn!(username = %credentials.username, "Sign-in for unknown user");
            return Err(BookstoreError::Unauthenticated(INVALID_CREDENTIALS.to_string()));
        };

        if !self.hasher.verify(&credentials.password, &user.password_hash)? {
            warn!(username = %user.username, "Sign-in with wrong password");
            return Err(BookstoreError::Unauthenticated(INVALID_CREDENTIALS.to_string()));
        }

        info!(username = %user.username, "User signed in");
        self.tokens.create_tokens(&user.username, &user.roles)
    }

    /// Exchange `refresh_token` for a new pair; the token must belong to
    /// `username`
    pub async fn refresh(&self, username: &str, refresh_token: Option<&str>) -> BookstoreResult<TokenDto> {
        let refresh_token = refresh_token
            .filter(|t| !t.trim().is_empty())
            .filter(|_| !username.trim().is_empty())
            .ok_or_else(|| BookstoreError::Unauthorized(INVALID_CLIENT_REQUEST.to_string()))?;

        let claims = self
            .tokens
            .validate(refresh_token, super::jwt::TokenKind::Refresh)?;
        if claims.sub != username {
            return Err(BookstoreError::Unauthenticated(
                "Refresh token does not belong to this user".to_string(),
            ));
        }
        let user = self
            .users
            .find_by_username(username)
            .await?
            .filter(|user| user.enabled);
        if user.is_none() {
            warn!(username, "Refresh for unknown or disabled user");
            return Err(BookstoreError::Unauthenticated(format!(
                "Username {} not found!",
                username
            )));
        }

        info!(username, "Tokens refreshed");
        self.tokens.refresh_tokens(refresh_token)
    }
}
