//! Bearer token check for protected routes

use super::jwt::{TokenKind, TokenProvider};
use crate::core::error::BookstoreError;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Reject requests without a valid access token.
///
/// The decoded [`super::jwt::Claims`] are stored in the request extensions.
pub async fn require_bearer(
    State(tokens): State<Arc<TokenProvider>>,
    mut request: Request,
    next: Next,
) -> Result<Response, BookstoreError> {
    let value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .filter(|value| value.trim_start().to_ascii_lowercase().starts_with("bearer "))
        .ok_or_else(|| BookstoreError::Unauthenticated("Missing bearer token".to_string()))?;

    let claims = tokens.validate(value, TokenKind::Access)?;
    tracing::debug!(user = %claims.sub, "Authenticated request");
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
