//! Authentication routes

use super::jwt::TokenDto;
use super::service::{AccountCredentials, AuthService};
use crate::core::error::BookstoreError;
use crate::server::negotiation::{Accepts, Negotiated, Payload};
use axum::{
    Router,
    extract::{Path, State},
    http::{HeaderMap, header},
    routing::{post, put},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthAppState {
    pub service: Arc<AuthService>,
}

pub async fn sign_in(
    State(state): State<AuthAppState>,
    Accepts(format): Accepts,
    Payload(credentials): Payload<AccountCredentials>,
) -> Result<Negotiated<TokenDto>, BookstoreError> {
    Ok(Negotiated::ok(format, state.service.sign_in(credentials).await?))
}

pub async fn refresh(
    State(state): State<AuthAppState>,
    Accepts(format): Accepts,
    Path(username): Path<String>,
    headers: HeaderMap,
) -> Result<Negotiated<TokenDto>, BookstoreError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    Ok(Negotiated::ok(format, state.service.refresh(&username, token).await?))
}

pub fn routes(state: AuthAppState) -> Router {
    Router::new()
        .route("/auth/signin", post(sign_in))
        .route("/auth/refresh/{username}", put(refresh))
        .with_state(state)
}
