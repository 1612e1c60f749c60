//! Response middleware shared by every route

use crate::core::error::ErrorResponse;
use axum::{
    Json,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Fill `details` of error bodies with the request uri
pub async fn attach_error_details(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<ErrorResponse>() {
        Some(mut body) => {
            body.details = Some(format!("uri={}", path));
            let status = response.status();
            (status, Json(body)).into_response()
        }
        None => response,
    }
}
