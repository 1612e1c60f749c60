//! File upload and download routes

use super::storage::FileStorageService;
use crate::core::error::{BookstoreError, BookstoreResult};
use crate::links::LinkBuilder;
use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Files-specific AppState
#[derive(Clone)]
pub struct FilesAppState {
    pub storage: Arc<FileStorageService>,
    pub links: LinkBuilder,
}

/// Describes one stored upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "UploadFileResponse")]
pub struct UploadFileResponse {
    pub file_name: String,
    pub file_download_uri: String,
    pub file_type: String,
    pub size: u64,
}

/// One file part of a multipart body
#[derive(Debug, Clone)]
pub struct UploadedPart {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Collect every part named `field` from a multipart body
pub async fn read_parts(mut multipart: Multipart, field: &str) -> BookstoreResult<Vec<UploadedPart>> {
    let mut parts = Vec::new();
    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(|e| BookstoreError::bad_request(e.body_text()))?
    {
        if part.name() != Some(field) {
            continue;
        }
        let file_name = part.file_name().map(str::to_owned);
        let content_type = part.content_type().map(str::to_owned);
        let bytes = part
            .bytes()
            .await
            .map_err(|e| BookstoreError::bad_request(e.body_text()))?;
        parts.push(UploadedPart {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }
    Ok(parts)
}

async fn store_part(state: &FilesAppState, part: UploadedPart) -> BookstoreResult<UploadFileResponse> {
    let original = part
        .file_name
        .ok_or_else(|| BookstoreError::bad_request("Please set a valid file!"))?;
    let file_name = state.storage.store_file(&original, &part.bytes).await?;
    let file_type = part
        .content_type
        .unwrap_or_else(|| super::storage::content_type_of(&file_name));

    Ok(UploadFileResponse {
        file_download_uri: state.links.href(&format!(
            "/files/downloadFile/{}",
            LinkBuilder::segment(&file_name)
        )),
        file_name,
        file_type,
        size: part.bytes.len() as u64,
    })
}

pub async fn upload_file(
    State(state): State<FilesAppState>,
    multipart: Multipart,
) -> Result<Json<UploadFileResponse>, BookstoreError> {
    let part = read_parts(multipart, "file")
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| BookstoreError::bad_request("Please set a valid file!"))?;
    info!("Storing file to disk");
    Ok(Json(store_part(&state, part).await?))
}

pub async fn upload_multiple_files(
    State(state): State<FilesAppState>,
    multipart: Multipart,
) -> Result<Json<Vec<UploadFileResponse>>, BookstoreError> {
    let parts = read_parts(multipart, "files").await?;
    info!(count = parts.len(), "Storing files to disk");

    let mut responses = Vec::with_capacity(parts.len());
    for part in parts {
        responses.push(store_part(&state, part).await?);
    }
    Ok(Json(responses))
}

pub async fn download_file(
    State(state): State<FilesAppState>,
    Path(file_name): Path<String>,
) -> Result<Response, BookstoreError> {
    info!(file = %file_name, "Reading file from disk");
    let file = state.storage.load_file(&file_name).await?;
    let disposition = format!("attachment; filename=\"{}\"", file.file_name);

    Ok((
        [
            (header::CONTENT_TYPE, file.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response())
}

pub fn routes(state: FilesAppState) -> Router {
    Router::new()
        .route("/files/uploadFile", post(upload_file))
        .route("/files/uploadMultipleFiles", post(upload_multiple_files))
        .route("/files/downloadFile/{file_name}", get(download_file))
        .with_state(state)
}
