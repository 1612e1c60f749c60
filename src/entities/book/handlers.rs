//! Book HTTP handlers

use super::model::{Book, BookDto};
use super::service::BookService;
use crate::core::entity::Entity;
use crate::core::error::BookstoreError;
use crate::core::query::{PageParams, PagedModel};
use crate::server::negotiation::{Accepts, Negotiated, Payload};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

/// Book-specific AppState
#[derive(Clone)]
pub struct BookAppState {
    pub service: Arc<BookService>,
}

type BookResult<T> = Result<Negotiated<T>, BookstoreError>;

pub async fn list_books(
    State(state): State<BookAppState>,
    Accepts(format): Accepts,
    Query(params): Query<PageParams>,
) -> BookResult<PagedModel<BookDto>> {
    let request = params.to_request(Book::default_sort_field());
    Ok(Negotiated::ok(format, state.service.find_page(&request).await?))
}

pub async fn find_books_by_title(
    State(state): State<BookAppState>,
    Accepts(format): Accepts,
    Path(title): Path<String>,
    Query(params): Query<PageParams>,
) -> BookResult<PagedModel<BookDto>> {
    let request = params.to_request(Book::default_sort_field());
    let page = state.service.find_by_title(&title, &request).await?;
    Ok(Negotiated::ok(format, page))
}

pub async fn get_book(
    State(state): State<BookAppState>,
    Accepts(format): Accepts,
    Path(id): Path<i64>,
) -> BookResult<BookDto> {
    Ok(Negotiated::ok(format, state.service.find_by_id(id).await?))
}

pub async fn create_book(
    State(state): State<BookAppState>,
    Accepts(format): Accepts,
    Payload(book): Payload<BookDto>,
) -> BookResult<BookDto> {
    Ok(Negotiated::created(format, state.service.create(book).await?))
}

pub async fn update_book(
    State(state): State<BookAppState>,
    Accepts(format): Accepts,
    Payload(book): Payload<BookDto>,
) -> BookResult<BookDto> {
    Ok(Negotiated::ok(format, state.service.update(book).await?))
}

pub async fn delete_book(
    State(state): State<BookAppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, BookstoreError> {
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
