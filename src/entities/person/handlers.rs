//! Person HTTP handlers

use super::model::{Person, PersonDto};
use super::service::PersonService;
use crate::core::entity::Entity;
use crate::core::error::BookstoreError;
use crate::core::query::{PageParams, PagedModel};
use crate::files::handlers::read_parts;
use crate::files::{ExportedFile, media_types};
use crate::server::negotiation::{Accepts, ListBody, Negotiated, Payload};
use axum::{
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode, header},
};
use std::sync::Arc;

/// Person-specific AppState
#[derive(Clone)]
pub struct PersonAppState {
    pub service: Arc<PersonService>,
}

type PersonResult<T> = Result<Negotiated<T>, BookstoreError>;

fn accept_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

pub async fn list_people(
    State(state): State<PersonAppState>,
    Accepts(format): Accepts,
    Query(params): Query<PageParams>,
) -> PersonResult<PagedModel<PersonDto>> {
    let request = params.to_request(Person::default_sort_field());
    Ok(Negotiated::ok(format, state.service.find_page(&request).await?))
}

pub async fn find_people_by_name(
    State(state): State<PersonAppState>,
    Accepts(format): Accepts,
    Path(first_name): Path<String>,
    Query(params): Query<PageParams>,
) -> PersonResult<PagedModel<PersonDto>> {
    let request = params.to_request(Person::default_sort_field());
    let page = state.service.find_by_name(&first_name, &request).await?;
    Ok(Negotiated::ok(format, page))
}

pub async fn get_person(
    State(state): State<PersonAppState>,
    Accepts(format): Accepts,
    Path(id): Path<i64>,
) -> PersonResult<PersonDto> {
    Ok(Negotiated::ok(format, state.service.find_by_id(id).await?))
}

pub async fn create_person(
    State(state): State<PersonAppState>,
    Accepts(format): Accepts,
    Payload(person): Payload<PersonDto>,
) -> PersonResult<PersonDto> {
    Ok(Negotiated::ok(format, state.service.create(person).await?))
}

pub async fn mass_creation(
    State(state): State<PersonAppState>,
    Accepts(format): Accepts,
    multipart: Multipart,
) -> PersonResult<ListBody<PersonDto>> {
    let part = read_parts(multipart, "file")
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| BookstoreError::bad_request("Please set a valid file!"))?;

    let people = state
        .service
        .create_from_bulk_source(&part.bytes, part.file_name.as_deref())
        .await?;
    Ok(Negotiated::list(format, people))
}

pub async fn update_person(
    State(state): State<PersonAppState>,
    Accepts(format): Accepts,
    Payload(person): Payload<PersonDto>,
) -> PersonResult<PersonDto> {
    Ok(Negotiated::ok(format, state.service.update(person).await?))
}

pub async fn disable_person(
    State(state): State<PersonAppState>,
    Accepts(format): Accepts,
    Path(id): Path<i64>,
) -> PersonResult<PersonDto> {
    Ok(Negotiated::ok(format, state.service.disable(id).await?))
}

pub async fn delete_person(
    State(state): State<PersonAppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, BookstoreError> {
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `Accept` picks the format; a missing value is rejected
pub async fn export_page(
    State(state): State<PersonAppState>,
    headers: HeaderMap,
    Query(params): Query<PageParams>,
) -> Result<ExportedFile, BookstoreError> {
    let request = params.to_request(Person::default_sort_field());
    let accept = accept_header(&headers).unwrap_or_default();
    state.service.export_page(&request, accept).await
}

/// `Accept` picks the format; PDF when absent or `*/*`
pub async fn export_person(
    State(state): State<PersonAppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<ExportedFile, BookstoreError> {
    let accept = match accept_header(&headers) {
        None | Some("*/*") => media_types::PDF,
        Some(value) => value,
    };
    state.service.export_person(id, accept).await
}
