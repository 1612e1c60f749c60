//! Core module containing fundamental traits and types of the service

pub mod entity;
pub mod error;
pub mod field;
pub mod link;
pub mod mapper;
pub mod query;
pub mod service;
pub mod store;

pub use entity::{Disableable, Entity, Merge};
pub use error::{BookstoreError, BookstoreResult, ErrorResponse};
pub use field::FieldValue;
pub use link::{Link, LinkAssembler, Representation};
pub use query::{Direction, ListModel, Page, PageMetadata, PageParams, PageRequest, PagedModel};
pub use service::CrudService;
pub use store::{DisableStore, EntityStore};
