//! Store traits implemented by persistence backends

use crate::core::entity::Entity;
use crate::core::query::{Page, PageRequest};
use anyhow::Result;
use async_trait::async_trait;

/// Persistence operations for one record type
///
/// Backends report failures as `anyhow::Error`; the service layer turns
/// them into [`crate::core::error::BookstoreError::Store`].
#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<E>>;

    async fn find_all(&self) -> Result<Vec<E>>;

    /// Ordered slice of all records
    async fn find_page(&self, request: &PageRequest) -> Result<Page<E>>;

    /// Ordered slice of the records whose name contains `name`, ignoring case
    async fn find_by_name(&self, name: &str, request: &PageRequest) -> Result<Page<E>>;

    /// Insert when the record has no identifier, replace it otherwise
    async fn save(&self, entity: E) -> Result<E>;

    async fn delete(&self, entity: &E) -> Result<()>;
}

/// Stores able to switch a record off in a single atomic step
#[async_trait]
pub trait DisableStore<E: Entity>: EntityStore<E> {
    /// Returns `false` when no record has this identifier
    async fn disable(&self, id: i64) -> Result<bool>;
}
