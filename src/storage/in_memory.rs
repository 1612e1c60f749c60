//! In-memory implementation of the entity stores for testing and development

use crate::core::entity::{Disableable, Entity};
use crate::core::query::{Direction, Page, PageRequest};
use crate::core::store::{DisableStore, EntityStore};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};
use std::sync::{Arc, RwLock};

/// In-memory store keyed by identifier
///
/// Identifiers come from a monotonically increasing sequence starting at 1.
/// Uses RwLock for thread-safe access.
pub struct InMemoryStore<E> {
    rows: Arc<RwLock<BTreeMap<i64, E>>>,
    sequence: Arc<AtomicI64>,
}

impl<E> Clone for InMemoryStore<E> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
            sequence: self.sequence.clone(),
        }
    }
}

impl<E> InMemoryStore<E> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(BTreeMap::new())),
            sequence: Arc::new(AtomicI64::new(0)),
        }
    }
}

impl<E> Default for InMemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> InMemoryStore<E> {
    fn snapshot(&self) -> Result<Vec<E>> {
        let rows = self
            .rows
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        Ok(rows.values().cloned().collect())
    }

    fn sorted(mut records: Vec<E>, request: &PageRequest) -> Vec<E> {
        records.sort_by(|a, b| {
            let ordering = match (
                a.field_value(&request.sort_field),
                b.field_value(&request.sort_field),
            ) {
                (Some(x), Some(y)) => x.compare(&y),
                _ => Ordering::Equal,
            }
            .then_with(|| a.id().cmp(&b.id()));

            match request.direction {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            }
        });
        records
    }
}

#[async_trait]
impl<E: Entity> EntityStore<E> for InMemoryStore<E> {
    async fn find_by_id(&self, id: i64) -> Result<Option<E>> {
        let rows = self
            .rows
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<E>> {
        self.snapshot()
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<E>> {
        let records = Self::sorted(self.snapshot()?, request);
        Ok(Page::from_sorted(records, request))
    }

    async fn find_by_name(&self, name: &str, request: &PageRequest) -> Result<Page<E>> {
        let matching = self
            .snapshot()?
            .into_iter()
            .filter(|record| record.name_matches(name))
            .collect();
        Ok(Page::from_sorted(Self::sorted(matching, request), request))
    }

    async fn save(&self, mut entity: E) -> Result<E> {
        let mut rows = self
            .rows
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let id = match entity.id() {
            Some(id) if rows.contains_key(&id) => id,
            _ => self.sequence.fetch_add(1, AtomicOrdering::SeqCst) + 1,
        };
        entity.set_id(Some(id));
        rows.insert(id, entity.clone());

        Ok(entity)
    }

    async fn delete(&self, entity: &E) -> Result<()> {
        let id = entity
            .id()
            .ok_or_else(|| anyhow!("Cannot delete a record without identifier"))?;
        let mut rows = self
            .rows
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        rows.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl<E: Disableable> DisableStore<E> for InMemoryStore<E> {
    async fn disable(&self, id: i64) -> Result<bool> {
        // Lookup and mutation happen under the same write guard.
        let mut rows = self
            .rows
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        match rows.get_mut(&id) {
            Some(record) => {
                record.disable();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
