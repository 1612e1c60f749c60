//! Entity traits defining the core abstraction for persisted records

use crate::core::field::FieldValue;

/// Base trait for all persisted records.
///
/// Identifiers are 64-bit integers assigned by the store on first save.
/// A record without an identifier has never been persisted.
pub trait Entity: Clone + Send + Sync + 'static {
    /// The resource name used in URLs and logs (e.g., "person", "books")
    fn resource_name() -> &'static str;

    /// Field used to order pages when the caller does not pick one
    fn default_sort_field() -> &'static str;

    /// Get the identifier, if the record was persisted
    fn id(&self) -> Option<i64>;

    /// Set or clear the identifier
    fn set_id(&mut self, id: Option<i64>);

    /// Value of the searchable name field (first name, title, ...)
    fn name(&self) -> &str;

    /// Get the value of a specific field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Case-insensitive substring match on [`Entity::name`]
    fn name_matches(&self, needle: &str) -> bool {
        self.name().to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Copies the mutable fields of a representation onto a persisted record.
///
/// The identifier and any server-owned state are left untouched.
pub trait Merge<D> {
    fn merge_from(&mut self, source: &D);
}

/// Records that can be switched off without being deleted
pub trait Disableable: Entity {
    fn disable(&mut self);
}
