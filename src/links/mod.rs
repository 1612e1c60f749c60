//! Hypermedia link construction
//!
//! Resource-specific assemblers live next to their entity
//! (`entities::person::links`, `entities::book::links`) and share the
//! [`LinkBuilder`] and relation names defined here.

pub mod builder;

pub use builder::{LinkBuilder, rel};
