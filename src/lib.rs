//! # Bookstore
//!
//! A REST service managing people and books.
//!
//! ## Features
//!
//! - **Paged collections**: `page`, `size` and `direction` query parameters
//!   with `self`/`first`/`prev`/`next`/`last` navigation links
//! - **Hypermedia**: every returned record lists the operations available on it
//! - **Content negotiation**: JSON, XML and YAML bodies in both directions
//! - **Files**: uploads and downloads, CSV/XLSX import, CSV/XLSX/PDF export
//! - **Authentication**: argon2 password hashes and JWT access/refresh tokens
//! - **Storage**: in-memory by default, PostgreSQL behind the `postgres` feature
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bookstore::prelude::*;
//!
//! let app = ServerBuilder::new()
//!     .with_config(AppConfig::load(None)?)
//!     .build()?;
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod core;
pub mod entities;
pub mod files;
pub mod links;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        BookstoreError, BookstoreResult, CrudService, Direction, DisableStore, Disableable,
        Entity, EntityStore, ErrorResponse, FieldValue, Link, LinkAssembler, Merge, Page,
        PageParams, PageRequest, PagedModel, Representation,
    };

    // === Resources ===
    pub use crate::entities::{Book, BookDto, BookService, Person, PersonDto, PersonService};

    // === Auth ===
    pub use crate::auth::{AccountCredentials, AuthService, TokenDto, TokenProvider};

    // === Files ===
    pub use crate::files::{ExportFormat, ExportedFile, FileStorageService, ImportFormat};

    // === Storage ===
    pub use crate::storage::InMemoryStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::{PgBookStore, PgPersonStore};

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{EntityDescriptor, EntityRegistry, MediaFormat, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};

    // === Axum ===
    pub use axum::Router;
}
