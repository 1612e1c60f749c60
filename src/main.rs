//! Bookstore server binary
//!
//! Reads the YAML file named by `BOOKSTORE_CONFIG` (defaults otherwise) and
//! applies the `BOOKSTORE_*` environment overrides.

use anyhow::Result;
use bookstore::config::AppConfig;
use bookstore::server::ServerBuilder;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bookstore=info,tower_http=info")),
        )
        .init();

    let config_path = std::env::var("BOOKSTORE_CONFIG").ok().map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;

    let builder = with_database(ServerBuilder::new(), &config).await?;
    builder.with_config(config).serve().await
}

#[cfg(feature = "postgres")]
async fn with_database(builder: ServerBuilder, config: &AppConfig) -> Result<ServerBuilder> {
    use bookstore::storage::postgres::{connect, ensure_schema};
    use bookstore::storage::{PgBookStore, PgPersonStore};

    let Some(database) = &config.database else {
        tracing::info!("No database configured, using in-memory storage");
        return Ok(builder);
    };

    let pool = connect(&database.url, database.max_connections).await?;
    ensure_schema(&pool).await?;
    tracing::info!("Connected to PostgreSQL");

    Ok(builder
        .with_person_store(PgPersonStore::new(pool.clone()))
        .with_book_store(PgBookStore::new(pool)))
}

#[cfg(not(feature = "postgres"))]
async fn with_database(builder: ServerBuilder, config: &AppConfig) -> Result<ServerBuilder> {
    if config.database.is_some() {
        tracing::warn!("Database configured but the postgres feature is off, using in-memory storage");
    }
    Ok(builder)
}
