//! PostgreSQL storage backend using sqlx.
//!
//! Provides `PgPersonStore` and `PgBookStore` backed by a `sqlx::PgPool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! bookstore = { version = "0.1", features = ["postgres"] }
//! ```
//!
//! # Schema
//!
//! One table per resource: `person` and `books`, each keyed by a
//! `BIGSERIAL` id. [`ensure_schema`] creates them on startup.

use crate::core::entity::Entity;
use crate::core::query::{Direction, Page, PageRequest};
use crate::core::store::{DisableStore, EntityStore};
use crate::entities::{Book, Person};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

// ---------------------------------------------------------------------------
// Schema management
// ---------------------------------------------------------------------------

/// Open a pool against `url`
pub async fn connect(url: &str, max_connections: u32) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
        .map_err(|e| anyhow!("Failed to connect to PostgreSQL: {}", e))
}

/// Apply the required tables (idempotent).
///
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS person (
            id BIGSERIAL PRIMARY KEY,
            first_name VARCHAR(80) NOT NULL,
            last_name VARCHAR(80) NOT NULL,
            address VARCHAR(100) NOT NULL,
            gender VARCHAR(6) NOT NULL,
            enabled BOOLEAN NOT NULL DEFAULT TRUE,
            profile_url VARCHAR(255) NULL,
            photo_url VARCHAR(255) NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| anyhow!("Failed to create person table: {}", e))?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS books (
            id BIGSERIAL PRIMARY KEY,
            author TEXT NOT NULL,
            launch_date TIMESTAMPTZ NOT NULL,
            price DOUBLE PRECISION NOT NULL,
            title TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| anyhow!("Failed to create books table: {}", e))?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// `ORDER BY` clause for `request`.
///
/// Only whitelisted columns reach the SQL text; anything else sorts by the
/// fallback column. Ties break on `id`.
fn order_clause(request: &PageRequest, columns: &[&str], fallback: &str) -> String {
    let column = columns
        .iter()
        .find(|c| **c == request.sort_field)
        .copied()
        .unwrap_or(fallback);
    let direction = match request.direction {
        Direction::Asc => "ASC",
        Direction::Desc => "DESC",
    };
    format!("ORDER BY {column} {direction}, id {direction}")
}

fn page_bounds(request: &PageRequest) -> Result<(i64, i64)> {
    let limit = i64::try_from(request.size).map_err(|_| anyhow!("Page size out of range"))?;
    let offset = i64::try_from(request.offset()).map_err(|_| anyhow!("Page offset out of range"))?;
    Ok((limit, offset))
}

fn to_count(value: i64) -> usize {
    usize::try_from(value).unwrap_or(0)
}

/// `%name%` with LIKE wildcards escaped
fn contains_pattern(name: &str) -> String {
    let escaped = name
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

// ---------------------------------------------------------------------------
// PgPersonStore
// ---------------------------------------------------------------------------

const PERSON_COLUMNS: &[&str] = &["id", "first_name", "last_name", "address", "gender", "enabled"];

/// Person store backed by the `person` table
#[derive(Clone, Debug)]
pub struct PgPersonStore {
    pool: PgPool,
}

impl PgPersonStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore<Person> for PgPersonStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Person>> {
        sqlx::query_as::<_, Person>("SELECT * FROM person WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to load person {}: {}", id, e))
    }

    async fn find_all(&self) -> Result<Vec<Person>> {
        sqlx::query_as::<_, Person>("SELECT * FROM person ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to list people: {}", e))
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<Person>> {
        let (limit, offset) = page_bounds(request)?;
        let sql = format!(
            "SELECT * FROM person {} LIMIT $1 OFFSET $2",
            order_clause(request, PERSON_COLUMNS, Person::default_sort_field())
        );
        let content = sqlx::query_as::<_, Person>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to page people: {}", e))?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM person")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to count people: {}", e))?;

        Ok(Page::new(content, request, to_count(total)))
    }

    async fn find_by_name(&self, name: &str, request: &PageRequest) -> Result<Page<Person>> {
        let (limit, offset) = page_bounds(request)?;
        let pattern = contains_pattern(name);
        let sql = format!(
            "SELECT * FROM person WHERE first_name ILIKE $1 {} LIMIT $2 OFFSET $3",
            order_clause(request, PERSON_COLUMNS, Person::default_sort_field())
        );
        let content = sqlx::query_as::<_, Person>(&sql)
            .bind(&pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to search people: {}", e))?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM person WHERE first_name ILIKE $1")
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to count people: {}", e))?;

        Ok(Page::new(content, request, to_count(total)))
    }

    async fn save(&self, person: Person) -> Result<Person> {
        if let Some(id) = person.id {
            let updated = sqlx::query_as::<_, Person>(
                "UPDATE person SET first_name = $2, last_name = $3, address = $4, gender = $5,
                    enabled = $6, profile_url = $7, photo_url = $8
                 WHERE id = $1 RETURNING *",
            )
            .bind(id)
            .bind(&person.first_name)
            .bind(&person.last_name)
            .bind(&person.address)
            .bind(&person.gender)
            .bind(person.enabled)
            .bind(&person.profile_url)
            .bind(&person.photo_url)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to update person {}: {}", id, e))?;
            if let Some(updated) = updated {
                return Ok(updated);
            }
        }

        sqlx::query_as::<_, Person>(
            "INSERT INTO person (first_name, last_name, address, gender, enabled, profile_url, photo_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(&person.first_name)
        .bind(&person.last_name)
        .bind(&person.address)
        .bind(&person.gender)
        .bind(person.enabled)
        .bind(&person.profile_url)
        .bind(&person.photo_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to insert person: {}", e))
    }

    async fn delete(&self, person: &Person) -> Result<()> {
        let id = person.id.ok_or_else(|| anyhow!("Cannot delete a person without id"))?;
        sqlx::query("DELETE FROM person WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to delete person {}: {}", id, e))?;
        Ok(())
    }
}

#[async_trait]
impl DisableStore<Person> for PgPersonStore {
    async fn disable(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("UPDATE person SET enabled = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to disable person {}: {}", id, e))?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// PgBookStore
// ---------------------------------------------------------------------------

const BOOK_COLUMNS: &[&str] = &["id", "author", "title", "price", "launch_date"];

/// Book store backed by the `books` table
#[derive(Clone, Debug)]
pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore<Book> for PgBookStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Book>> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to load book {}: {}", id, e))
    }

    async fn find_all(&self) -> Result<Vec<Book>> {
        sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to list books: {}", e))
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<Book>> {
        let (limit, offset) = page_bounds(request)?;
        let sql = format!(
            "SELECT * FROM books {} LIMIT $1 OFFSET $2",
            order_clause(request, BOOK_COLUMNS, Book::default_sort_field())
        );
        let content = sqlx::query_as::<_, Book>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to page books: {}", e))?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to count books: {}", e))?;

        Ok(Page::new(content, request, to_count(total)))
    }

    async fn find_by_name(&self, title: &str, request: &PageRequest) -> Result<Page<Book>> {
        let (limit, offset) = page_bounds(request)?;
        let pattern = contains_pattern(title);
        let sql = format!(
            "SELECT * FROM books WHERE title ILIKE $1 {} LIMIT $2 OFFSET $3",
            order_clause(request, BOOK_COLUMNS, Book::default_sort_field())
        );
        let content = sqlx::query_as::<_, Book>(&sql)
            .bind(&pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to search books: {}", e))?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE title ILIKE $1")
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to count books: {}", e))?;

        Ok(Page::new(content, request, to_count(total)))
    }

    async fn save(&self, book: Book) -> Result<Book> {
        if let Some(id) = book.id {
            let updated = sqlx::query_as::<_, Book>(
                "UPDATE books SET author = $2, title = $3, price = $4, launch_date = $5
                 WHERE id = $1 RETURNING *",
            )
            .bind(id)
            .bind(&book.author)
            .bind(&book.title)
            .bind(book.price)
            .bind(book.launch_date)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to update book {}: {}", id, e))?;
            if let Some(updated) = updated {
                return Ok(updated);
            }
        }

        sqlx::query_as::<_, Book>(
            "INSERT INTO books (author, title, price, launch_date)
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&book.author)
        .bind(&book.title)
        .bind(book.price)
        .bind(book.launch_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to insert book: {}", e))
    }

    async fn delete(&self, book: &Book) -> Result<()> {
        let id = book.id.ok_or_else(|| anyhow!("Cannot delete a book without id"))?;
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to delete book {}: {}", id, e))?;
        Ok(())
    }
}
