//! Entity descriptor for Book

use super::handlers::{
    BookAppState, create_book, delete_book, find_books_by_title, get_book, list_books, update_book,
};
use super::service::BookService;
use crate::server::entity_registry::EntityDescriptor;
use axum::{Router, routing::get};
use std::sync::Arc;

/// Descriptor for the Book resource
pub struct BookDescriptor {
    pub service: Arc<BookService>,
}

impl BookDescriptor {
    pub fn new(service: Arc<BookService>) -> Self {
        Self { service }
    }
}

impl EntityDescriptor for BookDescriptor {
    fn entity_type(&self) -> &str {
        "books"
    }

    fn build_routes(&self) -> Router {
        let state = BookAppState {
            service: self.service.clone(),
        };

        Router::new()
            .route(
                "/books",
                get(list_books).post(create_book).put(update_book),
            )
            .route("/books/findBooksByTitle/{title}", get(find_books_by_title))
            .route("/books/{id}", get(get_book).delete(delete_book))
            .with_state(state)
    }
}
