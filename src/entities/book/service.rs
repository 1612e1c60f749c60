//! Book operations

use super::links::BookLinks;
use super::model::{Book, BookDto};
use crate::core::error::BookstoreResult;
use crate::core::query::{PageRequest, PagedModel};
use crate::core::service::CrudService;
use crate::core::store::EntityStore;
use std::sync::Arc;

pub struct BookService {
    crud: CrudService<Book, BookDto>,
}

impl BookService {
    pub fn new(store: Arc<dyn EntityStore<Book>>, links: BookLinks) -> Self {
        Self {
            crud: CrudService::new(store, Arc::new(links)),
        }
    }

    pub async fn find_all(&self) -> BookstoreResult<Vec<BookDto>> {
        self.crud.find_all().await
    }

    pub async fn find_page(&self, request: &PageRequest) -> BookstoreResult<PagedModel<BookDto>> {
        self.crud.find_page(request).await
    }

    pub async fn find_by_title(
        &self,
        title: &str,
        request: &PageRequest,
    ) -> BookstoreResult<PagedModel<BookDto>> {
        self.crud.find_by_name(title, request).await
    }

    pub async fn find_by_id(&self, id: i64) -> BookstoreResult<BookDto> {
        self.crud.find_by_id(id).await
    }

    pub async fn create(&self, book: Option<BookDto>) -> BookstoreResult<BookDto> {
        self.crud.create(book).await
    }

    pub async fn update(&self, book: Option<BookDto>) -> BookstoreResult<BookDto> {
        self.crud.update(book).await
    }

    pub async fn delete(&self, id: i64) -> BookstoreResult<()> {
        self.crud.delete(id).await
    }
}
