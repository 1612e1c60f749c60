//! Link set of a book representation

use super::model::BookDto;
use crate::core::link::{LinkAssembler, Representation};
use crate::links::{LinkBuilder, rel};
use axum::http::Method;

pub const BOOKS_PATH: &str = "/books";

/// Adds `self`, `findAll`, `create`, `update` and `delete`
#[derive(Debug, Clone)]
pub struct BookLinks {
    builder: LinkBuilder,
}

impl BookLinks {
    pub fn new(builder: LinkBuilder) -> Self {
        Self { builder }
    }
}

impl LinkAssembler<BookDto> for BookLinks {
    fn add_links(&self, dto: &mut BookDto) {
        let id = dto.id.map(|id| id.to_string()).unwrap_or_default();
        let item = format!("{BOOKS_PATH}/{id}");
        let find_all = format!("{BOOKS_PATH}?{}", LinkBuilder::discovery_query());

        dto.add_link(self.builder.link(rel::SELF, Method::GET, &item));
        dto.add_link(self.builder.link(rel::FIND_ALL, Method::GET, &find_all));
        dto.add_link(self.builder.link(rel::CREATE, Method::POST, BOOKS_PATH));
        dto.add_link(self.builder.link(rel::UPDATE, Method::PUT, BOOKS_PATH));
        dto.add_link(self.builder.link(rel::DELETE, Method::DELETE, &item));
    }

    fn collection_href(&self) -> String {
        self.builder.href(BOOKS_PATH)
    }

    fn search_href(&self, name: &str) -> String {
        self.builder.href(&format!(
            "{BOOKS_PATH}/findBooksByTitle/{}",
            LinkBuilder::segment(name)
        ))
    }
}
