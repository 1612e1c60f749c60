//! Absolute href construction for hypermedia links

use crate::core::link::Link;
use crate::core::query::{Direction, PageRequest};
use axum::http::Method;

/// Relation names shared by every resource
pub mod rel {
    pub const SELF: &str = "self";
    pub const FIND_ALL: &str = "findAll";
    pub const FIND_BY_NAME: &str = "findByName";
    pub const CREATE: &str = "create";
    pub const CREATE_WITH_FILE: &str = "createWithFile";
    pub const UPDATE: &str = "update";
    pub const DISABLE: &str = "disable";
    pub const DELETE: &str = "delete";
    pub const EXPORT_PAGE: &str = "exportPage";
    pub const EXPORT_PERSON: &str = "exportPerson";
}

/// Builds links rooted at the public base url of the service
///
/// ```rust,ignore
/// let builder = LinkBuilder::new("http://localhost:8080/");
/// let link = builder.link("self", Method::GET, "/person/1");
/// assert_eq!(link.href, "http://localhost:8080/person/1");
/// ```
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    base_url: String,
}

impl LinkBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute href for `path`
    pub fn href(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn link(&self, rel: &str, method: Method, path: &str) -> Link {
        Link::new(rel, self.href(path), method)
    }

    /// Discovery query advertised by collection links.
    ///
    /// Always page 1, 12 items, ascending, whatever the caller requested.
    pub fn discovery_query() -> String {
        PageRequest::new(1, 12, "", Direction::Asc).query_for(1)
    }

    /// Path segment safe for use in an href
    pub fn segment(value: &str) -> String {
        urlencoding::encode(value).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let builder = LinkBuilder::new("http://localhost:8080/");
        assert_eq!(builder.href("/books"), "http://localhost:8080/books");
    }

    #[test]
    fn test_discovery_query_is_fixed() {
        assert_eq!(LinkBuilder::discovery_query(), "page=1&size=12&direction=asc");
    }

    #[test]
    fn test_segment_is_encoded() {
        assert_eq!(LinkBuilder::segment("Ana Maria"), "Ana%20Maria");
    }
}
