//! Hypermedia links attached to every representation

use axum::http::Method;
use serde::{Deserialize, Serialize};

/// A navigational link from a representation to a related operation
///
/// `href` is always absolute: it starts with the configured base url.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Relation name (e.g., "self", "findAll", "disable")
    pub rel: String,

    /// Absolute target url
    pub href: String,

    /// HTTP method to use against `href`
    #[serde(rename = "type")]
    pub method: String,

    /// Optional human-readable title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Link {
    pub fn new(rel: impl Into<String>, href: impl Into<String>, method: Method) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
            method: method.as_str().to_string(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// A transport representation that carries hypermedia links.
///
/// Implemented with [`crate::impl_representation!`] for DTOs that have an
/// `id: Option<i64>` and a `links: Vec<Link>` field.
pub trait Representation: Send + Sync {
    fn id(&self) -> Option<i64>;

    fn links(&self) -> &[Link];

    fn add_link(&mut self, link: Link);

    /// Find a link by its relation name
    fn link(&self, rel: &str) -> Option<&Link> {
        self.links().iter().find(|link| link.rel == rel)
    }
}

/// Computes the link set of a representation from its own fields.
///
/// Assemblers hold no request state. Paged envelopes ask them for the
/// collection and search urls to build their navigation links.
pub trait LinkAssembler<D>: Send + Sync {
    /// Attach the full link set to `dto`
    fn add_links(&self, dto: &mut D);

    /// Absolute url of the collection route, without query string
    fn collection_href(&self) -> String;

    /// Absolute url of the name-search route for `name`, without query string
    fn search_href(&self, name: &str) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_serializes_method_as_type() {
        let link = Link::new("delete", "http://localhost/person/1", Method::DELETE);
        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json["type"], "DELETE");
        assert!(json.get("title").is_none());

        let titled = link.with_title("Remove");
        let json = serde_json::to_value(&titled).unwrap();
        assert_eq!(json["title"], "Remove");
    }
}
