//! Query parameters and pagination utilities

use crate::core::link::Link;
use axum::http::Method;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 12;
pub const MAX_PAGE_SIZE: usize = 100;

/// Sort direction of a page request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// Parse a direction, falling back to ascending.
    ///
    /// Only a case-insensitive `desc` selects descending order.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("desc") => Direction::Desc,
            _ => Direction::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// Query parameters for pagination
///
/// # Example
/// ```text
/// GET /person?page=0&size=12&direction=desc
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    /// Zero-based page index
    pub page: Option<usize>,

    /// Number of items per page
    pub size: Option<usize>,

    /// `asc` or `desc`
    pub direction: Option<String>,
}

impl PageParams {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(0)
    }

    /// Get size, ensuring it stays within 1..=100
    pub fn size(&self) -> usize {
        self.size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn direction(&self) -> Direction {
        Direction::parse(self.direction.as_deref())
    }

    /// Build a page request sorted by `sort_field`
    pub fn to_request(&self, sort_field: &str) -> PageRequest {
        PageRequest::new(self.page(), self.size(), sort_field, self.direction())
    }
}

/// A resolved page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
    pub sort_field: String,
    pub direction: Direction,
}

impl PageRequest {
    pub fn new(page: usize, size: usize, sort_field: impl Into<String>, direction: Direction) -> Self {
        Self {
            page,
            size: size.max(1),
            sort_field: sort_field.into(),
            direction,
        }
    }

    /// Index of the first record on this page
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }

    /// Query string reproducing this request for page `number`
    pub fn query_for(&self, number: usize) -> String {
        format!(
            "page={}&size={}&direction={}",
            number,
            self.size,
            self.direction.as_str()
        )
    }
}

/// One page of records plus the total count
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: usize,
    pub size: usize,
    pub total_elements: usize,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: usize) -> Self {
        Self {
            content,
            number: request.page,
            size: request.size,
            total_elements,
        }
    }

    /// Slice an already ordered collection
    pub fn from_sorted(all: Vec<T>, request: &PageRequest) -> Self {
        let total = all.len();
        let content = all
            .into_iter()
            .skip(request.offset())
            .take(request.size)
            .collect();
        Self::new(content, request, total)
    }

    pub fn total_pages(&self) -> usize {
        let size = self.size.max(1);
        if self.total_elements == 0 {
            0
        } else {
            self.total_elements.div_ceil(size)
        }
    }

    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        Ok(Page {
            content: self.content.into_iter().map(f).collect::<Result<_, E>>()?,
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        })
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
    /// Zero-based page index
    pub number: usize,
}

/// Unpaged list of representations under a named root
#[derive(Debug, Clone, Serialize)]
#[serde(rename = "List")]
pub struct ListModel<T> {
    pub content: Vec<T>,
}

/// Paged envelope: linked representations, navigation links and metadata
#[derive(Debug, Clone, Serialize)]
#[serde(rename = "PagedModel")]
pub struct PagedModel<T> {
    pub content: Vec<T>,
    pub links: Vec<Link>,
    pub page: PageMetadata,
}

impl<T> PagedModel<T> {
    /// Wrap `page` and compute its navigation links.
    ///
    /// `href_for` returns the absolute url of a given page number. `self`
    /// always points at the current page; `first`, `prev`, `next` and
    /// `last` are only present when they lead somewhere.
    pub fn assemble(page: Page<T>, href_for: impl Fn(usize) -> String) -> Self {
        let total_pages = page.total_pages();
        let number = page.number;

        let mut links = vec![Link::new("self", href_for(number), Method::GET)];
        if total_pages > 0 {
            let last = total_pages - 1;
            links.push(Link::new("first", href_for(0), Method::GET));
            if number > 0 {
                links.push(Link::new("prev", href_for((number - 1).min(last)), Method::GET));
            }
            if number < last {
                links.push(Link::new("next", href_for(number + 1), Method::GET));
            }
            links.push(Link::new("last", href_for(last), Method::GET));
        }

        Self {
            page: PageMetadata {
                size: page.size,
                total_elements: page.total_elements,
                total_pages,
                number,
            },
            content: page.content,
            links,
        }
    }

    pub fn link(&self, rel: &str) -> Option<&Link> {
        self.links.iter().find(|link| link.rel == rel)
    }
}
