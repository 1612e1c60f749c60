//! Row-oriented view of a representation, shared by every file format

use crate::core::error::{BookstoreError, BookstoreResult};
use std::collections::HashMap;

/// A type that can be written as a table row and read back from one
pub trait Tabular: Sized {
    /// Sheet and document title
    const TITLE: &'static str;

    /// Column headers, in row order
    fn headers() -> &'static [&'static str];

    fn to_row(&self) -> Vec<String>;

    fn from_record(record: &Record) -> BookstoreResult<Self>;
}

/// One imported row, addressed by normalized header name
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: HashMap<String, String>,
}

impl Record {
    pub fn new<H, V>(headers: &[H], values: impl IntoIterator<Item = V>) -> Self
    where
        H: AsRef<str>,
        V: AsRef<str>,
    {
        let fields = headers
            .iter()
            .zip(values)
            .map(|(header, value)| (normalize_header(header.as_ref()), value.as_ref().trim().to_string()))
            .collect();
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(&normalize_header(name)).map(String::as_str)
    }

    pub fn require(&self, name: &str) -> BookstoreResult<&str> {
        self.get(name)
            .ok_or_else(|| BookstoreError::storage(format!("Missing column: {}", name)))
    }
}

/// `First Name`, `first_name` and `FIRST-NAME` all become `first_name`
pub fn normalize_header(header: &str) -> String {
    header
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}
