//! Book record and its transport representation

use crate::core::entity::{Entity, Merge};
use crate::core::field::FieldValue;
use crate::core::link::Link;
use crate::impl_representation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Book {
    pub id: Option<i64>,
    pub author: String,
    pub title: String,
    pub price: f64,
    pub launch_date: DateTime<Utc>,
}

impl Entity for Book {
    fn resource_name() -> &'static str {
        "books"
    }

    fn default_sort_field() -> &'static str {
        "title"
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.title
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            "author" => Some(self.author.as_str().into()),
            "title" => Some(self.title.as_str().into()),
            "price" => Some(FieldValue::Float(self.price)),
            "launch_date" => Some(FieldValue::DateTime(self.launch_date)),
            _ => None,
        }
    }
}

impl Merge<BookDto> for Book {
    fn merge_from(&mut self, source: &BookDto) {
        self.author = source.author.clone();
        self.title = source.title.clone();
        self.price = source.price;
        self.launch_date = source.launch_date;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "Book")]
pub struct BookDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub author: String,
    pub title: String,
    pub price: f64,
    pub launch_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl_representation!(BookDto);

impl BookDto {
    pub fn new(
        author: impl Into<String>,
        title: impl Into<String>,
        price: f64,
        launch_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            author: author.into(),
            title: title.into(),
            price,
            launch_date,
            links: Vec::new(),
        }
    }
}
