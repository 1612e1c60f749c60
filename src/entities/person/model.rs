//! Person record and its transport representation

use crate::core::entity::{Disableable, Entity, Merge};
use crate::core::error::{BookstoreError, BookstoreResult};
use crate::core::field::FieldValue;
use crate::core::link::Link;
use crate::files::tabular::{Record, Tabular};
use crate::impl_representation;
use serde::{Deserialize, Serialize};

/// Persisted person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Person {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub gender: String,
    pub enabled: bool,
    pub profile_url: Option<String>,
    pub photo_url: Option<String>,
}

impl Entity for Person {
    fn resource_name() -> &'static str {
        "person"
    }

    fn default_sort_field() -> &'static str {
        "first_name"
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.first_name
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            "first_name" => Some(self.first_name.as_str().into()),
            "last_name" => Some(self.last_name.as_str().into()),
            "address" => Some(self.address.as_str().into()),
            "gender" => Some(self.gender.as_str().into()),
            "enabled" => Some(FieldValue::Boolean(self.enabled)),
            _ => None,
        }
    }
}

impl Disableable for Person {
    fn disable(&mut self) {
        self.enabled = false;
    }
}

/// Copies names, address, gender and picture urls. `enabled` only changes
/// through the disable transition.
impl Merge<PersonDto> for Person {
    fn merge_from(&mut self, source: &PersonDto) {
        self.first_name = source.first_name.clone();
        self.last_name = source.last_name.clone();
        self.address = source.address.clone();
        self.gender = source.gender.clone();
        self.profile_url = source.profile_url.clone();
        self.photo_url = source.photo_url.clone();
    }
}

fn enabled_by_default() -> bool {
    true
}

/// Person as exchanged over HTTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "Person")]
pub struct PersonDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub gender: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl_representation!(PersonDto);

impl PersonDto {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: impl Into<String>,
        gender: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            address: address.into(),
            gender: gender.into(),
            enabled: true,
            profile_url: None,
            photo_url: None,
            links: Vec::new(),
        }
    }
}

impl Tabular for PersonDto {
    const TITLE: &'static str = "People";

    fn headers() -> &'static [&'static str] {
        &["ID", "First Name", "Last Name", "Address", "Gender", "Enabled"]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.map(|id| id.to_string()).unwrap_or_default(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.address.clone(),
            self.gender.clone(),
            self.enabled.to_string(),
        ]
    }

    fn from_record(record: &Record) -> BookstoreResult<Self> {
        let first_name = record.require("first_name")?;
        if first_name.is_empty() {
            return Err(BookstoreError::storage(
                "Every imported row needs a first name",
            ));
        }

        Ok(Self::new(
            first_name,
            record.get("last_name").unwrap_or_default(),
            record.get("address").unwrap_or_default(),
            record.get("gender").unwrap_or_default(),
        ))
    }
}
