//! File format selection for export and bulk import
//!
//! Export formats are chosen from an `Accept` value, import formats from
//! the uploaded file name. Both are closed enums: anything unrecognized is
//! a `BadRequest`.

use super::tabular::Tabular;
use super::{delimited, pdf, spreadsheet};
use crate::core::error::{BookstoreError, BookstoreResult};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::Utc;

pub mod media_types {
    pub const CSV: &str = "text/csv";
    pub const XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
    pub const PDF: &str = "application/pdf";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
    Pdf,
}

impl ExportFormat {
    /// Pick the first recognized media type of an `Accept` value.
    ///
    /// Parameters (`;q=0.9`) are ignored. Short names (`csv`, `xlsx`, `pdf`)
    /// are accepted as well.
    pub fn from_accept(accept: &str) -> BookstoreResult<Self> {
        accept
            .split(',')
            .filter_map(|part| part.split(';').next())
            .find_map(|media| Self::from_media_type(media.trim()))
            .ok_or_else(BookstoreError::invalid_file_format)
    }

    fn from_media_type(media: &str) -> Option<Self> {
        let media = media.to_ascii_lowercase();
        match media.as_str() {
            media_types::CSV | "csv" => Some(Self::Csv),
            media_types::XLSX | "xlsx" => Some(Self::Xlsx),
            media_types::PDF | "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Csv => media_types::CSV,
            Self::Xlsx => media_types::XLSX,
            Self::Pdf => media_types::PDF,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Pdf => "pdf",
        }
    }

    pub fn export_records<T: Tabular>(&self, records: &[T]) -> BookstoreResult<Vec<u8>> {
        match self {
            Self::Csv => delimited::write(records),
            Self::Xlsx => spreadsheet::write(records),
            Self::Pdf => pdf::write_table(records),
        }
    }

    pub fn export_record<T: Tabular>(&self, record: &T) -> BookstoreResult<Vec<u8>> {
        match self {
            Self::Csv => delimited::write(std::slice::from_ref(record)),
            Self::Xlsx => spreadsheet::write(std::slice::from_ref(record)),
            Self::Pdf => pdf::write_record(record),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Csv,
    Xlsx,
}

impl ImportFormat {
    /// Select by extension, ignoring case
    pub fn from_file_name(file_name: &str) -> BookstoreResult<Self> {
        let lower = file_name.trim().to_ascii_lowercase();
        if lower.ends_with(".csv") {
            Ok(Self::Csv)
        } else if lower.ends_with(".xlsx") {
            Ok(Self::Xlsx)
        } else {
            Err(BookstoreError::invalid_file_format())
        }
    }

    pub fn import<T: Tabular>(&self, bytes: &[u8]) -> BookstoreResult<Vec<T>> {
        match self {
            Self::Csv => delimited::read(bytes),
            Self::Xlsx => spreadsheet::read(bytes),
        }
    }
}

/// Generated file ready to be sent as an attachment
#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub format: ExportFormat,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportedFile {
    /// Name the file `<stem>_<timestamp>.<extension>`
    pub fn new(format: ExportFormat, stem: &str, bytes: Vec<u8>) -> Self {
        let file_name = format!(
            "{}_{}.{}",
            stem,
            Utc::now().format("%Y%m%d%H%M%S"),
            format.extension()
        );
        Self {
            format,
            file_name,
            bytes,
        }
    }
}

impl IntoResponse for ExportedFile {
    fn into_response(self) -> Response {
        let disposition = format!("attachment; filename=\"{}\"", self.file_name);
        (
            [
                (header::CONTENT_TYPE, self.format.media_type().to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.bytes,
        )
            .into_response()
    }
}
