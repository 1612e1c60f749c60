//! CSV encoding of tabular records

use super::tabular::{Record, Tabular, normalize_header};
use crate::core::error::{BookstoreError, BookstoreResult};

pub fn write<T: Tabular>(records: &[T]) -> BookstoreResult<Vec<u8>> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer
        .write_record(T::headers())
        .map_err(|e| BookstoreError::storage_with("Failed to write CSV header", e))?;
    for record in records {
        writer
            .write_record(record.to_row())
            .map_err(|e| BookstoreError::storage_with("Failed to write CSV row", e))?;
    }
    writer
        .into_inner()
        .map_err(|e| BookstoreError::storage(format!("Failed to flush CSV: {}", e)))
}

/// Read rows keyed by the header line
pub fn read<T: Tabular>(bytes: &[u8]) -> BookstoreResult<Vec<T>> {
    let mut reader = ::csv::ReaderBuilder::new()
        .trim(::csv::Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| BookstoreError::storage_with("Unreadable CSV header", e))?
        .iter()
        .map(normalize_header)
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| BookstoreError::storage_with("Unreadable CSV row", e))?;
        if row.iter().all(str::is_empty) {
            continue;
        }
        rows.push(T::from_record(&Record::new(headers.as_slice(), row.iter()))?);
    }
    Ok(rows)
}
