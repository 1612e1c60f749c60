//! XLSX encoding of tabular records
//!
//! Writing goes through `rust_xlsxwriter`, reading through `calamine`.
//! Only the first worksheet is read; its first row holds the headers.

use super::tabular::{Record, Tabular, normalize_header};
use crate::core::error::{BookstoreError, BookstoreResult};
use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::io::Cursor;

fn write_error(err: XlsxError) -> BookstoreError {
    BookstoreError::storage_with("Failed to write XLSX workbook", err)
}

pub fn write<T: Tabular>(records: &[T]) -> BookstoreResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(T::TITLE).map_err(write_error)?;

    for (col, title) in T::headers().iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *title, &header)
            .map_err(write_error)?;
    }
    for (index, record) in records.iter().enumerate() {
        let row = (index + 1) as u32;
        for (col, value) in record.to_row().into_iter().enumerate() {
            worksheet
                .write_string(row, col as u16, value)
                .map_err(write_error)?;
        }
    }
    worksheet.autofit();

    workbook.save_to_buffer().map_err(write_error)
}

pub fn read<T: Tabular>(bytes: &[u8]) -> BookstoreResult<Vec<T>> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
        .map_err(|e| BookstoreError::storage_with("Unreadable XLSX file", e))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| BookstoreError::storage("The workbook has no worksheet"))?
        .map_err(|e| BookstoreError::storage_with("Unreadable worksheet", e))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(cells) => cells
            .iter()
            .map(|cell| normalize_header(&cell.to_string()))
            .collect(),
        None => return Ok(Vec::new()),
    };

    rows.filter(|cells| cells.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|cells| {
            let values = cells.iter().map(|cell| cell.to_string());
            T::from_record(&Record::new(headers.as_slice(), values))
        })
        .collect()
}
