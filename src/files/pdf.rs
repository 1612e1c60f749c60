//! PDF reports built with `printpdf` and the builtin Helvetica fonts

use super::tabular::Tabular;
use crate::core::error::{BookstoreError, BookstoreResult};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

// A4 landscape
const PAGE_WIDTH: f32 = 297.0;
const PAGE_HEIGHT: f32 = 210.0;
const MARGIN: f32 = 15.0;
const LINE_HEIGHT: f32 = 7.0;
const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 10.0;

fn pdf_error(err: impl std::fmt::Display) -> BookstoreError {
    BookstoreError::storage(format!("Failed to render PDF report: {}", err))
}

/// Writes lines top to bottom, starting a new page when one fills up
struct ReportWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl ReportWriter {
    fn new(title: &str) -> BookstoreResult<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(pdf_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?;
        let layer = doc.get_page(page).get_layer(layer);

        let mut writer = Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT - MARGIN,
        };
        writer.layer.use_text(title, TITLE_SIZE, Mm(MARGIN), Mm(writer.y), &writer.bold);
        writer.y -= LINE_HEIGHT * 2.0;
        Ok(writer)
    }

    fn ensure_room(&mut self) {
        if self.y < MARGIN {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    /// One line of cells spread over equal-width columns
    fn columns(&mut self, cells: &[String], bold: bool) {
        self.ensure_room();
        let width = (PAGE_WIDTH - 2.0 * MARGIN) / cells.len().max(1) as f32;
        let font = if bold { &self.bold } else { &self.regular };
        for (index, cell) in cells.iter().enumerate() {
            let x = MARGIN + width * index as f32;
            self.layer
                .use_text(cell.as_str(), BODY_SIZE, Mm(x), Mm(self.y), font);
        }
        self.y -= LINE_HEIGHT;
    }

    fn finish(self) -> BookstoreResult<Vec<u8>> {
        self.doc.save_to_bytes().map_err(pdf_error)
    }
}

/// A titled table with one line per record
pub fn write_table<T: Tabular>(records: &[T]) -> BookstoreResult<Vec<u8>> {
    let mut writer = ReportWriter::new(T::TITLE)?;
    let headers: Vec<String> = T::headers().iter().map(|h| h.to_string()).collect();
    writer.columns(&headers, true);
    for record in records {
        writer.columns(&record.to_row(), false);
    }
    writer.finish()
}

/// One `header: value` line per field
pub fn write_record<T: Tabular>(record: &T) -> BookstoreResult<Vec<u8>> {
    let mut writer = ReportWriter::new(T::TITLE)?;
    for (header, value) in T::headers().iter().zip(record.to_row()) {
        writer.columns(&[format!("{}:", header), value], false);
    }
    writer.finish()
}
