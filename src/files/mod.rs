//! File handling: bulk import, report export and the upload directory

pub mod delimited;
pub mod format;
pub mod handlers;
pub mod pdf;
pub mod spreadsheet;
pub mod storage;
pub mod tabular;

pub use format::{ExportFormat, ExportedFile, ImportFormat, media_types};
pub use storage::{FileStorageService, StoredFile};
pub use tabular::{Record, Tabular};
