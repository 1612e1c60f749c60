//! Upload directory management

use crate::core::error::{BookstoreError, BookstoreResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A file read back from the upload directory
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Stores uploads flat inside one directory
///
/// File names must be plain names: anything containing `..` or a path
/// separator is refused, so nothing is ever written outside the root.
#[derive(Debug, Clone)]
pub struct FileStorageService {
    root: PathBuf,
}

impl FileStorageService {
    /// Create the upload directory if needed
    pub fn new(upload_dir: impl AsRef<Path>) -> BookstoreResult<Self> {
        let root = upload_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&root).map_err(|e| {
            BookstoreError::storage_with(
                "Could not create the directory where the uploaded files will be stored!",
                e,
            )
        })?;
        info!(root = %root.display(), "File storage ready");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `bytes` under `original_name`, replacing any previous file.
    ///
    /// Returns the cleaned file name.
    pub async fn store_file(&self, original_name: &str, bytes: &[u8]) -> BookstoreResult<String> {
        let file_name = clean_file_name(original_name).ok_or_else(|| {
            BookstoreError::storage(format!(
                "Sorry! Filename contains invalid path sequence {}",
                original_name
            ))
        })?;

        let target = self.root.join(&file_name);
        tokio::fs::write(&target, bytes).await.map_err(|e| {
            BookstoreError::storage_with(
                format!("Could not store file {}. Please try again!", file_name),
                e,
            )
        })?;
        debug!(file = %file_name, size = bytes.len(), "Stored file");
        Ok(file_name)
    }

    pub async fn load_file(&self, file_name: &str) -> BookstoreResult<StoredFile> {
        let not_found = || BookstoreError::FileNotFound(format!("File not found {}", file_name));
        let clean = clean_file_name(file_name).ok_or_else(not_found)?;

        let bytes = match tokio::fs::read(self.root.join(&clean)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
            Err(e) => return Err(BookstoreError::storage_with("Could not read file", e)),
        };

        Ok(StoredFile {
            content_type: content_type_of(&clean),
            file_name: clean,
            bytes,
        })
    }
}

/// MIME type guessed from the extension, `application/octet-stream` otherwise
pub fn content_type_of(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

fn clean_file_name(name: &str) -> Option<String> {
    let name = name.trim();
    let invalid = name.is_empty()
        || name.contains("..")
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');
    (!invalid).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorageService::new(dir.path().join("uploads")).unwrap();

        let name = storage.store_file("notes.txt", b"hello").await.unwrap();
        assert_eq!(name, "notes.txt");

        let file = storage.load_file("notes.txt").await.unwrap();
        assert_eq!(file.bytes, b"hello");
        assert_eq!(file.content_type, "text/plain");
    }

    #[tokio::test]
    async fn test_path_sequences_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorageService::new(dir.path()).unwrap();

        let err = storage.store_file("../escape.txt", b"x").await.unwrap_err();
        assert!(matches!(err, BookstoreError::Storage { .. }));
        assert!(!dir.path().parent().unwrap().join("escape.txt").exists());

        let err = storage.load_file("../etc/passwd").await.unwrap_err();
        assert!(matches!(err, BookstoreError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorageService::new(dir.path()).unwrap();
        let err = storage.load_file("nothing.pdf").await.unwrap_err();
        assert!(matches!(err, BookstoreError::FileNotFound(_)));
    }

    #[test]
    fn test_unknown_extension_is_octet_stream() {
        assert_eq!(content_type_of("blob.zzzz"), "application/octet-stream");
        assert_eq!(content_type_of("report.pdf"), "application/pdf");
    }
}
