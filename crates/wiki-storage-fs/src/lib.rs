//! Filesystem storage implementation for the wiki server.
//!
//! This crate provides [`FsStorage`], a filesystem-based implementation of the
//! [`Storage`](wiki_storage::Storage) trait. Each page is one file:
//!
//! - `{pages_dir}/{title}.txt` holds exactly the page body bytes
//! - New files are created readable and writable by the owner only (`0o600` on Unix)
//! - Listing globs `{pages_dir}/*.txt`
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use wiki_storage::{Page, Storage};
//! use wiki_storage_fs::FsStorage;
//!
//! let storage = FsStorage::new(PathBuf::from("pages"));
//! storage.save(&Page::new("FrontPage", "Welcome!"))?;
//! for title in storage.list()? {
//!     println!("{title}");
//! }
//! ```

mod scanner;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use wiki_storage::{Page, Storage, StorageError, StorageErrorKind, is_valid_title};

use scanner::Scanner;

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// File extension of page files.
const PAGE_EXTENSION: &str = "txt";

/// Permission bits for newly created page files.
#[cfg(unix)]
const PAGE_FILE_MODE: u32 = 0o600;

/// Filesystem-based page storage.
///
/// Maps each title to `{pages_dir}/{title}.txt`. There is no locking: two
/// concurrent saves of the same title race and the last completed write wins.
pub struct FsStorage {
    /// Directory holding one file per page.
    pages_dir: PathBuf,
    /// Scanner for page discovery.
    scanner: Scanner,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `pages_dir`.
    ///
    /// The directory is not created. Saving into a missing directory fails.
    #[must_use]
    pub fn new(pages_dir: PathBuf) -> Self {
        let scanner = Scanner::new(&pages_dir, PAGE_EXTENSION);
        Self { pages_dir, scanner }
    }

    /// Validate that a title maps to a plain file name inside `pages_dir`.
    fn validate_title(title: &str) -> Result<(), StorageError> {
        if is_valid_title(title) {
            Ok(())
        } else {
            Err(StorageError::invalid_title(title).with_backend(BACKEND))
        }
    }

    /// Resolve a title to its page file path.
    fn page_path(&self, title: &str) -> PathBuf {
        self.pages_dir.join(format!("{title}.{PAGE_EXTENSION}"))
    }

    /// Open a page file for writing, truncating existing content.
    fn open_for_write(path: &Path) -> std::io::Result<fs::File> {
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(PAGE_FILE_MODE);
        }
        options.open(path)
    }
}

impl Storage for FsStorage {
    fn load(&self, title: &str) -> Result<Page, StorageError> {
        Self::validate_title(title)?;
        let path = self.page_path(title);
        let body = fs::read(&path)
            .map_err(|e| StorageError::io(e, Some(path)).with_backend(BACKEND))?;
        Ok(Page::new(title, body))
    }

    fn save(&self, page: &Page) -> Result<(), StorageError> {
        Self::validate_title(&page.title)?;
        let path = self.page_path(&page.title);
        Self::open_for_write(&path)
            .and_then(|mut file| file.write_all(&page.body))
            .map_err(|e| StorageError::io(e, Some(path)).with_backend(BACKEND))?;
        tracing::debug!(title = %page.title, bytes = page.body.len(), "Saved page");
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, StorageError> {
        self.scanner.scan().map_err(|e| {
            StorageError::new(StorageErrorKind::Other)
                .with_path(self.pages_dir.clone())
                .with_backend(BACKEND)
                .with_source(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_fs_storage_is_send_sync() {
        assert_send_sync::<FsStorage>();
    }

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let page = Page::new("Test", "hello");

        storage.save(&page).unwrap();

        assert_eq!(storage.load("Test").unwrap(), page);
    }

    #[test]
    fn test_round_trip_preserves_raw_bytes() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let page = Page::new("Binary", vec![0u8, 159, 146, 150, b'\n', 0xff]);

        storage.save(&page).unwrap();

        assert_eq!(storage.load("Binary").unwrap(), page);
    }

    #[test]
    fn test_save_writes_title_txt_file() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        storage.save(&Page::new("Notes", "line one\nline two")).unwrap();

        let on_disk = fs::read(temp_dir.path().join("Notes.txt")).unwrap();
        assert_eq!(on_disk, b"line one\nline two");
    }

    #[test]
    fn test_save_overwrites_existing_content() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        storage.save(&Page::new("Test", "a much longer first body")).unwrap();
        storage.save(&Page::new("Test", "short")).unwrap();

        assert_eq!(storage.load("Test").unwrap().body, b"short");
    }

    #[cfg(unix)]
    #[test]
    fn test_save_creates_owner_only_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        storage.save(&Page::new("Private", "secret")).unwrap();

        let mode = fs::metadata(temp_dir.path().join("Private.txt"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let err = storage.load("Missing").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Fs"));
        assert_eq!(err.path, Some(temp_dir.path().join("Missing.txt")));
    }

    #[test]
    fn test_load_rejects_invalid_title() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let err = storage.load("../etc/passwd").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidTitle);
    }

    #[test]
    fn test_save_rejects_invalid_title() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let err = storage.save(&Page::new("", "body")).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidTitle);
    }

    #[test]
    fn test_save_into_missing_dir_fails() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().join("does-not-exist"));

        let err = storage.save(&Page::new("Test", "hello")).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_list_returns_saved_titles() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        storage.save(&Page::new("Beta", "b")).unwrap();
        storage.save(&Page::new("Alpha", "a")).unwrap();

        assert_eq!(storage.list().unwrap(), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_list_empty_dir() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert!(storage.list().unwrap().is_empty());
    }
}
