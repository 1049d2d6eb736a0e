//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::page::{Page, is_valid_title};
use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores pages in memory. Use the builder methods to seed it with test
/// data, or [`fail_writes`](Self::fail_writes) to simulate an unwritable store.
///
/// # Example
///
/// ```ignore
/// use wiki_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new().with_page("Home", "Welcome");
///
/// let page = storage.load("Home").unwrap();
/// assert_eq!(page.body, b"Welcome");
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    pages: RwLock<BTreeMap<String, Vec<u8>>>,
    unreadable: RwLock<Vec<String>>,
    fail_writes: AtomicBool,
    fail_list: AtomicBool,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page with the given title and body.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, title: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.pages
            .write()
            .unwrap()
            .insert(title.into(), body.into());
        self
    }

    /// Add a title that is listed but fails to load.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_unreadable(self, title: impl Into<String>) -> Self {
        self.unreadable.write().unwrap().push(title.into());
        self
    }

    /// Make every subsequent `save()` fail with a permission error.
    #[must_use]
    pub fn fail_writes(self) -> Self {
        self.fail_writes.store(true, Ordering::SeqCst);
        self
    }

    /// Make every subsequent `list()` fail.
    #[must_use]
    pub fn fail_list(self) -> Self {
        self.fail_list.store(true, Ordering::SeqCst);
        self
    }

    /// Get the stored body for `title`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn body(&self, title: &str) -> Option<Vec<u8>> {
        self.pages.read().unwrap().get(title).cloned()
    }

    fn validate_title(title: &str) -> Result<(), StorageError> {
        if is_valid_title(title) {
            Ok(())
        } else {
            Err(StorageError::invalid_title(title).with_backend(BACKEND))
        }
    }
}

impl Storage for MockStorage {
    fn load(&self, title: &str) -> Result<Page, StorageError> {
        Self::validate_title(title)?;

        if self.unreadable.read().unwrap().iter().any(|t| t == title) {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied)
                .with_path(title)
                .with_backend(BACKEND));
        }

        self.pages
            .read()
            .unwrap()
            .get(title)
            .map(|body| Page::new(title, body.clone()))
            .ok_or_else(|| StorageError::not_found(title).with_backend(BACKEND))
    }

    fn save(&self, page: &Page) -> Result<(), StorageError> {
        Self::validate_title(&page.title)?;

        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied)
                .with_path(page.title.as_str())
                .with_backend(BACKEND)
                .with_source(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only storage",
                )));
        }

        self.pages
            .write()
            .unwrap()
            .insert(page.title.clone(), page.body.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, StorageError> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(StorageError::new(StorageErrorKind::Other)
                .with_backend(BACKEND)
                .with_source(std::io::Error::other("listing unavailable")));
        }

        let mut titles: Vec<String> = self.pages.read().unwrap().keys().cloned().collect();
        titles.extend(self.unreadable.read().unwrap().iter().cloned());
        titles.sort();
        titles.dedup();
        Ok(titles)
    }
}
