//! Page storage abstraction for the wiki server.
//!
//! This crate provides a [`Storage`] trait that maps page titles to their raw body
//! bytes. The router and renderer only ever talk to this trait, so the backing store
//! can be swapped without touching them:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Backend flexibility** (one file per page today, a key-value store tomorrow)
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Page`], the unit of content: a title and its body bytes
//! - [`Storage`] trait with `load()`, `save()`, and `list()` methods
//! - [`StorageError`] with a semantic [`StorageErrorKind`]
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! The filesystem backend lives in the `wiki-storage-fs` crate.
//!
//! # Example
//!
//! ```ignore
//! use wiki_storage::{Page, Storage};
//!
//! storage.save(&Page::new("FrontPage", "Welcome!"))?;
//! let page = storage.load("FrontPage")?;
//! assert_eq!(page.body, b"Welcome!");
//! ```

#[cfg(feature = "mock")]
mod mock;
mod page;
mod storage;

#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use page::{Page, is_valid_title};
pub use storage::{Storage, StorageError, StorageErrorKind};
