//! Page type and title rules.

use std::borrow::Cow;

/// A titled unit of text content, persisted as one unit.
///
/// Pages are built either from storage (on load) or from a submitted form
/// (on save). Nothing keeps them around between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Page title, also the storage key.
    pub title: String,
    /// Raw body bytes, stored without any encoding transformation.
    pub body: Vec<u8>,
}

impl Page {
    /// Create a page from a title and body.
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Create a page with the given title and no content.
    ///
    /// Used by the edit form when a page does not exist yet.
    #[must_use]
    pub fn empty(title: impl Into<String>) -> Self {
        Self::new(title, Vec::new())
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Check whether `title` is a valid page title.
///
/// Titles are non-empty and made of ASCII letters and digits only, the same
/// grammar the router accepts in `/view/{title}` style paths. This also keeps
/// every title a plain file name for file-backed storage.
pub fn is_valid_title(title: &str) -> bool {
    !title.is_empty() && title.bytes().all(|b| b.is_ascii_alphanumeric())
}
