//! Application state.
//!
//! Shared state for all request handlers. Built once at startup and never
//! mutated afterwards.

use std::sync::Arc;

use wiki_storage::Storage;
use wiki_templates::Templates;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Storage backend mapping titles to page bodies.
    pub(crate) storage: Arc<dyn Storage>,
    /// Compiled page templates.
    pub(crate) templates: Templates,
}
