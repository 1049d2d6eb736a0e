//! Single-page handlers: view, edit, and save.

use axum::response::{Html, IntoResponse, Response};
use wiki_storage::{Page, StorageError};
use wiki_templates::TemplateName;

use crate::error::ServerError;
use crate::form::FormData;
use crate::handlers::found;
use crate::state::AppState;

/// Handle `/view/{title}`.
///
/// A page that can't be loaded redirects to its edit form, so following a
/// link to a missing page starts writing it.
pub(crate) fn view(state: &AppState, title: &str) -> Result<Response, ServerError> {
    match state.storage.load(title) {
        Ok(page) => {
            let html = state.templates.render_page(TemplateName::View, &page)?;
            Ok(Html(html).into_response())
        }
        Err(e) => {
            log_load_failure(title, &e);
            Ok(found(format!("/edit/{title}")))
        }
    }
}

/// Handle `/edit/{title}`.
///
/// A page that can't be loaded is edited as a new, empty page.
pub(crate) fn edit(state: &AppState, title: &str) -> Result<Response, ServerError> {
    let page = state.storage.load(title).unwrap_or_else(|e| {
        log_load_failure(title, &e);
        Page::empty(title)
    });
    let html = state.templates.render_page(TemplateName::Edit, &page)?;
    Ok(Html(html).into_response())
}

/// Handle `/save/{title}`.
///
/// The `body` field is stored byte for byte. A missing field saves an empty
/// page.
pub(crate) fn save(
    state: &AppState,
    title: String,
    form: &FormData,
) -> Result<Response, ServerError> {
    let page = Page::new(title, form.value("body").unwrap_or_default());
    state.storage.save(&page)?;
    tracing::info!(title = %page.title, bytes = page.body.len(), "Page saved");
    Ok(found(format!("/view/{}", page.title)))
}

fn log_load_failure(title: &str, err: &StorageError) {
    if err.is_not_found() {
        tracing::debug!(title, "Page does not exist yet");
    } else {
        tracing::warn!(title, error = %err, "Failed to load page");
    }
}
