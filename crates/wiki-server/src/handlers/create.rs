//! Page creation: the blank form at `/create/` and its target `/new/`.

use axum::response::{Html, IntoResponse, Response};
use wiki_storage::{Page, is_valid_title};
use wiki_templates::TemplateName;

use crate::error::ServerError;
use crate::form::FormData;
use crate::handlers::found;
use crate::state::AppState;

/// Handle `/create/`.
pub(crate) fn form(state: &AppState) -> Result<Response, ServerError> {
    let html = state
        .templates
        .render_main(TemplateName::Create, minijinja::context! {})?;
    Ok(Html(html).into_response())
}

/// Handle `/new/`.
///
/// The title comes from user input rather than the route, so it is checked
/// against the same grammar page routes accept.
pub(crate) fn create(state: &AppState, form: &FormData) -> Result<Response, ServerError> {
    let title = form.text("title");
    if !is_valid_title(&title) {
        return Err(ServerError::InvalidTitle(title.into_owned()));
    }

    let page = Page::new(title, form.value("body").unwrap_or_default());
    state.storage.save(&page)?;
    tracing::info!(title = %page.title, bytes = page.body.len(), "Page created");
    Ok(found("/"))
}
