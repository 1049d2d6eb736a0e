//! Page listing at `/`.

use axum::response::{Html, IntoResponse, Response};
use minijinja::Value;
use wiki_templates::TemplateName;

use crate::error::ServerError;
use crate::state::AppState;

/// Handle `/`.
///
/// Renders one `docs` entry per stored page and wraps them in the `main`
/// template. A page that fails to load is skipped with a warning; failing
/// to enumerate the store fails the whole request.
pub(crate) fn list_pages(state: &AppState) -> Result<Response, ServerError> {
    let titles = state.storage.list()?;

    let mut listing = String::new();
    let mut page_count = 0usize;
    for title in &titles {
        let page = match state.storage.load(title) {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(title = %title, error = %e, "Skipping page in listing");
                continue;
            }
        };
        listing.push_str(&state.templates.render_page(TemplateName::Docs, &page)?);
        page_count += 1;
    }

    let html = state.templates.render_main(
        TemplateName::Main,
        minijinja::context! {
            listing => Value::from_safe_string(listing),
            page_count => page_count,
        },
    )?;
    Ok(Html(html).into_response())
}
