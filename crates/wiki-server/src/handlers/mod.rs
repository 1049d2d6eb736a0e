//! HTTP request handlers.

pub(crate) mod create;
pub(crate) mod index;
pub(crate) mod pages;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Build a 302 Found redirect to `location`.
pub(crate) fn found(location: impl Into<String>) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.into())]).into_response()
}

/// Build the 404 response for paths outside the route table.
pub(crate) fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "404 page not found").into_response()
}
