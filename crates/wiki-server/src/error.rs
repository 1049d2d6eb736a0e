//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use wiki_storage::StorageError;
use wiki_templates::TemplateError;

use crate::form::FormError;

/// Server error type.
///
/// Every variant ends the current request only. Responses are plain text
/// carrying the error message.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Submitted page title is not plain ASCII alphanumeric.
    #[error("Invalid page title: {0:?}")]
    InvalidTitle(String),

    /// Storage read or write failed.
    #[error("{0}")]
    Storage(#[from] StorageError),

    /// Form body could not be decoded.
    #[error("{0}")]
    Form(#[from] FormError),

    /// Template failed to render.
    #[error("{0}")]
    Render(#[from] TemplateError),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidTitle(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) | Self::Form(_) | Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, self.to_string()).into_response()
    }
}
