//! Router construction.
//!
//! Builds the axum router with the dispatcher and middleware. All requests
//! go through [`dispatch`], which matches the path against [`Route`] and
//! calls the handler for that case.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::error::ServerError;
use crate::form::FormData;
use crate::handlers;
use crate::middleware::security;
use crate::route::Route;
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .fallback(dispatch)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}

/// Route a request to its handler.
///
/// Routes that take form input read it through [`FormData`]; a body that
/// can't be decoded fails the request with 500.
async fn dispatch(State(state): State<Arc<AppState>>, req: Request) -> Response {
    let Some(route) = Route::parse(req.uri().path()) else {
        return handlers::not_found();
    };

    let result = match route {
        Route::Index => handlers::index::list_pages(&state),
        Route::View(title) => handlers::pages::view(&state, &title),
        Route::Edit(title) => handlers::pages::edit(&state, &title),
        Route::Save(title) => FormData::from_request(req)
            .await
            .map_err(ServerError::from)
            .and_then(|form| handlers::pages::save(&state, title, &form)),
        Route::Create => handlers::create::form(&state),
        Route::New => FormData::from_request(req)
            .await
            .map_err(ServerError::from)
            .and_then(|form| handlers::create::create(&state, &form)),
    };

    result.into_response()
}
