//! Route definitions for quote submission and the admin quote views.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::quotes;
use crate::state::AppState;

/// Quote routes mounted at `/quotes`.
///
/// ```text
/// POST   /               -> submit_quote
/// GET    /               -> list_quotes
/// GET    /{id}           -> get_quote
/// PUT    /{id}/status    -> update_quote_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(quotes::list_quotes).post(quotes::submit_quote))
        .route("/{id}", get(quotes::get_quote))
        .route("/{id}/status", put(quotes::update_quote_status))
}
