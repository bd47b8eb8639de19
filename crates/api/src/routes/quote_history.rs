//! Route definitions for the quote audit trail.

use axum::routing::get;
use axum::Router;

use crate::handlers::quote_history;
use crate::state::AppState;

/// History routes mounted at `/quote-history`.
///
/// ```text
/// GET /    -> list_history (?quote_id= to scope to one quote)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(quote_history::list_history))
}
