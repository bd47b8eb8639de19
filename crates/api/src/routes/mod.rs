pub mod health;
pub mod quote_history;
pub mod quotes;
pub mod services;
pub mod sessions;
pub mod settings;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /services                                 catalog list, create
/// /services/{id}                            get, update, delete
///
/// /quotes                                   submit (POST), list (GET)
/// /quotes/{id}                              get with line items
/// /quotes/{id}/status                       status transition (PUT)
///
/// /sessions                                 start wizard session (POST)
/// /sessions/{id}                            get
/// /sessions/{id}/data                       replace answers (PUT)
/// /sessions/{id}/advance                    next step (POST)
/// /sessions/{id}/back                       previous step (POST)
/// /sessions/{id}/abandon                    abandon (POST)
/// /sessions/{id}/recommendations            preference-matched services
/// /sessions/{id}/submit                     turn session into a quote (POST)
/// /sessions/{id}/cart                       view (GET), clear (DELETE)
/// /sessions/{id}/cart/items                 add one unit (POST)
/// /sessions/{id}/cart/items/{service_id}    set quantity (PUT), remove (DELETE)
///
/// /quote-history                            audit trail, ?quote_id= filter
///
/// /settings/company                         get, update
/// /settings/notifications                   get, update
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/services", services::router())
        .nest("/quotes", quotes::router())
        .nest("/sessions", sessions::router())
        .nest("/quote-history", quote_history::router())
        .nest("/settings", settings::router())
}
