//! Route definitions for the admin settings rows.

use axum::routing::get;
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Settings routes mounted at `/settings`.
///
/// ```text
/// GET /company           -> get_company_settings
/// PUT /company           -> update_company_settings
/// GET /notifications     -> get_notification_settings
/// PUT /notifications     -> update_notification_settings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/company",
            get(settings::get_company_settings).put(settings::update_company_settings),
        )
        .route(
            "/notifications",
            get(settings::get_notification_settings).put(settings::update_notification_settings),
        )
}
