//! Route definitions for onboarding wizard sessions.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::sessions;
use crate::state::AppState;

/// Session routes mounted at `/sessions`.
///
/// ```text
/// POST   /                                  -> create_session
/// GET    /{id}                              -> get_session
/// PUT    /{id}/data                         -> update_session_data
/// POST   /{id}/advance                      -> advance_session
/// POST   /{id}/back                         -> back_session
/// POST   /{id}/abandon                      -> abandon_session
/// GET    /{id}/recommendations              -> session_recommendations
/// POST   /{id}/submit                       -> submit_session
/// GET    /{id}/cart                         -> get_cart
/// DELETE /{id}/cart                         -> clear_cart
/// POST   /{id}/cart/items                   -> add_cart_item
/// PUT    /{id}/cart/items/{service_id}      -> update_cart_quantity
/// DELETE /{id}/cart/items/{service_id}      -> remove_cart_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(sessions::create_session))
        .route("/{id}", get(sessions::get_session))
        .route("/{id}/data", put(sessions::update_session_data))
        .route("/{id}/advance", post(sessions::advance_session))
        .route("/{id}/back", post(sessions::back_session))
        .route("/{id}/abandon", post(sessions::abandon_session))
        .route(
            "/{id}/recommendations",
            get(sessions::session_recommendations),
        )
        .route("/{id}/submit", post(sessions::submit_session))
        .route(
            "/{id}/cart",
            get(sessions::get_cart).delete(sessions::clear_cart),
        )
        .route("/{id}/cart/items", post(sessions::add_cart_item))
        .route(
            "/{id}/cart/items/{service_id}",
            put(sessions::update_cart_quantity).delete(sessions::remove_cart_item),
        )
}
