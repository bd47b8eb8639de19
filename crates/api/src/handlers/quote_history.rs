//! Handlers for the quote audit trail.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use japi_core::types::DbId;
use japi_db::repositories::QuoteHistoryRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the history list.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryListParams {
    pub quote_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/quote-history
///
/// Notification attempts, most recent first, optionally scoped to one
/// quote.
pub async fn list_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryListParams>,
) -> AppResult<impl IntoResponse> {
    let entries = match params.quote_id {
        Some(quote_id) => QuoteHistoryRepo::list_by_quote(&state.pool, quote_id).await?,
        None => {
            let limit = params.limit.unwrap_or(50).min(500);
            let offset = params.offset.unwrap_or(0);
            QuoteHistoryRepo::list(&state.pool, limit, offset).await?
        }
    };

    Ok(Json(DataResponse { data: entries }))
}
