//! Handlers for quote submission and the admin quote views.
//!
//! Submission persists the quote and its line items, then hands the
//! quote to the notification pipeline in a detached task: delivery
//! failures are audited, never surfaced to the submitter.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use japi_core::quote::{QuoteLine, QuoteSource, QuoteStatus};
use japi_core::types::DbId;
use japi_core::CoreError;
use japi_db::models::quote::{CreateQuote, CreateQuoteService, Quote, QuoteServiceRow};
use japi_db::repositories::{QuoteRepo, QuoteServiceRepo};
use japi_notify::QuoteNotification;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// One selected service in a direct submission.
#[derive(Debug, Deserialize)]
pub struct SubmitQuoteLine {
    pub service_id: String,
    pub name: String,
    /// Unit price in whole pesos.
    pub price: i64,
    pub quantity: u32,
}

/// Direct quote submission payload (the services-page flow).
#[derive(Debug, Deserialize)]
pub struct SubmitQuoteRequest {
    pub customer_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    #[serde(default)]
    pub children_count: Option<i32>,
    #[serde(default)]
    pub age_range: Option<String>,
    #[serde(default)]
    pub child_name: Option<String>,
    #[serde(default)]
    pub preferences: Option<Vec<String>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub services: Vec<SubmitQuoteLine>,
}

/// Query parameters for the quote list.
#[derive(Debug, Default, Deserialize)]
pub struct QuoteListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Status-transition payload.
#[derive(Debug, Deserialize)]
pub struct UpdateQuoteStatusRequest {
    pub status: String,
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// POST /api/v1/quotes
///
/// Direct submission from the services page.
pub async fn submit_quote(
    State(state): State<AppState>,
    Json(input): Json<SubmitQuoteRequest>,
) -> AppResult<impl IntoResponse> {
    if input.customer_name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "El nombre es obligatorio".to_string(),
        )));
    }
    if !input.email.contains('@') {
        return Err(AppError::Core(CoreError::Validation(
            "El email no es válido".to_string(),
        )));
    }
    if input.services.iter().any(|l| l.quantity == 0) {
        return Err(AppError::Core(CoreError::Validation(
            "La cantidad de cada servicio debe ser al menos 1".to_string(),
        )));
    }

    let lines: Vec<QuoteLine> = input
        .services
        .iter()
        .map(|l| QuoteLine {
            service_id: l.service_id.clone(),
            service_name: l.name.clone(),
            unit_price: l.price,
            quantity: l.quantity,
        })
        .collect();
    let total = japi_core::quote::compute_total(&lines);

    let dto = CreateQuote {
        customer_name: input.customer_name,
        email: input.email,
        phone: input.phone,
        event_date: input.event_date,
        children_count: input.children_count,
        age_range: input.age_range,
        child_name: input.child_name,
        preferences: input.preferences,
        location: input.location,
        total_estimate: total,
        source: QuoteSource::Services.as_str().to_string(),
    };

    let (quote, rows) = persist_and_notify(&state, dto, lines).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: QuoteWithLines {
                quote,
                services: rows,
            },
        }),
    ))
}

/// Insert the quote row and its line items, then run the notification
/// pipeline in a detached task.
///
/// The quote row and its lines are written sequentially; a line-item
/// failure after the quote insert is reported to the caller as an
/// overall failure even though the quote row remains.
pub(crate) async fn persist_and_notify(
    state: &AppState,
    dto: CreateQuote,
    lines: Vec<QuoteLine>,
) -> Result<(Quote, Vec<QuoteServiceRow>), AppError> {
    let quote = QuoteRepo::create(&state.pool, &dto).await?;

    let line_dtos: Vec<CreateQuoteService> = lines
        .iter()
        .map(|l| CreateQuoteService {
            service_id: l.service_id.clone(),
            service_name: l.service_name.clone(),
            service_price: l.unit_price,
            quantity: l.quantity as i32,
        })
        .collect();
    let rows = QuoteServiceRepo::batch_insert(&state.pool, quote.id, &line_dtos).await?;

    tracing::info!(quote_id = quote.id, total = quote.total_estimate, "Quote submitted");

    let notification = QuoteNotification {
        quote_id: quote.id,
        customer_name: quote.customer_name.clone(),
        email: quote.email.clone(),
        phone: quote.phone.clone(),
        event_date: quote.event_date.map(|d| d.format("%d/%m/%Y").to_string()),
        children_count: quote.children_count,
        age_range: quote.age_range.clone(),
        child_name: quote.child_name.clone(),
        location: quote.location.clone(),
        lines,
        total_estimate: quote.total_estimate,
    };
    let pipeline = state.pipeline.clone();
    tokio::spawn(async move {
        let outcome = pipeline.run(&notification).await;
        if !outcome.success {
            tracing::warn!(
                quote_id = notification.quote_id,
                error = outcome.error.as_deref().unwrap_or("unknown"),
                "Quote notification failed"
            );
        }
    });

    Ok((quote, rows))
}

// ---------------------------------------------------------------------------
// Admin views
// ---------------------------------------------------------------------------

/// A quote together with its line items.
#[derive(Debug, serde::Serialize)]
pub struct QuoteWithLines {
    #[serde(flatten)]
    pub quote: Quote,
    pub services: Vec<QuoteServiceRow>,
}

/// GET /api/v1/quotes
///
/// List quotes, most recent first, optionally filtered by status.
pub async fn list_quotes(
    State(state): State<AppState>,
    Query(params): Query<QuoteListParams>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(50).min(500);
    let offset = params.offset.unwrap_or(0);

    let quotes = match &params.status {
        Some(status) => {
            // Reject unknown status values up front.
            QuoteStatus::from_str_db(status)?;
            QuoteRepo::list_by_status(&state.pool, status, limit, offset).await?
        }
        None => QuoteRepo::list(&state.pool, limit, offset).await?,
    };

    Ok(Json(DataResponse { data: quotes }))
}

/// GET /api/v1/quotes/{id}
///
/// Fetch one quote with its line items.
pub async fn get_quote(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let quote = QuoteRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Quote",
            id: id.to_string(),
        }))?;
    let services = QuoteServiceRepo::list_by_quote(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: QuoteWithLines { quote, services },
    }))
}

/// PUT /api/v1/quotes/{id}/status
///
/// Staff-driven status transition.
pub async fn update_quote_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateQuoteStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let status = QuoteStatus::from_str_db(&input.status)?;

    let quote = QuoteRepo::update_status(&state.pool, id, status.as_str())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Quote",
            id: id.to_string(),
        }))?;

    tracing::info!(quote_id = id, status = status.as_str(), "Quote status updated");

    Ok(Json(DataResponse { data: quote }))
}
