//! Handlers for onboarding wizard sessions.
//!
//! A session holds the wizard step, the accumulated answers, and the
//! in-progress cart. Step gating and cart arithmetic live in
//! `japi_core`; these handlers rehydrate that state from the session
//! row, apply one operation, and persist the result.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use japi_core::catalog::parse_price;
use japi_core::quote::{compute_total, lines_from_selection, QuoteLine, QuoteSource};
use japi_core::recommend::{recommend, Constraints};
use japi_core::selection::SelectionStore;
use japi_core::types::DbId;
use japi_core::wizard::{
    can_abandon, Advance, OnboardingData, SessionStatus, Wizard, WizardStep,
};
use japi_core::CoreError;
use japi_db::models::quote::CreateQuote;
use japi_db::models::session::QuoteSession;
use japi_db::repositories::{QuoteSessionRepo, ServiceRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::quotes::{persist_and_notify, QuoteWithLines};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request/response types
// ---------------------------------------------------------------------------

/// Cart item payload.
#[derive(Debug, Deserialize)]
pub struct AddCartItemRequest {
    pub service_id: String,
}

/// Quantity-change payload. Zero or negative removes the entry.
#[derive(Debug, Deserialize)]
pub struct UpdateCartQuantityRequest {
    pub quantity: i64,
}

/// Cart view returned by the cart endpoints.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub entries: Vec<japi_core::selection::SelectedService>,
    pub total_price: i64,
    pub remaining_to_minimum: usize,
    pub meets_minimum: bool,
}

impl CartView {
    fn from_store(store: SelectionStore) -> Self {
        Self {
            total_price: store.total_price(),
            remaining_to_minimum: store.remaining_to_minimum(),
            meets_minimum: store.meets_minimum(),
            entries: store.entries().to_vec(),
        }
    }
}

/// Result of a step transition.
#[derive(Debug, Serialize)]
pub struct StepTransition {
    pub current_step: u8,
    pub step_label: &'static str,
    pub advanced: bool,
    /// Set when the preferences step was just completed and the client
    /// should fetch recommendations.
    pub recommendations_due: bool,
}

// ---------------------------------------------------------------------------
// Rehydration helpers
// ---------------------------------------------------------------------------

/// Load a session row or 404.
async fn load_session(state: &AppState, id: DbId) -> Result<QuoteSession, AppError> {
    QuoteSessionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "QuoteSession",
            id: id.to_string(),
        }))
}

/// Rebuild the in-memory wizard from a session row.
fn wizard_from_session(session: &QuoteSession) -> Result<Wizard, AppError> {
    let step = WizardStep::from_number(session.current_step as u8)?;
    let data: OnboardingData = serde_json::from_value(session.data.clone())
        .map_err(|e| AppError::InternalError(format!("Corrupt session data: {e}")))?;
    Ok(Wizard::from_parts(step, data))
}

/// Rebuild the cart from a session row.
fn cart_from_session(session: &QuoteSession) -> Result<SelectionStore, AppError> {
    serde_json::from_value(session.cart.clone())
        .map_err(|e| AppError::InternalError(format!("Corrupt session cart: {e}")))
}

/// Reject operations on sessions that are no longer in progress.
fn ensure_in_progress(session: &QuoteSession) -> Result<(), AppError> {
    let status = SessionStatus::from_str_db(&session.status)?;
    if status != SessionStatus::InProgress {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Session {} is {}",
            session.id, session.status
        ))));
    }
    Ok(())
}

/// Persist the wizard state back onto the session row.
async fn save_wizard(
    state: &AppState,
    id: DbId,
    wizard: &Wizard,
) -> Result<QuoteSession, AppError> {
    let data = serde_json::to_value(&wizard.data)
        .map_err(|e| AppError::InternalError(format!("Serialize session data: {e}")))?;
    QuoteSessionRepo::update_progress(&state.pool, id, wizard.step().to_number() as i32, &data)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "QuoteSession",
            id: id.to_string(),
        }))
}

/// Persist the cart back onto the session row and return the view.
async fn save_cart(state: &AppState, id: DbId, store: SelectionStore) -> AppResult<Json<DataResponse<CartView>>> {
    let cart = serde_json::to_value(&store)
        .map_err(|e| AppError::InternalError(format!("Serialize session cart: {e}")))?;
    QuoteSessionRepo::update_cart(&state.pool, id, &cart)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "QuoteSession",
            id: id.to_string(),
        }))?;

    Ok(Json(DataResponse {
        data: CartView::from_store(store),
    }))
}

// ---------------------------------------------------------------------------
// Session lifecycle
// ---------------------------------------------------------------------------

/// POST /api/v1/sessions
///
/// Start a new wizard session at step 1 with an empty cart.
pub async fn create_session(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let session = QuoteSessionRepo::create(&state.pool).await?;

    tracing::info!(session_id = session.id, "Wizard session started");

    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

/// GET /api/v1/sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = load_session(&state, id).await?;

    Ok(Json(DataResponse { data: session }))
}

/// PUT /api/v1/sessions/{id}/data
///
/// Replace the accumulated wizard answers. Gating happens on `advance`
/// and `submit`, not here, so partial answers are always storable.
pub async fn update_session_data(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<OnboardingData>,
) -> AppResult<impl IntoResponse> {
    let session = load_session(&state, id).await?;
    ensure_in_progress(&session)?;

    let mut wizard = wizard_from_session(&session)?;
    wizard.data = input;
    let session = save_wizard(&state, id, &wizard).await?;

    Ok(Json(DataResponse { data: session }))
}

/// POST /api/v1/sessions/{id}/advance
///
/// Move to the next step if the current step's required fields hold.
/// Staying put is not an error; the response says what happened.
pub async fn advance_session(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = load_session(&state, id).await?;
    ensure_in_progress(&session)?;

    let mut wizard = wizard_from_session(&session)?;
    let advance = wizard.next();
    save_wizard(&state, id, &wizard).await?;

    let (advanced, recommendations_due) = match advance {
        Advance::Stayed => (false, false),
        Advance::Advanced {
            recommendations_due,
        } => (true, recommendations_due),
    };

    Ok(Json(DataResponse {
        data: StepTransition {
            current_step: wizard.step().to_number(),
            step_label: wizard.step().label(),
            advanced,
            recommendations_due,
        },
    }))
}

/// POST /api/v1/sessions/{id}/back
///
/// Go back one step, clamped at the first step. Always permitted.
pub async fn back_session(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = load_session(&state, id).await?;
    ensure_in_progress(&session)?;

    let mut wizard = wizard_from_session(&session)?;
    wizard.previous();
    save_wizard(&state, id, &wizard).await?;

    Ok(Json(DataResponse {
        data: StepTransition {
            current_step: wizard.step().to_number(),
            step_label: wizard.step().label(),
            advanced: false,
            recommendations_due: false,
        },
    }))
}

/// POST /api/v1/sessions/{id}/abandon
pub async fn abandon_session(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = load_session(&state, id).await?;
    can_abandon(&session.status)?;

    let session = QuoteSessionRepo::update_status(
        &state.pool,
        id,
        SessionStatus::Abandoned.as_str(),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "QuoteSession",
        id: id.to_string(),
    }))?;

    tracing::info!(session_id = id, "Wizard session abandoned");

    Ok(Json(DataResponse { data: session }))
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

/// GET /api/v1/sessions/{id}/recommendations
///
/// Preference-matched services for the session's answers, capped, with
/// a constraint-filtered fallback when nothing matches.
pub async fn session_recommendations(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = load_session(&state, id).await?;
    let wizard = wizard_from_session(&session)?;

    let rows = ServiceRepo::list_all(&state.pool).await?;
    let catalog: Vec<_> = rows.into_iter().map(|r| r.into_domain()).collect();

    let age_range = (!wizard.data.age_range.is_empty()).then_some(wizard.data.age_range.as_str());
    let recommendations = recommend(
        &catalog,
        &wizard.data.preferences,
        Constraints {
            children_count: wizard.data.children_count,
            age_range,
        },
    );

    Ok(Json(DataResponse {
        data: recommendations,
    }))
}

// ---------------------------------------------------------------------------
// Cart operations
// ---------------------------------------------------------------------------

/// GET /api/v1/sessions/{id}/cart
pub async fn get_cart(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = load_session(&state, id).await?;
    let store = cart_from_session(&session)?;

    Ok(Json(DataResponse {
        data: CartView::from_store(store),
    }))
}

/// POST /api/v1/sessions/{id}/cart/items
///
/// Add one unit of a catalog service; repeated adds accumulate quantity.
pub async fn add_cart_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AddCartItemRequest>,
) -> AppResult<impl IntoResponse> {
    let session = load_session(&state, id).await?;
    ensure_in_progress(&session)?;

    let service = ServiceRepo::find_by_id(&state.pool, &input.service_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Service",
            id: input.service_id.clone(),
        }))?;

    let mut store = cart_from_session(&session)?;
    store.add(service.into_domain());

    save_cart(&state, id, store).await
}

/// PUT /api/v1/sessions/{id}/cart/items/{service_id}
///
/// Set an entry's quantity; zero or negative removes it.
pub async fn update_cart_quantity(
    State(state): State<AppState>,
    Path((id, service_id)): Path<(DbId, String)>,
    Json(input): Json<UpdateCartQuantityRequest>,
) -> AppResult<impl IntoResponse> {
    let session = load_session(&state, id).await?;
    ensure_in_progress(&session)?;

    let mut store = cart_from_session(&session)?;
    store.update_quantity(&service_id, input.quantity);

    save_cart(&state, id, store).await
}

/// DELETE /api/v1/sessions/{id}/cart/items/{service_id}
pub async fn remove_cart_item(
    State(state): State<AppState>,
    Path((id, service_id)): Path<(DbId, String)>,
) -> AppResult<impl IntoResponse> {
    let session = load_session(&state, id).await?;
    ensure_in_progress(&session)?;

    let mut store = cart_from_session(&session)?;
    store.remove(&service_id);

    save_cart(&state, id, store).await
}

/// DELETE /api/v1/sessions/{id}/cart
pub async fn clear_cart(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = load_session(&state, id).await?;
    ensure_in_progress(&session)?;

    let mut store = cart_from_session(&session)?;
    store.clear();

    save_cart(&state, id, store).await
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// POST /api/v1/sessions/{id}/submit
///
/// Turn the session into a quote. The wizard must be at the terminal
/// step with valid contact details. Cart services are re-resolved
/// against the catalog so stale entries fail before anything is
/// written; the cart is cleared only after the quote and its lines are
/// persisted.
pub async fn submit_session(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = load_session(&state, id).await?;
    ensure_in_progress(&session)?;

    let wizard = wizard_from_session(&session)?;
    japi_core::wizard::can_submit(wizard.step(), &wizard.data)?;

    let store = cart_from_session(&session)?;
    let lines = resolve_cart_lines(&state, &store).await?;
    let total = compute_total(&lines);
    let data = &wizard.data;

    let event_date = (!data.event_date.is_empty())
        .then(|| data.event_date.parse().ok())
        .flatten();
    let dto = CreateQuote {
        customer_name: data.customer_name.clone(),
        email: data.email.clone(),
        phone: (!data.phone.is_empty()).then(|| data.phone.clone()),
        event_date,
        children_count: data.children_count,
        age_range: (!data.age_range.is_empty()).then(|| data.age_range.clone()),
        child_name: (!data.child_name.is_empty()).then(|| data.child_name.clone()),
        preferences: (!data.preferences.is_empty()).then(|| data.preferences.clone()),
        location: (!data.location.is_empty()).then(|| data.location.clone()),
        total_estimate: total,
        source: QuoteSource::Onboarding.as_str().to_string(),
    };

    let (quote, rows) = persist_and_notify(&state, dto, lines).await?;

    // Only a fully persisted quote clears the cart.
    QuoteSessionRepo::complete(&state.pool, id, quote.id).await?;

    tracing::info!(session_id = id, quote_id = quote.id, "Wizard session submitted");

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

/// Re-resolve the cart against the current catalog.
///
/// Quantities come from the cart; names and unit prices come from the
/// catalog rows so a price edit between add and submit is reflected.
/// A cart entry whose service no longer exists aborts the submission.
async fn resolve_cart_lines(
    state: &AppState,
    store: &SelectionStore,
) -> Result<Vec<QuoteLine>, AppError> {
    let ids: Vec<String> = store
        .entries()
        .iter()
        .map(|e| e.service.id.clone())
        .collect();
    if ids.is_empty() {
        return Ok(lines_from_selection(store));
    }

    let rows = ServiceRepo::find_by_ids(&state.pool, &ids).await?;

    store
        .entries()
        .iter()
        .map(|entry| {
            let row = rows
                .iter()
                .find(|r| r.id == entry.service.id)
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Service",
                    id: entry.service.id.clone(),
                }))?;
            Ok(QuoteLine {
                service_id: row.id.clone(),
                service_name: row.title.clone(),
                unit_price: parse_price(&row.price),
                quantity: entry.quantity,
            })
        })
        .collect()
}
