//! Handlers for the service catalog.
//!
//! The public site reads the catalog; creation, updates, and deletion
//! belong to the admin surface.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use japi_core::CoreError;
use japi_db::models::service::{CreateService, UpdateService};
use japi_db::repositories::ServiceRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/services
///
/// List the whole catalog.
pub async fn list_services(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let services = ServiceRepo::list_all(&state.pool).await?;

    Ok(Json(DataResponse { data: services }))
}

/// GET /api/v1/services/{id}
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let service = ServiceRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Service",
            id,
        }))?;

    Ok(Json(DataResponse { data: service }))
}

/// POST /api/v1/services
pub async fn create_service(
    State(state): State<AppState>,
    Json(input): Json<CreateService>,
) -> AppResult<impl IntoResponse> {
    if input.id.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "El identificador del servicio es obligatorio".to_string(),
        )));
    }
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "El título del servicio es obligatorio".to_string(),
        )));
    }

    let service = ServiceRepo::create(&state.pool, &input).await?;

    tracing::info!(service_id = %service.id, "Service created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: service })))
}

/// PUT /api/v1/services/{id}
pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateService>,
) -> AppResult<impl IntoResponse> {
    let service = ServiceRepo::update(&state.pool, &id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Service",
            id,
        }))?;

    tracing::info!(service_id = %service.id, "Service updated");

    Ok(Json(DataResponse { data: service }))
}

/// DELETE /api/v1/services/{id}
pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let deleted = ServiceRepo::delete(&state.pool, &id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Service",
            id,
        }));
    }

    tracing::info!(service_id = %id, "Service deleted");

    Ok(StatusCode::NO_CONTENT)
}
