//! Handlers for the singleton admin settings rows.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use japi_core::CoreError;
use japi_db::models::settings::{UpdateCompanySettings, UpdateNotificationSettings};
use japi_db::repositories::{CompanySettingsRepo, NotificationSettingsRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/settings/company
pub async fn get_company_settings(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let settings = CompanySettingsRepo::get(&state.pool)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CompanySettings",
            id: "singleton".to_string(),
        }))?;

    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/settings/company
pub async fn update_company_settings(
    State(state): State<AppState>,
    Json(input): Json<UpdateCompanySettings>,
) -> AppResult<impl IntoResponse> {
    if let Some(email) = &input.email {
        if !email.contains('@') {
            return Err(AppError::Core(CoreError::Validation(
                "El email de la empresa no es válido".to_string(),
            )));
        }
    }

    let settings = CompanySettingsRepo::update(&state.pool, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CompanySettings",
            id: "singleton".to_string(),
        }))?;

    tracing::info!("Company settings updated");

    Ok(Json(DataResponse { data: settings }))
}

/// GET /api/v1/settings/notifications
pub async fn get_notification_settings(
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let settings = NotificationSettingsRepo::get(&state.pool)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "NotificationSettings",
            id: "singleton".to_string(),
        }))?;

    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/settings/notifications
pub async fn update_notification_settings(
    State(state): State<AppState>,
    Json(input): Json<UpdateNotificationSettings>,
) -> AppResult<impl IntoResponse> {
    let settings = NotificationSettingsRepo::update(&state.pool, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "NotificationSettings",
            id: "singleton".to_string(),
        }))?;

    tracing::info!("Notification settings updated");

    Ok(Json(DataResponse { data: settings }))
}
