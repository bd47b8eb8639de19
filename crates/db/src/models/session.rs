//! Onboarding wizard session entity model.

use japi_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A wizard session row: current step, accumulated answers, and the
/// in-progress cart, both stored as JSONB.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuoteSession {
    pub id: DbId,
    pub current_step: i32,
    pub status: String,
    /// Serialized [`japi_core::wizard::OnboardingData`].
    pub data: serde_json::Value,
    /// Serialized [`japi_core::selection::SelectionStore`].
    pub cart: serde_json::Value,
    /// Set once the session has been submitted.
    pub quote_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
