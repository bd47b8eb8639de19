//! Quote history entity models and DTOs.
//!
//! The history table is an append-only audit trail of notification
//! attempts; rows have no `updated_at` and are never modified.

use japi_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One audit record of an action taken on behalf of a quote.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuoteHistoryEntry {
    pub id: DbId,
    pub quote_id: DbId,
    /// Action kind, e.g. `"email_sent"`, `"whatsapp_sent"`.
    pub action_type: String,
    pub recipient: String,
    /// `"success"`, `"failed"`, or `"pending"`.
    pub status: String,
    pub metadata: Option<serde_json::Value>,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for appending a history entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuoteHistory {
    pub quote_id: DbId,
    pub action_type: String,
    pub recipient: String,
    pub status: String,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
    #[serde(default)]
    pub error_message: Option<String>,
}
