//! Quote and quote-line entity models and DTOs.

use chrono::NaiveDate;
use japi_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Quote entity
// ---------------------------------------------------------------------------

/// A persisted customer quote request. Immutable after creation except for
/// staff-driven status transitions.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quote {
    pub id: DbId,
    pub customer_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub children_count: Option<i32>,
    pub age_range: Option<String>,
    pub child_name: Option<String>,
    pub preferences: Option<Vec<String>>,
    pub location: Option<String>,
    pub total_estimate: i64,
    pub source: String,
    pub status: String,
    pub customer_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new quote.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuote {
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
    pub total_estimate: i64,
    pub source: String,
}

// ---------------------------------------------------------------------------
// Quote line entity
// ---------------------------------------------------------------------------

/// One denormalized line item of a quote.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuoteServiceRow {
    pub id: DbId,
    pub quote_id: DbId,
    pub service_id: String,
    pub service_name: String,
    pub service_price: i64,
    pub quantity: i32,
    pub created_at: Timestamp,
}

/// DTO for inserting a quote line. Created only alongside a quote.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuoteService {
    pub service_id: String,
    pub service_name: String,
    pub service_price: i64,
    pub quantity: i32,
}
