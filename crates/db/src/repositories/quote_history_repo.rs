//! Repository for the append-only `quote_history` table.

use japi_core::types::DbId;
use sqlx::PgPool;

use crate::models::quote_history::{CreateQuoteHistory, QuoteHistoryEntry};

/// Column list for `quote_history` queries.
const COLUMNS: &str =
    "id, quote_id, action_type, recipient, status, metadata, error_message, created_at";

/// Provides append and query operations for the quote audit trail.
///
/// Rows are never updated or deleted.
pub struct QuoteHistoryRepo;

impl QuoteHistoryRepo {
    /// Append a history entry.
    pub async fn insert(
        pool: &PgPool,
        dto: &CreateQuoteHistory,
    ) -> Result<QuoteHistoryEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO quote_history \
             (quote_id, action_type, recipient, status, metadata, error_message) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QuoteHistoryEntry>(&query)
            .bind(dto.quote_id)
            .bind(&dto.action_type)
            .bind(&dto.recipient)
            .bind(&dto.status)
            .bind(&dto.metadata)
            .bind(&dto.error_message)
            .fetch_one(pool)
            .await
    }

    /// List history entries for a quote, most recent first.
    pub async fn list_by_quote(
        pool: &PgPool,
        quote_id: DbId,
    ) -> Result<Vec<QuoteHistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quote_history \
             WHERE quote_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, QuoteHistoryEntry>(&query)
            .bind(quote_id)
            .fetch_all(pool)
            .await
    }

    /// List history entries across all quotes, most recent first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<QuoteHistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quote_history \
             ORDER BY created_at DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, QuoteHistoryEntry>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
