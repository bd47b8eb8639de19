//! Repository for the `quote_sessions` wizard table.

use japi_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::QuoteSession;

/// Column list for `quote_sessions` queries.
const COLUMNS: &str = "id, current_step, status, data, cart, quote_id, created_at, updated_at";

/// Provides CRUD operations for onboarding wizard sessions.
pub struct QuoteSessionRepo;

impl QuoteSessionRepo {
    /// Insert a new session at the first step with empty answers and cart.
    pub async fn create(pool: &PgPool) -> Result<QuoteSession, sqlx::Error> {
        let query = format!("INSERT INTO quote_sessions DEFAULT VALUES RETURNING {COLUMNS}");
        sqlx::query_as::<_, QuoteSession>(&query).fetch_one(pool).await
    }

    /// Find a session by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<QuoteSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quote_sessions WHERE id = $1");
        sqlx::query_as::<_, QuoteSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update the current step and accumulated answers of a session.
    pub async fn update_progress(
        pool: &PgPool,
        id: DbId,
        current_step: i32,
        data: &serde_json::Value,
    ) -> Result<Option<QuoteSession>, sqlx::Error> {
        let query = format!(
            "UPDATE quote_sessions SET current_step = $2, data = $3, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QuoteSession>(&query)
            .bind(id)
            .bind(current_step)
            .bind(data)
            .fetch_optional(pool)
            .await
    }

    /// Replace the session cart.
    pub async fn update_cart(
        pool: &PgPool,
        id: DbId,
        cart: &serde_json::Value,
    ) -> Result<Option<QuoteSession>, sqlx::Error> {
        let query = format!(
            "UPDATE quote_sessions SET cart = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QuoteSession>(&query)
            .bind(id)
            .bind(cart)
            .fetch_optional(pool)
            .await
    }

    /// Update the status of a session.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<QuoteSession>, sqlx::Error> {
        let query = format!(
            "UPDATE quote_sessions SET status = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QuoteSession>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Mark a session completed and attach the quote it produced, clearing
    /// the cart in the same statement.
    pub async fn complete(
        pool: &PgPool,
        id: DbId,
        quote_id: DbId,
    ) -> Result<Option<QuoteSession>, sqlx::Error> {
        let query = format!(
            "UPDATE quote_sessions \
             SET status = 'completed', quote_id = $2, \
                 cart = '{{\"entries\": []}}'::jsonb, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QuoteSession>(&query)
            .bind(id)
            .bind(quote_id)
            .fetch_optional(pool)
            .await
    }
}
