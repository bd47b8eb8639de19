//! Repositories for the `quotes` and `quote_services` tables.

use japi_core::types::DbId;
use sqlx::PgPool;

use crate::models::quote::{CreateQuote, CreateQuoteService, Quote, QuoteServiceRow};

/// Column list for `quotes` queries.
const COLUMNS: &str = "\
    id, customer_name, email, phone, event_date, children_count, \
    age_range, child_name, preferences, location, total_estimate, \
    source, status, customer_id, created_at, updated_at";

/// Column list for `quote_services` queries.
const LINE_COLUMNS: &str =
    "id, quote_id, service_id, service_name, service_price, quantity, created_at";

// ---------------------------------------------------------------------------
// QuoteRepo
// ---------------------------------------------------------------------------

/// Provides insert and query operations for quotes.
pub struct QuoteRepo;

impl QuoteRepo {
    /// Insert a new quote.
    pub async fn create(pool: &PgPool, dto: &CreateQuote) -> Result<Quote, sqlx::Error> {
        let query = format!(
            "INSERT INTO quotes \
             (customer_name, email, phone, event_date, children_count, \
              age_range, child_name, preferences, location, total_estimate, source) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quote>(&query)
            .bind(&dto.customer_name)
            .bind(&dto.email)
            .bind(&dto.phone)
            .bind(dto.event_date)
            .bind(dto.children_count)
            .bind(&dto.age_range)
            .bind(&dto.child_name)
            .bind(&dto.preferences)
            .bind(&dto.location)
            .bind(dto.total_estimate)
            .bind(&dto.source)
            .fetch_one(pool)
            .await
    }

    /// Find a quote by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Quote>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quotes WHERE id = $1");
        sqlx::query_as::<_, Quote>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List quotes, most recent first.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Quote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quotes \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Quote>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List quotes with a given status, most recent first.
    pub async fn list_by_status(
        pool: &PgPool,
        status: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Quote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quotes \
             WHERE status = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Quote>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count all quotes.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM quotes")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Update the status of a quote.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Quote>, sqlx::Error> {
        let query = format!(
            "UPDATE quotes SET status = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quote>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// QuoteServiceRepo
// ---------------------------------------------------------------------------

/// Provides insert and query operations for quote line items.
pub struct QuoteServiceRepo;

impl QuoteServiceRepo {
    /// Batch insert the line items of a quote.
    ///
    /// Uses a single INSERT with multiple value rows for efficiency.
    pub async fn batch_insert(
        pool: &PgPool,
        quote_id: DbId,
        lines: &[CreateQuoteService],
    ) -> Result<Vec<QuoteServiceRow>, sqlx::Error> {
        if lines.is_empty() {
            return Ok(Vec::new());
        }

        // Build a multi-row INSERT statement.
        let mut query = String::from(
            "INSERT INTO quote_services \
             (quote_id, service_id, service_name, service_price, quantity) VALUES ",
        );
        let mut param_idx = 1u32;
        let mut first = true;

        for _ in lines {
            if !first {
                query.push_str(", ");
            }
            first = false;
            query.push('(');
            for i in 0..5 {
                if i > 0 {
                    query.push_str(", ");
                }
                query.push_str(&format!("${param_idx}"));
                param_idx += 1;
            }
            query.push(')');
        }

        query.push_str(&format!(" RETURNING {LINE_COLUMNS}"));

        let mut q = sqlx::query_as::<_, QuoteServiceRow>(&query);
        for line in lines {
            q = q
                .bind(quote_id)
                .bind(&line.service_id)
                .bind(&line.service_name)
                .bind(line.service_price)
                .bind(line.quantity);
        }

        q.fetch_all(pool).await
    }

    /// List the line items of a quote.
    pub async fn list_by_quote(
        pool: &PgPool,
        quote_id: DbId,
    ) -> Result<Vec<QuoteServiceRow>, sqlx::Error> {
        let query = format!(
            "SELECT {LINE_COLUMNS} FROM quote_services \
             WHERE quote_id = $1 \
             ORDER BY id"
        );
        sqlx::query_as::<_, QuoteServiceRow>(&query)
            .bind(quote_id)
            .fetch_all(pool)
            .await
    }
}
