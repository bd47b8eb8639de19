//! Repository for the `services` catalog table.

use sqlx::PgPool;

use crate::models::service::{CreateService, ServiceRow, UpdateService};

/// Column list for `services` queries.
const COLUMNS: &str = "\
    id, title, description, price, category, icon, features, \
    duration, max_participants, age_range, space_requirements, \
    created_at, updated_at";

/// Provides CRUD operations for catalog services.
pub struct ServiceRepo;

impl ServiceRepo {
    /// List the whole catalog, ordered by title.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ServiceRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services ORDER BY title");
        sqlx::query_as::<_, ServiceRow>(&query).fetch_all(pool).await
    }

    /// Find a service by its slug ID.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<ServiceRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services WHERE id = $1");
        sqlx::query_as::<_, ServiceRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the services matching a set of slug IDs.
    pub async fn find_by_ids(pool: &PgPool, ids: &[String]) -> Result<Vec<ServiceRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services WHERE id = ANY($1)");
        sqlx::query_as::<_, ServiceRow>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Insert a new catalog service.
    pub async fn create(pool: &PgPool, dto: &CreateService) -> Result<ServiceRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO services \
             (id, title, description, price, category, icon, features, \
              duration, max_participants, age_range, space_requirements) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ServiceRow>(&query)
            .bind(&dto.id)
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(&dto.price)
            .bind(&dto.category)
            .bind(dto.icon.as_deref().unwrap_or("Party"))
            .bind(&dto.features)
            .bind(&dto.duration)
            .bind(dto.max_participants)
            .bind(&dto.age_range)
            .bind(&dto.space_requirements)
            .fetch_one(pool)
            .await
    }

    /// Patch a catalog service. Absent fields keep their current values.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        dto: &UpdateService,
    ) -> Result<Option<ServiceRow>, sqlx::Error> {
        let query = format!(
            "UPDATE services SET \
                 title = COALESCE($2, title), \
                 description = COALESCE($3, description), \
                 price = COALESCE($4, price), \
                 category = COALESCE($5, category), \
                 icon = COALESCE($6, icon), \
                 features = COALESCE($7, features), \
                 duration = COALESCE($8, duration), \
                 max_participants = COALESCE($9, max_participants), \
                 age_range = COALESCE($10, age_range), \
                 space_requirements = COALESCE($11, space_requirements), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ServiceRow>(&query)
            .bind(id)
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(&dto.price)
            .bind(&dto.category)
            .bind(&dto.icon)
            .bind(&dto.features)
            .bind(&dto.duration)
            .bind(dto.max_participants)
            .bind(&dto.age_range)
            .bind(&dto.space_requirements)
            .fetch_optional(pool)
            .await
    }

    /// Delete a catalog service. Returns whether a row was removed.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
