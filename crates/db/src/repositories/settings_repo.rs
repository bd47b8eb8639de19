//! Repositories for the singleton `company_settings` and
//! `notification_settings` tables.
//!
//! Both tables hold exactly one row, seeded by migration; reads always
//! target the most recently created row.

use sqlx::PgPool;

use crate::models::settings::{
    CompanySettings, NotificationSettings, UpdateCompanySettings, UpdateNotificationSettings,
};

/// Column list for `company_settings` queries.
const COMPANY_COLUMNS: &str = "\
    id, company_name, email, phone, whatsapp_number, address, \
    terms_conditions, logo_url, website_url, created_at, updated_at";

/// Column list for `notification_settings` queries.
const NOTIFICATION_COLUMNS: &str = "\
    id, whatsapp_enabled, whatsapp_api_url, whatsapp_api_token, \
    client_notification_enabled, admin_notification_enabled, \
    client_whatsapp_template, admin_whatsapp_template, created_at, updated_at";

// ---------------------------------------------------------------------------
// CompanySettingsRepo
// ---------------------------------------------------------------------------

/// Provides read and patch operations for the company identity row.
pub struct CompanySettingsRepo;

impl CompanySettingsRepo {
    /// Fetch the company settings row.
    pub async fn get(pool: &PgPool) -> Result<Option<CompanySettings>, sqlx::Error> {
        let query = format!(
            "SELECT {COMPANY_COLUMNS} FROM company_settings \
             ORDER BY created_at DESC LIMIT 1"
        );
        sqlx::query_as::<_, CompanySettings>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Patch the company settings row. Absent fields keep their values.
    pub async fn update(
        pool: &PgPool,
        dto: &UpdateCompanySettings,
    ) -> Result<Option<CompanySettings>, sqlx::Error> {
        let query = format!(
            "UPDATE company_settings SET \
                 company_name = COALESCE($1, company_name), \
                 email = COALESCE($2, email), \
                 phone = COALESCE($3, phone), \
                 whatsapp_number = COALESCE($4, whatsapp_number), \
                 address = COALESCE($5, address), \
                 terms_conditions = COALESCE($6, terms_conditions), \
                 logo_url = COALESCE($7, logo_url), \
                 website_url = COALESCE($8, website_url), \
                 updated_at = NOW() \
             WHERE id = (SELECT id FROM company_settings ORDER BY created_at DESC LIMIT 1) \
             RETURNING {COMPANY_COLUMNS}"
        );
        sqlx::query_as::<_, CompanySettings>(&query)
            .bind(&dto.company_name)
            .bind(&dto.email)
            .bind(&dto.phone)
            .bind(&dto.whatsapp_number)
            .bind(&dto.address)
            .bind(&dto.terms_conditions)
            .bind(&dto.logo_url)
            .bind(&dto.website_url)
            .fetch_optional(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// NotificationSettingsRepo
// ---------------------------------------------------------------------------

/// Provides read and patch operations for the notification configuration row.
pub struct NotificationSettingsRepo;

impl NotificationSettingsRepo {
    /// Fetch the notification settings row.
    pub async fn get(pool: &PgPool) -> Result<Option<NotificationSettings>, sqlx::Error> {
        let query = format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notification_settings \
             ORDER BY created_at DESC LIMIT 1"
        );
        sqlx::query_as::<_, NotificationSettings>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Patch the notification settings row. Absent fields keep their values.
    pub async fn update(
        pool: &PgPool,
        dto: &UpdateNotificationSettings,
    ) -> Result<Option<NotificationSettings>, sqlx::Error> {
        let query = format!(
            "UPDATE notification_settings SET \
                 whatsapp_enabled = COALESCE($1, whatsapp_enabled), \
                 whatsapp_api_url = COALESCE($2, whatsapp_api_url), \
                 whatsapp_api_token = COALESCE($3, whatsapp_api_token), \
                 client_notification_enabled = COALESCE($4, client_notification_enabled), \
                 admin_notification_enabled = COALESCE($5, admin_notification_enabled), \
                 client_whatsapp_template = COALESCE($6, client_whatsapp_template), \
                 admin_whatsapp_template = COALESCE($7, admin_whatsapp_template), \
                 updated_at = NOW() \
             WHERE id = (SELECT id FROM notification_settings ORDER BY created_at DESC LIMIT 1) \
             RETURNING {NOTIFICATION_COLUMNS}"
        );
        sqlx::query_as::<_, NotificationSettings>(&query)
            .bind(dto.whatsapp_enabled)
            .bind(&dto.whatsapp_api_url)
            .bind(&dto.whatsapp_api_token)
            .bind(dto.client_notification_enabled)
            .bind(dto.admin_notification_enabled)
            .bind(&dto.client_whatsapp_template)
            .bind(&dto.admin_whatsapp_template)
            .fetch_optional(pool)
            .await
    }
}
