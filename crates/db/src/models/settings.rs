//! Company and notification settings entity models and DTOs.
//!
//! Both tables hold a single row seeded by migration and edited through
//! the admin surface.

use japi_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Company settings
// ---------------------------------------------------------------------------

/// Sender identity and document branding.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CompanySettings {
    pub id: DbId,
    pub company_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub whatsapp_number: Option<String>,
    pub address: Option<String>,
    pub terms_conditions: Option<String>,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for patching company settings. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCompanySettings {
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub whatsapp_number: Option<String>,
    pub address: Option<String>,
    pub terms_conditions: Option<String>,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Notification settings
// ---------------------------------------------------------------------------

/// WhatsApp delivery configuration and message templates.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationSettings {
    pub id: DbId,
    pub whatsapp_enabled: bool,
    pub whatsapp_api_url: Option<String>,
    pub whatsapp_api_token: Option<String>,
    pub client_notification_enabled: bool,
    pub admin_notification_enabled: bool,
    pub client_whatsapp_template: Option<String>,
    pub admin_whatsapp_template: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for patching notification settings. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNotificationSettings {
    pub whatsapp_enabled: Option<bool>,
    pub whatsapp_api_url: Option<String>,
    pub whatsapp_api_token: Option<String>,
    pub client_notification_enabled: Option<bool>,
    pub admin_notification_enabled: Option<bool>,
    pub client_whatsapp_template: Option<String>,
    pub admin_whatsapp_template: Option<String>,
}
