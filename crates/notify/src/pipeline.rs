//! The notification pipeline run once per submitted quote.
//!
//! Renders the HTML quote, emails it to the customer, optionally sends
//! WhatsApp messages to the customer and to staff, and appends one audit
//! entry per attempt. Channels are independently guarded: a failure in
//! one never prevents the others from being attempted, and the pipeline
//! itself never returns an error to the caller.

use std::sync::Arc;

use async_trait::async_trait;
use japi_core::quote::{localized_date, quote_number, QuoteLine};
use japi_core::types::DbId;
use japi_db::models::quote_history::CreateQuoteHistory;
use japi_db::repositories::{CompanySettingsRepo, NotificationSettingsRepo, QuoteHistoryRepo};
use japi_db::DbPool;

use crate::template;
use crate::NotifyError;

// ---------------------------------------------------------------------------
// Channel traits
// ---------------------------------------------------------------------------

/// A rendered email ready for delivery.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// Display name for the From header.
    pub from_name: String,
    /// Recipient address.
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Delivers a rendered email and returns the provider's message id.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<String, NotifyError>;
}

/// Delivers a templated WhatsApp message through a webhook.
#[async_trait]
pub trait WhatsappSender: Send + Sync {
    async fn send(
        &self,
        api_url: &str,
        api_token: &str,
        to: &str,
        message: &str,
    ) -> Result<(), NotifyError>;
}

/// Appends audit entries for notification attempts.
#[async_trait]
pub trait HistorySink: Send + Sync {
    async fn record(&self, entry: CreateQuoteHistory) -> Result<(), NotifyError>;
}

/// Supplies the current company identity and WhatsApp configuration.
#[async_trait]
pub trait SettingsSource: Send + Sync {
    async fn company(&self) -> Result<CompanyIdentity, NotifyError>;
    async fn whatsapp(&self) -> Result<WhatsappSettings, NotifyError>;
}

// ---------------------------------------------------------------------------
// Resolved settings
// ---------------------------------------------------------------------------

/// Company identity used as the sender of outgoing notifications.
///
/// Defaults apply when no settings row exists.
#[derive(Debug, Clone)]
pub struct CompanyIdentity {
    pub company_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub whatsapp_number: Option<String>,
}

impl Default for CompanyIdentity {
    fn default() -> Self {
        Self {
            company_name: "JapiTown".to_string(),
            email: "no-reply@japitown.com".to_string(),
            phone: None,
            whatsapp_number: None,
        }
    }
}

/// WhatsApp delivery configuration resolved from the settings row.
#[derive(Debug, Clone, Default)]
pub struct WhatsappSettings {
    pub enabled: bool,
    pub api_url: Option<String>,
    pub api_token: Option<String>,
    pub client_enabled: bool,
    pub admin_enabled: bool,
    pub client_template: Option<String>,
    pub admin_template: Option<String>,
}

// ---------------------------------------------------------------------------
// Pipeline payload and outcome
// ---------------------------------------------------------------------------

/// Everything the pipeline needs about a freshly persisted quote.
#[derive(Debug, Clone)]
pub struct QuoteNotification {
    pub quote_id: DbId,
    pub customer_name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Event date already rendered for display.
    pub event_date: Option<String>,
    pub children_count: Option<i32>,
    pub age_range: Option<String>,
    pub child_name: Option<String>,
    pub location: Option<String>,
    pub lines: Vec<QuoteLine>,
    pub total_estimate: i64,
}

/// Non-throwing result of a pipeline run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct NotificationOutcome {
    pub success: bool,
    pub email_id: Option<String>,
    pub quote_number: Option<String>,
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// NotificationPipeline
// ---------------------------------------------------------------------------

/// Orchestrates the delivery channels for one quote.
pub struct NotificationPipeline {
    email: Arc<dyn EmailSender>,
    whatsapp: Arc<dyn WhatsappSender>,
    history: Arc<dyn HistorySink>,
    settings: Arc<dyn SettingsSource>,
}

impl NotificationPipeline {
    pub fn new(
        email: Arc<dyn EmailSender>,
        whatsapp: Arc<dyn WhatsappSender>,
        history: Arc<dyn HistorySink>,
        settings: Arc<dyn SettingsSource>,
    ) -> Self {
        Self {
            email,
            whatsapp,
            history,
            settings,
        }
    }

    /// Run the pipeline for one quote. Never returns an error; the
    /// outcome reflects whether the customer email was delivered.
    pub async fn run(&self, notification: &QuoteNotification) -> NotificationOutcome {
        // Both settings reads are independent; fetch them concurrently.
        let (company, whatsapp) =
            tokio::join!(self.settings.company(), self.settings.whatsapp());
        let company = company.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Company settings fetch failed, using defaults");
            CompanyIdentity::default()
        });
        let whatsapp = whatsapp.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Notification settings fetch failed, using defaults");
            WhatsappSettings::default()
        });

        let now = chrono::Utc::now();
        let number = quote_number(now);
        let date = localized_date(now);

        let html = template::render_quote_html(&company, notification, &number, &date);
        let subject = match &notification.child_name {
            Some(name) => format!("🎉 Tu Cotización {} - Fiesta de {}", company.company_name, name),
            None => format!("🎉 Tu Cotización {} - Tu Evento Especial", company.company_name),
        };
        let message = EmailMessage {
            from_name: company.company_name.clone(),
            to: notification.email.clone(),
            subject,
            html,
        };

        let (success, email_id, error) = match self.email.send(&message).await {
            Ok(id) => {
                self.record(
                    notification.quote_id,
                    "email_sent",
                    &notification.email,
                    "success",
                    Some(serde_json::json!({ "email_id": id, "quote_number": number })),
                    None,
                )
                .await;
                (true, Some(id), None)
            }
            Err(e) => {
                let detail = e.to_string();
                self.record(
                    notification.quote_id,
                    "email_sent",
                    &notification.email,
                    "failed",
                    None,
                    Some(detail.clone()),
                )
                .await;
                (false, None, Some(detail))
            }
        };

        self.send_whatsapp_messages(notification, &company, &whatsapp)
            .await;

        NotificationOutcome {
            success,
            email_id,
            quote_number: Some(number),
            error,
        }
    }

    /// Send the optional customer and staff WhatsApp messages, logging
    /// each attempt. Failures here never affect the pipeline outcome.
    async fn send_whatsapp_messages(
        &self,
        notification: &QuoteNotification,
        company: &CompanyIdentity,
        settings: &WhatsappSettings,
    ) {
        if !settings.enabled {
            return;
        }
        let (Some(api_url), Some(api_token)) = (&settings.api_url, &settings.api_token) else {
            tracing::warn!("WhatsApp enabled but webhook URL or token missing, skipping");
            return;
        };

        let total = notification.total_estimate.to_string();
        let vars = [
            ("customer_name", notification.customer_name.as_str()),
            ("total_estimate", total.as_str()),
        ];

        if settings.client_enabled {
            if let Some(phone) = &notification.phone {
                let body = template::render_placeholders(
                    settings
                        .client_template
                        .as_deref()
                        .unwrap_or(template::DEFAULT_CLIENT_TEMPLATE),
                    &vars,
                );
                self.attempt_whatsapp(
                    notification.quote_id,
                    "whatsapp_sent",
                    api_url,
                    api_token,
                    phone,
                    &body,
                )
                .await;
            }
        }

        if settings.admin_enabled {
            if let Some(admin_number) = &company.whatsapp_number {
                let body = template::render_placeholders(
                    settings
                        .admin_template
                        .as_deref()
                        .unwrap_or(template::DEFAULT_ADMIN_TEMPLATE),
                    &vars,
                );
                self.attempt_whatsapp(
                    notification.quote_id,
                    "whatsapp_admin_sent",
                    api_url,
                    api_token,
                    admin_number,
                    &body,
                )
                .await;
            }
        }
    }

    /// One guarded WhatsApp send plus its audit entry.
    async fn attempt_whatsapp(
        &self,
        quote_id: DbId,
        action_type: &str,
        api_url: &str,
        api_token: &str,
        to: &str,
        body: &str,
    ) {
        match self.whatsapp.send(api_url, api_token, to, body).await {
            Ok(()) => {
                self.record(quote_id, action_type, to, "success", None, None)
                    .await;
            }
            Err(e) => {
                tracing::warn!(to, error = %e, "WhatsApp delivery failed");
                self.record(quote_id, action_type, to, "failed", None, Some(e.to_string()))
                    .await;
            }
        }
    }

    /// Append one audit entry; a sink failure is logged, not propagated.
    async fn record(
        &self,
        quote_id: DbId,
        action_type: &str,
        recipient: &str,
        status: &str,
        metadata: Option<serde_json::Value>,
        error_message: Option<String>,
    ) {
        let entry = CreateQuoteHistory {
            quote_id,
            action_type: action_type.to_string(),
            recipient: recipient.to_string(),
            status: status.to_string(),
            metadata,
            error_message,
        };
        if let Err(e) = self.history.record(entry).await {
            tracing::warn!(error = %e, "Failed to append quote history entry");
        }
    }
}

// ---------------------------------------------------------------------------
// Postgres-backed channel implementations
// ---------------------------------------------------------------------------

/// Audit sink backed by the `quote_history` table.
pub struct PgHistorySink {
    pool: DbPool,
}

impl PgHistorySink {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistorySink for PgHistorySink {
    async fn record(&self, entry: CreateQuoteHistory) -> Result<(), NotifyError> {
        QuoteHistoryRepo::insert(&self.pool, &entry).await?;
        Ok(())
    }
}

/// Settings source backed by the singleton settings tables.
pub struct PgSettingsSource {
    pool: DbPool,
}

impl PgSettingsSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsSource for PgSettingsSource {
    async fn company(&self) -> Result<CompanyIdentity, NotifyError> {
        let row = CompanySettingsRepo::get(&self.pool).await?;
        Ok(match row {
            Some(row) => CompanyIdentity {
                company_name: row.company_name,
                email: row.email,
                phone: row.phone,
                whatsapp_number: row.whatsapp_number,
            },
            None => CompanyIdentity::default(),
        })
    }

    async fn whatsapp(&self) -> Result<WhatsappSettings, NotifyError> {
        let row = NotificationSettingsRepo::get(&self.pool).await?;
        Ok(match row {
            Some(row) => WhatsappSettings {
                enabled: row.whatsapp_enabled,
                api_url: row.whatsapp_api_url,
                api_token: row.whatsapp_api_token,
                client_enabled: row.client_notification_enabled,
                admin_enabled: row.admin_notification_enabled,
                client_template: row.client_whatsapp_template,
                admin_template: row.admin_whatsapp_template,
            },
            None => WhatsappSettings::default(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct StubEmail {
        fail: bool,
    }

    #[async_trait]
    impl EmailSender for StubEmail {
        async fn send(&self, _message: &EmailMessage) -> Result<String, NotifyError> {
            if self.fail {
                Err(crate::EmailError::Build("smtp unavailable".to_string()).into())
            } else {
                Ok("msg-123".to_string())
            }
        }
    }

    struct StubWhatsapp {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl WhatsappSender for StubWhatsapp {
        async fn send(
            &self,
            _api_url: &str,
            _api_token: &str,
            to: &str,
            _message: &str,
        ) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push(to.to_string());
            Ok(())
        }
    }

    struct StubHistory {
        entries: Mutex<Vec<CreateQuoteHistory>>,
    }

    #[async_trait]
    impl HistorySink for StubHistory {
        async fn record(&self, entry: CreateQuoteHistory) -> Result<(), NotifyError> {
            self.entries.lock().unwrap().push(entry);
            Ok(())
        }
    }

    struct StubSettings {
        whatsapp: WhatsappSettings,
    }

    #[async_trait]
    impl SettingsSource for StubSettings {
        async fn company(&self) -> Result<CompanyIdentity, NotifyError> {
            Ok(CompanyIdentity {
                whatsapp_number: Some("+5215550000".to_string()),
                ..CompanyIdentity::default()
            })
        }

        async fn whatsapp(&self) -> Result<WhatsappSettings, NotifyError> {
            Ok(self.whatsapp.clone())
        }
    }

    fn whatsapp_on() -> WhatsappSettings {
        WhatsappSettings {
            enabled: true,
            api_url: Some("https://hooks.example.com/wa".to_string()),
            api_token: Some("token".to_string()),
            client_enabled: true,
            admin_enabled: true,
            client_template: None,
            admin_template: None,
        }
    }

    fn sample_notification() -> QuoteNotification {
        QuoteNotification {
            quote_id: 42,
            customer_name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: Some("+5215551234".to_string()),
            event_date: None,
            children_count: None,
            age_range: None,
            child_name: None,
            location: None,
            lines: Vec::new(),
            total_estimate: 2850,
        }
    }

    fn build_pipeline(
        fail_email: bool,
        whatsapp: WhatsappSettings,
    ) -> (NotificationPipeline, Arc<StubWhatsapp>, Arc<StubHistory>) {
        let wa = Arc::new(StubWhatsapp {
            sent: Mutex::new(Vec::new()),
        });
        let history = Arc::new(StubHistory {
            entries: Mutex::new(Vec::new()),
        });
        let pipeline = NotificationPipeline::new(
            Arc::new(StubEmail { fail: fail_email }),
            wa.clone(),
            history.clone(),
            Arc::new(StubSettings { whatsapp }),
        );
        (pipeline, wa, history)
    }

    #[tokio::test]
    async fn successful_email_produces_success_outcome() {
        let (pipeline, _, history) = build_pipeline(false, WhatsappSettings::default());
        let outcome = pipeline.run(&sample_notification()).await;

        assert!(outcome.success);
        assert_eq!(outcome.email_id.as_deref(), Some("msg-123"));
        assert!(outcome.quote_number.unwrap().starts_with("COT-"));
        assert!(outcome.error.is_none());

        let entries = history.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action_type, "email_sent");
        assert_eq!(entries[0].status, "success");
    }

    #[tokio::test]
    async fn email_failure_still_attempts_whatsapp_channels() {
        let (pipeline, wa, history) = build_pipeline(true, whatsapp_on());
        let outcome = pipeline.run(&sample_notification()).await;

        // The outcome reflects the email failure without panicking.
        assert!(!outcome.success);
        assert!(outcome.email_id.is_none());
        assert!(outcome.error.unwrap().contains("smtp unavailable"));

        // Both WhatsApp sends were still attempted and logged.
        let sent = wa.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], "+5215551234");
        assert_eq!(sent[1], "+5215550000");

        let entries = history.entries.lock().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].action_type, "email_sent");
        assert_eq!(entries[0].status, "failed");
        assert_eq!(entries[1].action_type, "whatsapp_sent");
        assert_eq!(entries[1].status, "success");
        assert_eq!(entries[2].action_type, "whatsapp_admin_sent");
    }

    #[tokio::test]
    async fn whatsapp_disabled_sends_nothing() {
        let (pipeline, wa, _) = build_pipeline(false, WhatsappSettings::default());
        pipeline.run(&sample_notification()).await;
        assert!(wa.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn client_message_skipped_without_phone() {
        let (pipeline, wa, _) = build_pipeline(false, whatsapp_on());
        let mut notification = sample_notification();
        notification.phone = None;
        pipeline.run(&notification).await;

        // Only the staff alert goes out.
        let sent = wa.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], "+5215550000");
    }
}
