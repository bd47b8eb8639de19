//! Quote notification delivery: HTML rendering, SMTP email, WhatsApp
//! webhook messages, and the audit trail of every attempt.
//!
//! The delivery channels sit behind traits ([`pipeline::EmailSender`],
//! [`pipeline::WhatsappSender`], [`pipeline::HistorySink`],
//! [`pipeline::SettingsSource`]) so the pipeline can be exercised with
//! in-memory stubs.

pub mod email;
pub mod pipeline;
pub mod template;
pub mod whatsapp;

pub use email::{EmailConfig, EmailError, SmtpMailer};
pub use pipeline::{NotificationOutcome, NotificationPipeline, QuoteNotification};
pub use whatsapp::{WhatsappClient, WhatsappError};

/// Error type spanning all delivery channels and the audit sink.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// Email delivery failed.
    #[error("email delivery failed: {0}")]
    Email(#[from] EmailError),

    /// WhatsApp webhook delivery failed.
    #[error("whatsapp delivery failed: {0}")]
    Whatsapp(#[from] WhatsappError),

    /// Settings fetch or history insert failed.
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}
