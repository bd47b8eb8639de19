//! Repository modules, one per table family.

pub mod quote_history_repo;
pub mod quote_repo;
pub mod service_repo;
pub mod session_repo;
pub mod settings_repo;

pub use quote_history_repo::QuoteHistoryRepo;
pub use quote_repo::{QuoteRepo, QuoteServiceRepo};
pub use service_repo::ServiceRepo;
pub use session_repo::QuoteSessionRepo;
pub use settings_repo::{CompanySettingsRepo, NotificationSettingsRepo};
