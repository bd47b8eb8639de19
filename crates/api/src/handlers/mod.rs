pub mod quote_history;
pub mod quotes;
pub mod services;
pub mod sessions;
pub mod settings;
