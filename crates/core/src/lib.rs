//! Domain logic for the quote-request lifecycle.
//!
//! This crate is pure: no I/O, no database handles, no HTTP. It provides
//! the building blocks the API and notification layers compose:
//!
//! - [`catalog`] — service offerings and price-string parsing.
//! - [`selection`] — the customer's in-progress cart.
//! - [`wizard`] — the linear onboarding step machine and its gating rules.
//! - [`recommend`] — preference-driven service recommendations.
//! - [`quote`] — quote totals, sources, statuses, and quote numbers.

pub mod catalog;
pub mod error;
pub mod quote;
pub mod recommend;
pub mod selection;
pub mod types;
pub mod wizard;

pub use error::CoreError;
