//! Quote domain types: sources, statuses, line items, totals, and the
//! short time-derived quote number used in customer-facing documents.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::selection::SelectionStore;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Quote source
// ---------------------------------------------------------------------------

/// Which UI flow produced a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteSource {
    Onboarding,
    Services,
}

impl QuoteSource {
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "onboarding" => Ok(Self::Onboarding),
            "services" => Ok(Self::Services),
            _ => Err(CoreError::Validation(format!(
                "Invalid quote source '{s}'. Must be one of: onboarding, services"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Onboarding => "onboarding",
            Self::Services => "services",
        }
    }
}

// ---------------------------------------------------------------------------
// Quote status
// ---------------------------------------------------------------------------

/// Lifecycle status of a persisted quote. New quotes are always `pending`;
/// later transitions are performed by staff through the admin surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    Pending,
    Contacted,
    Confirmed,
    Cancelled,
}

impl QuoteStatus {
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(Self::Pending),
            "contacted" => Ok(Self::Contacted),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(CoreError::Validation(format!(
                "Invalid quote status '{s}'. Must be one of: pending, contacted, confirmed, cancelled"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Contacted => "contacted",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

// ---------------------------------------------------------------------------
// Quote lines
// ---------------------------------------------------------------------------

/// One line of a submitted quote. Name and unit price are denormalized at
/// submission time so later catalog edits do not rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteLine {
    pub service_id: String,
    pub service_name: String,
    pub unit_price: i64,
    pub quantity: u32,
}

impl QuoteLine {
    pub fn subtotal(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }
}

/// Snapshot a selection store into denormalized quote lines.
pub fn lines_from_selection(store: &SelectionStore) -> Vec<QuoteLine> {
    store
        .entries()
        .iter()
        .map(|e| QuoteLine {
            service_id: e.service.id.clone(),
            service_name: e.service.title.clone(),
            unit_price: e.service.unit_price(),
            quantity: e.quantity,
        })
        .collect()
}

/// Total estimate over a set of lines.
pub fn compute_total(lines: &[QuoteLine]) -> i64 {
    lines.iter().map(QuoteLine::subtotal).sum()
}

// ---------------------------------------------------------------------------
// Quote number and dates
// ---------------------------------------------------------------------------

/// Generate a short, time-derived quote number, e.g. `"COT-V8K2ZQ"`.
///
/// Base-36 of the unix timestamp keeps the number compact and roughly
/// sortable. Uniqueness is not guaranteed (no deduplication is provided
/// anywhere in the submission path).
pub fn quote_number(at: Timestamp) -> String {
    const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut n = at.timestamp().max(0) as u64;
    let mut encoded = Vec::new();
    loop {
        encoded.push(ALPHABET[(n % 36) as usize]);
        n /= 36;
        if n == 0 {
            break;
        }
    }
    encoded.reverse();
    format!("COT-{}", String::from_utf8_lossy(&encoded))
}

/// Localized (es-MX) creation date string, `DD/MM/YYYY`.
pub fn localized_date(at: Timestamp) -> String {
    at.format("%d/%m/%Y").to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Service;
    use chrono::TimeZone;

    fn service(id: &str, title: &str, price: &str) -> Service {
        Service {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            price: price.into(),
            category: "Estación".into(),
            icon: "Party".into(),
            features: None,
            duration: None,
            max_participants: None,
            age_range: None,
            space_requirements: None,
        }
    }

    #[test]
    fn source_roundtrip() {
        for source in [QuoteSource::Onboarding, QuoteSource::Services] {
            assert_eq!(QuoteSource::from_str_db(source.as_str()).unwrap(), source);
        }
        assert!(QuoteSource::from_str_db("email").is_err());
    }

    #[test]
    fn status_roundtrip() {
        for status in [
            QuoteStatus::Pending,
            QuoteStatus::Contacted,
            QuoteStatus::Confirmed,
            QuoteStatus::Cancelled,
        ] {
            assert_eq!(QuoteStatus::from_str_db(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn lines_denormalize_name_and_price() {
        let mut store = SelectionStore::new();
        store.add(service("chef", "Estación Chef", "Desde $800"));
        store.add(service("chef", "Estación Chef", "Desde $800"));
        store.add(service("arte", "Estudio de Arte", "$1,250"));

        let lines = lines_from_selection(&store);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].service_name, "Estación Chef");
        assert_eq!(lines[0].unit_price, 800);
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(compute_total(&lines), 800 * 2 + 1250);
    }

    #[test]
    fn subtotal_multiplies_quantity() {
        let line = QuoteLine {
            service_id: "chef".into(),
            service_name: "Estación Chef".into(),
            unit_price: 800,
            quantity: 3,
        };
        assert_eq!(line.subtotal(), 2400);
    }

    #[test]
    fn quote_number_is_short_and_prefixed() {
        let at = chrono::Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
        let number = quote_number(at);
        assert!(number.starts_with("COT-"));
        assert!(number.len() <= 12);
    }

    #[test]
    fn quote_numbers_differ_across_seconds() {
        let a = chrono::Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
        let b = chrono::Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 1).unwrap();
        assert_ne!(quote_number(a), quote_number(b));
    }

    #[test]
    fn localized_date_is_day_month_year() {
        let at = chrono::Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
        assert_eq!(localized_date(at), "25/08/2026");
    }
}
