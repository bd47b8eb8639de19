//! The customer's in-progress cart of selected services.
//!
//! [`SelectionStore`] keeps insertion-ordered entries keyed by service id
//! and computes running totals with the catalog price-parse rule. It is
//! serializable so a wizard session row can carry the cart between
//! requests; a fresh store is always empty.

use serde::{Deserialize, Serialize};

use crate::catalog::Service;

/// Minimum number of distinct services required before checkout may proceed.
pub const DEFAULT_MINIMUM_SERVICES: usize = 3;

// ---------------------------------------------------------------------------
// SelectedService
// ---------------------------------------------------------------------------

/// One cart entry: a service reference with a positive quantity.
///
/// Invariant: `quantity >= 1`. An entry whose quantity drops to zero is
/// removed from the store, never retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedService {
    pub service: Service,
    pub quantity: u32,
}

// ---------------------------------------------------------------------------
// SelectionStore
// ---------------------------------------------------------------------------

/// In-memory accumulation of chosen services and quantities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionStore {
    entries: Vec<SelectedService>,
}

impl SelectionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a service. An existing entry is incremented by 1;
    /// otherwise a new entry with quantity 1 is appended. No upper bound.
    pub fn add(&mut self, service: Service) {
        match self.entries.iter_mut().find(|e| e.service.id == service.id) {
            Some(entry) => entry.quantity += 1,
            None => self.entries.push(SelectedService {
                service,
                quantity: 1,
            }),
        }
    }

    /// Remove the entry for a service id. No-op when absent.
    pub fn remove(&mut self, service_id: &str) {
        self.entries.retain(|e| e.service.id != service_id);
    }

    /// Set an entry's quantity. A quantity of zero or less removes the
    /// entry, identical to [`remove`](Self::remove).
    pub fn update_quantity(&mut self, service_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove(service_id);
            return;
        }
        if let Some(entry) = self.entries.iter_mut().find(|e| e.service.id == service_id) {
            entry.quantity = quantity as u32;
        }
    }

    /// Empty the store.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[SelectedService] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct selected services.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Sum of `unit_price × quantity` over all entries. Malformed price
    /// strings contribute zero.
    pub fn total_price(&self) -> i64 {
        self.entries
            .iter()
            .map(|e| e.service.unit_price() * i64::from(e.quantity))
            .sum()
    }

    /// Distinct entries still needed to reach the checkout minimum.
    pub fn remaining_to_minimum(&self) -> usize {
        DEFAULT_MINIMUM_SERVICES.saturating_sub(self.len())
    }

    /// Whether the checkout step may proceed.
    pub fn meets_minimum(&self) -> bool {
        self.remaining_to_minimum() == 0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn service(id: &str, price: &str) -> Service {
        Service {
            id: id.into(),
            title: format!("Servicio {id}"),
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
    fn add_accumulates_quantity() {
        let mut store = SelectionStore::new();
        let svc = service("chef", "Desde $800");
        store.add(svc.clone());
        store.add(svc.clone());
        store.add(svc);

        assert_eq!(store.len(), 1);
        assert_eq!(store.entries()[0].quantity, 3);
    }

    #[test]
    fn fresh_store_is_empty() {
        assert!(SelectionStore::new().is_empty());
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut store = SelectionStore::new();
        store.add(service("chef", "$800"));
        store.remove("no-such-service");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_quantity_sets_not_increments() {
        let mut store = SelectionStore::new();
        store.add(service("chef", "$800"));
        store.update_quantity("chef", 5);
        assert_eq!(store.entries()[0].quantity, 5);
        store.update_quantity("chef", 2);
        assert_eq!(store.entries()[0].quantity, 2);
    }

    #[test]
    fn zero_or_negative_quantity_removes_entry() {
        let mut store = SelectionStore::new();
        store.add(service("chef", "$800"));
        store.update_quantity("chef", 0);
        assert!(store.is_empty());

        store.add(service("chef", "$800"));
        store.update_quantity("chef", -5);
        assert!(store.is_empty());
    }

    #[test]
    fn total_price_applies_parse_rule() {
        let mut store = SelectionStore::new();
        store.add(service("chef", "Desde $800"));
        store.update_quantity("chef", 2);
        store.add(service("arte", "$1,250"));

        assert_eq!(store.total_price(), 800 * 2 + 1250);
    }

    #[test]
    fn malformed_price_contributes_zero() {
        let mut store = SelectionStore::new();
        store.add(service("misterio", "a consultar"));
        store.add(service("chef", "$800"));
        assert_eq!(store.total_price(), 800);
    }

    #[test]
    fn clear_empties_store() {
        let mut store = SelectionStore::new();
        store.add(service("chef", "$800"));
        store.add(service("arte", "$650"));
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.total_price(), 0);
    }

    #[test]
    fn remaining_to_minimum_counts_down() {
        let mut store = SelectionStore::new();
        assert_eq!(store.remaining_to_minimum(), 3);
        store.add(service("chef", "$800"));
        store.add(service("arte", "$650"));
        assert_eq!(store.remaining_to_minimum(), 1);
        assert!(!store.meets_minimum());
        store.add(service("spa", "$700"));
        assert_eq!(store.remaining_to_minimum(), 0);
        assert!(store.meets_minimum());
        // Quantity does not count toward the minimum, entries do.
        store.remove("spa");
        store.update_quantity("chef", 10);
        assert!(!store.meets_minimum());
    }
}
