//! Service catalog types and price parsing.
//!
//! A [`Service`] is a bookable themed activity offering (a "station").
//! Prices are stored as display strings ("Desde $800") and parsed to
//! integer amounts with [`parse_price`]; malformed strings contribute
//! zero rather than failing.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// A bookable service offering. Immutable once loaded from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Unique slug identifier, e.g. `"chef"`.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Currency-formatted display string, e.g. `"Desde $800"`.
    pub price: String,
    /// Category label, e.g. `"Estación"`, `"Taller"`, `"Spa"`.
    pub category: String,
    /// Icon key resolved to a [`ServiceIcon`] for presentation.
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<i32>,
    /// Age range as a `"min-max"` string, e.g. `"4-12"` or `"4-12 años"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_requirements: Option<String>,
}

impl Service {
    /// Parsed unit price of this service. Malformed price strings yield 0.
    pub fn unit_price(&self) -> i64 {
        parse_price(&self.price)
    }

    /// Icon variant for this service, falling back to the generic variant
    /// for unrecognized keys.
    pub fn icon(&self) -> ServiceIcon {
        ServiceIcon::from_key(&self.icon)
    }
}

// ---------------------------------------------------------------------------
// ServiceIcon
// ---------------------------------------------------------------------------

/// Known icon variants for catalog services.
///
/// Icon references are stored as string keys on the service row; rendering
/// layers map each variant to their own primitive. Unrecognized keys resolve
/// to [`ServiceIcon::Party`], never to a runtime lookup failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceIcon {
    ChefHat,
    Hammer,
    Palette,
    Scissors,
    Stethoscope,
    Camera,
    ShoppingBag,
    Music,
    Sparkles,
    /// Fallback for unrecognized icon keys.
    Party,
}

impl ServiceIcon {
    /// Resolve a stored icon key to a variant. Unknown keys fall back to
    /// [`ServiceIcon::Party`].
    pub fn from_key(key: &str) -> Self {
        match key {
            "ChefHat" => Self::ChefHat,
            "Hammer" => Self::Hammer,
            "Palette" => Self::Palette,
            "Scissors" => Self::Scissors,
            "Stethoscope" => Self::Stethoscope,
            "Camera" => Self::Camera,
            "ShoppingBag" => Self::ShoppingBag,
            "Music" => Self::Music,
            "Sparkles" => Self::Sparkles,
            _ => Self::Party,
        }
    }

    /// The canonical string key for this variant.
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::ChefHat => "ChefHat",
            Self::Hammer => "Hammer",
            Self::Palette => "Palette",
            Self::Scissors => "Scissors",
            Self::Stethoscope => "Stethoscope",
            Self::Camera => "Camera",
            Self::ShoppingBag => "ShoppingBag",
            Self::Music => "Music",
            Self::Sparkles => "Sparkles",
            Self::Party => "Party",
        }
    }
}

// ---------------------------------------------------------------------------
// Price parsing
// ---------------------------------------------------------------------------

/// Parse a currency-formatted price string to an integer amount.
///
/// Every non-digit character is stripped and the remainder read as base-10:
/// `"Desde $800"` → 800, `"$1,250"` → 1250. Strings with no digits (or
/// digits overflowing i64) parse to 0 — a malformed price must degrade to a
/// zero contribution to totals, never to an error.
pub fn parse_price(price: &str) -> i64 {
    let digits: String = price.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Parse a `"min-max"` age-range string to its bounds.
///
/// Tolerates trailing text (`"4-12 años"` → `(4, 12)`). Returns `None`
/// when fewer than two numbers are present.
pub fn parse_age_range(range: &str) -> Option<(u8, u8)> {
    let mut numbers = Vec::with_capacity(2);
    let mut current = String::new();
    for c in range.chars() {
        if c.is_ascii_digit() {
            current.push(c);
        } else if !current.is_empty() {
            numbers.push(current.parse().ok()?);
            current.clear();
        }
    }
    if !current.is_empty() {
        numbers.push(current.parse().ok()?);
    }
    match numbers.as_slice() {
        [min, max, ..] => Some((*min, *max)),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
