//! Preference-driven service recommendations.
//!
//! When the wizard leaves the preferences step, the selected tags are
//! matched against the catalog via a fixed tag → keyword-set mapping,
//! additionally constrained by headcount and age fit. A zero-match result
//! falls back to the constraint-filtered catalog so the customer never
//! sees an empty recommendation list while matching services exist.

use crate::catalog::{parse_age_range, Service};

/// Maximum number of recommended services returned.
pub const MAX_RECOMMENDATIONS: usize = 6;

/// Keyword sets associated with each preference tag.
///
/// Keywords are matched against a service's id, title, and category
/// (case-insensitive substring on id/title, exact on category).
const PREFERENCE_KEYWORDS: &[(&str, &[&str])] = &[
    ("active", &["boliche", "pesca", "construccion"]),
    (
        "creative",
        &["caballetes", "yesitos", "tote-bag", "gorra", "pulsera", "arte"],
    ),
    ("relaxed", &["guarderia", "spa"]),
    ("food", &["hamburgueseria", "cupcake", "chef"]),
    ("roleplay", &["veterinari", "supermercado"]),
    ("spa", &["spa", "belleza"]),
    ("educational", &["veterinari", "construccion"]),
    ("party", &["boliche", "hamburgueseria", "cupcake", "musica"]),
];

/// Event constraints collected by the wizard.
#[derive(Debug, Clone, Copy, Default)]
pub struct Constraints<'a> {
    /// Approximate number of children attending.
    pub children_count: Option<i32>,
    /// Celebrant's age range as a `"min-max"` string.
    pub age_range: Option<&'a str>,
}

/// Keyword set for a preference tag; unknown tags match nothing.
fn keywords_for(tag: &str) -> &'static [&'static str] {
    PREFERENCE_KEYWORDS
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, kws)| *kws)
        .unwrap_or(&[])
}

/// Whether a service matches at least one of the selected preference tags.
fn matches_preferences(service: &Service, preferences: &[String]) -> bool {
    let id = service.id.to_lowercase();
    let title = service.title.to_lowercase();
    let category = service.category.to_lowercase();

    preferences.iter().any(|tag| {
        keywords_for(tag)
            .iter()
            .any(|kw| id.contains(kw) || title.contains(kw) || category == *kw)
    })
}

/// Whether a service fits the event's headcount and age constraints.
///
/// A service with no stated capacity or age range is never excluded by
/// the missing attribute.
fn fits_constraints(service: &Service, constraints: Constraints<'_>) -> bool {
    if let (Some(count), Some(max)) = (constraints.children_count, service.max_participants) {
        if max < count {
            return false;
        }
    }

    if let (Some(wanted), Some(offered)) = (
        constraints.age_range.and_then(parse_age_range),
        service.age_range.as_deref().and_then(parse_age_range),
    ) {
        // Ranges must overlap.
        if wanted.1 < offered.0 || wanted.0 > offered.1 {
            return false;
        }
    }

    true
}

/// Recommend services for the selected preference tags.
///
/// Services must keyword-match a tag and fit the constraints; results are
/// capped at [`MAX_RECOMMENDATIONS`] in catalog order. When no service
/// matches any tag, the constraint-filtered catalog is returned instead
/// (same cap) rather than an empty list.
pub fn recommend(
    services: &[Service],
    preferences: &[String],
    constraints: Constraints<'_>,
) -> Vec<Service> {
    let matched: Vec<Service> = services
        .iter()
        .filter(|s| matches_preferences(s, preferences) && fits_constraints(s, constraints))
        .take(MAX_RECOMMENDATIONS)
        .cloned()
        .collect();

    if !matched.is_empty() {
        return matched;
    }

    services
        .iter()
        .filter(|s| fits_constraints(s, constraints))
        .take(MAX_RECOMMENDATIONS)
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn service(id: &str, title: &str, max: Option<i32>, ages: Option<&str>) -> Service {
        Service {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            price: "Desde $800".into(),
            category: "Estación".into(),
            icon: "Party".into(),
            features: None,
            duration: None,
            max_participants: max,
            age_range: ages.map(Into::into),
            space_requirements: None,
        }
    }

    fn catalog() -> Vec<Service> {
        vec![
            service("chef", "Estación Chef", Some(8), Some("4-12 años")),
            service("construccion", "Taller de Construcción", Some(6), Some("5-12 años")),
            service("arte", "Estudio de Arte", Some(8), Some("3-12 años")),
            service("belleza", "Salón de Belleza", Some(6), Some("4-12 años")),
            service("veterinario", "Hospital Veterinario", Some(6), Some("4-12 años")),
            service("boliche", "Mini Boliche", Some(10), Some("4-12 años")),
            service("spa", "Spa Infantil", Some(6), Some("5-12 años")),
        ]
    }

    #[test]
    fn matches_tag_keywords_against_id_and_title() {
        let services = catalog();
        let recs = recommend(
            &services,
            &["creative".to_string()],
            Constraints::default(),
        );
        assert!(recs.iter().any(|s| s.id == "arte"));
        assert!(recs.iter().all(|s| s.id != "boliche"));
    }

    #[test]
    fn multiple_tags_union_their_matches() {
        let services = catalog();
        let recs = recommend(
            &services,
            &["active".to_string(), "spa".to_string()],
            Constraints::default(),
        );
        let ids: Vec<&str> = recs.iter().map(|s| s.id.as_str()).collect();
        assert!(ids.contains(&"boliche"));
        assert!(ids.contains(&"spa"));
    }

    #[test]
    fn capacity_constraint_excludes_small_stations() {
        let services = catalog();
        let recs = recommend(
            &services,
            &["roleplay".to_string()],
            Constraints {
                children_count: Some(8),
                age_range: None,
            },
        );
        // "veterinario" matches the tag but only fits 6 children.
        assert!(recs.iter().all(|s| s.id != "veterinario"));
    }

    #[test]
    fn age_constraint_requires_overlap() {
        let services = catalog();
        let recs = recommend(
            &services,
            &["creative".to_string()],
            Constraints {
                children_count: None,
                age_range: Some("2-4"),
            },
        );
        // "arte" covers ages 3-12 and overlaps 2-4.
        assert!(recs.iter().any(|s| s.id == "arte"));
        // "construccion" starts at 5, no overlap with 2-4, and it would
        // only appear via the educational/active tags anyway.
        assert!(recs.iter().all(|s| s.id != "construccion"));
    }

    #[test]
    fn zero_matches_falls_back_to_constraint_filter() {
        let services = catalog();
        let recs = recommend(
            &services,
            &["no-such-tag".to_string()],
            Constraints {
                children_count: Some(7),
                age_range: None,
            },
        );
        assert!(!recs.is_empty());
        assert!(recs.len() <= MAX_RECOMMENDATIONS);
        // Fallback still honors capacity.
        assert!(recs.iter().all(|s| s.max_participants.unwrap_or(0) >= 7));
    }

    #[test]
    fn results_capped_at_maximum() {
        // Ten services all matching the "party" tag via their title.
        let services: Vec<Service> = (0..10)
            .map(|i| service(&format!("boliche-{i}"), "Boliche", None, None))
            .collect();
        let recs = recommend(&services, &["party".to_string()], Constraints::default());
        assert_eq!(recs.len(), MAX_RECOMMENDATIONS);
    }
}
