//! Service catalog entity models and DTOs.

use japi_core::catalog::Service;
use japi_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A catalog service row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServiceRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub icon: String,
    pub features: Option<Vec<String>>,
    pub duration: Option<String>,
    pub max_participants: Option<i32>,
    pub age_range: Option<String>,
    pub space_requirements: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ServiceRow {
    /// Convert a database row to the domain [`Service`] used by the
    /// selection and recommendation logic.
    pub fn into_domain(self) -> Service {
        Service {
            id: self.id,
            title: self.title,
            description: self.description,
            price: self.price,
            category: self.category,
            icon: self.icon,
            features: self.features,
            duration: self.duration,
            max_participants: self.max_participants,
            age_range: self.age_range,
            space_requirements: self.space_requirements,
        }
    }
}

/// DTO for inserting a new catalog service.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateService {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: String,
    pub category: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub max_participants: Option<i32>,
    #[serde(default)]
    pub age_range: Option<String>,
    #[serde(default)]
    pub space_requirements: Option<String>,
}

/// DTO for patching a catalog service. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateService {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub icon: Option<String>,
    pub features: Option<Vec<String>>,
    pub duration: Option<String>,
    pub max_participants: Option<i32>,
    pub age_range: Option<String>,
    pub space_requirements: Option<String>,
}
