//! Analytics response types
//!
//! Field names are exactly what the reference endpoint serves: camelCase
//! `totalAccuracy` next to snake_case `retention_rate`/`is_at_risk`.
//! Downstream consumers rely on the mixed casing; do not harmonize it.

use serde::Serialize;

use crate::logic::{Category, FinalStudent};

#[derive(Debug, Serialize)]
pub struct StudentMetrics {
    pub id: String,
    pub name: String,
    #[serde(rename = "totalAccuracy")]
    pub total_accuracy: f64,
    pub streak: u32,
    pub xp: i64,
    pub elo: i64,
    pub retention_rate: f64,
    pub category: Category,
    pub is_at_risk: bool,
}

impl From<FinalStudent> for StudentMetrics {
    fn from(record: FinalStudent) -> Self {
        let is_at_risk = record.is_at_risk;
        let category = record.student.category;
        let engineered = record.student.student;
        let raw = engineered.student;

        Self {
            id: raw.id,
            name: raw.name,
            total_accuracy: raw.total_accuracy,
            streak: raw.streak,
            xp: raw.xp as i64,
            elo: engineered.rating,
            retention_rate: engineered.retention_rate,
            category,
            is_at_risk,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsStatus {
    Success,
    InsufficientData,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub students: Vec<StudentMetrics>,
    pub status: AnalyticsStatus,
}

impl AnalyticsResponse {
    pub fn success(students: Vec<StudentMetrics>) -> Self {
        Self {
            students,
            status: AnalyticsStatus::Success,
        }
    }

    pub fn insufficient_data() -> Self {
        Self {
            students: Vec::new(),
            status: AnalyticsStatus::InsufficientData,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
