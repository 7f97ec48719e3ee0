//! Pipeline record types
//!
//! One struct per pipeline stage. Each stage extends the previous stage's
//! record by composition; records are never mutated once built.

use serde::Serialize;

/// Raw per-student counters as read from the store (or generated).
#[derive(Debug, Clone)]
pub struct RawStudent {
    pub id: String,
    pub name: String,
    /// Percentage, 0-100.
    pub total_accuracy: f64,
    /// Consecutive-success count.
    pub streak: u32,
    /// Cumulative experience.
    pub xp: f64,
}

/// Raw record plus the two engineered metrics.
#[derive(Debug, Clone)]
pub struct EngineeredStudent {
    pub student: RawStudent,
    pub retention_rate: f64,
    /// Elo-like score; synthetic, not a pairwise-comparison rating.
    pub rating: i64,
}

/// Ranked performance category.
///
/// Assigned by rank of cluster mean rating, recomputed every run. The
/// numeric cluster index carries no meaning across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    #[serde(rename = "Top Performer")]
    TopPerformer,
    #[serde(rename = "Consistent Learner")]
    ConsistentLearner,
    #[serde(rename = "Needs Support")]
    NeedsSupport,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Self::TopPerformer => "Top Performer",
            Self::ConsistentLearner => "Consistent Learner",
            Self::NeedsSupport => "Needs Support",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Engineered record plus cluster assignment and its ranked label.
#[derive(Debug, Clone)]
pub struct CategorizedStudent {
    pub student: EngineeredStudent,
    /// Cluster index from this run's fit. Only `category` is meaningful.
    pub cluster: usize,
    pub category: Category,
}

/// Fully processed record as served by the analytics endpoint.
#[derive(Debug, Clone)]
pub struct FinalStudent {
    pub student: CategorizedStudent,
    /// Model prediction, not the ground-truth retention threshold.
    pub is_at_risk: bool,
}
