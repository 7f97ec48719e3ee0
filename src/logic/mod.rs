//! Analytics pipeline
//!
//! Deterministic feature engineering, unsupervised category assignment
//! and supervised risk prediction over one cohort at a time.

pub mod cluster;
pub mod features;
pub mod pipeline;
pub mod risk;
pub mod types;

pub use pipeline::{CohortOrigin, PipelineOutcome};
pub use types::{Category, CategorizedStudent, EngineeredStudent, FinalStudent, RawStudent};

/// Seed for every seeded stage (clustering restarts, train/test split,
/// bootstrap sampling). Fixed so identical cohorts reproduce identical
/// categories and flags.
pub const DEFAULT_SEED: u64 = 42;
