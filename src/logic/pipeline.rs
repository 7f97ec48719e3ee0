//! Pipeline Orchestrator
//!
//! Sequences Fetching -> Sufficient/Insufficient -> Deriving ->
//! Categorizing -> Predicting -> Done. Every run is an independent,
//! from-scratch computation; nothing is retained between requests.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::cluster::{self, ClusterError, MIN_COHORT};
use super::features;
use super::risk;
use super::types::{FinalStudent, RawStudent};
use crate::source::{synthetic, SourceError};

/// Where the cohort of a run came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CohortOrigin {
    Store,
    Synthetic,
}

impl std::fmt::Display for CohortOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store => f.write_str("store"),
            Self::Synthetic => f.write_str("synthetic"),
        }
    }
}

/// Outcome of one pipeline run.
#[derive(Debug)]
pub enum PipelineOutcome {
    Success(Vec<FinalStudent>),
    /// Cohort below the operational floor; the endpoint serves an empty
    /// list with a structured status, never an error.
    InsufficientData,
}

/// Turn a fetch result into the cohort to process.
///
/// A failed fetch (or a source configured unavailable) substitutes a
/// synthetic cohort instead of failing the request; availability wins
/// over correctness by design. A real cohort larger than `max_cohort` is
/// truncated to bound per-request training cost.
pub fn resolve_cohort(
    fetched: Result<Vec<RawStudent>, SourceError>,
    synthetic_size: usize,
    max_cohort: usize,
) -> (Vec<RawStudent>, CohortOrigin) {
    match fetched {
        Ok(mut cohort) => {
            if cohort.len() > max_cohort {
                tracing::warn!(
                    fetched = cohort.len(),
                    max_cohort,
                    "cohort exceeds cap, truncating"
                );
                cohort.truncate(max_cohort);
            }
            (cohort, CohortOrigin::Store)
        }
        Err(err) => {
            tracing::warn!(error = %err, "student store unavailable, using synthetic cohort");
            let mut rng = StdRng::from_entropy();
            (
                synthetic::generate(synthetic_size, &mut rng),
                CohortOrigin::Synthetic,
            )
        }
    }
}

/// Run the full derivation/classification pipeline over a cohort.
///
/// Deterministic for a fixed cohort and seed.
pub fn run(cohort: Vec<RawStudent>, seed: u64) -> PipelineOutcome {
    let size = cohort.len();
    if size < MIN_COHORT {
        tracing::info!(size, floor = MIN_COHORT, "cohort below floor, skipping computation");
        return PipelineOutcome::InsufficientData;
    }

    let started = Instant::now();

    let engineered = features::derive_metrics(cohort);
    tracing::debug!(stage = "derive", size, elapsed_ms = started.elapsed().as_millis() as u64);

    let categorized = match cluster::assign_categories(engineered, seed) {
        Ok(categorized) => categorized,
        // The Assigner's own precondition is the authoritative gate
        Err(ClusterError::InsufficientCohort { size }) => {
            tracing::info!(size, "assigner refused cohort");
            return PipelineOutcome::InsufficientData;
        }
    };
    tracing::debug!(stage = "categorize", size, elapsed_ms = started.elapsed().as_millis() as u64);

    let flags = risk::predict_risk(&categorized, seed);
    tracing::debug!(stage = "predict", size, elapsed_ms = started.elapsed().as_millis() as u64);

    let students = categorized
        .into_iter()
        .zip(flags)
        .map(|(student, is_at_risk)| FinalStudent { student, is_at_risk })
        .collect();

    PipelineOutcome::Success(students)
}

// ============================================================================
// TESTS
// ============================================================================
