//! Category Assigner
//!
//! Partitions a cohort into three clusters over standardized
//! {total_accuracy, retention_rate, rating}, then ranks clusters by mean
//! rating to attach semantic labels. Cluster indices are meaningless
//! across runs; only the computed rank is.

pub mod kmeans;
pub mod scale;

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use super::types::{Category, CategorizedStudent, EngineeredStudent};

/// Operational minimum for meaningful clustering. Below this the Assigner
/// refuses; 3 is the strict floor for a 3-way partition.
pub const MIN_COHORT: usize = 5;

/// Fixed 3-way partition: the three ranked categories.
pub const CLUSTER_COUNT: usize = 3;

/// Random centroid initializations per fit; lowest-inertia result wins.
const RESTARTS: usize = 10;

/// Iteration cap per restart.
const MAX_ITERATIONS: usize = 300;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClusterError {
    #[error("cohort of {size} students is below the 5-record floor")]
    InsufficientCohort { size: usize },
}

/// Cluster the cohort and label every student with a ranked category.
///
/// Order and identity of the input records are preserved. Deterministic
/// for a fixed cohort and seed.
pub fn assign_categories(
    students: Vec<EngineeredStudent>,
    seed: u64,
) -> Result<Vec<CategorizedStudent>, ClusterError> {
    let size = students.len();
    if size < MIN_COHORT {
        return Err(ClusterError::InsufficientCohort { size });
    }

    let mut data = Array2::<f64>::zeros((size, 3));
    for (i, s) in students.iter().enumerate() {
        data[[i, 0]] = s.student.total_accuracy;
        data[[i, 1]] = s.retention_rate;
        data[[i, 2]] = s.rating as f64;
    }
    let scaled = scale::standardize(&data);

    let mut rng = StdRng::seed_from_u64(seed);
    let fitted = kmeans::fit(scaled.view(), CLUSTER_COUNT, RESTARTS, MAX_ITERATIONS, &mut rng);

    let labels = rank_clusters(&students, &fitted.assignments);

    Ok(students
        .into_iter()
        .zip(fitted.assignments)
        .map(|(student, cluster)| CategorizedStudent {
            student,
            cluster,
            category: labels[cluster],
        })
        .collect())
}

/// Map cluster index -> category by descending mean rating.
///
/// Ties between cluster means break by ascending cluster index (stable
/// sort); an empty cluster ranks last.
fn rank_clusters(students: &[EngineeredStudent], assignments: &[usize]) -> [Category; CLUSTER_COUNT] {
    let mut sums = [0.0f64; CLUSTER_COUNT];
    let mut counts = [0usize; CLUSTER_COUNT];
    for (s, &cluster) in students.iter().zip(assignments) {
        sums[cluster] += s.rating as f64;
        counts[cluster] += 1;
    }

    let mut ranked: Vec<(usize, f64)> = (0..CLUSTER_COUNT)
        .map(|c| {
            let mean = if counts[c] > 0 {
                sums[c] / counts[c] as f64
            } else {
                f64::NEG_INFINITY
            };
            (c, mean)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    const RANK_ORDER: [Category; CLUSTER_COUNT] = [
        Category::TopPerformer,
        Category::ConsistentLearner,
        Category::NeedsSupport,
    ];

    let mut labels = [Category::NeedsSupport; CLUSTER_COUNT];
    for (rank, (cluster, _)) in ranked.into_iter().enumerate() {
        labels[cluster] = RANK_ORDER[rank];
    }
    labels
}

// ============================================================================
// TESTS
// ============================================================================
