//! Risk Predictor
//!
//! Trains a random forest fresh on the current cohort to predict the
//! at-risk label from {total_accuracy, streak, xp}, with ground truth
//! retention_rate < 60 used during training only. A 70/30 split produces
//! a diagnostic report; the served flags come from applying the forest to
//! the entire cohort, training rows included (reference behavior,
//! reproduced as-is). A secondary single decision tree is trained for a
//! comparative report and never influences the output.

pub mod forest;
pub mod metrics;
pub mod split;
pub mod tree;

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use self::forest::RandomForest;
use self::metrics::{ClassificationReport, ConfusionMatrix};
use self::split::train_test_split;
use self::tree::{DecisionTree, TreeParams};
use super::types::CategorizedStudent;

/// Trees in the ensemble.
pub const FOREST_SIZE: usize = 100;

/// Share of the cohort held out for the diagnostic report.
pub const TEST_FRACTION: f64 = 0.3;

/// Ground-truth threshold: a student retaining below this is labeled
/// at-risk during training.
pub const AT_RISK_RETENTION_THRESHOLD: f64 = 60.0;

/// Candidate features per forest split: floor(sqrt(3)).
const FOREST_SPLIT_FEATURES: usize = 1;

const FEATURE_NAMES: [&str; 3] = ["total_accuracy", "streak", "xp"];

/// Predict the at-risk flag for every student in the cohort.
///
/// Deterministic for a fixed cohort and seed. Requires at least 2 records
/// for a non-degenerate split; the orchestrator's 5-record floor is the
/// operational gate and keeps this stage from ever seeing less.
pub fn predict_risk(cohort: &[CategorizedStudent], seed: u64) -> Vec<bool> {
    let n = cohort.len();

    let mut x = Array2::<f64>::zeros((n, 3));
    for (i, s) in cohort.iter().enumerate() {
        x[[i, 0]] = s.student.student.total_accuracy;
        x[[i, 1]] = f64::from(s.student.student.streak);
        x[[i, 2]] = s.student.student.xp;
    }
    let y: Vec<bool> = cohort
        .iter()
        .map(|s| s.student.retention_rate < AT_RISK_RETENTION_THRESHOLD)
        .collect();

    let mut rng = StdRng::seed_from_u64(seed);
    let split = train_test_split(n, TEST_FRACTION, &mut rng);

    let forest_params = TreeParams {
        max_features: FOREST_SPLIT_FEATURES,
        min_samples_split: 2,
    };
    let forest = RandomForest::fit(x.view(), &y, &split.train, FOREST_SIZE, &forest_params, &mut rng);
    tracing::debug!(
        trees = forest.size(),
        train_size = split.train.len(),
        test_size = split.test.len(),
        "risk model trained"
    );

    let forest_test: Vec<bool> = split.test.iter().map(|&i| forest.predict(x.row(i))).collect();
    log_model_report("random forest", &y, &split.test, &forest_test);
    log_feature_importances(&forest);

    // Comparative diagnostic only; every feature considered per split
    let single_tree = DecisionTree::fit(x.view(), &y, &split.train, &TreeParams::default(), &mut rng);
    let tree_test: Vec<bool> = split.test.iter().map(|&i| single_tree.predict(x.row(i))).collect();
    log_model_report("decision tree", &y, &split.test, &tree_test);

    (0..n).map(|i| forest.predict(x.row(i))).collect()
}

/// Test-split report for one model, written to the diagnostic log.
fn log_model_report(model: &str, y: &[bool], test: &[usize], predicted: &[bool]) {
    let actual: Vec<bool> = test.iter().map(|&i| y[i]).collect();

    let confusion = ConfusionMatrix::from_labels(&actual, predicted);
    let report = ClassificationReport::from_confusion(&confusion);

    tracing::info!(
        target: "diagnostics",
        model,
        test_size = test.len(),
        "classification report (test split):\n{report}"
    );
    tracing::info!(target: "diagnostics", model, "confusion matrix:\n{confusion}");
}

/// Ranked mean-decrease-in-impurity table for the served model.
fn log_feature_importances(forest: &RandomForest) {
    let mut ranked: Vec<(&str, f64)> = FEATURE_NAMES
        .iter()
        .copied()
        .zip(forest.feature_importances())
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    for (feature, importance) in &ranked {
        tracing::info!(
            target: "diagnostics",
            feature,
            importance = format!("{importance:.4}"),
            "feature importance"
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
