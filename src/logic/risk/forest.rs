//! Random forest
//!
//! Bagged ensemble of decision trees: every tree fits a bootstrap sample
//! of the training rows with a random candidate feature per split, and
//! prediction is a majority vote.

use ndarray::{ArrayView1, ArrayView2};
use rand::rngs::StdRng;
use rand::Rng;

use super::tree::{DecisionTree, TreeParams};

#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_features: usize,
}

impl RandomForest {
    /// Train `n_trees` trees, each on a bootstrap sample (same size as the
    /// training set, drawn with replacement) of `rows`.
    pub fn fit(
        x: ArrayView2<'_, f64>,
        y: &[bool],
        rows: &[usize],
        n_trees: usize,
        params: &TreeParams,
        rng: &mut StdRng,
    ) -> Self {
        let trees = (0..n_trees)
            .map(|_| {
                let sample: Vec<usize> = (0..rows.len())
                    .map(|_| rows[rng.gen_range(0..rows.len())])
                    .collect();
                DecisionTree::fit(x, y, &sample, params, rng)
            })
            .collect();

        Self {
            trees,
            n_features: x.ncols(),
        }
    }

    /// Majority vote; an exact tie predicts not-at-risk.
    pub fn predict(&self, row: ArrayView1<'_, f64>) -> bool {
        let votes = self.trees.iter().filter(|t| t.predict(row)).count();
        votes * 2 > self.trees.len()
    }

    /// Mean of per-tree impurity-decrease shares, re-normalized to sum 1.
    pub fn feature_importances(&self) -> Vec<f64> {
        let mut totals = vec![0.0; self.n_features];
        for tree in &self.trees {
            for (total, v) in totals.iter_mut().zip(tree.importances()) {
                *total += v;
            }
        }
        let sum: f64 = totals.iter().sum();
        if sum > 0.0 {
            for v in &mut totals {
                *v /= sum;
            }
        }
        totals
    }

    pub fn size(&self) -> usize {
        self.trees.len()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};
    use rand::SeedableRng;

    fn forest_params() -> TreeParams {
        TreeParams {
            max_features: 1,
            min_samples_split: 2,
        }
    }

    fn separable() -> (Array2<f64>, Vec<bool>) {
        let x = array![
            [1.0, 100.0],
            [2.0, 110.0],
            [3.0, 90.0],
            [2.5, 105.0],
            [20.0, 500.0],
            [21.0, 520.0],
            [22.0, 480.0],
            [20.5, 510.0],
        ];
        let y = vec![false, false, false, false, true, true, true, true];
        (x, y)
    }

    #[test]
    fn test_forest_learns_separable_data() {
        let (x, y) = separable();
        let rows: Vec<usize> = (0..x.nrows()).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let forest = RandomForest::fit(x.view(), &y, &rows, 100, &forest_params(), &mut rng);

        assert_eq!(forest.size(), 100);
        for (i, &label) in y.iter().enumerate() {
            assert_eq!(forest.predict(x.row(i)), label);
        }
    }

    #[test]
    fn test_single_class_training_predicts_that_class() {
        let x = array![[1.0], [2.0], [3.0], [4.0], [5.0]];
        let y = vec![false; 5];
        let rows: Vec<usize> = (0..5).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let forest = RandomForest::fit(x.view(), &y, &rows, 25, &forest_params(), &mut rng);

        for i in 0..5 {
            assert!(!forest.predict(x.row(i)));
        }
    }

    #[test]
    fn test_importances_normalized() {
        let (x, y) = separable();
        let rows: Vec<usize> = (0..x.nrows()).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let forest = RandomForest::fit(x.view(), &y, &rows, 50, &forest_params(), &mut rng);

        let importances = forest.feature_importances();
        assert_eq!(importances.len(), 2);
        assert!((importances.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(importances.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_same_seed_same_votes() {
        let (x, y) = separable();
        let rows: Vec<usize> = (0..x.nrows()).collect();
        let a = RandomForest::fit(
            x.view(),
            &y,
            &rows,
            30,
            &forest_params(),
            &mut StdRng::seed_from_u64(11),
        );
        let b = RandomForest::fit(
            x.view(),
            &y,
            &rows,
            30,
            &forest_params(),
            &mut StdRng::seed_from_u64(11),
        );

        for i in 0..x.nrows() {
            assert_eq!(a.predict(x.row(i)), b.predict(x.row(i)));
        }
        assert_eq!(a.feature_importances(), b.feature_importances());
    }
}
