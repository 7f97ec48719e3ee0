//! CART-style binary decision tree
//!
//! Gini impurity, midpoint thresholds, optional random candidate-feature
//! subset per split (the forest sets this; the standalone diagnostic tree
//! considers every feature). Trees grow until pure or unsplittable.

use ndarray::{ArrayView1, ArrayView2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Growth parameters.
#[derive(Debug, Clone)]
pub struct TreeParams {
    /// Candidate features drawn per split, clamped to the feature count.
    pub max_features: usize,
    /// Nodes smaller than this become leaves.
    pub min_samples_split: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_features: usize::MAX,
            min_samples_split: 2,
        }
    }
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        prediction: bool,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

#[derive(Debug, Clone)]
pub struct DecisionTree {
    root: Node,
    importances: Vec<f64>,
}

impl DecisionTree {
    /// Fit on the rows given by `rows` (indices into `x`/`y`; duplicates
    /// allowed, which is how bootstrap samples arrive).
    pub fn fit(
        x: ArrayView2<'_, f64>,
        y: &[bool],
        rows: &[usize],
        params: &TreeParams,
        rng: &mut StdRng,
    ) -> Self {
        let mut importances = vec![0.0; x.ncols()];
        let root = build_node(x, y, rows, params, rows.len(), &mut importances, rng);

        // Normalize to mean-decrease-in-impurity shares
        let total: f64 = importances.iter().sum();
        if total > 0.0 {
            for v in &mut importances {
                *v /= total;
            }
        }

        Self { root, importances }
    }

    pub fn predict(&self, row: ArrayView1<'_, f64>) -> bool {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { prediction } => return *prediction,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }

    /// Per-feature impurity-decrease shares, summing to 1 (or all zero for
    /// a single-leaf tree).
    pub fn importances(&self) -> &[f64] {
        &self.importances
    }
}

fn build_node(
    x: ArrayView2<'_, f64>,
    y: &[bool],
    rows: &[usize],
    params: &TreeParams,
    total_rows: usize,
    importances: &mut [f64],
    rng: &mut StdRng,
) -> Node {
    let n = rows.len();
    let positives = rows.iter().filter(|&&r| y[r]).count();

    if positives == 0 {
        return Node::Leaf { prediction: false };
    }
    if positives == n {
        return Node::Leaf { prediction: true };
    }
    if n < params.min_samples_split {
        return majority_leaf(positives, n);
    }

    let node_impurity = gini(positives, n);

    let n_features = x.ncols();
    let mut candidates: Vec<usize> = (0..n_features).collect();
    candidates.shuffle(rng);
    candidates.truncate(params.max_features.clamp(1, n_features));

    let mut best: Option<BestSplit> = None;
    for &feature in &candidates {
        let mut values: Vec<(f64, bool)> = rows.iter().map(|&r| (x[[r, feature]], y[r])).collect();
        values.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut left_n = 0usize;
        let mut left_pos = 0usize;
        for i in 0..n - 1 {
            left_n += 1;
            if values[i].1 {
                left_pos += 1;
            }
            // No threshold fits between equal values
            if values[i].0 == values[i + 1].0 {
                continue;
            }

            let right_n = n - left_n;
            let right_pos = positives - left_pos;
            let weighted = (left_n as f64 * gini(left_pos, left_n)
                + right_n as f64 * gini(right_pos, right_n))
                / n as f64;
            let gain = node_impurity - weighted;

            if best.as_ref().map_or(gain > 1e-12, |b| gain > b.gain) {
                best = Some(BestSplit {
                    feature,
                    threshold: (values[i].0 + values[i + 1].0) / 2.0,
                    gain,
                });
            }
        }
    }

    let Some(split) = best else {
        // Candidate features are all constant here
        return majority_leaf(positives, n);
    };

    importances[split.feature] += (n as f64 / total_rows as f64) * split.gain;

    let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
        .iter()
        .copied()
        .partition(|&r| x[[r, split.feature]] <= split.threshold);

    Node::Split {
        feature: split.feature,
        threshold: split.threshold,
        left: Box::new(build_node(x, y, &left_rows, params, total_rows, importances, rng)),
        right: Box::new(build_node(x, y, &right_rows, params, total_rows, importances, rng)),
    }
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    gain: f64,
}

/// Ties predict not-at-risk (class order: false first).
fn majority_leaf(positives: usize, n: usize) -> Node {
    Node::Leaf {
        prediction: positives * 2 > n,
    }
}

/// Binary Gini impurity.
fn gini(positives: usize, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let p = positives as f64 / n as f64;
    2.0 * p * (1.0 - p)
}

// ============================================================================
// TESTS
// ============================================================================
