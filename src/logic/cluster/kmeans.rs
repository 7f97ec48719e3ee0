//! K-means clustering
//!
//! Lloyd's algorithm with k-means++ initialization. The caller runs it
//! with multiple restarts and keeps the lowest-inertia fit; all randomness
//! comes from the seeded RNG handed in, so a fixed seed reproduces the
//! same clusters for the same cohort.

use ndarray::{Array2, ArrayView1, ArrayView2};
use rand::rngs::StdRng;
use rand::Rng;

/// Result of one completed fit.
#[derive(Debug, Clone)]
pub struct KMeansFit {
    /// Final centroids, one row per cluster.
    pub centroids: Array2<f64>,
    /// Cluster index per input row.
    pub assignments: Vec<usize>,
    /// Sum of squared distances of every point to its centroid.
    pub inertia: f64,
}

/// Fit `k` clusters, restarting `restarts` times and keeping the fit with
/// the lowest inertia. Requires `data.nrows() >= k`.
pub fn fit(
    data: ArrayView2<'_, f64>,
    k: usize,
    restarts: usize,
    max_iterations: usize,
    rng: &mut StdRng,
) -> KMeansFit {
    debug_assert!(k > 0 && data.nrows() >= k);

    let mut best: Option<KMeansFit> = None;
    for _ in 0..restarts.max(1) {
        let run = lloyd(data, k, max_iterations, rng);
        if best.as_ref().map_or(true, |b| run.inertia < b.inertia) {
            best = Some(run);
        }
    }
    // restarts.max(1) guarantees at least one run
    best.unwrap()
}

/// One restart: initialize with k-means++ then iterate assignment and
/// centroid updates until assignments stabilize or the iteration cap hits.
fn lloyd(data: ArrayView2<'_, f64>, k: usize, max_iterations: usize, rng: &mut StdRng) -> KMeansFit {
    let n = data.nrows();
    let d = data.ncols();

    let mut centroids = init_plus_plus(data, k, rng);
    let mut assignments = vec![0usize; n];

    for _ in 0..max_iterations {
        // Assignment step
        let mut changed = false;
        for (i, point) in data.rows().into_iter().enumerate() {
            let nearest = nearest_centroid(point, &centroids);
            if assignments[i] != nearest {
                assignments[i] = nearest;
                changed = true;
            }
        }

        // Update step: centroid = mean of members
        let mut sums = Array2::<f64>::zeros((k, d));
        let mut counts = vec![0usize; k];
        for (i, point) in data.rows().into_iter().enumerate() {
            let c = assignments[i];
            counts[c] += 1;
            for (j, v) in point.iter().enumerate() {
                sums[[c, j]] += v;
            }
        }
        for c in 0..k {
            if counts[c] > 0 {
                for j in 0..d {
                    centroids[[c, j]] = sums[[c, j]] / counts[c] as f64;
                }
            } else {
                // Empty cluster: reseed at the point farthest from its
                // current centroid so every cluster stays populated.
                let far = farthest_point(data, &centroids, &assignments);
                for j in 0..d {
                    centroids[[c, j]] = data[[far, j]];
                }
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    let inertia = data
        .rows()
        .into_iter()
        .enumerate()
        .map(|(i, point)| squared_distance(point, centroids.row(assignments[i])))
        .sum();

    KMeansFit {
        centroids,
        assignments,
        inertia,
    }
}

/// K-means++ seeding: first centroid uniform, each subsequent centroid
/// drawn with probability proportional to squared distance from the
/// nearest centroid chosen so far.
fn init_plus_plus(data: ArrayView2<'_, f64>, k: usize, rng: &mut StdRng) -> Array2<f64> {
    let n = data.nrows();
    let d = data.ncols();
    let mut centroids = Array2::<f64>::zeros((k, d));

    let first = rng.gen_range(0..n);
    centroids.row_mut(0).assign(&data.row(first));

    let mut min_sq_dist: Vec<f64> = data
        .rows()
        .into_iter()
        .map(|p| squared_distance(p, centroids.row(0)))
        .collect();

    for c in 1..k {
        let total: f64 = min_sq_dist.iter().sum();
        let chosen = if total > 0.0 {
            let mut target = rng.gen::<f64>() * total;
            let mut idx = n - 1;
            for (i, w) in min_sq_dist.iter().enumerate() {
                if target <= *w {
                    idx = i;
                    break;
                }
                target -= w;
            }
            idx
        } else {
            // All remaining mass is zero (duplicate points); fall back to
            // a uniform draw.
            rng.gen_range(0..n)
        };

        centroids.row_mut(c).assign(&data.row(chosen));
        for (i, p) in data.rows().into_iter().enumerate() {
            let dist = squared_distance(p, centroids.row(c));
            if dist < min_sq_dist[i] {
                min_sq_dist[i] = dist;
            }
        }
    }

    centroids
}

fn nearest_centroid(point: ArrayView1<'_, f64>, centroids: &Array2<f64>) -> usize {
    centroids
        .rows()
        .into_iter()
        .enumerate()
        .map(|(idx, centroid)| (idx, squared_distance(point, centroid)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

fn farthest_point(
    data: ArrayView2<'_, f64>,
    centroids: &Array2<f64>,
    assignments: &[usize],
) -> usize {
    data.rows()
        .into_iter()
        .enumerate()
        .map(|(i, p)| (i, squared_distance(p, centroids.row(assignments[i]))))
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn squared_distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}

// ============================================================================
// TESTS
// ============================================================================
