//! Train/test partitioning
//!
//! Seeded shuffle split. The test slice feeds the diagnostic report only;
//! the served predictions come from applying the model to every row.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Row indices for each side of the split.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n` and carve off `ceil(test_fraction * n)` rows (at least
/// 1, at most n-1) for the test side. Requires `n >= 2` so both sides are
/// non-empty.
pub fn train_test_split(n: usize, test_fraction: f64, rng: &mut StdRng) -> TrainTestSplit {
    debug_assert!(n >= 2);

    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(rng);

    let n_test = ((n as f64 * test_fraction).ceil() as usize).clamp(1, n - 1);
    let train = indices.split_off(n_test);

    TrainTestSplit {
        train,
        test: indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_split_is_a_partition() {
        let mut rng = StdRng::seed_from_u64(42);
        let split = train_test_split(10, 0.3, &mut rng);

        assert_eq!(split.test.len(), 3);
        assert_eq!(split.train.len(), 7);

        let mut all: Vec<usize> = split.train.iter().chain(split.test.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_fractional_test_size_rounds_up() {
        let mut rng = StdRng::seed_from_u64(42);
        // ceil(0.3 * 5) = 2
        let split = train_test_split(5, 0.3, &mut rng);
        assert_eq!(split.test.len(), 2);
        assert_eq!(split.train.len(), 3);
    }

    #[test]
    fn test_both_sides_non_empty_at_minimum_size() {
        let mut rng = StdRng::seed_from_u64(42);
        let split = train_test_split(2, 0.3, &mut rng);
        assert_eq!(split.test.len(), 1);
        assert_eq!(split.train.len(), 1);
    }

    #[test]
    fn test_same_seed_same_split() {
        let a = train_test_split(20, 0.3, &mut StdRng::seed_from_u64(9));
        let b = train_test_split(20, 0.3, &mut StdRng::seed_from_u64(9));
        assert_eq!(a.train, b.train);
        assert_eq!(a.test, b.test);
    }
}
