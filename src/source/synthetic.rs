//! Synthetic cohort generator
//!
//! Fallback when the student store is unreachable. Distributions follow
//! the reference dataset: accuracy concentrated in the 60-95 band, long
//! streaks geometrically rare, experience loosely correlated with streak.
//! Synthetic data is never mixed with real data.

use rand::Rng;
use rand_distr::{Distribution, Geometric, Normal};

use crate::logic::RawStudent;

/// Default fallback cohort size.
pub const DEFAULT_COHORT_SIZE: usize = 500;

const ACCURACY_MEAN: f64 = 75.0;
const ACCURACY_STD_DEV: f64 = 15.0;
const ACCURACY_RANGE: (f64, f64) = (30.0, 100.0);
const STREAK_CONTINUE_P: f64 = 0.1;
const XP_MEAN: f64 = 1000.0;
const XP_STD_DEV: f64 = 500.0;
const XP_PER_STREAK_DAY: f64 = 50.0;

/// Generate `n` raw records. Callers pass an entropy-seeded RNG in
/// production; tests pin a seed.
pub fn generate(n: usize, rng: &mut impl Rng) -> Vec<RawStudent> {
    // Static parameters, always valid
    let accuracy = Normal::new(ACCURACY_MEAN, ACCURACY_STD_DEV).unwrap();
    let xp_noise = Normal::new(XP_MEAN, XP_STD_DEV).unwrap();
    let streak = Geometric::new(STREAK_CONTINUE_P).unwrap();

    (0..n)
        .map(|i| {
            let total_accuracy = accuracy.sample(rng).clamp(ACCURACY_RANGE.0, ACCURACY_RANGE.1);
            // Geometric here counts failures before the first success;
            // shift to the 1-based trial count the reference uses.
            let streak_days = (streak.sample(rng) + 1).min(u64::from(u32::MAX)) as u32;
            let xp = (xp_noise.sample(rng).abs() + f64::from(streak_days) * XP_PER_STREAK_DAY).floor();

            RawStudent {
                id: format!("student_{}", i + 1),
                name: format!("Student {}", i + 1),
                total_accuracy,
                streak: streak_days,
                xp,
            }
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generates_requested_count() {
        let mut rng = StdRng::seed_from_u64(42);
        let cohort = generate(DEFAULT_COHORT_SIZE, &mut rng);

        assert_eq!(cohort.len(), 500);
        assert_eq!(cohort[0].id, "student_1");
        assert_eq!(cohort[499].id, "student_500");
        assert_eq!(cohort[0].name, "Student 1");
    }

    #[test]
    fn test_values_in_expected_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        for s in generate(1000, &mut rng) {
            assert!((30.0..=100.0).contains(&s.total_accuracy));
            assert!(s.streak >= 1);
            assert!(s.xp >= f64::from(s.streak) * XP_PER_STREAK_DAY - 1.0);
            assert_eq!(s.xp, s.xp.floor());
        }
    }

    #[test]
    fn test_seeded_generation_reproducible() {
        let a = generate(50, &mut StdRng::seed_from_u64(7));
        let b = generate(50, &mut StdRng::seed_from_u64(7));

        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.total_accuracy, y.total_accuracy);
            assert_eq!(x.streak, y.streak);
            assert_eq!(x.xp, y.xp);
        }
    }

    #[test]
    fn test_streaks_mostly_short() {
        let mut rng = StdRng::seed_from_u64(42);
        let cohort = generate(1000, &mut rng);
        let short = cohort.iter().filter(|s| s.streak <= 10).count();

        // Geometric with p = 0.1: ~65% of streaks are 10 days or fewer
        assert!(short > 500, "only {short} short streaks");
    }
}
