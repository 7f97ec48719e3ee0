//! Feature Deriver
//!
//! Pure mapping from raw per-student counters to the two engineered
//! metrics. No state, no randomness, no failure modes: both metrics are
//! deterministic functions of (total_accuracy, streak, xp).

use super::types::{EngineeredStudent, RawStudent};

/// Streak length treated as full consistency when normalizing.
const STREAK_SATURATION: f64 = 30.0;

/// Weight of accuracy vs normalized streak in the retention rate.
const ACCURACY_WEIGHT: f64 = 0.7;
const STREAK_WEIGHT: f64 = 0.3;

/// Rating baseline and scale factors.
const RATING_BASE: f64 = 800.0;
const RATING_ACCURACY_SCALE: f64 = 10.0;
const RATING_XP_DIVISOR: f64 = 100.0;

/// Extend every raw record with retention_rate and rating, preserving
/// order and identity.
pub fn derive_metrics(raw: Vec<RawStudent>) -> Vec<EngineeredStudent> {
    raw.into_iter()
        .map(|student| {
            let retention_rate = retention_rate(student.total_accuracy, student.streak);
            let rating = rating(student.total_accuracy, student.xp);
            EngineeredStudent {
                student,
                retention_rate,
                rating,
            }
        })
        .collect()
}

/// Weighted combination of accuracy and normalized streak.
///
/// The streak term saturates at `STREAK_SATURATION`, so the result stays
/// in [0, 100] whenever accuracy does.
pub fn retention_rate(total_accuracy: f64, streak: u32) -> f64 {
    let streak_norm = (f64::from(streak) / STREAK_SATURATION).clamp(0.0, 1.0) * 100.0;
    total_accuracy * ACCURACY_WEIGHT + streak_norm * STREAK_WEIGHT
}

/// Elo-like rating from accuracy and experience, truncated to an integer.
pub fn rating(total_accuracy: f64, xp: f64) -> i64 {
    (RATING_BASE + (total_accuracy - 50.0) * RATING_ACCURACY_SCALE + xp / RATING_XP_DIVISOR).floor()
        as i64
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(total_accuracy: f64, streak: u32, xp: f64) -> RawStudent {
        RawStudent {
            id: "s1".to_string(),
            name: "Student 1".to_string(),
            total_accuracy,
            streak,
            xp,
        }
    }

    #[test]
    fn test_high_performer_metrics() {
        // accuracy 90, streak 30 (saturated), xp 2000
        assert_eq!(retention_rate(90.0, 30), 0.7 * 90.0 + 0.3 * 100.0);
        assert_eq!(retention_rate(90.0, 30), 93.0);
        assert_eq!(rating(90.0, 2000.0), 1220);
    }

    #[test]
    fn test_struggling_student_metrics() {
        assert_eq!(retention_rate(40.0, 0), 28.0);
        assert_eq!(rating(40.0, 0.0), 700);
    }

    #[test]
    fn test_streak_term_saturates() {
        // Beyond 30 the streak contributes nothing extra.
        assert_eq!(retention_rate(50.0, 30), retention_rate(50.0, 300));
    }

    #[test]
    fn test_retention_rate_bounded() {
        for accuracy in [0.0, 12.5, 50.0, 99.9, 100.0] {
            for streak in [0u32, 1, 15, 30, 1000] {
                let r = retention_rate(accuracy, streak);
                assert!((0.0..=100.0).contains(&r), "retention {} out of range", r);
            }
        }
    }

    #[test]
    fn test_rating_truncates_toward_negative_infinity() {
        // 800 + 10*(-50) + 0.5 = 300.5 -> 300
        assert_eq!(rating(0.0, 50.0), 300);
    }

    #[test]
    fn test_derive_is_deterministic_and_order_preserving() {
        let cohort = vec![raw(90.0, 30, 2000.0), raw(40.0, 0, 0.0), raw(75.0, 5, 900.0)];
        let a = derive_metrics(cohort.clone());
        let b = derive_metrics(cohort);

        assert_eq!(a.len(), 3);
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.student.id, y.student.id);
            assert_eq!(x.retention_rate, y.retention_rate);
            assert_eq!(x.rating, y.rating);
        }
        assert_eq!(a[0].rating, 1220);
        assert_eq!(a[1].retention_rate, 28.0);
    }
}
