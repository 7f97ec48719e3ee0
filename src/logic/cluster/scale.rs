//! Feature standardization
//!
//! Z-score scaling recomputed per cohort. Parameters are never persisted
//! across requests.

use ndarray::{Array2, Axis};

/// Re-scale each column to zero mean and unit variance.
///
/// Uses population variance (divide by n). A zero-variance column keeps a
/// divisor of 1 so a constant feature maps to all zeros instead of NaN.
pub fn standardize(data: &Array2<f64>) -> Array2<f64> {
    let n = data.nrows();
    if n == 0 {
        return data.clone();
    }

    let mut scaled = data.clone();
    for mut column in scaled.axis_iter_mut(Axis(1)) {
        let mean = column.sum() / n as f64;
        let variance = column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
        let std_dev = if variance > 0.0 { variance.sqrt() } else { 1.0 };
        column.mapv_inplace(|v| (v - mean) / std_dev);
    }
    scaled
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_standardized_columns_have_zero_mean_unit_variance() {
        let data = array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0]];
        let scaled = standardize(&data);

        for column in scaled.axis_iter(Axis(1)) {
            let mean = column.sum() / 4.0;
            let variance = column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / 4.0;
            assert!(mean.abs() < 1e-12);
            assert!((variance - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_constant_column_maps_to_zeros() {
        let data = array![[5.0, 1.0], [5.0, 2.0], [5.0, 3.0]];
        let scaled = standardize(&data);

        for v in scaled.column(0).iter() {
            assert_eq!(*v, 0.0);
        }
        assert!(scaled.column(1).iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_scaling_is_deterministic() {
        let data = array![[1.5, -2.0], [0.0, 4.0], [3.25, 1.0]];
        assert_eq!(standardize(&data), standardize(&data));
    }
}
