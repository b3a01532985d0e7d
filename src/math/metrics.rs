use crate::error::{Error, Result};

/// Mean squared error, `mean((p_i − t_i)²)`.
///
/// A length mismatch between predictions and targets is a configuration
/// error; it aborts the computation instead of truncating to the shorter
/// slice.
pub fn mean_squared_error(predictions: &[f64], targets: &[f64]) -> Result<f64> {
    check_lengths(predictions, targets)?;
    let sum: f64 = predictions
        .iter()
        .zip(targets.iter())
        .map(|(p, t)| (p - t).powi(2))
        .sum();
    Ok(sum / predictions.len() as f64)
}

pub fn root_mean_squared_error(predictions: &[f64], targets: &[f64]) -> Result<f64> {
    Ok(mean_squared_error(predictions, targets)?.sqrt())
}

pub fn mean_absolute_error(predictions: &[f64], targets: &[f64]) -> Result<f64> {
    check_lengths(predictions, targets)?;
    let sum: f64 = predictions
        .iter()
        .zip(targets.iter())
        .map(|(p, t)| (p - t).abs())
        .sum();
    Ok(sum / predictions.len() as f64)
}

/// Fraction of predictions falling on the same side of `threshold` as their
/// target. Binary-classification accuracy for real-valued outputs.
pub fn accuracy_threshold(predictions: &[f64], targets: &[f64], threshold: f64) -> Result<f64> {
    check_lengths(predictions, targets)?;
    let correct = predictions
        .iter()
        .zip(targets.iter())
        .filter(|(p, t)| (**p >= threshold) == (**t >= threshold))
        .count();
    Ok(correct as f64 / predictions.len() as f64)
}

fn check_lengths(predictions: &[f64], targets: &[f64]) -> Result<()> {
    if predictions.len() != targets.len() {
        return Err(Error::DimensionMismatch {
            expected: predictions.len(),
            actual: targets.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn mse_single_sample_is_squared_error() {
        let loss = mean_squared_error(&[0.8], &[1.0]).unwrap();
        assert_abs_diff_eq!(loss, 0.2 * 0.2, epsilon = 1e-12);
    }

    #[test]
    fn mse_batch_is_mean_of_squared_errors() {
        let loss = mean_squared_error(&[1.0, 0.0, 0.5], &[0.0, 0.0, 0.5]).unwrap();
        assert_abs_diff_eq!(loss, 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn mse_rejects_length_mismatch() {
        let result = mean_squared_error(&[1.0, 2.0], &[1.0]);
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn rmse_is_sqrt_of_mse() {
        let rmse = root_mean_squared_error(&[2.0, 2.0], &[0.0, 0.0]).unwrap();
        assert_abs_diff_eq!(rmse, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn mae_averages_absolute_errors() {
        let mae = mean_absolute_error(&[1.0, -1.0], &[0.0, 0.0]).unwrap();
        assert_abs_diff_eq!(mae, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn threshold_accuracy_counts_matching_sides() {
        let acc = accuracy_threshold(&[0.9, 0.2, 0.6, 0.4], &[1.0, 0.0, 0.0, 1.0], 0.5).unwrap();
        assert_abs_diff_eq!(acc, 0.5);
    }
}
