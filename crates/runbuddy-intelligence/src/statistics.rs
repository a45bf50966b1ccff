// ABOUTME: Descriptive statistics used by the pace and heart-rate aggregators
// ABOUTME: Mean, sample standard deviation, and coefficient of variation with degenerate-case guards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: observation counts stay far below 2^52

/// Arithmetic mean, `None` for an empty slice
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean of integer heart-rate observations, `None` when no sensor data exists
#[must_use]
pub fn mean_u32(values: &[u32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    Some(sum as f64 / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator), `None` below two values
#[must_use]
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values)?;
    let squared: f64 = values.iter().map(|v| (v - avg).powi(2)).sum();
    Some((squared / (values.len() - 1) as f64).sqrt())
}

/// Coefficient of variation (sample stddev / mean)
///
/// Defined as 0 when fewer than two values exist or when the mean is 0.
#[must_use]
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let (Some(std_dev), Some(avg)) = (sample_std_dev(values), mean(values)) else {
        return 0.0;
    };
    if avg == 0.0 {
        return 0.0;
    }
    std_dev / avg
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cv_constant_values() {
        assert!(coefficient_of_variation(&[5.0, 5.0, 5.0]).abs() < 1e-12);
    }

    #[test]
    fn test_cv_two_values() {
        let cv = coefficient_of_variation(&[5.0, 6.0]);
        // 0.707_107 / 5.5
        assert!((cv - 0.128_565).abs() < 1e-5);
        let std_dev = sample_std_dev(&[5.0, 6.0]).unwrap();
        assert!((std_dev - 0.707_107).abs() < 1e-5);
    }

    #[test]
    fn test_cv_degenerate_cases() {
        assert!(coefficient_of_variation(&[]).abs() < f64::EPSILON);
        assert!(coefficient_of_variation(&[4.2]).abs() < f64::EPSILON);
        assert!(coefficient_of_variation(&[0.0, 0.0]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mean_u32() {
        assert_eq!(mean_u32(&[]), None);
        assert!((mean_u32(&[150, 151]).unwrap() - 150.5).abs() < f64::EPSILON);
    }
}
