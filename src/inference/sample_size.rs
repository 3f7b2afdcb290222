// Minimum sample sizes for a target margin of error
//
// These run before any data exists, so there is nothing to condition-check.

use crate::error::{InferenceError, Result};
use crate::inference::distribution::{critical_value, Distribution};

fn check_margin(margin: f64) -> Result<()> {
    if margin.is_finite() && margin > 0.0 {
        Ok(())
    } else {
        Err(InferenceError::InvalidArgument(format!(
            "margin of error must be positive and finite, got {}",
            margin
        )))
    }
}

/// Rounds up to a whole count; a requirement past `u64::MAX` has no meaningful answer
fn ceil_to_count(n: f64) -> Result<u64> {
    let n = n.ceil().max(0.0);
    if !n.is_finite() || n >= u64::MAX as f64 {
        return Err(InferenceError::InvalidArgument(format!(
            "required sample size {} exceeds the representable range",
            n
        )));
    }
    Ok(n as u64)
}

/// Sample size to estimate a single proportion: `ceil((z*/margin)^2 * p(1-p))`
///
/// `p_tilde` is a prior guess; 0.5 gives the most conservative answer.
///
/// # Example
/// ```
/// use dsstats::inference::single_proportion_sample_size;
///
/// assert_eq!(single_proportion_sample_size(0.5, 0.02, 0.90).unwrap(), 1691);
/// ```
pub fn single_proportion_sample_size(p_tilde: f64, margin: f64, confidence: f64) -> Result<u64> {
    if !(0.0..=1.0).contains(&p_tilde) {
        return Err(InferenceError::InvalidArgument(format!(
            "p_tilde must be in [0, 1], got {}",
            p_tilde
        )));
    }
    check_margin(margin)?;

    let z_star = critical_value(Distribution::Normal, confidence)?;
    let n = (z_star / margin).powi(2) * p_tilde * (1.0 - p_tilde);
    tracing::debug!(z_star, n, "single proportion sample size");
    ceil_to_count(n)
}

/// Sample size to estimate a single mean: `ceil((z* * sigma / margin)^2)`
pub fn single_mean_sample_size(sigma_tilde: f64, margin: f64, confidence: f64) -> Result<u64> {
    if !sigma_tilde.is_finite() || sigma_tilde < 0.0 {
        return Err(InferenceError::InvalidArgument(format!(
            "sigma_tilde must be finite and >= 0, got {}",
            sigma_tilde
        )));
    }
    check_margin(margin)?;

    let z_star = critical_value(Distribution::Normal, confidence)?;
    let n = (z_star * sigma_tilde / margin).powi(2);
    tracing::debug!(z_star, n, "single mean sample size");
    ceil_to_count(n)
}
