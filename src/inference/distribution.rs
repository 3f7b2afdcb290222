// Reference distributions and tail probabilities
//
// Converts a standardized statistic into a p-value for a chosen alternative
// hypothesis, and provides the critical values used by the interval and
// sample-size routines. CDF / inverse CDF come from statrs.

use crate::error::{InferenceError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};
use std::fmt;
use std::str::FromStr;

/// Direction of the alternative hypothesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Alternative {
    /// H_a: parameter < null value (left tail)
    Less,
    /// H_a: parameter > null value (right tail)
    Greater,
    /// H_a: parameter != null value (both tails)
    TwoSided,
}

impl Alternative {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alternative::Less => "less",
            Alternative::Greater => "greater",
            Alternative::TwoSided => "two-sided",
        }
    }
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Alternative {
    type Err = InferenceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "less" => Ok(Alternative::Less),
            "greater" => Ok(Alternative::Greater),
            "two-sided" => Ok(Alternative::TwoSided),
            other => Err(InferenceError::InvalidArgument(format!(
                "alternative must be 'less', 'greater' or 'two-sided', got '{}'",
                other
            ))),
        }
    }
}

/// Reference distribution of a test statistic under the null hypothesis
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "kebab-case")]
pub enum Distribution {
    /// Standard normal N(0, 1)
    #[default]
    Normal,
    /// Student's t with `df` degrees of freedom (must be > 0)
    StudentT { df: f64 },
}

impl Distribution {
    /// Cumulative distribution function P(X <= x)
    pub fn cdf(&self, x: f64) -> Result<f64> {
        match self {
            Distribution::Normal => Ok(standard_normal()?.cdf(x)),
            Distribution::StudentT { df } => Ok(students_t(*df)?.cdf(x)),
        }
    }

    /// Quantile function (inverse CDF) at probability `p`
    pub fn inverse_cdf(&self, p: f64) -> Result<f64> {
        if p.is_nan() || p <= 0.0 || p >= 1.0 {
            return Err(InferenceError::InvalidArgument(format!(
                "quantile probability must be in (0, 1), got {}",
                p
            )));
        }
        match self {
            Distribution::Normal => Ok(standard_normal()?.inverse_cdf(p)),
            Distribution::StudentT { df } => Ok(students_t(*df)?.inverse_cdf(p)),
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distribution::Normal => f.write_str("normal"),
            Distribution::StudentT { df } => write!(f, "t(df={:.2})", df),
        }
    }
}

fn standard_normal() -> Result<Normal> {
    Normal::new(0.0, 1.0).map_err(|e| InferenceError::InvalidArgument(e.to_string()))
}

fn students_t(df: f64) -> Result<StudentsT> {
    if df.is_nan() || df <= 0.0 || df.is_infinite() {
        return Err(InferenceError::InvalidArgument(format!(
            "t distribution requires finite df > 0, got {}",
            df
        )));
    }
    StudentsT::new(0.0, 1.0, df).map_err(|e| InferenceError::InvalidArgument(e.to_string()))
}

/// Tail probability of `statistic` under `distribution` for the given alternative
///
/// - `Less`: `CDF(statistic)`
/// - `Greater`: `1 - CDF(statistic)`
/// - `TwoSided`: `min(2 * CDF(-|statistic|), 1)`
///
/// # Example
/// ```
/// use dsstats::inference::{p_value, Alternative, Distribution};
///
/// let p = p_value(1.96, Distribution::Normal, Alternative::TwoSided).unwrap();
/// assert!((p - 0.05).abs() < 1e-3);
/// ```
pub fn p_value(
    statistic: f64,
    distribution: Distribution,
    alternative: Alternative,
) -> Result<f64> {
    if statistic.is_nan() {
        return Err(InferenceError::InvalidArgument(
            "test statistic is NaN".to_string(),
        ));
    }
    let p = match alternative {
        Alternative::Less => distribution.cdf(statistic)?,
        Alternative::Greater => 1.0 - distribution.cdf(statistic)?,
        Alternative::TwoSided => (2.0 * distribution.cdf(-statistic.abs())?).min(1.0),
    };
    Ok(p)
}

/// Left-tail critical value for a confidence level: quantile at `(1 - confidence) / 2`
///
/// The result is negative for any confidence in (0, 1); callers take its
/// magnitude when building a margin of error.
pub fn critical_value(distribution: Distribution, confidence: f64) -> Result<f64> {
    crate::inference::config::check_confidence(confidence)?;
    distribution.inverse_cdf((1.0 - confidence) / 2.0)
}
