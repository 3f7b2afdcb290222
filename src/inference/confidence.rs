// Confidence intervals for means and proportions
//
// The critical value is the left-tail quantile at (1 - ci) / 2, which is
// negative. Margins are built from its magnitude so every interval comes back
// ordered as (lower, upper).

use crate::error::{InferenceError, Result};
use crate::inference::conditions::{ConditionCheck, ConditionObserver};
use crate::inference::config::check_confidence;
use crate::inference::distribution::{critical_value, Distribution};
use crate::inference::engine::Inference;
use crate::inference::hypothesis::proportion_denominator;
use crate::inference::sample::{CategoryCounts, GroupSummaries, SummaryStatistics};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed interval `[lower, upper]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    /// Interval `center ± margin`; the sign of `margin` does not matter
    pub fn around(center: f64, margin: f64) -> Self {
        let margin = margin.abs();
        Self {
            lower: center - margin,
            upper: center + margin,
        }
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// Margin of error (half-width)
    pub fn margin(&self) -> f64 {
        self.width() / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

impl fmt::Display for ConfidenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lower, self.upper)
    }
}

impl<O: ConditionObserver> Inference<O> {
    /// t-interval for a single mean: `x_bar ± |t*| * s / sqrt(n)` with `df = n - 1`
    pub fn single_mean_interval(
        &self,
        summary: &SummaryStatistics,
        confidence: f64,
    ) -> Result<ConfidenceInterval> {
        check_confidence(confidence)?;
        let df = summary.degrees_of_freedom();
        if df <= 0.0 {
            return Err(InferenceError::InvalidState(format!(
                "single mean interval needs at least 2 observations (df = {})",
                df
            )));
        }

        let se = summary.standard_error();
        let t_star = critical_value(Distribution::StudentT { df }, confidence)?;
        let margin = t_star * se;

        tracing::debug!(t_star, se, margin, "single mean interval");
        self.check_conditions(ConditionCheck::SingleMean {
            n: summary.count as f64,
        });

        Ok(ConfidenceInterval::around(summary.mean, margin))
    }

    /// `single_mean_interval` on raw observations
    pub fn single_mean_interval_from_observations(
        &self,
        observations: &[f64],
        confidence: f64,
    ) -> Result<ConfidenceInterval> {
        let summary = SummaryStatistics::from_observations(observations)?;
        self.single_mean_interval(&summary, confidence)
    }

    /// Unpooled z-interval for `p1 - p2`
    ///
    /// `SE = sqrt(p1(1-p1)/x1 + p2(1-p2)/x2)` where `x_i` is the count of
    /// category `i` and `p_i = x_i / n`.
    pub fn two_proportions_interval(
        &self,
        counts: &CategoryCounts,
        categories: (&str, &str),
        confidence: f64,
    ) -> Result<ConfidenceInterval> {
        check_confidence(confidence)?;
        let x1 = counts.get(categories.0)?;
        let x2 = counts.get(categories.1)?;
        for (label, count) in [(categories.0, x1), (categories.1, x2)] {
            if count == 0 {
                return Err(InferenceError::DivisionByZero(format!(
                    "category '{}' has zero count",
                    label
                )));
            }
        }
        let n = proportion_denominator(counts, x1, x2, self.config().proportion_denominator)?;

        let (x1, x2) = (x1 as f64, x2 as f64);
        let p1_hat = x1 / n;
        let p2_hat = x2 / n;
        let se = (p1_hat * (1.0 - p1_hat) / x1 + p2_hat * (1.0 - p2_hat) / x2).sqrt();
        let z_star = critical_value(Distribution::Normal, confidence)?;
        let margin = z_star * se;

        tracing::debug!(z_star, se, margin, "two proportions interval");
        self.check_conditions(ConditionCheck::TwoProportions {
            x1: (x1, p1_hat),
            x2: (x2, p2_hat),
        });

        Ok(ConfidenceInterval::around(p1_hat - p2_hat, margin))
    }

    /// Not available; always `NotImplemented`
    pub fn single_proportion_interval(
        &self,
        _counts: &CategoryCounts,
        _category: &str,
        _confidence: f64,
    ) -> Result<ConfidenceInterval> {
        Err(InferenceError::NotImplemented("single_proportion_interval"))
    }

    /// Not available; always `NotImplemented`
    pub fn two_means_interval(
        &self,
        _summaries: &GroupSummaries,
        _groups: (&str, &str),
        _confidence: f64,
    ) -> Result<ConfidenceInterval> {
        Err(InferenceError::NotImplemented("two_means_interval"))
    }
}
