// Hypothesis tests for means and proportions
//
// Each test computes a standardized statistic, reports any violated
// large-sample condition to the engine's observer, then converts the
// statistic into a p-value with the reference distribution.

use crate::error::{InferenceError, Result};
use crate::inference::conditions::{ConditionCheck, ConditionObserver};
use crate::inference::config::{DfMethod, FormulaMode, ProportionDenominator};
use crate::inference::distribution::{p_value, Alternative, Distribution};
use crate::inference::engine::Inference;
use crate::inference::sample::{CategoryCounts, GroupSummaries, SummaryStatistics};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the test statistic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatisticKind {
    /// Student-t statistic (mean tests)
    T,
    /// Standard normal statistic (proportion tests)
    Z,
}

impl fmt::Display for StatisticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatisticKind::T => f.write_str("t"),
            StatisticKind::Z => f.write_str("z"),
        }
    }
}

/// Result of a hypothesis test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub kind: StatisticKind,

    /// Value of the test statistic
    pub statistic: f64,

    /// Tail probability under the null hypothesis
    ///
    /// - p < alpha: reject H0 in favour of the alternative
    /// - p >= alpha: not enough evidence
    #[serde(rename = "p-value")]
    pub p_value: f64,

    /// Reference distribution used (carries df for t tests)
    pub distribution: Distribution,

    pub alternative: Alternative,
}

impl TestResult {
    /// Degrees of freedom, for t-based results
    pub fn df(&self) -> Option<f64> {
        match self.distribution {
            Distribution::StudentT { df } => Some(df),
            Distribution::Normal => None,
        }
    }

    /// Whether the null hypothesis is rejected at significance level `alpha`
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {:.4}, p-value = {:.4}",
            self.kind, self.statistic, self.p_value
        )
    }
}

fn require_positive_df(df: f64, what: &str) -> Result<f64> {
    if df.is_finite() && df > 0.0 {
        Ok(df)
    } else {
        Err(InferenceError::InvalidState(format!(
            "{} has non-positive degrees of freedom ({})",
            what, df
        )))
    }
}

fn require_nonzero_se(se: f64, what: &str) -> Result<f64> {
    if se > 0.0 && se.is_finite() {
        Ok(se)
    } else {
        Err(InferenceError::DivisionByZero(format!(
            "{} has zero standard error",
            what
        )))
    }
}

/// Welch-Satterthwaite degrees of freedom from the per-group `s^2 / n` terms
fn satterthwaite_df(a: f64, b: f64, n1: f64, n2: f64, formulas: FormulaMode) -> f64 {
    let numerator = match formulas {
        FormulaMode::Corrected => (a + b).powi(2),
        // Historical formula: first group's term counted twice
        FormulaMode::Legacy => (a + a).powi(2),
    };
    numerator / (a.powi(2) / (n1 - 1.0) + b.powi(2) / (n2 - 1.0))
}

/// Denominator for proportions of `x1`/`x2` drawn from `counts`
pub(crate) fn proportion_denominator(
    counts: &CategoryCounts,
    x1: u64,
    x2: u64,
    mode: ProportionDenominator,
) -> Result<f64> {
    let n = match mode {
        ProportionDenominator::AllCategories => counts.total(),
        ProportionDenominator::NamedPair => x1 + x2,
    };
    if n == 0 {
        return Err(InferenceError::DivisionByZero(
            "sample total count is zero".to_string(),
        ));
    }
    Ok(n as f64)
}

impl<O: ConditionObserver> Inference<O> {
    /// One-sample t-test of H0: mu = `mu_0`
    ///
    /// `SE = s / sqrt(n)`, `t = (x_bar - mu_0) / SE`, `df = n - 1`.
    pub fn single_mean_test(
        &self,
        summary: &SummaryStatistics,
        mu_0: f64,
        alternative: Alternative,
    ) -> Result<TestResult> {
        let df = require_positive_df(summary.degrees_of_freedom(), "single mean test")?;
        let se = require_nonzero_se(summary.standard_error(), "single mean test")?;
        let t = (summary.mean - mu_0) / se;

        tracing::debug!(t, df, se, "single mean test");
        self.check_conditions(ConditionCheck::SingleMean {
            n: summary.count as f64,
        });

        let distribution = Distribution::StudentT { df };
        Ok(TestResult {
            kind: StatisticKind::T,
            statistic: t,
            p_value: p_value(t, distribution, alternative)?,
            distribution,
            alternative,
        })
    }

    /// `single_mean_test` on raw observations
    pub fn single_mean_test_from_observations(
        &self,
        observations: &[f64],
        mu_0: f64,
        alternative: Alternative,
    ) -> Result<TestResult> {
        let summary = SummaryStatistics::from_observations(observations)?;
        self.single_mean_test(&summary, mu_0, alternative)
    }

    /// One-proportion z-test of H0: p = `p_0` for `category`
    ///
    /// `n` is the total over all categories, `p_hat = count[category] / n`,
    /// `SE = sqrt(p_0 (1 - p_0) / n)`. The statistic follows the configured
    /// `FormulaMode`.
    pub fn single_proportion_test(
        &self,
        counts: &CategoryCounts,
        category: &str,
        p_0: f64,
        alternative: Alternative,
    ) -> Result<TestResult> {
        if !(0.0..=1.0).contains(&p_0) {
            return Err(InferenceError::InvalidArgument(format!(
                "p_0 must be in [0, 1], got {}",
                p_0
            )));
        }
        let x = counts.get(category)?;
        let n = counts.total();
        if n == 0 {
            return Err(InferenceError::DivisionByZero(
                "sample total count is zero".to_string(),
            ));
        }
        let n = n as f64;
        let p_hat = x as f64 / n;
        let se = require_nonzero_se((p_0 * (1.0 - p_0) / n).sqrt(), "single proportion test")?;

        let z = match self.config().formulas {
            FormulaMode::Corrected => (p_hat - p_0) / se,
            FormulaMode::Legacy => p_hat - p_0 / se,
        };

        tracing::debug!(z, p_hat, se, "single proportion test");
        self.check_conditions(ConditionCheck::SingleProportion { n, p: p_hat });

        Ok(TestResult {
            kind: StatisticKind::Z,
            statistic: z,
            p_value: p_value(z, Distribution::Normal, alternative)?,
            distribution: Distribution::Normal,
            alternative,
        })
    }

    /// Two-sample t-test of H0: mu1 - mu2 = 0 from group summaries
    ///
    /// `SE = sqrt(s1^2/n1 + s2^2/n2)`, `t = (x_bar1 - x_bar2) / SE`; degrees
    /// of freedom per `df_method`.
    pub fn two_mean_test(
        &self,
        summaries: &GroupSummaries,
        groups: (&str, &str),
        alternative: Alternative,
        df_method: DfMethod,
    ) -> Result<TestResult> {
        let first = summaries.get(groups.0)?;
        let second = summaries.get(groups.1)?;
        let (n1, n2) = (first.count as f64, second.count as f64);

        let a = first.variance() / n1;
        let b = second.variance() / n2;
        let se = require_nonzero_se((a + b).sqrt(), "two mean test")?;
        let t = (first.mean - second.mean) / se;

        let df = match df_method {
            DfMethod::PooledMinimum => (n1 - 1.0).min(n2 - 1.0),
            DfMethod::Satterthwaite => {
                if n1 < 2.0 || n2 < 2.0 {
                    return Err(InferenceError::InvalidState(format!(
                        "Satterthwaite approximation needs at least 2 observations per group (n1={}, n2={})",
                        n1, n2
                    )));
                }
                satterthwaite_df(a, b, n1, n2, self.config().formulas)
            }
        };
        let df = require_positive_df(df, "two mean test")?;

        tracing::debug!(t, df, se, ?df_method, "two mean test");
        self.check_conditions(ConditionCheck::TwoMeans { n1, n2 });

        let distribution = Distribution::StudentT { df };
        Ok(TestResult {
            kind: StatisticKind::T,
            statistic: t,
            p_value: p_value(t, distribution, alternative)?,
            distribution,
            alternative,
        })
    }

    /// Two-proportion z-test of H0: p1 - p2 = 0 with a pooled proportion
    ///
    /// `p_hat_i = count[cat_i] / n` with `n` per the configured
    /// `ProportionDenominator`; `p_bar = (x1 + x2) / (2n)`,
    /// `SE = sqrt(2 p_bar (1 - p_bar) / n)`.
    pub fn two_proportions_test(
        &self,
        counts: &CategoryCounts,
        categories: (&str, &str),
        alternative: Alternative,
    ) -> Result<TestResult> {
        let x1 = counts.get(categories.0)?;
        let x2 = counts.get(categories.1)?;
        let n = proportion_denominator(counts, x1, x2, self.config().proportion_denominator)?;

        let (x1, x2) = (x1 as f64, x2 as f64);
        let p1_hat = x1 / n;
        let p2_hat = x2 / n;
        let p_bar = (x1 + x2) / (2.0 * n);
        let se = require_nonzero_se(
            (2.0 * p_bar * (1.0 - p_bar) / n).sqrt(),
            "two proportions test",
        )?;
        let z = (p1_hat - p2_hat) / se;

        tracing::debug!(z, p1_hat, p2_hat, p_bar, se, "two proportions test");
        self.check_conditions(ConditionCheck::TwoProportions {
            x1: (x1, p1_hat),
            x2: (x2, p2_hat),
        });

        Ok(TestResult {
            kind: StatisticKind::Z,
            statistic: z,
            p_value: p_value(z, Distribution::Normal, alternative)?,
            distribution: Distribution::Normal,
            alternative,
        })
    }
}
