// Configuration for the inference engine
//
// Every default used anywhere in the crate lives here as a named constant so
// callers (and the CLI's --config file) can audit and override them in one place.

use crate::error::{InferenceError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default confidence level for intervals and sample-size estimates
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Default target margin of error for sample-size estimates
pub const DEFAULT_MARGIN_OF_ERROR: f64 = 0.05;

/// Default guess for an unknown proportion (maximizes p(1-p))
pub const DEFAULT_PROPORTION_GUESS: f64 = 0.5;

/// How degrees of freedom are derived for the two-means t-test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DfMethod {
    /// `min(n1 - 1, n2 - 1)`, the conservative textbook choice
    #[default]
    PooledMinimum,
    /// Welch-Satterthwaite effective degrees of freedom
    Satterthwaite,
}

/// Which arithmetic to use where the historical formulas are suspect
///
/// `Legacy` reproduces two historical formulas verbatim:
/// - single proportion: `z = p_hat - p_0 / SE` (operator precedence slip)
/// - Satterthwaite df: first group's variance term used twice in the numerator
///
/// `Corrected` uses `z = (p_hat - p_0) / SE` and the textbook Welch-Satterthwaite sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormulaMode {
    #[default]
    Corrected,
    Legacy,
}

/// Denominator for `p_hat1`/`p_hat2` when a count sample has more than two categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProportionDenominator {
    /// Sum over every category in the sample (the toolkit's historical behavior)
    #[default]
    AllCategories,
    /// Sum of only the two compared categories
    NamedPair,
}

/// Configuration for the inference engine
///
/// # Example
/// ```
/// use dsstats::inference::InferenceConfig;
///
/// let config = InferenceConfig::default();
/// assert_eq!(config.confidence_level, 0.95);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Confidence level used when a caller does not pass one explicitly
    pub confidence_level: f64,

    /// Target margin of error for sample-size estimates
    pub margin_of_error: f64,

    /// Prior guess of the proportion for sample-size estimates
    pub proportion_guess: f64,

    /// Degrees-of-freedom method for the two-means test
    pub df_method: DfMethod,

    pub formulas: FormulaMode,

    pub proportion_denominator: ProportionDenominator,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            margin_of_error: DEFAULT_MARGIN_OF_ERROR,
            proportion_guess: DEFAULT_PROPORTION_GUESS,
            df_method: DfMethod::PooledMinimum,
            formulas: FormulaMode::Corrected,
            proportion_denominator: ProportionDenominator::AllCategories,
        }
    }
}

impl InferenceConfig {
    /// Reproduce historical results, suspect formulas included
    pub fn legacy() -> Self {
        Self {
            formulas: FormulaMode::Legacy,
            ..Self::default()
        }
    }

    /// Parse a configuration from TOML text; missing keys take their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        check_confidence(self.confidence_level)?;

        if self.margin_of_error.is_nan() || self.margin_of_error <= 0.0 {
            return Err(InferenceError::InvalidArgument(format!(
                "margin_of_error must be positive, got {}",
                self.margin_of_error
            )));
        }

        if !(0.0..=1.0).contains(&self.proportion_guess) {
            return Err(InferenceError::InvalidArgument(format!(
                "proportion_guess must be in [0, 1], got {}",
                self.proportion_guess
            )));
        }

        Ok(())
    }
}

/// Reject confidence levels outside the open interval (0, 1)
pub(crate) fn check_confidence(confidence: f64) -> Result<()> {
    if confidence > 0.0 && confidence < 1.0 {
        Ok(())
    } else {
        Err(InferenceError::InvalidArgument(format!(
            "confidence level must be in (0, 1), got {}",
            confidence
        )))
    }
}
