// Inference context: configuration + condition observer
//
// The hypothesis-test and confidence-interval routines are methods on
// `Inference` (see hypothesis.rs and confidence.rs) so that every call shares
// one validated configuration and one warning sink without global state.

use crate::error::Result;
use crate::inference::conditions::{ConditionCheck, ConditionObserver, TracingObserver};
use crate::inference::config::InferenceConfig;
use crate::inference::sample_size::{single_mean_sample_size, single_proportion_sample_size};

/// Inference engine bound to a configuration and a condition observer
///
/// # Example
/// ```
/// use dsstats::inference::{Alternative, Inference, InferenceConfig, SummaryStatistics};
///
/// let engine = Inference::new(InferenceConfig::default()).unwrap();
/// let summary = SummaryStatistics::new(40, 50.5, 5.0).unwrap();
/// let result = engine.single_mean_test(&summary, 50.0, Alternative::Greater).unwrap();
/// assert!((result.statistic - 0.632).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct Inference<O = TracingObserver> {
    config: InferenceConfig,
    observer: O,
}

impl Inference<TracingObserver> {
    /// Engine that reports condition warnings through `tracing`
    pub fn new(config: InferenceConfig) -> Result<Self> {
        Self::with_observer(config, TracingObserver)
    }
}

impl Default for Inference<TracingObserver> {
    fn default() -> Self {
        Self {
            config: InferenceConfig::default(),
            observer: TracingObserver,
        }
    }
}

impl<O: ConditionObserver> Inference<O> {
    /// Engine with a caller-supplied observer (e.g. `&RecordingObserver` in tests)
    pub fn with_observer(config: InferenceConfig, observer: O) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, observer })
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub(crate) fn check_conditions(&self, check: ConditionCheck) {
        crate::inference::conditions::validate(&check, &self.observer);
    }

    /// Minimum n to estimate a proportion, using the configured defaults for
    /// anything not supplied
    pub fn proportion_sample_size(
        &self,
        p_tilde: Option<f64>,
        margin: Option<f64>,
        confidence: Option<f64>,
    ) -> Result<u64> {
        single_proportion_sample_size(
            p_tilde.unwrap_or(self.config.proportion_guess),
            margin.unwrap_or(self.config.margin_of_error),
            confidence.unwrap_or(self.config.confidence_level),
        )
    }

    /// Minimum n to estimate a mean given a guess of the population std
    pub fn mean_sample_size(
        &self,
        sigma_tilde: f64,
        margin: Option<f64>,
        confidence: Option<f64>,
    ) -> Result<u64> {
        single_mean_sample_size(
            sigma_tilde,
            margin.unwrap_or(self.config.margin_of_error),
            confidence.unwrap_or(self.config.confidence_level),
        )
    }
}
