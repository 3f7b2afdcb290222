// Large-sample condition checks for theoretical sampling distributions
//
// Each test/interval family relies on a normal (or t) approximation that is
// only trustworthy above certain sample sizes. Violations never stop a
// computation: they produce a ConditionWarning delivered to a ConditionObserver.
//
// Thresholds:
// - single mean:       n >= 30
// - single proportion: n*p >= 10 and n*(1-p) >= 10
// - two means:         n1 >= 30 and n2 >= 30
// - two proportions:   n*p >= 10 and n*(1-p) >= 10 for both groups

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;

/// Minimum sample size per group for mean-based procedures
pub const MIN_MEAN_SAMPLE_SIZE: f64 = 30.0;

/// Minimum expected successes / failures for proportion-based procedures
pub const MIN_EXPECTED_COUNT: f64 = 10.0;

const PREAMBLE: &str = "Conditions for theoretical sampling distributions not met:";

/// Inference family whose approximation conditions are being checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InferenceKind {
    SingleMean,
    SingleProportion,
    TwoMeans,
    TwoProportions,
}

impl fmt::Display for InferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InferenceKind::SingleMean => "single-mean",
            InferenceKind::SingleProportion => "single-proportion",
            InferenceKind::TwoMeans => "two-means",
            InferenceKind::TwoProportions => "two-proportions",
        };
        f.write_str(name)
    }
}

/// Family-specific inputs to a condition check
///
/// Sample sizes are `f64` because they are multiplied by proportions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConditionCheck {
    SingleMean { n: f64 },
    SingleProportion { n: f64, p: f64 },
    TwoMeans { n1: f64, n2: f64 },
    /// `(n, p_hat)` for each group
    TwoProportions { x1: (f64, f64), x2: (f64, f64) },
}

/// Advisory emitted when an approximation condition is violated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionWarning {
    pub kind: InferenceKind,
    pub message: String,
}

impl fmt::Display for ConditionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl ConditionCheck {
    pub fn kind(&self) -> InferenceKind {
        match self {
            ConditionCheck::SingleMean { .. } => InferenceKind::SingleMean,
            ConditionCheck::SingleProportion { .. } => InferenceKind::SingleProportion,
            ConditionCheck::TwoMeans { .. } => InferenceKind::TwoMeans,
            ConditionCheck::TwoProportions { .. } => InferenceKind::TwoProportions,
        }
    }

    /// Evaluate the check without emitting anything
    ///
    /// Returns `Some(warning)` iff a threshold is violated. The message carries
    /// the offending values: sample sizes with no decimals, proportions and
    /// products with two.
    pub fn evaluate(&self) -> Option<ConditionWarning> {
        let message = match *self {
            ConditionCheck::SingleMean { n } => {
                if n >= MIN_MEAN_SAMPLE_SIZE {
                    return None;
                }
                format!(
                    "{} Sample size n={:.0} is less than {:.0}.",
                    PREAMBLE, n, MIN_MEAN_SAMPLE_SIZE
                )
            }
            ConditionCheck::SingleProportion { n, p } => {
                if !proportion_short(n, p) {
                    return None;
                }
                format!(
                    "{} n*p and n*(1-p) must be at least {:.0}. Sample values: {}",
                    PREAMBLE,
                    MIN_EXPECTED_COUNT,
                    expected_counts("n", "p", n, p)
                )
            }
            ConditionCheck::TwoMeans { n1, n2 } => {
                if n1 >= MIN_MEAN_SAMPLE_SIZE && n2 >= MIN_MEAN_SAMPLE_SIZE {
                    return None;
                }
                format!(
                    "{} For each group n must be at least {:.0}. Sample size n1={:.0}, and sample size n2={:.0}",
                    PREAMBLE, MIN_MEAN_SAMPLE_SIZE, n1, n2
                )
            }
            ConditionCheck::TwoProportions {
                x1: (n1, p1),
                x2: (n2, p2),
            } => {
                if !proportion_short(n1, p1) && !proportion_short(n2, p2) {
                    return None;
                }
                format!(
                    "{} For each group n*p and n*(1-p) must be at least {:.0}. Sample values: {}; {}",
                    PREAMBLE,
                    MIN_EXPECTED_COUNT,
                    expected_counts("n1", "p1", n1, p1),
                    expected_counts("n2", "p2", n2, p2)
                )
            }
        };

        Some(ConditionWarning {
            kind: self.kind(),
            message,
        })
    }
}

fn proportion_short(n: f64, p: f64) -> bool {
    n * p < MIN_EXPECTED_COUNT || n * (1.0 - p) < MIN_EXPECTED_COUNT
}

fn expected_counts(n_name: &str, p_name: &str, n: f64, p: f64) -> String {
    format!(
        "{n_name}*{p_name}={n:.0}*{p:.2}={np:.2}, {n_name}*(1-{p_name})={n:.0}*{q:.2}={nq:.2}",
        np = n * p,
        q = 1.0 - p,
        nq = n * (1.0 - p),
    )
}

/// Sink for condition warnings
///
/// Implementations must not fail; the validator has no error path.
pub trait ConditionObserver {
    fn condition_not_met(&self, warning: &ConditionWarning);
}

impl<T: ConditionObserver + ?Sized> ConditionObserver for &T {
    fn condition_not_met(&self, warning: &ConditionWarning) {
        (**self).condition_not_met(warning)
    }
}

/// Default observer: forwards warnings to `tracing` at WARN level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ConditionObserver for TracingObserver {
    fn condition_not_met(&self, warning: &ConditionWarning) {
        tracing::warn!(kind = %warning.kind, "{}", warning.message);
    }
}

/// Observer that keeps every warning in memory
#[derive(Debug, Default)]
pub struct RecordingObserver {
    warnings: Mutex<Vec<ConditionWarning>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the warnings recorded so far
    pub fn warnings(&self) -> Vec<ConditionWarning> {
        match self.warnings.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.warnings().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain recorded warnings
    pub fn take(&self) -> Vec<ConditionWarning> {
        match self.warnings.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl ConditionObserver for RecordingObserver {
    fn condition_not_met(&self, warning: &ConditionWarning) {
        match self.warnings.lock() {
            Ok(mut guard) => guard.push(warning.clone()),
            Err(poisoned) => poisoned.into_inner().push(warning.clone()),
        }
    }
}

/// Check `check` and report a violation to `observer`; never fails
pub fn validate(check: &ConditionCheck, observer: &dyn ConditionObserver) {
    if let Some(warning) = check.evaluate() {
        observer.condition_not_met(&warning);
    }
}

pub fn validate_single_mean_conditions(n: f64, observer: &dyn ConditionObserver) {
    validate(&ConditionCheck::SingleMean { n }, observer);
}

pub fn validate_single_proportion_conditions(n: f64, p: f64, observer: &dyn ConditionObserver) {
    validate(&ConditionCheck::SingleProportion { n, p }, observer);
}

pub fn validate_two_means_conditions(n1: f64, n2: f64, observer: &dyn ConditionObserver) {
    validate(&ConditionCheck::TwoMeans { n1, n2 }, observer);
}

pub fn validate_two_proportions_conditions(
    x1: (f64, f64),
    x2: (f64, f64),
    observer: &dyn ConditionObserver,
) {
    validate(&ConditionCheck::TwoProportions { x1, x2 }, observer);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_mean_threshold() {
        let observer = RecordingObserver::new();

        validate_single_mean_conditions(29.0, &observer);
        assert_eq!(observer.len(), 1);

        validate_single_mean_conditions(30.0, &observer);
        assert_eq!(observer.len(), 1, "n=30 must not warn");
    }

    #[test]
    fn test_single_mean_message_has_sample_size() {
        let warning = ConditionCheck::SingleMean { n: 12.0 }.evaluate().unwrap();
        assert_eq!(warning.kind, InferenceKind::SingleMean);
        assert!(warning.message.contains("n=12 is less than 30"));
    }

    #[test]
    fn test_single_proportion_message_values() {
        let warning = ConditionCheck::SingleProportion {
            n: 24.0,
            p: 4.0 / 24.0,
        }
        .evaluate()
        .unwrap();

        assert!(warning.message.contains("n*p=24*0.17=4.00"));
        assert!(warning.message.contains("n*(1-p)=24*0.83=20.00"));
    }

    #[test]
    fn test_single_proportion_both_sides_checked() {
        // Plenty of successes, too few failures
        assert!(ConditionCheck::SingleProportion { n: 100.0, p: 0.95 }
            .evaluate()
            .is_some());
        assert!(ConditionCheck::SingleProportion { n: 100.0, p: 0.5 }
            .evaluate()
            .is_none());
        // Exactly 10 on each side passes
        assert!(ConditionCheck::SingleProportion { n: 20.0, p: 0.5 }
            .evaluate()
            .is_none());
    }

    #[test]
    fn test_two_means_either_group() {
        assert!(ConditionCheck::TwoMeans { n1: 30.0, n2: 29.0 }
            .evaluate()
            .is_some());
        assert!(ConditionCheck::TwoMeans { n1: 29.0, n2: 30.0 }
            .evaluate()
            .is_some());
        assert!(ConditionCheck::TwoMeans { n1: 30.0, n2: 30.0 }
            .evaluate()
            .is_none());

        let warning = ConditionCheck::TwoMeans { n1: 10.0, n2: 11.0 }
            .evaluate()
            .unwrap();
        assert!(warning.message.contains("n1=10"));
        assert!(warning.message.contains("n2=11"));
    }

    #[test]
    fn test_two_proportions_any_term() {
        let ok = (100.0, 0.5);
        assert!(ConditionCheck::TwoProportions { x1: ok, x2: ok }
            .evaluate()
            .is_none());
        assert!(ConditionCheck::TwoProportions {
            x1: ok,
            x2: (100.0, 0.05)
        }
        .evaluate()
        .is_some());

        let warning = ConditionCheck::TwoProportions {
            x1: (14.0, 0.5),
            x2: (6.0, 0.25),
        }
        .evaluate()
        .unwrap();
        assert_eq!(warning.kind, InferenceKind::TwoProportions);
        assert!(warning.message.contains("n1*p1=14*0.50=7.00"));
        assert!(warning.message.contains("n2*(1-p2)=6*0.75=4.50"));
    }

    #[test]
    fn test_recording_observer_take() {
        let observer = RecordingObserver::new();
        validate_two_means_conditions(5.0, 5.0, &observer);
        validate_two_proportions_conditions((5.0, 0.5), (5.0, 0.5), &observer);

        let warnings = observer.take();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[1].kind, InferenceKind::TwoProportions);
        assert!(observer.is_empty());
    }

    #[test]
    fn test_tracing_observer_does_not_panic() {
        validate_single_mean_conditions(3.0, &TracingObserver);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(InferenceKind::SingleMean.to_string(), "single-mean");
        assert_eq!(InferenceKind::TwoProportions.to_string(), "two-proportions");
    }
}
