// Closed-form statistical inference for means and proportions
//
// Components, leaves first:
// - distribution: p-values and critical values (normal / Student-t via statrs)
// - conditions:   large-sample approximation checks; warn, never fail
// - hypothesis:   one/two-sample mean and proportion tests
// - confidence:   single-mean and two-proportion intervals
// - sample_size:  minimum n for a target margin of error
//
// Everything is pure arithmetic over the caller's inputs. The only side effect
// is the condition warning, delivered to an injectable ConditionObserver.

mod conditions;
mod confidence;
mod config;
mod distribution;
mod engine;
mod hypothesis;
mod sample;
mod sample_size;

pub use conditions::{
    validate, validate_single_mean_conditions, validate_single_proportion_conditions,
    validate_two_means_conditions, validate_two_proportions_conditions, ConditionCheck,
    ConditionObserver, ConditionWarning, InferenceKind, RecordingObserver, TracingObserver,
    MIN_EXPECTED_COUNT, MIN_MEAN_SAMPLE_SIZE,
};
pub use confidence::ConfidenceInterval;
pub use config::{
    DfMethod, FormulaMode, InferenceConfig, ProportionDenominator, DEFAULT_CONFIDENCE_LEVEL,
    DEFAULT_MARGIN_OF_ERROR, DEFAULT_PROPORTION_GUESS,
};
pub use distribution::{critical_value, p_value, Alternative, Distribution};
pub use engine::Inference;
pub use hypothesis::{StatisticKind, TestResult};
pub use sample::{CategoryCounts, GroupSummaries, SummaryStatistics};
pub use sample_size::{single_mean_sample_size, single_proportion_sample_size};
