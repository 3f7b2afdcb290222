//! dsstats - closed-form statistical inference for means and proportions
//!
//! This library provides confidence intervals, hypothesis tests and
//! minimum-sample-size estimates over summarized or raw samples, with
//! advisory checks on the large-sample conditions each approximation needs,
//! plus a small Monte Carlo illustration of Bayes' rule.

pub mod cli;
pub mod error;
pub mod inference;
pub mod report;
pub mod simulation;

pub use error::{InferenceError, Result};
