// Sample representations consumed by the test and interval routines
//
// Numeric samples are reduced to SummaryStatistics (count, mean, sample std);
// categorical samples are label -> count maps. Both are ordered (BTreeMap) so
// reports and iteration are deterministic.

use crate::error::{InferenceError, Result};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

/// Read-only {count, mean, standard deviation} summary of one numeric group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Number of observations (>= 1)
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std_dev: f64,
}

impl SummaryStatistics {
    /// Build a summary from pre-aggregated values
    pub fn new(count: usize, mean: f64, std_dev: f64) -> Result<Self> {
        if count == 0 {
            return Err(InferenceError::InvalidArgument(
                "summary count must be >= 1".to_string(),
            ));
        }
        if !mean.is_finite() {
            return Err(InferenceError::InvalidArgument(format!(
                "summary mean must be finite, got {}",
                mean
            )));
        }
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(InferenceError::InvalidArgument(format!(
                "standard deviation must be finite and >= 0, got {}",
                std_dev
            )));
        }
        Ok(Self {
            count,
            mean,
            std_dev,
        })
    }

    /// Summarize raw observations
    ///
    /// A single observation yields `std_dev = 0`; the degenerate degrees of
    /// freedom are rejected later by the routines that need them.
    ///
    /// # Example
    /// ```
    /// use dsstats::inference::SummaryStatistics;
    ///
    /// let s = SummaryStatistics::from_observations(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
    /// assert_eq!(s.count, 8);
    /// assert!((s.mean - 5.0).abs() < 1e-12);
    /// ```
    pub fn from_observations(observations: &[f64]) -> Result<Self> {
        if observations.is_empty() {
            return Err(InferenceError::InvalidArgument(
                "cannot summarize an empty sample".to_string(),
            ));
        }
        if let Some(bad) = observations.iter().find(|v| !v.is_finite()) {
            return Err(InferenceError::InvalidArgument(format!(
                "observations must be finite, found {}",
                bad
            )));
        }

        let mean = observations.mean();
        let std_dev = if observations.len() > 1 {
            observations.std_dev()
        } else {
            0.0
        };

        Self::new(observations.len(), mean, std_dev)
    }

    /// Standard error of the mean, `s / sqrt(n)`
    pub fn standard_error(&self) -> f64 {
        self.std_dev / (self.count as f64).sqrt()
    }

    /// Degrees of freedom of a one-sample t procedure, `n - 1`
    pub fn degrees_of_freedom(&self) -> f64 {
        self.count as f64 - 1.0
    }

    pub fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }
}

/// Category label -> non-negative count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts(BTreeMap<String, u64>);

impl CategoryCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(label, count)` pairs; repeated labels accumulate
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        pairs.into_iter().collect()
    }

    /// Add `count` observations to `category`
    pub fn insert(&mut self, category: impl Into<String>, count: u64) {
        *self.0.entry(category.into()).or_insert(0) += count;
    }

    /// Count for `category`, or `KeyNotFound`
    pub fn get(&self, category: &str) -> Result<u64> {
        self.0.get(category).copied().ok_or_else(|| {
            InferenceError::KeyNotFound(format!(
                "category '{}' not in sample (available: {})",
                category,
                self.labels().join(", ")
            ))
        })
    }

    /// Sum over all categories
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for CategoryCounts {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut counts = CategoryCounts::new();
        for (label, count) in iter {
            counts.insert(label, count);
        }
        counts
    }
}

/// Group label -> summary statistics, the input shape of the two-means test
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupSummaries(BTreeMap<String, SummaryStatistics>);

impl GroupSummaries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, group: impl Into<String>, summary: SummaryStatistics) {
        self.0.insert(group.into(), summary);
    }

    /// Summarize each group's raw observations
    pub fn from_observations<'a, I>(groups: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a [f64])>,
    {
        let mut summaries = GroupSummaries::new();
        for (label, values) in groups {
            summaries.insert(label, SummaryStatistics::from_observations(values)?);
        }
        Ok(summaries)
    }

    /// Summary for `group`, or `KeyNotFound`
    pub fn get(&self, group: &str) -> Result<&SummaryStatistics> {
        self.0.get(group).ok_or_else(|| {
            InferenceError::KeyNotFound(format!("group '{}' not in summaries", group))
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, SummaryStatistics)> for GroupSummaries {
    fn from_iter<I: IntoIterator<Item = (S, SummaryStatistics)>>(iter: I) -> Self {
        let mut summaries = GroupSummaries::new();
        for (label, summary) in iter {
            summaries.insert(label, summary);
        }
        summaries
    }
}
