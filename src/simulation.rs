//! Monte Carlo illustration of Bayes' rule with synthetic screening data
//!
//! A population is sampled with a given disorder prevalence, every subject
//! takes an imperfect test, and the share of carriers among the positives
//! estimates P(disorder | positive). With a rare disorder that share is far
//! below the test's sensitivity, which is the point of the exercise.

use crate::error::{InferenceError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Parameters of one screening experiment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneticDisorderExperiment {
    /// P(disorder) in the population
    pub prevalence: f64,
    /// Number of simulated subjects
    pub subjects: usize,
    /// P(positive | disorder)
    pub sensitivity: f64,
    /// P(negative | no disorder)
    pub specificity: f64,
}

impl Default for GeneticDisorderExperiment {
    fn default() -> Self {
        Self {
            prevalence: 0.02,
            subjects: 10_000,
            sensitivity: 0.999,
            specificity: 0.995,
        }
    }
}

/// Tallies from one simulated screening run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub subjects: usize,
    /// Subjects drawn with the disorder
    pub carriers: usize,
    /// Subjects whose test came back positive
    pub positives: usize,
    /// Carriers who tested positive
    pub true_positives: usize,
    /// Empirical P(disorder | positive)
    pub posterior: f64,
}

impl GeneticDisorderExperiment {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("prevalence", self.prevalence),
            ("sensitivity", self.sensitivity),
            ("specificity", self.specificity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(InferenceError::InvalidArgument(format!(
                    "{} must be in [0, 1], got {}",
                    name, value
                )));
            }
        }
        if self.subjects == 0 {
            return Err(InferenceError::InvalidArgument(
                "subjects must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// P(disorder | positive) by Bayes' rule
    pub fn analytic_posterior(&self) -> Result<f64> {
        let true_positive = self.prevalence * self.sensitivity;
        let false_positive = (1.0 - self.prevalence) * (1.0 - self.specificity);
        let evidence = true_positive + false_positive;
        if evidence == 0.0 {
            return Err(InferenceError::DivisionByZero(
                "P(positive) is zero".to_string(),
            ));
        }
        Ok(true_positive / evidence)
    }

    /// Simulate one screening round with `rng`
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SimulationOutcome> {
        self.validate()?;

        let mut carriers = 0;
        let mut positives = 0;
        let mut true_positives = 0;

        for _ in 0..self.subjects {
            let has_disorder = rng.gen_bool(self.prevalence);
            let draw: f64 = rng.gen();
            let positive = if has_disorder {
                draw < self.sensitivity
            } else {
                draw < 1.0 - self.specificity
            };

            carriers += usize::from(has_disorder);
            positives += usize::from(positive);
            true_positives += usize::from(has_disorder && positive);
        }

        if positives == 0 {
            return Err(InferenceError::DivisionByZero(format!(
                "no positive tests among {} subjects",
                self.subjects
            )));
        }

        let posterior = true_positives as f64 / positives as f64;
        tracing::debug!(carriers, positives, true_positives, posterior, "screening simulated");

        Ok(SimulationOutcome {
            subjects: self.subjects,
            carriers,
            positives,
            true_positives,
            posterior,
        })
    }

    /// Simulate with a seeded generator, or OS entropy when `seed` is `None`
    pub fn run_seeded(&self, seed: Option<u64>) -> Result<SimulationOutcome> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.run(&mut rng)
    }
}
