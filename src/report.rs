//! Text and JSON rendering of inference results for the command line

use crate::cli::OutputFormat;
use crate::inference::{ConfidenceInterval, TestResult};
use crate::simulation::SimulationOutcome;
use anyhow::Result;
use serde::Serialize;

/// Anything the CLI can print
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Report {
    Test(TestResult),
    Interval {
        confidence: f64,
        #[serde(flatten)]
        interval: ConfidenceInterval,
    },
    SampleSize {
        n: u64,
    },
    Simulation {
        #[serde(flatten)]
        outcome: SimulationOutcome,
        analytic_posterior: f64,
    },
}

impl Report {
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    fn to_text(&self) -> String {
        match self {
            Report::Test(result) => match result.df() {
                Some(df) => format!(
                    "{} (df = {:.2}, alternative = {})",
                    result, df, result.alternative
                ),
                None => format!("{} (alternative = {})", result, result.alternative),
            },
            Report::Interval {
                confidence,
                interval,
            } => format!(
                "{}% confidence interval: {}, width = {:.4}",
                percent(*confidence),
                interval,
                interval.width()
            ),
            Report::SampleSize { n } => format!("minimum sample size: {}", n),
            Report::Simulation {
                outcome,
                analytic_posterior,
            } => {
                let mut text = String::new();
                text.push_str(&format!("subjects: {}\n", outcome.subjects));
                text.push_str(&format!("carriers: {}\n", outcome.carriers));
                text.push_str(&format!("positive tests: {}\n", outcome.positives));
                text.push_str(&format!("true positives: {}\n", outcome.true_positives));
                text.push_str(&format!(
                    "P(disorder | positive) simulated = {:.4}, analytic = {:.4}",
                    outcome.posterior, analytic_posterior
                ));
                text
            }
        }
    }
}

/// `0.9` -> `90`, `0.995` -> `99.5`
fn percent(level: f64) -> f64 {
    (level * 10_000.0).round() / 100.0
}
