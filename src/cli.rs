//! CLI argument parsing for dsstats

use crate::inference::{Alternative, DfMethod};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "dsstats")]
#[command(version)]
#[command(about = "Confidence intervals, hypothesis tests and sample sizes for means and proportions", long_about = None)]
pub struct Cli {
    /// TOML file overriding the default confidence level, margin, df method and formulas
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Reproduce the historical single-proportion and Satterthwaite formulas
    #[arg(long, global = true)]
    pub legacy: bool,

    /// Enable debug tracing output to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Numeric sample given either as raw values or as a summary
#[derive(Args, Debug, Clone)]
pub struct MeanSampleArgs {
    /// Raw observations, comma separated
    #[arg(
        long,
        value_delimiter = ',',
        allow_hyphen_values = true,
        conflicts_with_all = ["count", "mean", "std"]
    )]
    pub values: Option<Vec<f64>>,

    /// Sample size (with --mean and --std)
    #[arg(long, requires_all = ["mean", "std"])]
    pub count: Option<usize>,

    /// Sample mean
    #[arg(long, allow_hyphen_values = true)]
    pub mean: Option<f64>,

    /// Sample standard deviation
    #[arg(long)]
    pub std: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// One-sample t-test for a mean
    MeanTest {
        #[command(flatten)]
        sample: MeanSampleArgs,

        /// Null hypothesis mean
        #[arg(long = "mu0", allow_hyphen_values = true)]
        mu_0: f64,

        #[arg(long, value_enum)]
        alternative: Alternative,
    },

    /// One-proportion z-test
    ProportionTest {
        /// Category count as LABEL=N (repeatable)
        #[arg(long = "count", value_name = "LABEL=N", value_parser = parse_category_count, required = true)]
        counts: Vec<(String, u64)>,

        /// Category whose proportion is tested
        #[arg(long)]
        category: String,

        /// Null hypothesis proportion
        #[arg(long = "p0")]
        p_0: f64,

        #[arg(long, value_enum)]
        alternative: Alternative,
    },

    /// Two-sample t-test from group summaries
    TwoMeansTest {
        /// First group as LABEL:COUNT:MEAN:STD
        #[arg(long, value_name = "LABEL:COUNT:MEAN:STD", value_parser = parse_group_summary, allow_hyphen_values = true)]
        first: GroupArg,

        /// Second group as LABEL:COUNT:MEAN:STD
        #[arg(long, value_name = "LABEL:COUNT:MEAN:STD", value_parser = parse_group_summary, allow_hyphen_values = true)]
        second: GroupArg,

        #[arg(long, value_enum)]
        alternative: Alternative,

        /// Degrees-of-freedom method (defaults to the configured one)
        #[arg(long = "df-method", value_enum)]
        df_method: Option<DfMethod>,
    },

    /// Two-proportion z-test with pooled proportion
    TwoProportionsTest {
        /// Category count as LABEL=N (repeatable)
        #[arg(long = "count", value_name = "LABEL=N", value_parser = parse_category_count, required = true)]
        counts: Vec<(String, u64)>,

        /// The two compared categories, FIRST,SECOND
        #[arg(long, value_delimiter = ',', required = true)]
        categories: Vec<String>,

        #[arg(long, value_enum)]
        alternative: Alternative,
    },

    /// t-interval for a single mean
    MeanInterval {
        #[command(flatten)]
        sample: MeanSampleArgs,

        /// Confidence level in (0, 1) (defaults to the configured one)
        #[arg(long)]
        confidence: Option<f64>,
    },

    /// z-interval for the difference of two proportions
    TwoProportionsInterval {
        /// Category count as LABEL=N (repeatable)
        #[arg(long = "count", value_name = "LABEL=N", value_parser = parse_category_count, required = true)]
        counts: Vec<(String, u64)>,

        /// The two compared categories, FIRST,SECOND
        #[arg(long, value_delimiter = ',', required = true)]
        categories: Vec<String>,

        /// Confidence level in (0, 1) (defaults to the configured one)
        #[arg(long)]
        confidence: Option<f64>,
    },

    /// Minimum sample size to estimate a proportion
    ProportionSampleSize {
        /// Prior guess of the proportion
        #[arg(long = "p-tilde")]
        p_tilde: Option<f64>,

        #[arg(long)]
        margin: Option<f64>,

        #[arg(long)]
        confidence: Option<f64>,
    },

    /// Minimum sample size to estimate a mean
    MeanSampleSize {
        /// Guess of the population standard deviation
        #[arg(long)]
        sigma: f64,

        #[arg(long)]
        margin: Option<f64>,

        #[arg(long)]
        confidence: Option<f64>,
    },

    /// Monte Carlo estimate of P(disorder | positive test)
    Simulate {
        #[arg(long, default_value = "0.02")]
        prevalence: f64,

        #[arg(long, default_value = "10000")]
        subjects: usize,

        #[arg(long, default_value = "0.999")]
        sensitivity: f64,

        #[arg(long, default_value = "0.995")]
        specificity: f64,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Parsed `LABEL:COUNT:MEAN:STD`
#[derive(Debug, Clone, PartialEq)]
pub struct GroupArg {
    pub label: String,
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
}

fn parse_category_count(s: &str) -> Result<(String, u64), String> {
    let (label, count) = s
        .split_once('=')
        .ok_or_else(|| format!("expected LABEL=N, got '{}'", s))?;
    if label.is_empty() {
        return Err(format!("empty category label in '{}'", s));
    }
    let count = count
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("invalid count in '{}': {}", s, e))?;
    Ok((label.to_string(), count))
}

fn parse_group_summary(s: &str) -> Result<GroupArg, String> {
    let parts: Vec<&str> = s.split(':').collect();
    let [label, count, mean, std_dev] = parts.as_slice() else {
        return Err(format!("expected LABEL:COUNT:MEAN:STD, got '{}'", s));
    };
    let number_err =
        |what: &str, e: &dyn std::fmt::Display| format!("invalid {} in '{}': {}", what, s, e);
    Ok(GroupArg {
        label: label.to_string(),
        count: count.parse().map_err(|e| number_err("count", &e))?,
        mean: mean.parse().map_err(|e| number_err("mean", &e))?,
        std_dev: std_dev.parse().map_err(|e| number_err("std", &e))?,
    })
}
