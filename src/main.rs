use anyhow::{Context, Result};
use clap::Parser;
use dsstats::cli::{Cli, Command, MeanSampleArgs};
use dsstats::inference::{
    CategoryCounts, FormulaMode, GroupSummaries, Inference, InferenceConfig, SummaryStatistics,
};
use dsstats::report::Report;
use dsstats::simulation::GeneticDisorderExperiment;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; condition warnings are visible unless RUST_LOG says otherwise
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load the configuration file if given, then apply command-line overrides
fn load_config(cli: &Cli) -> Result<InferenceConfig> {
    let mut config = match &cli.config {
        Some(path) => InferenceConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => InferenceConfig::default(),
    };
    if cli.legacy {
        config.formulas = FormulaMode::Legacy;
    }
    Ok(config)
}

/// Build a summary from either --values or --count/--mean/--std
fn mean_sample(sample: &MeanSampleArgs) -> Result<SummaryStatistics> {
    match (&sample.values, sample.count, sample.mean, sample.std) {
        (Some(values), None, None, None) => Ok(SummaryStatistics::from_observations(values)?),
        (None, Some(count), Some(mean), Some(std)) => {
            Ok(SummaryStatistics::new(count, mean, std)?)
        }
        _ => anyhow::bail!("Provide either --values or all of --count, --mean and --std"),
    }
}

fn pair(categories: &[String]) -> Result<(&str, &str)> {
    match categories {
        [first, second] => Ok((first.as_str(), second.as_str())),
        _ => anyhow::bail!("--categories takes exactly two labels, got {}", categories.len()),
    }
}

fn run(command: Command, engine: &Inference) -> Result<Report> {
    let config = engine.config();
    let report = match command {
        Command::MeanTest {
            sample,
            mu_0,
            alternative,
        } => {
            let summary = mean_sample(&sample)?;
            Report::Test(engine.single_mean_test(&summary, mu_0, alternative)?)
        }
        Command::ProportionTest {
            counts,
            category,
            p_0,
            alternative,
        } => {
            let counts: CategoryCounts = counts.into_iter().collect();
            Report::Test(engine.single_proportion_test(
                &counts,
                &category,
                p_0,
                alternative,
            )?)
        }
        Command::TwoMeansTest {
            first,
            second,
            alternative,
            df_method,
        } => {
            if first.label == second.label {
                anyhow::bail!("--first and --second must use different labels");
            }
            let mut summaries = GroupSummaries::new();
            summaries.insert(
                first.label.clone(),
                SummaryStatistics::new(first.count, first.mean, first.std_dev)?,
            );
            summaries.insert(
                second.label.clone(),
                SummaryStatistics::new(second.count, second.mean, second.std_dev)?,
            );
            let df_method = df_method.unwrap_or(config.df_method);
            Report::Test(engine.two_mean_test(
                &summaries,
                (first.label.as_str(), second.label.as_str()),
                alternative,
                df_method,
            )?)
        }
        Command::TwoProportionsTest {
            counts,
            categories,
            alternative,
        } => {
            let counts: CategoryCounts = counts.into_iter().collect();
            Report::Test(engine.two_proportions_test(
                &counts,
                pair(&categories)?,
                alternative,
            )?)
        }
        Command::MeanInterval { sample, confidence } => {
            let summary = mean_sample(&sample)?;
            let confidence = confidence.unwrap_or(config.confidence_level);
            Report::Interval {
                confidence,
                interval: engine.single_mean_interval(&summary, confidence)?,
            }
        }
        Command::TwoProportionsInterval {
            counts,
            categories,
            confidence,
        } => {
            let counts: CategoryCounts = counts.into_iter().collect();
            let confidence = confidence.unwrap_or(config.confidence_level);
            Report::Interval {
                confidence,
                interval: engine.two_proportions_interval(
                    &counts,
                    pair(&categories)?,
                    confidence,
                )?,
            }
        }
        Command::ProportionSampleSize {
            p_tilde,
            margin,
            confidence,
        } => Report::SampleSize {
            n: engine.proportion_sample_size(p_tilde, margin, confidence)?,
        },
        Command::MeanSampleSize {
            sigma,
            margin,
            confidence,
        } => Report::SampleSize {
            n: engine.mean_sample_size(sigma, margin, confidence)?,
        },
        Command::Simulate {
            prevalence,
            subjects,
            sensitivity,
            specificity,
            seed,
        } => {
            let experiment = GeneticDisorderExperiment {
                prevalence,
                subjects,
                sensitivity,
                specificity,
            };
            let outcome = experiment.run_seeded(seed)?;
            Report::Simulation {
                outcome,
                analytic_posterior: experiment.analytic_posterior()?,
            }
        }
    };
    Ok(report)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.debug);

    let config = load_config(&cli)?;
    let engine = Inference::new(config)?;
    let format = cli.format;

    let report = run(cli.command, &engine)?;
    println!("{}", report.render(format)?);

    Ok(())
}
