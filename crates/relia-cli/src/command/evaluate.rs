use std::{
    fmt::{self, Write as _},
    path::PathBuf,
};

use anyhow::Context;
use clap::Args;
use relia_stats::{
    analysis::AnalysisConfig,
    histogram::DensityHistogram,
    partition::IntervalPartition,
    sample::FailureSample,
    survival::SurvivalCurve,
};
use serde::Serialize;

use super::analyze::{OutputFormat, ZeroPolicyArg};
use crate::util::{self, Output};

#[derive(Debug, Clone, Args)]
pub(super) struct EvaluateArg {
    /// Path to the failure-times JSON file
    pub sample: PathBuf,

    /// Times to evaluate at (comma-separated)
    #[arg(long, value_delimiter = ',', required = true)]
    pub at: Vec<f64>,

    /// Analysis settings JSON file; only the partition settings are used
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of equal-width intervals
    #[arg(long)]
    pub intervals: Option<usize>,

    /// How observations equal to zero are counted
    #[arg(long, value_enum)]
    pub zero_policy: Option<ZeroPolicyArg>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the report to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// The survival curve evaluated at one time.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct CurvePoint {
    time: f64,
    survival: f64,
    failure_probability: f64,
    hazard_rate: f64,
}

pub(super) fn run(arg: &EvaluateArg) -> anyhow::Result<()> {
    let times = util::read_sample_file(&arg.sample)?;
    let mut config = match &arg.config {
        Some(path) => util::read_config_file(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(count) = arg.intervals {
        config.interval_count = count;
    }
    if let Some(policy) = arg.zero_policy {
        config.zero_policy = policy.into();
    }

    let sample = FailureSample::new(times)
        .with_context(|| format!("Invalid sample: {}", arg.sample.display()))?;
    let partition = IntervalPartition::new(sample.max(), config.interval_count)
        .context("Failed to partition the observed range")?;
    let histogram = DensityHistogram::new(&sample, &partition, config.zero_policy);
    let points = evaluate_points(&SurvivalCurve::new(&histogram), &arg.at)?;

    let mut output = Output::from_output_path(arg.output.clone())?;
    match arg.format {
        OutputFormat::Text => {
            let table = format_points(&points).context("Failed to format table")?;
            output.write_text(&table)?;
        }
        OutputFormat::Json => output.write_json(&points)?,
    }
    Ok(())
}

fn evaluate_points(curve: &SurvivalCurve<'_>, times: &[f64]) -> anyhow::Result<Vec<CurvePoint>> {
    times
        .iter()
        .map(|&time| -> anyhow::Result<CurvePoint> {
            let context = || format!("Failed to evaluate survival curve at {time}");
            Ok(CurvePoint {
                time,
                survival: curve.survival_at(time).with_context(context)?,
                failure_probability: curve.failure_probability(time).with_context(context)?,
                hazard_rate: curve.hazard_rate(time).with_context(context)?,
            })
        })
        .collect()
}

fn format_points(points: &[CurvePoint]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        "  {:>14} {:>10} {:>10} {:>14}",
        "Time", "S(t)", "F(t)", "Hazard"
    )?;
    writeln!(out, "  {}", "-".repeat(51))?;
    for p in points {
        writeln!(
            out,
            "  {:>14.3} {:>10.6} {:>10.6} {:>14.6e}",
            p.time, p.survival, p.failure_probability, p.hazard_rate
        )?;
    }
    Ok(out)
}
