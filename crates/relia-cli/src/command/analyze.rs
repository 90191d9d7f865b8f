//! Full reliability analysis of a failure-time sample
//!
//! Loads the sample, merges settings from the config file and the command
//! line, and reports every indicator as a text report or as JSON.

use std::{
    fmt::{self, Write as _},
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Args, ValueEnum};
use relia_stats::{
    analysis::{self, AnalysisConfig, AnalysisResult},
    histogram::ZeroPolicy,
};

use crate::util::{self, Output};

#[derive(Debug, Clone, Args)]
pub(super) struct AnalyzeArg {
    /// Path to the failure-times JSON file
    pub sample: PathBuf,

    /// Analysis settings JSON file; command-line values take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Time at which survival probability is reported
    #[arg(long)]
    pub uptime: Option<f64>,

    /// Time at which hazard rate is reported
    #[arg(long)]
    pub lambda_uptime: Option<f64>,

    /// Target survival probability for the gamma-percentile life
    #[arg(long)]
    pub gamma: Option<f64>,

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

    /// Save survival and failure probability at each boundary as CSV
    #[arg(long)]
    pub curve_csv: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(super) enum ZeroPolicyArg {
    Exclude,
    IncludeInFirst,
}

impl From<ZeroPolicyArg> for ZeroPolicy {
    fn from(arg: ZeroPolicyArg) -> Self {
        match arg {
            ZeroPolicyArg::Exclude => ZeroPolicy::Exclude,
            ZeroPolicyArg::IncludeInFirst => ZeroPolicy::IncludeInFirst,
        }
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(super) enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl AnalyzeArg {
    /// Overwrites `config` with every setting given on the command line.
    fn apply_overrides(&self, mut config: AnalysisConfig) -> AnalysisConfig {
        if let Some(count) = self.intervals {
            config.interval_count = count;
        }
        if let Some(policy) = self.zero_policy {
            config.zero_policy = policy.into();
        }
        if let Some(uptime) = self.uptime {
            config.uptime = uptime;
        }
        if let Some(lambda_uptime) = self.lambda_uptime {
            config.lambda_uptime = lambda_uptime;
        }
        if let Some(gamma) = self.gamma {
            config.gamma = gamma;
        }
        config
    }

    fn resolve_config(&self) -> anyhow::Result<AnalysisConfig> {
        let base = match &self.config {
            Some(path) => util::read_config_file(path)?,
            None => AnalysisConfig::default(),
        };
        Ok(self.apply_overrides(base))
    }
}

pub(super) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let times = util::read_sample_file(&arg.sample)?;
    let config = arg.resolve_config()?;
    tracing::info!(?config, "running analysis");

    let result = analysis::analyze_with(times, &config)
        .with_context(|| format!("Failed to analyze sample: {}", arg.sample.display()))?;

    let mut output = Output::from_output_path(arg.output.clone())?;
    match arg.format {
        OutputFormat::Text => {
            let report = format_report(&result).context("Failed to format report")?;
            output.write_text(&report)?;
        }
        OutputFormat::Json => output.write_json(&result)?,
    }

    if let Some(path) = &arg.curve_csv {
        save_curve_csv(path, &result)?;
    }

    Ok(())
}

const SAMPLE_VALUES_PER_LINE: usize = 10;

fn format_report(result: &AnalysisResult) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(out, "Reliability Analysis Report")?;
    writeln!(out, "===========================\n")?;

    writeln!(out, "Sorted sample ({} observations):", result.count)?;
    for chunk in result.sorted_sample.chunks(SAMPLE_VALUES_PER_LINE) {
        let line = chunk
            .iter()
            .map(|t| format!("{t:>8}"))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "  {line}")?;
    }
    writeln!(out)?;

    let summary = &result.summary;
    writeln!(out, "Mean time-to-failure:    {:.4}", result.mean)?;
    writeln!(out, "Maximum time-to-failure: {}", result.max)?;
    writeln!(out, "Median time-to-failure:  {:.4}", summary.median)?;
    writeln!(out, "Standard deviation:      {:.4}", summary.std_dev)?;
    writeln!(out, "Interval width:          {:.4}", result.interval_width)?;
    writeln!(
        out,
        "Captured fraction:       {:.1}%",
        100.0 * result.captured_fraction
    )?;
    writeln!(out)?;

    writeln!(out, "Density Histogram")?;
    writeln!(
        out,
        "  {:>4} {:>26} {:>8} {:>14}",
        "#", "Interval", "Count", "Density"
    )?;
    writeln!(out, "  {}", "-".repeat(55))?;
    for (i, bin) in result.bins.iter().enumerate() {
        let range = format!("({:.3}, {:.3}]", bin.lower, bin.upper);
        writeln!(
            out,
            "  {:>4} {:>26} {:>8} {:>14.6e}",
            i + 1,
            range,
            bin.count,
            bin.density
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Survival at Boundaries")?;
    writeln!(out, "  {:>4} {:>14} {:>10}", "#", "Time", "S(t)")?;
    writeln!(out, "  {}", "-".repeat(30))?;
    for (i, (t, s)) in result
        .boundaries
        .iter()
        .zip(&result.survival_at_boundaries)
        .enumerate()
    {
        writeln!(out, "  {i:>4} {t:>14.3} {s:>10.6}")?;
    }
    writeln!(out)?;

    let life = &result.percentile_life;
    writeln!(
        out,
        "Gamma-percentile life (gamma = {}): {:.4}",
        life.gamma, life.time
    )?;
    writeln!(
        out,
        "Survival at uptime {}:       {:.6}",
        result.uptime, result.survival_at_uptime
    )?;
    writeln!(
        out,
        "Hazard rate at {}:           {:.6e}",
        result.lambda_uptime, result.hazard_rate
    )?;

    Ok(out)
}

fn curve_csv(result: &AnalysisResult) -> Result<String, fmt::Error> {
    let mut csv = String::from("boundary,survival,failure\n");
    for (t, s) in result.boundaries.iter().zip(&result.survival_at_boundaries) {
        writeln!(csv, "{},{},{}", t, s, 1.0 - s)?;
    }
    Ok(csv)
}

fn save_curve_csv(path: &Path, result: &AnalysisResult) -> anyhow::Result<()> {
    let csv = curve_csv(result).context("Failed to format survival curve CSV")?;
    fs::write(path, csv)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
    tracing::info!(path = %path.display(), "survival curve saved");
    Ok(())
}
