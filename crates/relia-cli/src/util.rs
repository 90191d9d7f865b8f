use std::{
    fmt,
    fs::{self, File},
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use relia_stats::analysis::AnalysisConfig;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Where a report goes: stdout, or a file given with `--output`.
#[derive(Debug)]
pub enum Output {
    Stdout(StdoutLock<'static>),
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Stdout(_) => f.write_str("stdout"),
            Output::File { path, .. } => write!(f, "{}", path.display()),
        }
    }
}

impl Output {
    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let Some(path) = output_path else {
            return Ok(Output::Stdout(io::stdout().lock()));
        };
        let file = File::create(&path)
            .with_context(|| format!("Failed to create report file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    /// Writes `value` as pretty-printed JSON followed by a newline.
    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write analysis JSON to {self}"))?;
        writeln!(self).with_context(|| format!("Failed to write analysis JSON to {self}"))?;
        self.finish()
    }

    pub fn write_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.write_all(text.as_bytes())
            .with_context(|| format!("Failed to write report to {self}"))?;
        self.finish()
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        self.flush()
            .with_context(|| format!("Failed to flush report to {self}"))?;
        if let Output::File { path, .. } = self {
            tracing::info!(path = %path.display(), "report written");
        }
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(writer) => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(writer) => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Reads and parses a JSON input file; `file_kind` names it in errors.
pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {file_kind} file: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("{file_kind} file {} is not valid JSON", path.display()))
}

/// Failure times as stored on disk.
///
/// Either a bare array of numbers or an object with a `failure_times` array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SampleFile {
    Times(Vec<f64>),
    Document { failure_times: Vec<f64> },
}

impl SampleFile {
    pub fn into_times(self) -> Vec<f64> {
        match self {
            SampleFile::Times(times) | SampleFile::Document { failure_times: times } => times,
        }
    }
}

/// Read failure times from a JSON file
pub fn read_sample_file<P>(path: P) -> anyhow::Result<Vec<f64>>
where
    P: AsRef<Path>,
{
    let sample: SampleFile = read_json_file("sample", path)?;
    let times = sample.into_times();
    tracing::info!(count = times.len(), "loaded failure times");
    Ok(times)
}

/// Read analysis settings from a JSON file; missing fields take their defaults
pub fn read_config_file<P>(path: P) -> anyhow::Result<AnalysisConfig>
where
    P: AsRef<Path>,
{
    read_json_file("config", path)
}
