//! Observer pattern for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! training logic to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    analysis::{DEFAULT_EWMA_FACTOR, ewma},
    ports::Observer,
};

fn running_message(samples: &[f64]) -> String {
    let avg = if samples.is_empty() {
        0.0
    } else {
        samples.iter().sum::<f64>() / samples.len() as f64
    };
    let smoothed = ewma(samples, DEFAULT_EWMA_FACTOR).unwrap_or(0.0);
    format!("Avg reward: {avg:0.6} | Ewma reward: {smoothed:0.6}")
}

/// Progress bar observer - Shows epochs completed and the current run's averages
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    current_run: Vec<f64>,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            current_run: Vec::new(),
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_experiment_start(&mut self, runs: usize, epochs: usize) -> Result<()> {
        let pb = ProgressBar::new((runs * epochs) as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} epochs ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_run_start(&mut self, _run: usize) -> Result<()> {
        self.current_run.clear();
        Ok(())
    }

    fn on_epoch_end(&mut self, _run: usize, _epoch: usize, sample: f64) -> Result<()> {
        self.current_run.push(sample);
        if let Some(pb) = &self.progress_bar {
            pb.inc(1);
            pb.set_message(running_message(&self.current_run));
        }
        Ok(())
    }

    fn on_experiment_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(running_message(&self.current_run));
        }
        Ok(())
    }
}

/// Summary of one run's samples
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetrics {
    pub run: usize,
    pub epochs: usize,
    pub mean_sample: f64,
    pub best_sample: f64,
    pub final_sample: f64,
    pub smoothed: f64,
}

/// Metrics observer - Tracks per-run statistics in memory
#[derive(Debug, Default)]
pub struct MetricsObserver {
    runs: Vec<RunMetrics>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Metrics of every completed run
    pub fn runs(&self) -> &[RunMetrics] {
        &self.runs
    }
}

impl Observer for MetricsObserver {
    fn on_run_end(&mut self, run: usize, samples: &[f64]) -> Result<()> {
        if samples.is_empty() {
            return Ok(());
        }
        self.runs.push(RunMetrics {
            run,
            epochs: samples.len(),
            mean_sample: samples.iter().sum::<f64>() / samples.len() as f64,
            best_sample: samples.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            final_sample: samples[samples.len() - 1],
            smoothed: ewma(samples, DEFAULT_EWMA_FACTOR).unwrap_or(f64::NAN),
        });
        Ok(())
    }
}

/// One epoch sample as written by [`JsonlObserver`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochRecord {
    pub run: usize,
    pub epoch: usize,
    pub sample: f64,
}

/// JSONL observer - Writes one line per epoch sample
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    /// Create a new JSONL observer writing to `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create observations file {path:?}"),
            source,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_epoch_end(&mut self, run: usize, epoch: usize, sample: f64) -> Result<()> {
        let record = EpochRecord { run, epoch, sample };
        serde_json::to_writer(&mut self.writer, &record)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn on_experiment_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_metrics_observer_summarizes_runs() {
        let mut observer = MetricsObserver::new();
        observer.on_run_end(0, &[1.0, 3.0, 2.0]).unwrap();
        observer.on_run_end(1, &[]).unwrap();

        assert_eq!(observer.runs().len(), 1);
        let metrics = &observer.runs()[0];
        assert_eq!(metrics.mean_sample, 2.0);
        assert_eq!(metrics.best_sample, 3.0);
        assert_eq!(metrics.final_sample, 2.0);
    }

    #[test]
    fn test_jsonl_observer_writes_one_line_per_epoch() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("epochs.jsonl");

        let mut observer = JsonlObserver::new(&path).unwrap();
        observer.on_epoch_end(0, 0, 0.5).unwrap();
        observer.on_epoch_end(0, 1, 0.75).unwrap();
        observer.on_experiment_end().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let records: Vec<EpochRecord> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].epoch, 1);
        assert_eq!(records[1].sample, 0.75);
    }

    #[test]
    fn test_running_message_format() {
        assert_eq!(
            running_message(&[1.0, 1.0]),
            "Avg reward: 1.000000 | Ewma reward: 1.000000"
        );
    }
}
