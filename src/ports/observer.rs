//! Observer port - abstraction for training observation and data collection
//!
//! This port defines the interface for observing an experiment, allowing
//! composable data collection without coupling the training loop to specific
//! output formats or metrics.

use crate::Result;

/// Observer trait for monitoring an experiment
///
/// Observers can be composed to collect different types of data during training.
/// Examples include:
/// - Progress bars for user feedback
/// - JSONL export for analysis
/// - In-memory metrics for summaries
///
/// # Event Sequence
///
/// The observer methods are called in the following order:
/// 1. `on_experiment_start(runs, epochs)` - Once at the beginning
/// 2. For each run:
///    - `on_run_start(run)`
///    - `on_epoch_end(run, epoch, sample)` - After each epoch's evaluation
///    - `on_run_end(run, samples)`
/// 3. `on_experiment_end()` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use questlearn::ports::Observer;
///
/// struct BestEpoch {
///     best: f64,
/// }
///
/// impl Observer for BestEpoch {
///     fn on_epoch_end(&mut self, _run: usize, _epoch: usize, sample: f64) -> questlearn::Result<()> {
///         self.best = self.best.max(sample);
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when the experiment starts.
    ///
    /// # Parameters
    ///
    /// * `runs` - Number of independent runs
    /// * `epochs` - Epochs per run
    fn on_experiment_start(&mut self, _runs: usize, _epochs: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a run starts, after its model has been reset to zero.
    fn on_run_start(&mut self, _run: usize) -> Result<()> {
        Ok(())
    }

    /// Called with the performance sample (mean evaluation return) of an epoch.
    fn on_epoch_end(&mut self, _run: usize, _epoch: usize, _sample: f64) -> Result<()> {
        Ok(())
    }

    /// Called when a run completes with all of its epoch samples.
    fn on_run_end(&mut self, _run: usize, _samples: &[f64]) -> Result<()> {
        Ok(())
    }

    /// Called when the experiment completes.
    ///
    /// Use this to finalize outputs, close files, or display summaries.
    fn on_experiment_end(&mut self) -> Result<()> {
        Ok(())
    }
}
