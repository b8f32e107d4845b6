use std::collections::BTreeMap;
use std::time::Instant;

/// Observer for comparison progress and per-stage timing.
///
/// Keeps the use case free of any particular output mechanism: the CLI
/// logs a summary, the service logs at debug level, tests discard events.
pub trait PipelineLogger: Send {
    /// Report that `current` of `total` frames of `label` media are embedded.
    fn progress(&mut self, label: &str, current: usize, total: usize);

    /// Record how long a named stage took.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-comparison summary. Default: no-op.
    fn summary(&self) {}
}

/// Logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _label: &str, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Logger backed by the `log` crate that accumulates stage timings and
/// reports totals on [`PipelineLogger::summary`].
pub struct LogPipelineLogger {
    timings: BTreeMap<String, Vec<f64>>,
    frames: usize,
    start_time: Instant,
}

impl LogPipelineLogger {
    pub fn new() -> Self {
        Self {
            timings: BTreeMap::new(),
            frames: 0,
            start_time: Instant::now(),
        }
    }

    /// Formatted summary, or `None` if nothing was timed.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Comparison summary ({} frames embedded, {:.1}s total):",
            self.frames,
            elapsed_ms / 1000.0
        )];

        for (stage, durations) in &self.timings {
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = total_ms / durations.len() as f64;
            lines.push(format!(
                "  {stage:12}: avg {avg_ms:7.1}ms  total {total_ms:7.0}ms  ({} runs)",
                durations.len()
            ));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }
}

impl Default for LogPipelineLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineLogger for LogPipelineLogger {
    fn progress(&mut self, label: &str, current: usize, total: usize) {
        self.frames += 1;
        log::debug!("Embedded {label} frame {current}/{total}");
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n{text}");
        }
    }
}
