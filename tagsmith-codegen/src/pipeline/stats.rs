//! Wall-clock timing of pipeline phases.

use std::time::{Duration, Instant};

use indexmap::IndexMap;
use tracing::info;

/// Per-phase durations of one run, plus the whole-run duration.
#[derive(Debug, Clone, Default)]
pub struct TimeStats {
    durations: IndexMap<&'static str, Duration>,
    running: IndexMap<&'static str, Instant>,
    started: Option<Instant>,
    total: Option<Duration>,
}

impl TimeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the whole-run clock.
    pub fn begin(&mut self) {
        self.started = Some(Instant::now());
        self.total = None;
    }

    /// Stop the whole-run clock.
    pub fn end(&mut self) -> Option<Duration> {
        let elapsed = self.started.take()?.elapsed();
        self.total = Some(elapsed);
        Some(elapsed)
    }

    /// Start timing a phase.
    pub fn start(&mut self, phase: &'static str) {
        self.running.insert(phase, Instant::now());
    }

    /// Stop timing a phase. Repeated timings of one phase add up.
    pub fn stop(&mut self, phase: &'static str) -> Option<Duration> {
        let elapsed = self.running.shift_remove(phase)?.elapsed();
        *self.durations.entry(phase).or_default() += elapsed;
        Some(elapsed)
    }

    pub fn duration(&self, phase: &str) -> Option<Duration> {
        self.durations.get(phase).copied()
    }

    /// Phase durations in the order phases first finished.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, Duration)> + '_ {
        self.durations.iter().map(|(name, elapsed)| (*name, *elapsed))
    }

    /// The whole-run duration, once the run has ended.
    pub fn total(&self) -> Option<Duration> {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    /// Log every phase duration and the whole-run duration.
    pub fn log_stats(&self) {
        for (phase, elapsed) in self.entries() {
            info!(phase, elapsed_ms = elapsed.as_secs_f64() * 1000.0, "phase timing");
        }
        if let Some(total) = self.total {
            info!(elapsed_ms = total.as_secs_f64() * 1000.0, "pipeline timing");
        }
    }
}
