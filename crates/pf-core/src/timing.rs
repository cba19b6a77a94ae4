//! Lightweight performance timing utilities.
//!
//! Timers are inert unless timing is enabled programmatically or through the
//! `PF_TIMING` environment variable.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);

/// Enable performance timing globally.
pub fn enable_timing() {
    ENABLED.store(true, Ordering::Relaxed);
}

/// Disable performance timing globally.
pub fn disable_timing() {
    ENABLED.store(false, Ordering::Relaxed);
}

/// Check if timing is enabled.
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed) || std::env::var("PF_TIMING").is_ok()
}

/// A scoped timer that records into an [`AccumulatingTimer`] when stopped.
pub struct Timer {
    start: Instant,
    enabled: bool,
}

impl Timer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
            enabled: is_enabled(),
        }
    }

    /// Stop the timer and return elapsed time in seconds.
    /// If timing is disabled, returns None.
    pub fn stop(self) -> Option<f64> {
        if self.enabled {
            Some(self.start.elapsed().as_secs_f64())
        } else {
            None
        }
    }

    /// Stop the timer and add the elapsed time to `sink`.
    pub fn stop_into(self, sink: &AccumulatingTimer) {
        if let Some(elapsed) = self.stop() {
            sink.record(elapsed);
        }
    }
}

/// Accumulating timer for tracking total time across multiple calls.
pub struct AccumulatingTimer {
    total_ns: AtomicU64,
    count: AtomicU64,
}

impl Default for AccumulatingTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl AccumulatingTimer {
    /// Create a new accumulating timer.
    pub const fn new() -> Self {
        Self {
            total_ns: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    /// Record a timing measurement.
    pub fn record(&self, duration_s: f64) {
        let nanos = (duration_s * 1e9) as u64;
        self.total_ns.fetch_add(nanos, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total time spent (in seconds).
    pub fn total_seconds(&self) -> f64 {
        self.total_ns.load(Ordering::Relaxed) as f64 / 1e9
    }

    /// Get number of calls.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Get average time per call (in seconds).
    pub fn average_seconds(&self) -> f64 {
        let count = self.count();
        if count > 0 {
            self.total_seconds() / count as f64
        } else {
            0.0
        }
    }

    /// Reset the timer.
    pub fn reset(&self) {
        self.total_ns.store(0, Ordering::Relaxed);
        self.count.store(0, Ordering::Relaxed);
    }
}

/// Per-pass timers for the ionization step.
pub mod ion_timing {
    use super::AccumulatingTimer;

    /// Shell weights + cumulative budget scan.
    pub static RADIUS_SOLVE: AccumulatingTimer = AccumulatingTimer::new();
    /// Neutral-fraction profile evaluation over all shells.
    pub static PROFILE_EVAL: AccumulatingTimer = AccumulatingTimer::new();
    /// Packet emission, resume and propagation.
    pub static TRANSPORT: AccumulatingTimer = AccumulatingTimer::new();
    /// Mean intensity + ionization balance update.
    pub static BALANCE: AccumulatingTimer = AccumulatingTimer::new();

    const ALL: [(&str, &AccumulatingTimer); 4] = [
        ("radius solve", &RADIUS_SOLVE),
        ("profile eval", &PROFILE_EVAL),
        ("transport", &TRANSPORT),
        ("balance", &BALANCE),
    ];

    /// Reset all ionization timers.
    pub fn reset_all() {
        for (_, timer) in ALL {
            timer.reset();
        }
    }

    /// Emit one tracing event per pass that has been timed.
    pub fn log_summary() {
        if !super::is_enabled() {
            return;
        }
        for (label, timer) in ALL {
            let count = timer.count();
            if count > 0 {
                tracing::info!(
                    pass = label,
                    calls = count,
                    total_s = timer.total_seconds(),
                    avg_ms = timer.average_seconds() * 1000.0,
                    "ionization timing"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulating_timer_averages() {
        let t = AccumulatingTimer::new();
        t.record(0.5);
        t.record(1.5);
        assert_eq!(t.count(), 2);
        assert!((t.total_seconds() - 2.0).abs() < 1e-9);
        assert!((t.average_seconds() - 1.0).abs() < 1e-9);
        t.reset();
        assert_eq!(t.count(), 0);
        assert_eq!(t.average_seconds(), 0.0);
    }
}
