//! Timing of execution attempts

use chrono::{DateTime, Duration, Utc};
use std::time::Instant;

/// Start and end of an attempt. The timestamps are wall clock time, for reports; the elapsed time
/// comes from a monotonic clock, so it is never negative.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    /// When the attempt started
    pub started: DateTime<Utc>,
    /// When the attempt finished. Equal to `started` until [`Self::stop`].
    pub ended: DateTime<Utc>,
    clock: Instant,
    elapsed: Duration,
}

impl Timer {
    /// Start timing now
    pub fn start() -> Self {
        let now = Utc::now();
        Self {
            started: now,
            ended: now,
            clock: Instant::now(),
            elapsed: Duration::zero(),
        }
    }

    /// Stop timing, returning the elapsed time
    pub fn stop(&mut self) -> Duration {
        self.ended = Utc::now();
        self.elapsed =
            Duration::from_std(self.clock.elapsed()).unwrap_or_else(|_| Duration::max_value());
        self.elapsed
    }

    /// Time between start and stop
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// Format a duration in the unit that reads best
pub fn format_duration(duration: Duration) -> String {
    if let Some(ns) = duration.num_nanoseconds() {
        if ns < 500_000 {
            // 0 -> 500us, display as us
            format!("{:.3} μs", (ns as f64) / 1_000.0)
        } else if ns <= 500_000_000 {
            // 500us => 500ms, display as ms
            format!("{:.3} ms", (ns as f64) / 1_000_000.0)
        } else {
            // > 500ms, display as seconds
            format!("{:.3} s", (ns as f64) / 1_000_000_000.0)
        }
    } else {
        String::from("--- s")
    }
}
