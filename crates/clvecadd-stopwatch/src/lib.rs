//! Wall-clock stopwatch for measuring a single bracketed interval.
//!
//! A [`Stopwatch`] holds two readings of the wall clock, taken by
//! [`Stopwatch::start`] and [`Stopwatch::stop`], and reports their difference
//! in seconds. It is meant to be created per measurement, used once, and
//! discarded.
//!
//! # Examples
//!
//! ```
//! use clvecadd_stopwatch::Stopwatch;
//!
//! let mut watch = Stopwatch::new();
//! watch.start();
//! let _sum: u64 = (0..1_000u64).sum();
//! watch.stop();
//!
//! assert!(watch.elapsed() >= 0.0);
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time as seconds since the Unix epoch.
///
/// Resolution is one microsecond (`secs + micros * 1e-6`). A system clock set
/// before the epoch reads as `0.0`.
pub fn wall_clock_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0.0, |since| since.as_secs() as f64 + f64::from(since.subsec_micros()) * 1.0e-6)
}

/// Start/stop pair of wall-clock readings.
///
/// Both readings default to `0.0`, so [`elapsed`](Self::elapsed) on a fresh
/// stopwatch returns `0.0`. Ordering is not checked: calling `stop` before
/// `start` simply yields a negative interval.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stopwatch {
    start: f64,
    stop: f64,
}

impl Stopwatch {
    /// Create a stopwatch with both readings at `0.0`.
    pub const fn new() -> Self {
        Self { start: 0.0, stop: 0.0 }
    }

    /// Record the current wall-clock instant as the start point.
    pub fn start(&mut self) {
        self.start = wall_clock_seconds();
    }

    /// Record the current wall-clock instant as the stop point.
    pub fn stop(&mut self) {
        self.stop = wall_clock_seconds();
    }

    /// Seconds between the start and stop readings.
    pub fn elapsed(&self) -> f64 {
        self.stop - self.start
    }
}
