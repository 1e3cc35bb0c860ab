//! # phase-timer
//!
//! Per-phase stopwatch instrumentation for compute pipelines, measuring
//! elapsed time on three independent clock domains:
//!
//! - **CPU**: host wall-clock time via the platform monotonic clock,
//!   reported in fractional milliseconds.
//! - **GPU**: device time via a pluggable event-timer backend; inert
//!   (flag discipline only, nothing measured) when no backend is installed.
//! - **System**: coarse steady-clock time in whole milliseconds.
//!
//! The CPU and GPU domains are strict: starting a running domain or ending
//! an idle one fails with a [`TimerError`]. The system domain is advisory
//! and absorbs misuse silently. The three domains never affect each other.
//!
//! ## Quick Start
//!
//! ```
//! use phase_timer::PerfTimer;
//!
//! let mut timer = PerfTimer::new();
//!
//! timer.start_cpu_timer()?;
//! expensive_phase();
//! timer.end_cpu_timer()?;
//!
//! println!("phase: {:.3}ms", timer.prev_cpu_elapsed_ms());
//! # fn expensive_phase() {}
//! # Ok::<(), phase_timer::TimerError>(())
//! ```
//!
//! ## Deterministic tests
//!
//! The clock is injected, so tests can drive time explicitly:
//!
//! ```
//! use phase_timer::{ClockSource, ManualClock, PerfTimer};
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let mut timer = PerfTimer::with_clock(ClockSource::Manual(clock.clone()));
//!
//! timer.start_cpu_timer()?;
//! clock.advance(Duration::from_millis(5));
//! assert_eq!(timer.end_cpu_timer()?, 5.0);
//! # Ok::<(), phase_timer::TimerError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod clock;
mod error;
mod gpu;
mod timer;

pub use clock::{ClockSource, ManualClock};
pub use error::{Domain, TimerError};
pub use gpu::{DeviceTimer, GpuBackend};
pub use timer::{ElapsedReadings, PerfTimer};

/// Time a closure on a fresh CPU timer and return its result and elapsed
/// milliseconds.
///
/// Convenience wrapper for one-off measurements where holding a
/// [`PerfTimer`] across phases is not needed.
///
/// ```
/// let (sum, ms) = phase_timer::time_cpu(|| (0..1000u64).sum::<u64>());
/// assert_eq!(sum, 499_500);
/// assert!(ms >= 0.0);
/// ```
pub fn time_cpu<F, T>(f: F) -> (T, f32)
where
    F: FnOnce() -> T,
{
    let mut timer = PerfTimer::new();
    // A fresh timer is idle in every domain, so neither call can fail.
    let _ = timer.start_cpu_timer();
    let value = f();
    let elapsed_ms = timer.end_cpu_timer().unwrap_or_default();
    (value, elapsed_ms)
}
