//! Injectable clock sources for CPU and system timing.
//!
//! The timer never reads the platform clock directly; it goes through a
//! [`ClockSource`], so tests can substitute a deterministic [`ManualClock`].
//!
//! Clock selection uses an enum rather than a trait object, which keeps the
//! hot path monomorphic and the source `Clone` for cheap duplication across
//! timer instances.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

/// Nanoseconds elapsed since a process-wide anchor instant.
///
/// The anchor is initialized on first use so readings from different clock
/// handles within one process are mutually comparable.
fn monotonic_now_ns() -> u64 {
    static ANCHOR: OnceLock<Instant> = OnceLock::new();
    let anchor = ANCHOR.get_or_init(Instant::now);
    anchor.elapsed().as_nanos() as u64
}

/// A deterministic clock for tests, advanced explicitly by the caller.
///
/// Handles are cheap to clone and share the same underlying counter, so a
/// test can hold one handle while the timer under test holds another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ns: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a manual clock starting at zero nanoseconds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by the given duration.
    pub fn advance(&self, by: Duration) {
        self.now_ns.fetch_add(by.as_nanos() as u64, Ordering::SeqCst);
    }

    /// Set the clock to an absolute nanosecond reading.
    pub fn set_ns(&self, ns: u64) {
        self.now_ns.store(ns, Ordering::SeqCst);
    }

    fn now_ns(&self) -> u64 {
        self.now_ns.load(Ordering::SeqCst)
    }
}

/// The clock a timer reads its timestamps from.
#[derive(Debug, Clone, Default)]
pub enum ClockSource {
    /// The platform's monotonic high-resolution clock (`std::time::Instant`).
    #[default]
    Monotonic,
    /// A deterministic, caller-advanced clock for tests.
    Manual(ManualClock),
}

impl ClockSource {
    /// Current reading in nanoseconds.
    #[inline]
    pub fn now_ns(&self) -> u64 {
        match self {
            ClockSource::Monotonic => monotonic_now_ns(),
            ClockSource::Manual(clock) => clock.now_ns(),
        }
    }

    /// Clock name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            ClockSource::Monotonic => "Instant",
            ClockSource::Manual(_) => "manual",
        }
    }

    /// Empirically estimate this clock's resolution in nanoseconds.
    ///
    /// Finds the minimum non-zero difference between consecutive reads.
    /// Returns zero for a manual clock, which only moves when advanced.
    pub fn resolution_ns(&self) -> u64 {
        if let ClockSource::Manual(_) = self {
            return 0;
        }

        let mut min_diff = u64::MAX;
        for _ in 0..1000 {
            let t1 = self.now_ns();
            let t2 = self.now_ns();
            let diff = t2.saturating_sub(t1);
            if diff > 0 && diff < min_diff {
                min_diff = diff;
            }
        }

        if min_diff == u64::MAX {
            // Never observed a tick within a read pair; fall back to 1ns.
            1
        } else {
            min_diff
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_never_goes_backwards() {
        let clock = ClockSource::Monotonic;
        let a = clock.now_ns();
        let b = clock.now_ns();
        assert!(b >= a);
    }

    #[test]
    fn monotonic_tracks_sleep() {
        let clock = ClockSource::Monotonic;
        let start = clock.now_ns();
        std::thread::sleep(Duration::from_millis(10));
        let elapsed = clock.now_ns() - start;
        assert!(elapsed >= 10_000_000, "elapsed_ns = {}", elapsed);
    }

    #[test]
    fn manual_clock_is_deterministic() {
        let clock = ManualClock::new();
        let source = ClockSource::Manual(clock.clone());
        assert_eq!(source.now_ns(), 0);

        clock.advance(Duration::from_millis(5));
        assert_eq!(source.now_ns(), 5_000_000);

        clock.set_ns(42);
        assert_eq!(source.now_ns(), 42);
    }

    #[test]
    fn manual_handles_share_state() {
        let clock = ManualClock::new();
        let source = ClockSource::Manual(clock.clone());
        clock.advance(Duration::from_nanos(7));
        assert_eq!(source.now_ns(), 7);
    }

    #[test]
    fn resolution_is_reasonable() {
        let resolution = ClockSource::Monotonic.resolution_ns();
        // Anything from sub-nanosecond rounding up to a coarse 1ms tick.
        assert!(resolution >= 1 && resolution < 1_000_000, "resolution_ns = {}", resolution);
    }
}
