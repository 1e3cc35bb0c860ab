//! Per-phase stopwatch over three independent clock domains.
//!
//! [`PerfTimer`] tracks an Idle/Running state per domain and latches the
//! elapsed time of the most recently completed interval:
//!
//! - **CPU** — host wall-clock time in fractional milliseconds (f32),
//!   strict contract: misuse is an error.
//! - **GPU** — device event time via the installed [`GpuBackend`], same
//!   strict contract; inert when no device backend is present.
//! - **System** — coarse steady-clock time in whole milliseconds (u64,
//!   truncated), lenient contract: misuse is silently absorbed. The system
//!   timer is advisory and must never abort caller code.
//!
//! Errors are validated before any timestamp is captured, so a rejected
//! call leaves the timer exactly as it was.

use serde::{Deserialize, Serialize};

use crate::clock::ClockSource;
use crate::error::{Domain, TimerError};
use crate::gpu::GpuBackend;

const NS_PER_MS: f64 = 1_000_000.0;

/// Snapshot of the last completed duration in each domain.
///
/// Values are zero for domains that have never completed a cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ElapsedReadings {
    /// Last CPU interval in fractional milliseconds.
    pub cpu_ms: f32,
    /// Last GPU interval in fractional milliseconds.
    pub gpu_ms: f32,
    /// Last system interval in whole milliseconds.
    pub sys_ms: u64,
}

/// Stopwatch for per-phase timing across the CPU, GPU, and system domains.
///
/// Each domain is fully independent: starting or ending one never affects
/// the others' running state or latched duration. A fresh timer has all
/// domains idle and all readings at zero.
///
/// The type is deliberately not `Clone`: an instance is the single owner of
/// its in-flight intervals and of any device timer handle, and duplicating
/// that state mid-flight is meaningless.
///
/// ```compile_fail
/// let timer = phase_timer::PerfTimer::new();
/// let copy = timer.clone();
/// ```
///
/// # Example
///
/// ```
/// use phase_timer::PerfTimer;
///
/// let mut timer = PerfTimer::new();
/// timer.start_cpu_timer()?;
/// // ... phase under measurement ...
/// timer.end_cpu_timer()?;
/// println!("phase took {:.3}ms", timer.prev_cpu_elapsed_ms());
/// # Ok::<(), phase_timer::TimerError>(())
/// ```
#[derive(Debug, Default)]
pub struct PerfTimer {
    clock: ClockSource,
    gpu: GpuBackend,

    cpu_running: bool,
    gpu_running: bool,
    sys_running: bool,

    cpu_start_ns: u64,
    sys_start_ns: u64,

    prev_cpu_ms: f32,
    prev_gpu_ms: f32,
    prev_sys_ms: u64,
}

impl PerfTimer {
    /// Create a timer on the platform monotonic clock with no GPU backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a timer reading timestamps from the given clock source.
    ///
    /// Useful for deterministic tests with a [`ManualClock`](crate::ManualClock).
    pub fn with_clock(clock: ClockSource) -> Self {
        Self {
            clock,
            ..Self::default()
        }
    }

    /// Install a GPU backend, consuming and returning the timer.
    pub fn with_gpu_backend(mut self, gpu: GpuBackend) -> Self {
        self.gpu = gpu;
        self
    }

    // -----------------------------------------------------------------
    // CPU domain (strict)
    // -----------------------------------------------------------------

    /// Start the CPU interval.
    ///
    /// # Errors
    ///
    /// [`TimerError::AlreadyRunning`] if the CPU domain is already running.
    #[inline]
    pub fn start_cpu_timer(&mut self) -> Result<(), TimerError> {
        if self.cpu_running {
            return Err(TimerError::AlreadyRunning(Domain::Cpu));
        }
        self.cpu_running = true;
        self.cpu_start_ns = self.clock.now_ns();
        Ok(())
    }

    /// End the CPU interval and latch its elapsed milliseconds.
    ///
    /// # Errors
    ///
    /// [`TimerError::NotRunning`] if the CPU domain is idle. The error path
    /// captures no timestamp and mutates nothing.
    #[inline]
    pub fn end_cpu_timer(&mut self) -> Result<f32, TimerError> {
        if !self.cpu_running {
            return Err(TimerError::NotRunning(Domain::Cpu));
        }
        let end_ns = self.clock.now_ns();
        let elapsed_ms = (end_ns.saturating_sub(self.cpu_start_ns) as f64 / NS_PER_MS) as f32;
        self.prev_cpu_ms = elapsed_ms;
        self.cpu_running = false;
        Ok(elapsed_ms)
    }

    // -----------------------------------------------------------------
    // GPU domain (strict, backend-dependent)
    // -----------------------------------------------------------------

    /// Start the GPU interval.
    ///
    /// With a device backend installed this records the start event on the
    /// device; with the inert backend only the running flag changes, so
    /// caller code stays backend-agnostic.
    ///
    /// # Errors
    ///
    /// [`TimerError::AlreadyRunning`] if the GPU domain is already running.
    #[inline]
    pub fn start_gpu_timer(&mut self) -> Result<(), TimerError> {
        if self.gpu_running {
            return Err(TimerError::AlreadyRunning(Domain::Gpu));
        }
        self.gpu_running = true;
        self.gpu.record_start();
        Ok(())
    }

    /// End the GPU interval.
    ///
    /// With a device backend this synchronizes with the device and latches
    /// the reported elapsed milliseconds. With the inert backend nothing is
    /// measured and the previous reading is left in place.
    ///
    /// Returns the latched GPU reading.
    ///
    /// # Errors
    ///
    /// [`TimerError::NotRunning`] if the GPU domain is idle.
    #[inline]
    pub fn end_gpu_timer(&mut self) -> Result<f32, TimerError> {
        if !self.gpu_running {
            return Err(TimerError::NotRunning(Domain::Gpu));
        }
        if let Some(elapsed_ms) = self.gpu.record_end() {
            self.prev_gpu_ms = elapsed_ms;
        }
        self.gpu_running = false;
        Ok(self.prev_gpu_ms)
    }

    // -----------------------------------------------------------------
    // System domain (lenient)
    // -----------------------------------------------------------------

    /// Start the system interval.
    ///
    /// Calling this while already running is a silent no-op; the first
    /// recorded start timestamp wins.
    #[inline]
    pub fn start_sys_timer(&mut self) {
        if self.sys_running {
            return;
        }
        self.sys_running = true;
        self.sys_start_ns = self.clock.now_ns();
    }

    /// End the system interval and latch its elapsed whole milliseconds.
    ///
    /// Calling this while idle is a silent no-op: the stored duration is
    /// left unchanged and no error is raised.
    #[inline]
    pub fn end_sys_timer(&mut self) {
        if !self.sys_running {
            return;
        }
        self.sys_running = false;
        let end_ns = self.clock.now_ns();
        // Integer truncation, not rounding: 1.999ms reads as 1ms.
        self.prev_sys_ms = end_ns.saturating_sub(self.sys_start_ns) / NS_PER_MS as u64;
    }

    // -----------------------------------------------------------------
    // Readers
    // -----------------------------------------------------------------

    /// Elapsed milliseconds of the last completed CPU interval, zero if none.
    #[inline]
    pub fn prev_cpu_elapsed_ms(&self) -> f32 {
        self.prev_cpu_ms
    }

    /// Elapsed milliseconds of the last completed GPU interval, zero if none.
    #[inline]
    pub fn prev_gpu_elapsed_ms(&self) -> f32 {
        self.prev_gpu_ms
    }

    /// Elapsed whole milliseconds of the last completed system interval,
    /// zero if none.
    #[inline]
    pub fn prev_sys_elapsed_ms(&self) -> u64 {
        self.prev_sys_ms
    }

    /// Whether a CPU interval is in flight.
    pub fn cpu_timer_running(&self) -> bool {
        self.cpu_running
    }

    /// Whether a GPU interval is in flight.
    pub fn gpu_timer_running(&self) -> bool {
        self.gpu_running
    }

    /// Whether a system interval is in flight.
    pub fn sys_timer_running(&self) -> bool {
        self.sys_running
    }

    /// Snapshot of all three last-completed durations.
    pub fn readings(&self) -> ElapsedReadings {
        ElapsedReadings {
            cpu_ms: self.prev_cpu_ms,
            gpu_ms: self.prev_gpu_ms,
            sys_ms: self.prev_sys_ms,
        }
    }

    /// The clock source this timer reads from.
    pub fn clock(&self) -> &ClockSource {
        &self.clock
    }

    /// The installed GPU backend.
    pub fn gpu_backend(&self) -> &GpuBackend {
        &self.gpu
    }
}
