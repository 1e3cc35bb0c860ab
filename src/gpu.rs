//! Pluggable device-side timing backends.
//!
//! GPU intervals cannot be measured with a host clock: the device executes
//! asynchronously, so timing has to go through the device runtime's own
//! event mechanism. That mechanism is abstracted behind [`DeviceTimer`] so
//! the timer itself stays runtime-agnostic.
//!
//! When no device backend is installed, [`GpuBackend::Inert`] keeps the GPU
//! start/end calls as no-ops layered on the usual running-flag discipline,
//! so caller code does not need to branch on backend availability.

/// Device-side event timer, implemented per compute runtime.
///
/// `record_end` is expected to synchronize with the device (blocking until
/// the work between the two recorded events has completed) before reporting
/// the elapsed time.
pub trait DeviceTimer: Send {
    /// Record the start event on the device's command stream.
    fn record_start(&mut self);

    /// Record the end event, wait for it, and return elapsed milliseconds.
    fn record_end(&mut self) -> f32;

    /// Backend name for diagnostics.
    fn name(&self) -> &'static str {
        "device"
    }
}

/// The GPU timing backend installed on a timer.
#[derive(Default)]
pub enum GpuBackend {
    /// No device available; GPU timing calls keep their flag discipline but
    /// measure nothing.
    #[default]
    Inert,
    /// A live device event timer.
    Device(Box<dyn DeviceTimer>),
}

impl GpuBackend {
    /// Install a boxed device timer.
    pub fn device<T: DeviceTimer + 'static>(timer: T) -> Self {
        GpuBackend::Device(Box::new(timer))
    }

    /// Whether a real device backend is installed.
    pub fn is_inert(&self) -> bool {
        matches!(self, GpuBackend::Inert)
    }

    /// Record the start event, if a device is present.
    #[inline]
    pub(crate) fn record_start(&mut self) {
        if let GpuBackend::Device(timer) = self {
            timer.record_start();
        }
    }

    /// Record the end event and return elapsed milliseconds.
    ///
    /// `None` means no device backend is installed and nothing was measured.
    #[inline]
    pub(crate) fn record_end(&mut self) -> Option<f32> {
        match self {
            GpuBackend::Inert => None,
            GpuBackend::Device(timer) => Some(timer.record_end()),
        }
    }

    /// Backend name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            GpuBackend::Inert => "inert",
            GpuBackend::Device(timer) => timer.name(),
        }
    }
}

impl std::fmt::Debug for GpuBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GpuBackend")
            .field("name", &self.name())
            .finish()
    }
}
