//! Error types for timer state-machine violations.

/// One of the three independent timing channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// CPU wall-clock domain (high-resolution monotonic clock).
    Cpu,
    /// GPU device domain (event timing via an installed backend).
    Gpu,
    /// Coarse system domain (steady clock, whole milliseconds).
    System,
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Domain::Cpu => write!(f, "CPU"),
            Domain::Gpu => write!(f, "GPU"),
            Domain::System => write!(f, "system"),
        }
    }
}

/// Error type for start/end calls that violate a domain's state machine.
///
/// Only the CPU and GPU domains raise these; the system domain absorbs
/// misuse silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// Start was called while an interval was already in flight.
    AlreadyRunning(Domain),
    /// End was called with no interval in flight.
    NotRunning(Domain),
}

impl std::fmt::Display for TimerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimerError::AlreadyRunning(domain) => {
                write!(f, "{} timer already started", domain)
            }
            TimerError::NotRunning(domain) => write!(f, "{} timer not started", domain),
        }
    }
}

impl std::error::Error for TimerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_domain() {
        assert_eq!(
            TimerError::AlreadyRunning(Domain::Cpu).to_string(),
            "CPU timer already started"
        );
        assert_eq!(
            TimerError::NotRunning(Domain::Gpu).to_string(),
            "GPU timer not started"
        );
    }
}
