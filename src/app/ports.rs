//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ FanService (domain)
//! ```
//!
//! Driven adapters (thermal sensor, PWM output, event sinks, clock, config
//! file) implement these traits.  The [`FanService`](super::service::FanService)
//! consumes them via generics, so the control loop never touches sysfs directly.

use core::time::Duration;

use crate::config::FanConfig;
use crate::error::{ActuatorError, SensorError};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain the core temperature.
pub trait SensorPort {
    /// Read the current core temperature in degrees Celsius.
    ///
    /// Every call performs a fresh read; implementations must not cache.
    fn read_temperature(&mut self) -> Result<f32, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command the fan.
pub trait ActuatorPort {
    /// Currently commanded duty cycle, 0.0–1.0.
    fn duty_cycle(&self) -> f32;

    /// Command a new duty cycle, 0.0–1.0.  Applied immediately, no ramping.
    fn set_duty_cycle(&mut self, duty: f32) -> Result<(), ActuatorError>;

    /// Give the output channel back to the OS on a clean shutdown.
    fn release(&mut self) {}
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`FanEvent`](super::events::FanEvent)s
/// through this port.  Adapters decide where they go (syslog, test
/// recorder, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::FanEvent);
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: domain → OS timer)
// ───────────────────────────────────────────────────────────────

/// Blocking sleep between control iterations.
pub trait ClockPort {
    fn sleep(&mut self, duration: Duration);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: startup config source → domain)
// ───────────────────────────────────────────────────────────────

/// Loads the startup configuration.
///
/// Implementations MUST validate before returning.  Invalid values are
/// rejected with [`ConfigError::ValidationFailed`], never silently clamped.
pub trait ConfigPort {
    /// Load configuration.  Returns [`FanConfig::default()`] if no stored
    /// config exists.
    fn load(&self) -> Result<FanConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations and startup validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config could not be deserialized.
    Corrupted,
    /// A config field failed validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error reading the config source.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
