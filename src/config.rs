//! System configuration parameters
//!
//! All tunable parameters for the fan controller.  Values are fixed at
//! process start: compiled-in defaults, optionally overridden by a JSON
//! file read once by [`FileConfigAdapter`](crate::adapters::config_file::FileConfigAdapter).

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::control::step_table::{MAX_STEPS, StepTable};
use crate::pins;

/// Reference step table thresholds (degrees Celsius).
pub const REFERENCE_TEMPS_C: [f32; 6] = [40.0, 45.0, 55.0, 60.0, 65.0, 68.0];
/// Reference step table duty cycles, paired by index with [`REFERENCE_TEMPS_C`].
pub const REFERENCE_DUTIES: [f32; 6] = [0.5, 0.6, 0.7, 0.8, 0.9, 1.0];

/// Output polarity of the fan channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Duty 1.0 drives the pin high for the whole period.
    #[default]
    ActiveHigh,
    /// Duty 1.0 drives the pin low for the whole period.
    ActiveLow,
}

/// Core fan controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FanConfig {
    // --- Thresholds ---
    /// Temperature (Celsius) at which the fan nominally turns on.
    /// Validated against `off_threshold_c` but not consulted by the step table.
    pub on_threshold_c: f32,
    /// Temperature (Celsius) at which the fan nominally turns off.
    pub off_threshold_c: f32,

    // --- Step table ---
    /// Ascending temperature thresholds (Celsius).
    pub step_temps_c: Vec<f32, MAX_STEPS>,
    /// Duty cycle (0.0-1.0) for each threshold, same length as `step_temps_c`.
    pub step_duties: Vec<f32, MAX_STEPS>,

    // --- Sensor ---
    /// File exposing the core temperature in millidegrees Celsius.
    pub sensor_path: String,

    // --- PWM output ---
    /// BCM GPIO number of the fan output (informational, logged at startup).
    pub pwm_gpio: u32,
    pub pwm_chip: u32,
    pub pwm_channel: u32,
    pub pwm_frequency_hz: u32,
    pub polarity: Polarity,

    // --- Timing ---
    /// Poll interval (milliseconds)
    pub poll_interval_ms: u32,
}

impl Default for FanConfig {
    fn default() -> Self {
        Self {
            // Thresholds
            on_threshold_c: 65.0,
            off_threshold_c: 55.0,

            // Step table
            step_temps_c: REFERENCE_TEMPS_C.iter().copied().collect(),
            step_duties: REFERENCE_DUTIES.iter().copied().collect(),

            // Sensor
            sensor_path: pins::CPU_THERMAL_ZONE.to_string(),

            // PWM
            pwm_gpio: pins::FAN_PWM_GPIO,
            pwm_chip: pins::FAN_PWM_CHIP,
            pwm_channel: pins::FAN_PWM_CHANNEL,
            pwm_frequency_hz: pins::FAN_PWM_FREQ_HZ,
            polarity: Polarity::ActiveHigh,

            // Timing
            poll_interval_ms: 2000, // 0.5 Hz
        }
    }
}

impl FanConfig {
    /// Check every startup invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validated_step_table().map(|_| ())
    }

    /// Check every startup invariant and hand back the step table built
    /// along the way.
    ///
    /// The OFF/ON ordering is enforced even though neither value feeds the
    /// step table.
    pub fn validated_step_table(&self) -> Result<StepTable, ConfigError> {
        if !self.on_threshold_c.is_finite() || !self.off_threshold_c.is_finite() {
            return Err(ConfigError::ValidationFailed(
                "on_threshold_c and off_threshold_c must be finite",
            ));
        }
        if self.off_threshold_c >= self.on_threshold_c {
            return Err(ConfigError::ValidationFailed(
                "off_threshold_c must be < on_threshold_c",
            ));
        }
        if !(100..=60_000).contains(&self.poll_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "poll_interval_ms must be 100–60000",
            ));
        }
        if !(1..=1_000_000).contains(&self.pwm_frequency_hz) {
            return Err(ConfigError::ValidationFailed(
                "pwm_frequency_hz must be 1–1000000",
            ));
        }
        if self.sensor_path.is_empty() {
            return Err(ConfigError::ValidationFailed("sensor_path must not be empty"));
        }
        self.step_table()
    }

    /// Build the step table from the two parallel sequences.
    pub fn step_table(&self) -> Result<StepTable, ConfigError> {
        StepTable::new(&self.step_temps_c, &self.step_duties)
    }
}
