//! Hardware adapter — bridges the real sensor and fan to domain port traits.
//!
//! Owns the [`ThermalZoneSensor`] and the [`FanDriver`], exposing them
//! through [`SensorPort`] and [`ActuatorPort`].  This is the only module
//! that the control loop reaches real sysfs through.

use log::{info, warn};

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::config::FanConfig;
use crate::drivers::fan::FanDriver;
use crate::drivers::sysfs_pwm::SysfsPwm;
use crate::error::{ActuatorError, SensorError};
use crate::pins;
use crate::sensors::temperature::ThermalZoneSensor;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sensor: ThermalZoneSensor,
    fan: FanDriver<SysfsPwm>,
}

impl HardwareAdapter {
    pub fn new(sensor: ThermalZoneSensor, fan: FanDriver<SysfsPwm>) -> Self {
        Self { sensor, fan }
    }

    /// Bind the configured sensor path and PWM channel under the real
    /// `/sys/class/pwm` root.
    pub fn open(config: &FanConfig) -> Result<Self, ActuatorError> {
        Self::open_at(pins::PWM_SYSFS_ROOT, config)
    }

    /// Like [`open`](Self::open) with an explicit PWM class root.
    pub fn open_at(
        pwm_root: impl AsRef<std::path::Path>,
        config: &FanConfig,
    ) -> Result<Self, ActuatorError> {
        let pwm = SysfsPwm::open(
            pwm_root,
            config.pwm_chip,
            config.pwm_channel,
            config.pwm_frequency_hz,
        )?;
        let fan = FanDriver::new(pwm, config.polarity)?;
        info!(
            "Fan on GPIO{} (pwmchip{}/pwm{}, {} Hz, {:?})",
            config.pwm_gpio,
            config.pwm_chip,
            config.pwm_channel,
            config.pwm_frequency_hz,
            config.polarity
        );
        Ok(Self::new(ThermalZoneSensor::new(&config.sensor_path), fan))
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_temperature(&mut self) -> Result<f32, SensorError> {
        self.sensor.read()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn duty_cycle(&self) -> f32 {
        self.fan.current_duty()
    }

    fn set_duty_cycle(&mut self, duty: f32) -> Result<(), ActuatorError> {
        self.fan.set(duty)
    }

    fn release(&mut self) {
        if let Err(e) = self.fan.pwm_mut().release() {
            warn!("Fan PWM release failed: {}", e);
        }
    }
}
