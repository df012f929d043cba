//! PWM fan driver.
//!
//! Tracks the commanded duty fraction and translates it into channel ticks
//! for any [`SetDutyCycle`] output.  Active-low wiring is handled here by
//! inverting the level (`1 - duty`), so the rest of the system always
//! reasons in "fraction of full speed".
//!
//! The driver is a dumb actuator: no smoothing, no ramping.  A set is
//! written immediately and the commanded value only changes once the
//! write succeeds.

use embedded_hal::pwm::SetDutyCycle;
use log::error;

use crate::config::Polarity;
use crate::error::ActuatorError;

pub struct FanDriver<P> {
    pwm: P,
    polarity: Polarity,
    duty: f32,
}

impl<P: SetDutyCycle> FanDriver<P> {
    /// Take ownership of `pwm` and drive it to the "off" level.
    pub fn new(pwm: P, polarity: Polarity) -> Result<Self, ActuatorError> {
        let mut fan = Self {
            pwm,
            polarity,
            duty: 0.0,
        };
        fan.write_level(0.0)?;
        Ok(fan)
    }

    /// Command a duty fraction.  Values outside 0.0–1.0 are clamped; NaN is
    /// treated as 0.0.
    pub fn set(&mut self, duty: f32) -> Result<(), ActuatorError> {
        let duty = if duty.is_nan() { 0.0 } else { duty.clamp(0.0, 1.0) };
        self.write_level(duty)?;
        self.duty = duty;
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), ActuatorError> {
        self.set(0.0)
    }

    pub fn current_duty(&self) -> f32 {
        self.duty
    }

    pub fn is_running(&self) -> bool {
        self.duty > 0.0
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn pwm_mut(&mut self) -> &mut P {
        &mut self.pwm
    }

    fn write_level(&mut self, duty: f32) -> Result<(), ActuatorError> {
        let level = match self.polarity {
            Polarity::ActiveHigh => duty,
            Polarity::ActiveLow => 1.0 - duty,
        };
        let ticks = (level * f32::from(self.pwm.max_duty_cycle())).round() as u16;
        self.pwm.set_duty_cycle(ticks).map_err(|e| {
            error!("fan: PWM write of {} ticks failed: {:?}", ticks, e);
            ActuatorError::PwmWriteFailed
        })
    }
}
