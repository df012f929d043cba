//! Linux sysfs PWM channel.
//!
//! Drives one channel of a `/sys/class/pwm/pwmchipN` controller:
//!
//! ```text
//! pwmchip0/export        ← "0"        (creates pwm0/)
//! pwmchip0/pwm0/period   ← ns per cycle
//! pwmchip0/pwm0/duty_cycle ← active ns per cycle
//! pwmchip0/pwm0/enable   ← "1"
//! ```
//!
//! The channel always runs with `normal` polarity; inversion for
//! active-low wiring is done by [`FanDriver`](super::fan::FanDriver).
//! A channel that is dropped without [`release`](SysfsPwm::release),
//! including one whose setup failed part-way, is released on drop.
//! Implements [`embedded_hal::pwm::SetDutyCycle`] so the fan driver
//! stays generic over the output.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use embedded_hal::pwm::{ErrorKind, ErrorType, SetDutyCycle};
use log::{debug, error, info, warn};

use crate::error::ActuatorError;

const NANOS_PER_SEC: u64 = 1_000_000_000;
/// Udev may take a moment to create the channel directory after export.
const EXPORT_POLL_ATTEMPTS: u32 = 10;
const EXPORT_POLL_INTERVAL: Duration = Duration::from_millis(20);

impl embedded_hal::pwm::Error for ActuatorError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

pub struct SysfsPwm {
    chip_dir: PathBuf,
    channel_dir: PathBuf,
    channel: u32,
    period_ns: u64,
    exported_here: bool,
    active: bool,
}

impl SysfsPwm {
    /// Export (if needed), configure and enable `pwmchip{chip}/pwm{channel}`
    /// under `root`, starting at 0 % duty.
    pub fn open(
        root: impl AsRef<Path>,
        chip: u32,
        channel: u32,
        frequency_hz: u32,
    ) -> Result<Self, ActuatorError> {
        if frequency_hz == 0 {
            return Err(ActuatorError::ExportFailed);
        }
        let chip_dir = root.as_ref().join(format!("pwmchip{chip}"));
        let channel_dir = chip_dir.join(format!("pwm{channel}"));

        let mut exported_here = false;
        if !channel_dir.is_dir() {
            write_attr(&chip_dir.join("export"), &channel.to_string())
                .map_err(|_| ActuatorError::ExportFailed)?;
            exported_here = true;
            wait_for_dir(&channel_dir)?;
        }

        let pwm = Self {
            chip_dir,
            channel_dir,
            channel,
            period_ns: NANOS_PER_SEC / u64::from(frequency_hz),
            exported_here,
            active: true,
        };
        pwm.configure()?;
        info!(
            "pwm: {} enabled, period={}ns",
            pwm.channel_dir.display(),
            pwm.period_ns
        );
        Ok(pwm)
    }

    fn configure(&self) -> Result<(), ActuatorError> {
        // duty_cycle must never exceed period, so zero it before resizing.
        self.write("enable", "0")
            .and_then(|()| self.write("duty_cycle", "0"))
            .and_then(|()| self.write("period", &self.period_ns.to_string()))
            .and_then(|()| self.write("polarity", "normal"))
            .and_then(|()| self.write("enable", "1"))
            .map_err(|_| ActuatorError::ExportFailed)
    }

    pub fn period_ns(&self) -> u64 {
        self.period_ns
    }

    pub fn channel_dir(&self) -> &Path {
        &self.channel_dir
    }

    /// Disable the output and unexport the channel if this process exported it.
    ///
    /// Unexport is attempted even when disabling fails.
    pub fn release(&mut self) -> Result<(), ActuatorError> {
        self.active = false;
        let disabled = self.write("enable", "0");
        if self.exported_here {
            self.exported_here = false;
            write_attr(&self.chip_dir.join("unexport"), &self.channel.to_string())?;
        }
        disabled?;
        info!("pwm: {} released", self.channel_dir.display());
        Ok(())
    }

    fn write(&self, attr: &str, value: &str) -> Result<(), ActuatorError> {
        write_attr(&self.channel_dir.join(attr), value)
    }
}

impl Drop for SysfsPwm {
    fn drop(&mut self) {
        if self.active {
            if let Err(e) = self.release() {
                warn!("pwm: release on drop failed: {}", e);
            }
        }
    }
}

impl ErrorType for SysfsPwm {
    type Error = ActuatorError;
}

impl SetDutyCycle for SysfsPwm {
    fn max_duty_cycle(&self) -> u16 {
        u16::MAX
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        let active_ns = self.period_ns * u64::from(duty) / u64::from(u16::MAX);
        debug!("pwm: duty_cycle={}ns", active_ns);
        self.write("duty_cycle", &active_ns.to_string())
    }
}

fn write_attr(path: &Path, value: &str) -> Result<(), ActuatorError> {
    fs::write(path, value).map_err(|e| {
        error!("pwm: write {} <- {} failed: {}", path.display(), value, e);
        ActuatorError::PwmWriteFailed
    })
}

fn wait_for_dir(dir: &Path) -> Result<(), ActuatorError> {
    for _ in 0..EXPORT_POLL_ATTEMPTS {
        if dir.is_dir() {
            return Ok(());
        }
        thread::sleep(EXPORT_POLL_INTERVAL);
    }
    error!("pwm: {} did not appear after export", dir.display());
    Err(ActuatorError::ExportFailed)
}
