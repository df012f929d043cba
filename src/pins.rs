//! Output channel assignments for the fan header.
//!
//! Single source of truth — the config defaults reference this module
//! rather than hard-coding channel numbers.
//!
//! On the Raspberry Pi, BCM GPIO 18 carries hardware PWM0 when the
//! `pwm` overlay is loaded (`dtoverlay=pwm,pin=18,func=2`), which the
//! kernel exposes as channel 0 of `/sys/class/pwm/pwmchip0`.

// ---------------------------------------------------------------------------
// Fan PWM
// ---------------------------------------------------------------------------

/// BCM GPIO driving the fan transistor.
pub const FAN_PWM_GPIO: u32 = 18;
/// sysfs PWM chip that owns [`FAN_PWM_GPIO`].
pub const FAN_PWM_CHIP: u32 = 0;
/// Channel index on [`FAN_PWM_CHIP`].
pub const FAN_PWM_CHANNEL: u32 = 0;
/// PWM base frequency.  100 Hz matches the common gpiozero default.
pub const FAN_PWM_FREQ_HZ: u32 = 100;

// ---------------------------------------------------------------------------
// Sysfs roots
// ---------------------------------------------------------------------------

/// Root of the kernel PWM class.
pub const PWM_SYSFS_ROOT: &str = "/sys/class/pwm";
/// Core temperature in millidegrees Celsius.
pub const CPU_THERMAL_ZONE: &str = "/sys/class/thermal/thermal_zone0/temp";
