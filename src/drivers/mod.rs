//! Actuator drivers and peripheral helpers.

pub mod fan;
pub mod sysfs_pwm;
