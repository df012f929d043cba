//! Host time adapter.
//!
//! Blocking sleep on the calling thread.  The control loop is
//! single-threaded, so nothing else runs while it waits.

use core::time::Duration;

use crate::app::ports::ClockPort;

#[derive(Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl ClockPort for SystemClock {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
