//! Outbound application events.
//!
//! The [`FanService`](super::service::FanService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — syslog, a test recorder, etc.

use crate::error::Error;

/// Structured events emitted by the control loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FanEvent {
    /// The controller has started.
    Started,

    /// A new duty cycle was commanded.  Carries the single reading that
    /// produced the decision.
    SpeedChanged { temperature_c: f32, duty: f32 },

    /// The loop is about to stop because of this error.
    Fault(Error),

    /// The loop was asked to stop and exited cleanly.
    Stopped,
}
