//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing control-loop events through the
//! `log` facade.  The daemon routes the facade to syslog; tests use a
//! recording sink instead.

use log::{error, info};

use crate::app::events::FanEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`FanEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &FanEvent) {
        match event {
            FanEvent::Started => {
                info!("Fan control started");
            }
            FanEvent::SpeedChanged {
                temperature_c,
                duty,
            } => {
                info!(
                    "Temperature changed to {} setting speed to {}",
                    temperature_c, duty
                );
            }
            FanEvent::Fault(e) => {
                error!("Fan control fault: {}", e);
            }
            FanEvent::Stopped => {
                info!("Fan control stopped");
            }
        }
    }
}
