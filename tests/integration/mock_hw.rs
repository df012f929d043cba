//! Mock hardware adapter for integration tests.
//!
//! Replays a scripted sequence of sensor results and records every
//! actuator call so tests can assert on the full command history.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use fancontrol::app::events::FanEvent;
use fancontrol::app::ports::{ActuatorPort, ClockPort, EventSink, SensorPort};
use fancontrol::error::{ActuatorError, SensorError};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    SetDuty(f32),
    Release,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    script: Vec<Result<f32, SensorError>>,
    pub reads: usize,
    duty: f32,
    pub calls: Vec<ActuatorCall>,
    pub fail_writes: bool,
}

#[allow(dead_code)]
impl MockHardware {
    /// Replay `temps` in order; the last entry repeats once exhausted.
    pub fn with_temps(temps: &[f32]) -> Self {
        Self::with_script(temps.iter().copied().map(Ok).collect())
    }

    pub fn with_script(script: Vec<Result<f32, SensorError>>) -> Self {
        assert!(!script.is_empty(), "script needs at least one reading");
        Self {
            script,
            reads: 0,
            duty: 0.0,
            calls: Vec::new(),
            fail_writes: false,
        }
    }

    pub fn writes(&self) -> Vec<f32> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ActuatorCall::SetDuty(d) => Some(*d),
                ActuatorCall::Release => None,
            })
            .collect()
    }
}

impl SensorPort for MockHardware {
    fn read_temperature(&mut self) -> Result<f32, SensorError> {
        let idx = self.reads.min(self.script.len() - 1);
        self.reads += 1;
        self.script[idx]
    }
}

impl ActuatorPort for MockHardware {
    fn duty_cycle(&self) -> f32 {
        self.duty
    }

    fn set_duty_cycle(&mut self, duty: f32) -> Result<(), ActuatorError> {
        if self.fail_writes {
            return Err(ActuatorError::PwmWriteFailed);
        }
        self.calls.push(ActuatorCall::SetDuty(duty));
        self.duty = duty;
        Ok(())
    }

    fn release(&mut self) {
        self.calls.push(ActuatorCall::Release);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<FanEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn speed_changes(&self) -> Vec<(f32, f32)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                FanEvent::SpeedChanged {
                    temperature_c,
                    duty,
                } => Some((*temperature_c, *duty)),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &FanEvent) {
        self.events.push(*event);
    }
}

// ── StopAfterClock ────────────────────────────────────────────

/// Records requested sleeps and raises `stop` after `limit` of them.
pub struct StopAfterClock {
    pub sleeps: Vec<Duration>,
    limit: usize,
    stop: Arc<AtomicBool>,
}

impl StopAfterClock {
    pub fn new(limit: usize, stop: Arc<AtomicBool>) -> Self {
        Self {
            sleeps: Vec::new(),
            limit,
            stop,
        }
    }
}

impl ClockPort for StopAfterClock {
    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
        if self.sleeps.len() >= self.limit {
            self.stop.store(true, Ordering::Release);
        }
    }
}
