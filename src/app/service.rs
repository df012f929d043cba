//! Fan service — the hexagonal core.
//!
//! [`FanService`] owns the validated configuration and step table and runs
//! the polling control loop.  All I/O flows through port traits injected
//! at call sites, making the whole loop testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │       FanService        │
//! ActuatorPort ◀──│  StepTable · loop       │ ◀── ClockPort
//!                 └────────────────────────┘
//! ```
//!
//! The configured ON/OFF thresholds are checked at startup but never
//! consulted when picking a duty cycle; the step table alone decides.

use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;

use log::debug;

use crate::config::FanConfig;
use crate::control::step_table::StepTable;
use crate::error::Result;

use super::events::FanEvent;
use super::ports::{ActuatorPort, ClockPort, ConfigPort, EventSink, SensorPort};

/// What a single control iteration did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Target equals the current output; nothing was written or logged.
    Unchanged { temperature_c: f32, duty: f32 },
    /// A new duty cycle was logged and commanded.
    Changed {
        temperature_c: f32,
        from: f32,
        to: f32,
    },
}

// ───────────────────────────────────────────────────────────────
// FanService
// ───────────────────────────────────────────────────────────────

pub struct FanService {
    config: FanConfig,
    table: StepTable,
    interval: Duration,
    tick_count: u64,
    change_count: u64,
}

impl FanService {
    /// Validate `config` and build the service.
    ///
    /// Fails with [`Error::Config`](crate::error::Error::Config) if OFF >= ON or the step table is
    /// malformed; no control iteration can run in that case.
    pub fn new(config: FanConfig) -> Result<Self> {
        let table = config.validated_step_table()?;
        let interval = Duration::from_millis(u64::from(config.poll_interval_ms));

        Ok(Self {
            config,
            table,
            interval,
            tick_count: 0,
            change_count: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce startup, then validate.
    ///
    /// The startup event is emitted before validation so that a rejected
    /// configuration still leaves a trace in the log.
    pub fn start(config: FanConfig, sink: &mut impl EventSink) -> Result<Self> {
        Self::announce(sink, || Self::new(config))
    }

    /// Announce startup, then load and validate from `source`.
    ///
    /// Load failures are reported the same way as [`start`](Self::start)
    /// reports validation failures.
    pub fn load_and_start(
        source: &impl ConfigPort,
        sink: &mut impl EventSink,
    ) -> Result<Self> {
        Self::announce(sink, || Self::new(source.load()?))
    }

    fn announce(
        sink: &mut impl EventSink,
        build: impl FnOnce() -> Result<Self>,
    ) -> Result<Self> {
        sink.emit(&FanEvent::Started);
        match build() {
            Ok(service) => {
                debug!(
                    "FanService started: {} steps, interval {:?}",
                    service.table.len(),
                    service.interval
                );
                Ok(service)
            }
            Err(e) => {
                sink.emit(&FanEvent::Fault(e));
                Err(e)
            }
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control iteration: read → map → compare → maybe write.
    ///
    /// The temperature is read exactly once and the same value drives
    /// both the decision and the log message.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) -> Result<TickOutcome> {
        self.tick_count += 1;

        let temperature_c = hw.read_temperature()?;
        let target = self.table.compute_speed(temperature_c);
        let current = hw.duty_cycle();

        if target == current {
            return Ok(TickOutcome::Unchanged {
                temperature_c,
                duty: current,
            });
        }

        sink.emit(&FanEvent::SpeedChanged {
            temperature_c,
            duty: target,
        });
        hw.set_duty_cycle(target)?;
        self.change_count += 1;

        Ok(TickOutcome::Changed {
            temperature_c,
            from: current,
            to: target,
        })
    }

    /// Tick, sleep, repeat until `stop` is raised.
    ///
    /// Any error ends the loop: it is emitted as [`FanEvent::Fault`] and
    /// returned.  There is no retry.
    pub fn run(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
        clock: &mut impl ClockPort,
        stop: &AtomicBool,
    ) -> Result<()> {
        while !stop.load(Ordering::Acquire) {
            if let Err(e) = self.tick(hw, sink) {
                sink.emit(&FanEvent::Fault(e));
                return Err(e);
            }
            clock.sleep(self.interval);
        }

        debug!(
            "FanService stopping after {} ticks, {} changes",
            self.tick_count, self.change_count
        );
        sink.emit(&FanEvent::Stopped);
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn config(&self) -> &FanConfig {
        &self.config
    }

    pub fn table(&self) -> &StepTable {
        &self.table
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn change_count(&self) -> u64 {
        self.change_count
    }
}
