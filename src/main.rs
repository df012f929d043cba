//! FanControl daemon — main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  HardwareAdapter      LogEventSink   SystemClock         │
//! │  (Sensor+Actuator)    (EventSink)    (ClockPort)         │
//! │  FileConfigAdapter (ConfigPort)                          │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ───────────────     │
//! │                                                          │
//! │     ┌──────────────────────────────────────────┐         │
//! │     │     FanService (step table · loop)       │         │
//! │     └──────────────────────────────────────────┘         │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::env;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

use anyhow::{Context, Result, anyhow};
use log::{LevelFilter, info};
use syslog::{BasicLogger, Facility, Formatter3164};

use fancontrol::adapters::config_file::FileConfigAdapter;
use fancontrol::adapters::hardware::HardwareAdapter;
use fancontrol::adapters::log_sink::LogEventSink;
use fancontrol::adapters::time::SystemClock;
use fancontrol::app::ports::ActuatorPort;
use fancontrol::app::service::FanService;

/// Syslog identifier for every message from this process.
const SYSLOG_IDENT: &str = "FAN_CONTROL";
/// Fallback config location when no CLI argument is given.
const CONFIG_ENV: &str = "FANCONTROL_CONFIG";

/// Never raised by the daemon itself; the process ends on an external signal.
static STOP: AtomicBool = AtomicBool::new(false);

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    init_syslog()?;

    // ── 2. Configuration + service (announces startup, then loads) ──
    let config_path = env::args_os()
        .nth(1)
        .or_else(|| env::var_os(CONFIG_ENV))
        .map(PathBuf::from);
    let mut sink = LogEventSink::new();
    let mut service = FanService::load_and_start(&FileConfigAdapter::new(config_path), &mut sink)
        .context("loading configuration")?;

    // ── 3. Hardware ───────────────────────────────────────────
    let mut hw = HardwareAdapter::open(service.config()).context("binding fan output")?;
    let mut clock = SystemClock::new();

    info!(
        "Polling {} every {:?}",
        service.config().sensor_path,
        service.interval()
    );

    // ── 4. Control loop ───────────────────────────────────────
    let result = service.run(&mut hw, &mut sink, &mut clock, &STOP);
    hw.release();
    result?;
    Ok(())
}

fn init_syslog() -> Result<()> {
    let formatter = Formatter3164 {
        facility: Facility::LOG_LOCAL0,
        hostname: None,
        process: SYSLOG_IDENT.into(),
        pid: std::process::id(),
    };
    let logger = syslog::unix(formatter).map_err(|e| anyhow!("syslog unavailable: {e}"))?;
    log::set_boxed_logger(Box::new(BasicLogger::new(logger)))
        .map(|()| log::set_max_level(LevelFilter::Info))?;
    Ok(())
}
