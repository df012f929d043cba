//! Integration tests for the FanService → ports pipeline.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use fancontrol::adapters::config_file::FileConfigAdapter;
use fancontrol::app::events::FanEvent;
use fancontrol::app::ports::ConfigError;
use fancontrol::app::service::{FanService, TickOutcome};
use fancontrol::config::FanConfig;
use fancontrol::error::{ActuatorError, Error, SensorError};

use crate::mock_hw::{MockHardware, RecordingSink, StopAfterClock};

fn make_service() -> FanService {
    FanService::new(FanConfig::default()).unwrap()
}

// ── Reference scenarios ───────────────────────────────────────

#[test]
fn reference_temperatures_map_to_expected_speeds() {
    let cases = [(39.9, 0.0), (50.0, 0.6), (65.0, 0.8), (70.0, 1.0)];
    for (temp, expected) in cases {
        let mut svc = make_service();
        let mut hw = MockHardware::with_temps(&[temp]);
        let mut sink = RecordingSink::new();

        svc.tick(&mut hw, &mut sink).unwrap();
        assert_eq!(hw.writes().last().copied().unwrap_or(0.0), expected, "temp {temp}");
    }
}

#[test]
fn bounded_run_logs_only_transitions() {
    let mut svc = make_service();
    let mut hw = MockHardware::with_temps(&[39.9, 50.0, 50.0, 65.0, 70.0, 70.0, 30.0]);
    let mut sink = RecordingSink::new();
    let stop = Arc::new(AtomicBool::new(false));
    let mut clock = StopAfterClock::new(7, Arc::clone(&stop));

    svc.run(&mut hw, &mut sink, &mut clock, &stop).unwrap();

    assert_eq!(hw.reads, 7, "one read per iteration");
    assert_eq!(hw.writes(), vec![0.6, 0.8, 1.0, 0.0]);
    assert_eq!(
        sink.speed_changes(),
        vec![(50.0, 0.6), (65.0, 0.8), (70.0, 1.0), (30.0, 0.0)]
    );
    assert_eq!(sink.events.last(), Some(&FanEvent::Stopped));
    assert_eq!(svc.tick_count(), 7);
    assert_eq!(svc.change_count(), 4);
    assert!(clock.sleeps.iter().all(|d| *d == Duration::from_secs(2)));
}

#[test]
fn steady_temperature_writes_once() {
    let mut svc = make_service();
    let mut hw = MockHardware::with_temps(&[66.0]);
    let mut sink = RecordingSink::new();

    let first = svc.tick(&mut hw, &mut sink).unwrap();
    let second = svc.tick(&mut hw, &mut sink).unwrap();

    assert!(matches!(first, TickOutcome::Changed { to, .. } if to == 0.9));
    assert_eq!(
        second,
        TickOutcome::Unchanged {
            temperature_c: 66.0,
            duty: 0.9
        }
    );
    assert_eq!(hw.writes(), vec![0.9]);
    assert_eq!(sink.events.len(), 1);
}

#[test]
fn preset_stop_runs_no_iterations() {
    let mut svc = make_service();
    let mut hw = MockHardware::with_temps(&[70.0]);
    let mut sink = RecordingSink::new();
    let stop = Arc::new(AtomicBool::new(true));
    let mut clock = StopAfterClock::new(1, Arc::clone(&stop));

    svc.run(&mut hw, &mut sink, &mut clock, &stop).unwrap();

    assert_eq!(hw.reads, 0);
    assert!(clock.sleeps.is_empty());
    assert_eq!(sink.events, vec![FanEvent::Stopped]);
}

// ── Fail-fast paths ───────────────────────────────────────────

#[test]
fn sensor_failure_stops_loop_and_is_logged() {
    let mut svc = make_service();
    let mut hw = MockHardware::with_script(vec![Ok(50.0), Err(SensorError::ReadFailed)]);
    let mut sink = RecordingSink::new();
    let stop = Arc::new(AtomicBool::new(false));
    let mut clock = StopAfterClock::new(100, Arc::clone(&stop));

    let err = svc.run(&mut hw, &mut sink, &mut clock, &stop).unwrap_err();

    assert_eq!(err, Error::Sensor(SensorError::ReadFailed));
    assert_eq!(clock.sleeps.len(), 1, "no retry after the failure");
    assert_eq!(sink.events.last(), Some(&FanEvent::Fault(err)));
}

#[test]
fn parse_failure_is_fatal() {
    let mut svc = make_service();
    let mut hw = MockHardware::with_script(vec![Err(SensorError::ParseFailed)]);
    let mut sink = RecordingSink::new();
    let stop = Arc::new(AtomicBool::new(false));
    let mut clock = StopAfterClock::new(100, Arc::clone(&stop));

    let err = svc.run(&mut hw, &mut sink, &mut clock, &stop).unwrap_err();

    assert_eq!(err, Error::Sensor(SensorError::ParseFailed));
    assert!(hw.calls.is_empty());
}

#[test]
fn actuator_failure_is_not_swallowed() {
    let mut svc = make_service();
    let mut hw = MockHardware::with_temps(&[70.0]);
    hw.fail_writes = true;
    let mut sink = RecordingSink::new();
    let stop = Arc::new(AtomicBool::new(false));
    let mut clock = StopAfterClock::new(100, Arc::clone(&stop));

    let err = svc.run(&mut hw, &mut sink, &mut clock, &stop).unwrap_err();

    assert_eq!(err, Error::Actuator(ActuatorError::PwmWriteFailed));
    assert_eq!(
        sink.events,
        vec![
            FanEvent::SpeedChanged {
                temperature_c: 70.0,
                duty: 1.0
            },
            FanEvent::Fault(err),
        ]
    );
}

// ── Startup validation ────────────────────────────────────────

#[test]
fn off_threshold_not_below_on_refuses_to_start() {
    for (on, off) in [(65.0, 65.0), (55.0, 65.0)] {
        let cfg = FanConfig {
            on_threshold_c: on,
            off_threshold_c: off,
            ..FanConfig::default()
        };
        let mut sink = RecordingSink::new();
        let result = FanService::start(cfg, &mut sink);

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::ValidationFailed(_)))
        ));
        assert_eq!(sink.events.first(), Some(&FanEvent::Started));
    }
}

#[test]
fn rejected_config_file_is_announced_then_faulted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fancontrol.json");
    std::fs::write(&path, r#"{ "on_threshold_c": 55.0, "off_threshold_c": 65.0 }"#).unwrap();
    let mut sink = RecordingSink::new();

    let err = FanService::load_and_start(&FileConfigAdapter::new(Some(path)), &mut sink)
        .err()
        .unwrap();

    assert!(matches!(err, Error::Config(ConfigError::ValidationFailed(_))));
    assert_eq!(sink.events, vec![FanEvent::Started, FanEvent::Fault(err)]);
}

#[test]
fn malformed_config_file_is_announced_then_faulted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fancontrol.json");
    std::fs::write(&path, "{ not json").unwrap();
    let mut sink = RecordingSink::new();

    let result = FanService::load_and_start(&FileConfigAdapter::new(Some(path)), &mut sink);

    assert!(result.is_err());
    assert_eq!(
        sink.events,
        vec![
            FanEvent::Started,
            FanEvent::Fault(Error::Config(ConfigError::Corrupted))
        ]
    );
}

#[test]
fn missing_config_file_starts_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = RecordingSink::new();

    let svc = FanService::load_and_start(
        &FileConfigAdapter::new(Some(dir.path().join("absent.json"))),
        &mut sink,
    )
    .unwrap();

    assert_eq!(svc.config(), &FanConfig::default());
    assert_eq!(sink.events, vec![FanEvent::Started]);
}

#[test]
fn thresholds_do_not_affect_mapping() {
    let cfg = FanConfig {
        on_threshold_c: 90.0,
        off_threshold_c: 10.0,
        ..FanConfig::default()
    };
    let mut svc = FanService::new(cfg).unwrap();
    let mut hw = MockHardware::with_temps(&[50.0]);
    let mut sink = RecordingSink::new();

    svc.tick(&mut hw, &mut sink).unwrap();
    assert_eq!(hw.writes(), vec![0.6]);
}
