//! FanControl library.
//!
//! Exposes the control loop, step table, and Linux sysfs adapters for
//! integration testing.  The daemon in `main.rs` only wires these
//! together and installs the syslog backend.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod pins;
pub mod sensors;
