//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                   |
//! |----------------|--------------------|-------------------------------|
//! | `hardware`     | SensorPort         | sysfs thermal zone            |
//! |                | ActuatorPort       | sysfs PWM channel             |
//! | `log_sink`     | EventSink          | `log` facade (syslog in prod) |
//! | `time`         | ClockPort          | `std::thread::sleep`          |
//! | `config_file`  | ConfigPort         | JSON file / defaults          |

pub mod config_file;
pub mod hardware;
pub mod log_sink;
pub mod time;
