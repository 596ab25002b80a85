//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements       | Connects to                     |
//! |--------------|------------------|---------------------------------|
//! | `display`    | DisplaySurface   | Any embedded-graphics Rgb565 target |
//! | `log_sink`   | EventSink        | Serial log output               |
//! | `time`       | ClockPort        | ESP32 system timer              |
//!
//! The door sensor adapter lives in [`crate::drivers::door_sensor`] next to
//! the other pin-level code.

pub mod display;
pub mod log_sink;
pub mod time;
