//! Pin-level drivers: the door reed switch and the TFT panel.

pub mod door_sensor;
#[cfg(target_os = "espidf")]
pub mod tft;
