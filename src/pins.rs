//! GPIO / peripheral pin assignments for the door timer board.
//!
//! Single source of truth: the panel bring-up and the door sensor both
//! reference this module rather than hard-coding pin numbers.
//!
//! Defaults match an ESP32-S3 wired to a 1.9" 320×170 ST7789 module.

// ---------------------------------------------------------------------------
// Door sensor (reed switch to GND, internal pull-up)
// ---------------------------------------------------------------------------

/// Digital input: HIGH = door open (magnet away), LOW = door closed.
pub const DOOR_SENSOR_GPIO: i32 = 1;

// ---------------------------------------------------------------------------
// TFT panel (ST7789, SPI2)
// ---------------------------------------------------------------------------

pub const TFT_SCLK_GPIO: i32 = 12;
pub const TFT_MOSI_GPIO: i32 = 11;
pub const TFT_CS_GPIO: i32 = 10;
/// Data/command select.
pub const TFT_DC_GPIO: i32 = 13;
pub const TFT_RST_GPIO: i32 = 14;
/// Backlight enable (active HIGH).
pub const TFT_BACKLIGHT_GPIO: i32 = 38;
/// Panel power rail enable (active HIGH).
pub const TFT_POWER_GPIO: i32 = 15;

// ---------------------------------------------------------------------------
// Panel geometry
// ---------------------------------------------------------------------------

/// Native (portrait) panel width in pixels.
pub const TFT_WIDTH: u16 = 170;
/// Native (portrait) panel height in pixels.
pub const TFT_HEIGHT: u16 = 320;
/// Column offset of the 170-pixel window inside the 240-column controller RAM.
pub const TFT_COL_OFFSET: u16 = 35;
/// SPI clock for the panel.
pub const TFT_SPI_FREQ_HZ: u32 = 40_000_000;
