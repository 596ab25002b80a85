//! Timer configuration parameters
//!
//! Layout and timing for the door timer screen.  The layout numbers were
//! tuned on a 320×170 ST7789 panel; other resolutions need their own
//! values, which is why they live here rather than in the renderer.

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum title length in bytes.
pub const TITLE_CAPACITY: usize = 24;

const DEFAULT_TITLE: &str = "Door Timer";

/// Largest integer text scale the renderer accepts.
pub const MAX_TEXT_SCALE: u8 = 8;

/// Core timer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    // --- Timing ---
    /// Fixed delay between polling ticks (milliseconds)
    pub poll_interval_ms: u32,

    // --- Door sensor ---
    /// `true` when a HIGH input level means the door is open (active-low
    /// reed switch with pull-up)
    pub door_open_when_high: bool,

    // --- Title ---
    /// Static title drawn once per session
    pub title: String<TITLE_CAPACITY>,
    /// Title y offset from the top of the screen (px)
    pub title_top: u16,
    /// Title text scale
    pub title_scale: u8,

    // --- Elapsed time ---
    /// Time string text scale
    pub timer_scale: u8,
    /// Time string sits at (height - text height) / vertical_divisor
    pub vertical_divisor: u16,
    /// Width of the rectangle erased before each time redraw (px)
    pub erase_width: u16,
    /// Height of the rectangle erased before each time redraw (px)
    pub erase_height: u16,
    /// RGB components of the accent colour used for the time string
    pub accent_rgb: [u8; 3],

    // --- Alert ---
    /// "OPEN" label text scale
    pub alert_scale: u8,

    // --- Panel ---
    /// Panel rotation in quarter turns (0-3)
    pub rotation: u8,
}

impl Default for TimerConfig {
    fn default() -> Self {
        let mut title = String::new();
        // DEFAULT_TITLE is shorter than TITLE_CAPACITY.
        let _ = title.push_str(DEFAULT_TITLE);

        Self {
            // Timing
            poll_interval_ms: 200, // 5 Hz

            // Door sensor
            door_open_when_high: true,

            // Title
            title,
            title_top: 8,
            title_scale: 2,

            // Elapsed time
            timer_scale: 4,
            vertical_divisor: 3,
            erase_width: 300,
            erase_height: 70,
            accent_rgb: [255, 176, 0], // amber

            // Alert
            alert_scale: 6,

            // Panel
            rotation: 1, // landscape
        }
    }
}

impl TimerConfig {
    /// Range-check every field.  Rejects rather than clamps.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(Error::Config("poll_interval_ms must be > 0"));
        }
        for scale in [self.title_scale, self.timer_scale, self.alert_scale] {
            if scale == 0 || scale > MAX_TEXT_SCALE {
                return Err(Error::Config("text scale must be within 1..=8"));
            }
        }
        if self.vertical_divisor == 0 {
            return Err(Error::Config("vertical_divisor must be > 0"));
        }
        if self.erase_width == 0 || self.erase_height == 0 {
            return Err(Error::Config("erase rectangle must be non-empty"));
        }
        if self.rotation > 3 {
            return Err(Error::Config("rotation must be within 0..=3"));
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON override.  Missing fields keep
    /// their defaults; the result is validated.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON override"))?;
        config.validate()?;
        Ok(config)
    }
}
