//! Port traits — the hexagonal boundary between the timer core and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ TimerService (domain)
//! ```
//!
//! Driven adapters (display, door sensor, clock, event sink) implement
//! these traits.  The [`TimerService`](super::service::TimerService)
//! consumes them via generics, so the core never touches hardware and
//! every test can swap in a recording fake.

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::Rectangle;

use crate::error::{DisplayError, SensorError};
use crate::fsm::context::DoorLevel;

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → panel)
// ───────────────────────────────────────────────────────────────

/// Static illustrations the panel adapter knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoration {
    /// Food bowl drawn under the elapsed time.  The anchor is the
    /// top-centre of the bowl.
    Bowl,
}

/// Narrow drawing capability consumed by the renderer.
///
/// Text is drawn with its top-left corner at `origin`, using the panel's
/// base font multiplied by an integer `scale`.
pub trait DisplaySurface {
    /// Screen size in pixels after rotation.
    fn size(&self) -> Size;

    /// Fill the whole screen.
    fn clear(&mut self, color: Rgb565) -> Result<(), DisplayError>;

    /// Fill a rectangle; parts outside the screen are clipped.
    fn fill_rect(&mut self, area: Rectangle, color: Rgb565) -> Result<(), DisplayError>;

    /// Bounding box size of `text` at `scale`.
    fn measure_text(&self, text: &str, scale: u8) -> Size;

    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        scale: u8,
        color: Rgb565,
    ) -> Result<(), DisplayError>;

    fn draw_decoration(&mut self, decoration: Decoration, anchor: Point) -> Result<(), DisplayError>;

    /// Draw `text` centred horizontally with its top edge at `top`.
    /// Returns the origin used.
    fn draw_text_hcentered(
        &mut self,
        text: &str,
        top: i32,
        scale: u8,
        color: Rgb565,
    ) -> Result<Point, DisplayError> {
        let bounds = self.measure_text(text, scale);
        let origin = Point::new(centre_offset(self.size().width, bounds.width), top);
        self.draw_text(text, origin, scale, color)?;
        Ok(origin)
    }

    /// Draw `text` centred on both axes.  Returns the origin used.
    fn draw_text_centered(
        &mut self,
        text: &str,
        scale: u8,
        color: Rgb565,
    ) -> Result<Point, DisplayError> {
        let bounds = self.measure_text(text, scale);
        let top = centre_offset(self.size().height, bounds.height);
        self.draw_text_hcentered(text, top, scale, color)
    }
}

/// Offset that centres `inner` within `outer`.  Negative when `inner`
/// is larger (the text is then clipped equally on both sides).
pub fn centre_offset(outer: u32, inner: u32) -> i32 {
    (outer as i32 - inner as i32) / 2
}

// ───────────────────────────────────────────────────────────────
// Door sensor port (driven adapter: GPIO → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the door reed switch.
pub trait DoorSensorPort {
    fn read(&mut self) -> Result<DoorLevel, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Free-running monotonic millisecond counter.  Wraps at `u32::MAX`.
pub trait ClockPort {
    fn now_ms(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`TimerEvent`](super::events::TimerEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::TimerEvent);
}
