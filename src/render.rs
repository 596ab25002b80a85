//! Redraw policy for the timer screen.
//!
//! The panel is slow to repaint, so the renderer keeps a [`RenderCache`]
//! and touches as few pixels as possible:
//!
//! 1. First tick of a session: clear, draw the title once.
//! 2. First time string of a session: measure it, cache its origin and
//!    draw the bowl under it.
//! 3. Afterwards: erase and redraw the time only when the string changed.
//!
//! Session resets (boot, door closed) go through
//! [`FsmContext::begin_session`](crate::fsm::context::FsmContext::begin_session).

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::pixelcolor::{Rgb565, Rgb888, RgbColor};
use embedded_graphics::primitives::Rectangle;
use log::debug;

use crate::app::ports::{Decoration, DisplaySurface, centre_offset};
use crate::config::TimerConfig;
use crate::elapsed::ElapsedText;
use crate::error::Result;
use crate::fsm::context::ScreenRequest;

pub const BACKGROUND: Rgb565 = Rgb565::BLACK;
pub const TITLE_COLOUR: Rgb565 = Rgb565::WHITE;
pub const ALERT_BACKGROUND: Rgb565 = Rgb565::RED;
pub const ALERT_TEXT: Rgb565 = Rgb565::WHITE;

const ALERT_LABEL: &str = "OPEN";

/// Gap between the bottom of the erase rectangle and the bowl.
const BOWL_GAP: i32 = 4;

// ---------------------------------------------------------------------------
// Render cache
// ---------------------------------------------------------------------------

/// What is currently on the screen for this session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderCache {
    text: ElapsedText,
    origin: Option<Point>,
    first_run: bool,
}

impl Default for RenderCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderCache {
    pub fn new() -> Self {
        Self {
            text: ElapsedText::new(),
            origin: None,
            first_run: true,
        }
    }

    /// Forget everything drawn; the next tick repaints from scratch.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The last time string drawn (empty before the first draw).
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Cached top-left of the time string, once measured.
    pub fn origin(&self) -> Option<Point> {
        self.origin
    }

    /// `true` until the title has been drawn for this session.
    pub fn first_run(&self) -> bool {
        self.first_run
    }

    pub(crate) fn mark_drawn(&mut self, text: &str) {
        self.text.clear();
        // Both strings share ElapsedText's capacity.
        let _ = self.text.push_str(text);
    }
}

// ---------------------------------------------------------------------------
// Tick outcome
// ---------------------------------------------------------------------------

/// What a tick did to the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing visible changed.
    Unchanged,
    /// Title and/or time string were drawn.
    Redrawn,
    /// The "OPEN" alert was painted.
    AlertShown,
    /// The screen was cleared for a new session.
    SessionReset,
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Applies [`ScreenRequest`]s to a [`DisplaySurface`].
#[derive(Debug, Clone)]
pub struct Renderer {
    config: TimerConfig,
    /// Derived once from `config.accent_rgb`.
    accent: Rgb565,
}

impl Renderer {
    pub fn new(config: &TimerConfig) -> Self {
        let [r, g, b] = config.accent_rgb;
        Self {
            config: config.clone(),
            accent: Rgb565::from(Rgb888::new(r, g, b)),
        }
    }

    /// Colour of the time string.
    pub fn accent(&self) -> Rgb565 {
        self.accent
    }

    pub fn apply(
        &self,
        request: &ScreenRequest,
        cache: &mut RenderCache,
        display: &mut impl DisplaySurface,
    ) -> Result<TickOutcome> {
        match request {
            ScreenRequest::ShowAlert => {
                self.draw_alert(display)?;
                Ok(TickOutcome::AlertShown)
            }
            ScreenRequest::ClearSession => {
                display.clear(BACKGROUND)?;
                Ok(TickOutcome::SessionReset)
            }
            ScreenRequest::ShowElapsed(text) => self.draw_elapsed(text, cache, display),
        }
    }

    fn draw_alert(&self, display: &mut impl DisplaySurface) -> Result<()> {
        display.clear(ALERT_BACKGROUND)?;
        display.draw_text_centered(ALERT_LABEL, self.config.alert_scale, ALERT_TEXT)?;
        Ok(())
    }

    fn draw_elapsed(
        &self,
        text: &str,
        cache: &mut RenderCache,
        display: &mut impl DisplaySurface,
    ) -> Result<TickOutcome> {
        let mut outcome = TickOutcome::Unchanged;

        if cache.first_run {
            display.clear(BACKGROUND)?;
            display.draw_text_hcentered(
                self.config.title.as_str(),
                i32::from(self.config.title_top),
                self.config.title_scale,
                TITLE_COLOUR,
            )?;
            cache.first_run = false;
            outcome = TickOutcome::Redrawn;
        }

        if text.is_empty() {
            return Ok(outcome);
        }

        let origin = match cache.origin {
            Some(origin) => origin,
            None => {
                let origin = self.time_origin(text, display);
                cache.origin = Some(origin);
                display.draw_decoration(Decoration::Bowl, self.bowl_anchor(origin, display))?;
                origin
            }
        };

        if cache.text() == text {
            return Ok(outcome);
        }

        // A fresh session has nothing to erase: the screen was just cleared.
        if !cache.text().is_empty() {
            let erase = Rectangle::new(
                origin,
                Size::new(
                    u32::from(self.config.erase_width),
                    u32::from(self.config.erase_height),
                ),
            );
            display.fill_rect(erase, BACKGROUND)?;
        }
        display.draw_text(text, origin, self.config.timer_scale, self.accent)?;
        cache.mark_drawn(text);
        debug!("time redrawn: {}", text);

        Ok(TickOutcome::Redrawn)
    }

    /// Horizontally centred; vertically at `(height - text) / divisor`
    /// from the top, leaving room for the bowl below.
    fn time_origin(&self, text: &str, display: &impl DisplaySurface) -> Point {
        let bounds = display.measure_text(text, self.config.timer_scale);
        let screen = display.size();
        let free = screen.height.saturating_sub(bounds.height);
        Point::new(
            centre_offset(screen.width, bounds.width),
            (free / u32::from(self.config.vertical_divisor)) as i32,
        )
    }

    fn bowl_anchor(&self, origin: Point, display: &impl DisplaySurface) -> Point {
        Point::new(
            (display.size().width / 2) as i32,
            origin.y + i32::from(self.config.erase_height) + BOWL_GAP,
        )
    }
}
