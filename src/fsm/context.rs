//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to: the latest door sample, the session timer, the render cache
//! and the screen request for this tick.  The service owns it; nothing
//! here is global.

use crate::elapsed::{ElapsedText, ElapsedTimer};
use crate::render::RenderCache;

// ---------------------------------------------------------------------------
// Door sample (written by the service before each tick)
// ---------------------------------------------------------------------------

/// Level reported by the door sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DoorLevel {
    #[default]
    Closed,
    Open,
}

impl DoorLevel {
    pub fn from_open(open: bool) -> Self {
        if open { Self::Open } else { Self::Closed }
    }

    pub fn is_open(self) -> bool {
        self == Self::Open
    }
}

/// The reading from this tick paired with the one from the previous tick.
/// Transitions are driven by edges, not levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DoorSample {
    pub previous: DoorLevel,
    pub current: DoorLevel,
}

impl DoorSample {
    /// Closed on the previous tick, open on this one.
    pub fn opened(&self) -> bool {
        !self.previous.is_open() && self.current.is_open()
    }

    /// Open on the previous tick, closed on this one.
    pub fn closed(&self) -> bool {
        self.previous.is_open() && !self.current.is_open()
    }
}

// ---------------------------------------------------------------------------
// Screen request (written by state handlers; rendered by the service)
// ---------------------------------------------------------------------------

/// What the display should do after this tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenRequest {
    /// Full-screen "OPEN" alert.
    ShowAlert,
    /// Blank the screen at the start of a new session.
    ClearSession,
    /// Run the redraw policy for this elapsed string.
    ShowElapsed(ElapsedText),
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
#[derive(Debug)]
pub struct FsmContext {
    // -- Timing --
    /// Ticks elapsed since the current state was entered.
    pub ticks_in_state: u64,
    /// Monotonic total tick count.
    pub total_ticks: u64,
    /// Monotonic millisecond reading taken at the start of this tick.
    pub now_ms: u32,

    // -- Inputs --
    pub door: DoorSample,

    // -- Session --
    pub timer: ElapsedTimer,
    pub cache: RenderCache,

    // -- Output --
    /// Set by handlers, taken by the service after the tick.
    pub request: Option<ScreenRequest>,
}

impl FsmContext {
    /// Context for a board that booted at `now_ms`.  The previous door
    /// reading starts as closed, so a door that is already open produces
    /// an opening edge on the first tick.
    pub fn new(now_ms: u32) -> Self {
        Self {
            ticks_in_state: 0,
            total_ticks: 0,
            now_ms,
            door: DoorSample::default(),
            timer: ElapsedTimer::new(now_ms),
            cache: RenderCache::new(),
            request: None,
        }
    }

    /// Reset the session timer and the render cache together.
    pub fn begin_session(&mut self) {
        self.timer.restart(self.now_ms);
        self.cache.reset();
    }

    /// Whole seconds since the current session started.
    pub fn elapsed_secs(&self) -> u32 {
        self.timer.elapsed_secs(self.now_ms)
    }
}
