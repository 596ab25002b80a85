//! Timer service — the hexagonal core.
//!
//! [`TimerService`] owns the FSM, its context and the renderer.  All I/O
//! flows through port traits injected at call sites, so the whole poll
//! cycle runs on the host against fakes.
//!
//! ```text
//!  DoorSensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!       ClockPort ──▶ │      TimerService      │
//!                     │  FSM · RenderCache     │ ──▶ DisplaySurface
//!                     └────────────────────────┘
//! ```

use log::info;

use crate::config::TimerConfig;
use crate::error::Result;
use crate::fsm::context::FsmContext;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::render::Renderer;

use super::events::TimerEvent;
use super::ports::{ClockPort, DisplaySurface, DoorSensorPort, EventSink};

pub use crate::render::TickOutcome;

// ───────────────────────────────────────────────────────────────
// TimerService
// ───────────────────────────────────────────────────────────────

/// The timer service orchestrates all domain logic.
pub struct TimerService {
    fsm: Fsm,
    ctx: FsmContext,
    renderer: Renderer,
    config: TimerConfig,
}

impl TimerService {
    /// Construct the service for a board that booted at `now_ms`.
    /// Rejects a config that fails [`TimerConfig::validate`].
    ///
    /// Does **not** start the FSM; call [`start`](Self::start) next.
    pub fn new(config: TimerConfig, now_ms: u32) -> Result<Self> {
        config.validate()?;
        let renderer = Renderer::new(&config);
        let fsm = Fsm::new(build_state_table(), StateId::ClosedCounting);

        Ok(Self {
            fsm,
            ctx: FsmContext::new(now_ms),
            renderer,
            config,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Run the initial state's entry action (boot session reset).
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        // The first closed tick clears the screen anyway (first_run).
        self.ctx.request = None;
        sink.emit(&TimerEvent::Started(self.fsm.current_state()));
        info!("TimerService started in {:?}", self.fsm.current_state());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one poll: read the door → edge/transition → redraw.
    ///
    /// Errors are fatal to the caller: there is no fallback rendering path.
    pub fn tick(
        &mut self,
        sensor: &mut impl DoorSensorPort,
        clock: &impl ClockPort,
        display: &mut impl DisplaySurface,
        sink: &mut impl EventSink,
    ) -> Result<TickOutcome> {
        let level = sensor.read()?;
        let prev_state = self.fsm.current_state();

        self.ctx.now_ms = clock.now_ms();
        self.ctx.door.previous = self.ctx.door.current;
        self.ctx.door.current = level;

        if self.ctx.total_ticks == 0 {
            sink.emit(&TimerEvent::FirstReading(level));
        }

        // Captured before the FSM runs: a closing edge restarts the timer.
        let closed_for_secs = self.ctx.elapsed_secs();

        // 1. FSM tick (pure state logic)
        self.fsm.tick(&mut self.ctx);

        // 2. Render whatever the handlers asked for
        let outcome = match self.ctx.request.take() {
            Some(request) => self
                .renderer
                .apply(&request, &mut self.ctx.cache, display)?,
            None => TickOutcome::Unchanged,
        };

        // 3. Emit state change if the FSM moved
        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            match new_state {
                StateId::OpenAlert => sink.emit(&TimerEvent::DoorOpened { closed_for_secs }),
                StateId::ClosedCounting => sink.emit(&TimerEvent::DoorClosed),
            }
        }

        Ok(outcome)
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Whole seconds since the current session started, as of `now_ms`.
    pub fn elapsed_secs(&self, now_ms: u32) -> u32 {
        self.ctx.timer.elapsed_secs(now_ms)
    }

    /// Monotonic start of the current session.
    pub fn session_start_ms(&self) -> u32 {
        self.ctx.timer.start_ms()
    }

    /// The time string currently on screen (empty if none this session).
    pub fn displayed_text(&self) -> &str {
        self.ctx.cache.text()
    }

    /// Cached origin of the time string for this session.
    pub fn text_origin(&self) -> Option<embedded_graphics::geometry::Point> {
        self.ctx.cache.origin()
    }

    /// Ticks spent in the current state.
    pub fn ticks_in_state(&self) -> u64 {
        self.fsm.ticks_in_current_state()
    }

    /// Total ticks since start.
    pub fn total_ticks(&self) -> u64 {
        self.ctx.total_ticks
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Colour the time string is drawn in.
    pub fn accent(&self) -> embedded_graphics::pixelcolor::Rgb565 {
        self.renderer.accent()
    }
}
