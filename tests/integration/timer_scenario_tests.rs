//! End-to-end scenarios for the TimerService → renderer → panel pipeline.
//!
//! A full session history is driven through the real display adapter
//! with a scripted door and a manual clock.

use crate::mock_hw::{
    DrawCall, ManualClock, PANEL_HEIGHT, PANEL_WIDTH, RecordingDisplay, ScriptedDoor, VecSink,
};

use doortimer::app::events::TimerEvent;
use doortimer::app::ports::Decoration;
use doortimer::app::service::{TickOutcome, TimerService};
use doortimer::config::TimerConfig;
use doortimer::error::{DisplayError, Error, SensorError};
use doortimer::fsm::StateId;
use doortimer::fsm::context::DoorLevel;
use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use embedded_graphics::primitives::Rectangle;

const POLL_MS: u32 = 200;

/// "00:00:00" at scale 4 is 192×40 on a 320×170 panel, a third of the
/// way down the free space.
const TIME_ORIGIN: Point = Point::new(64, 43);
const TITLE_ORIGIN: Point = Point::new(100, 8);
const BOWL_ANCHOR: Point = Point::new(160, 117);

struct Rig {
    svc: TimerService,
    door: ScriptedDoor,
    clock: ManualClock,
    display: RecordingDisplay,
    sink: VecSink,
}

impl Rig {
    fn boot_at(now_ms: u32, level: DoorLevel) -> Self {
        let clock = ManualClock::at(now_ms);
        let mut sink = VecSink::default();
        let mut svc = TimerService::new(TimerConfig::default(), now_ms).unwrap();
        svc.start(&mut sink);
        Self {
            svc,
            door: ScriptedDoor::holding(level),
            clock,
            display: RecordingDisplay::new(),
            sink,
        }
    }

    fn boot(level: DoorLevel) -> Self {
        Self::boot_at(0, level)
    }

    fn try_tick(&mut self) -> Result<TickOutcome, Error> {
        self.clock.advance(POLL_MS);
        self.svc
            .tick(&mut self.door, &self.clock, &mut self.display, &mut self.sink)
    }

    fn tick(&mut self) -> TickOutcome {
        self.try_tick().unwrap()
    }

    fn accent(&self) -> Rgb565 {
        self.svc.accent()
    }

    fn time_call(&self, text: &str) -> DrawCall {
        DrawCall::Text {
            text: text.into(),
            origin: TIME_ORIGIN,
            scale: 4,
            color: self.accent(),
        }
    }
}

fn erase_call() -> DrawCall {
    DrawCall::FillRect(Rectangle::new(TIME_ORIGIN, Size::new(300, 70)), Rgb565::BLACK)
}

fn title_call() -> DrawCall {
    DrawCall::Text {
        text: "Door Timer".into(),
        origin: TITLE_ORIGIN,
        scale: 2,
        color: Rgb565::WHITE,
    }
}

// ── Boot with the door closed ─────────────────────────────────

#[test]
fn boot_closed_draws_title_once_then_zero() {
    let mut rig = Rig::boot(DoorLevel::Closed);
    assert!(rig.display.calls.is_empty(), "start must not draw");

    assert_eq!(rig.tick(), TickOutcome::Redrawn);
    let expected = vec![
        DrawCall::Clear(Rgb565::BLACK),
        title_call(),
        DrawCall::Decoration(Decoration::Bowl, BOWL_ANCHOR),
        rig.time_call("00:00:00"),
    ];
    assert_eq!(rig.display.take_calls(), expected);
    assert_eq!(rig.svc.displayed_text(), "00:00:00");
    assert_eq!(rig.svc.text_origin(), Some(TIME_ORIGIN));

    // Four more polls inside the same second: nothing to do.
    for _ in 0..3 {
        assert_eq!(rig.tick(), TickOutcome::Unchanged);
    }
    assert!(rig.display.calls.is_empty());

    let panel = rig.display.panel();
    let title_box = Rectangle::new(TITLE_ORIGIN, Size::new(120, 20));
    assert!(panel.count_in(title_box, Rgb565::WHITE) > 0);
    let time_box = Rectangle::new(TIME_ORIGIN, Size::new(192, 40));
    assert!(panel.count_in(time_box, rig.accent()) > 0);
}

#[test]
fn long_session_redraws_at_same_origin_after_erasing() {
    let mut rig = Rig::boot(DoorLevel::Closed);
    rig.tick();
    rig.display.take_calls();

    rig.clock.set(3_661_000 - POLL_MS);
    assert_eq!(rig.tick(), TickOutcome::Redrawn);

    assert_eq!(
        rig.display.take_calls(),
        vec![erase_call(), rig.time_call("01:01:01")]
    );
    assert_eq!(rig.svc.displayed_text(), "01:01:01");

    // Only the new string's pixels remain in the accent colour.
    let panel = rig.display.panel();
    let time_box = Rectangle::new(TIME_ORIGIN, Size::new(192, 40));
    let lit = panel.count(rig.accent());
    assert!(lit > 0);
    assert_eq!(panel.count_in(time_box, rig.accent()), lit);
}

#[test]
fn title_is_drawn_exactly_once_per_session() {
    let mut rig = Rig::boot(DoorLevel::Closed);
    for _ in 0..50 {
        rig.tick();
    }
    let calls = rig.display.take_calls();
    assert_eq!(RecordingDisplay::texts_named(&calls, "Door Timer").count(), 1);
    // 50 polls at 200 ms = 10 s: 00:00:00 through 00:00:10.
    let time_draws = calls
        .iter()
        .filter(|c| matches!(c, DrawCall::Text { scale: 4, .. }))
        .count();
    assert_eq!(time_draws, 11);
}

// ── Door opens ────────────────────────────────────────────────

#[test]
fn opening_shows_full_red_alert() {
    let mut rig = Rig::boot(DoorLevel::Closed);
    rig.tick();
    rig.clock.set(3_661_000 - POLL_MS);
    rig.tick();
    rig.display.take_calls();

    rig.door.set(DoorLevel::Open);
    assert_eq!(rig.tick(), TickOutcome::AlertShown);
    assert_eq!(rig.svc.state(), StateId::OpenAlert);
    assert_eq!(
        rig.display.take_calls(),
        vec![
            DrawCall::Clear(Rgb565::RED),
            DrawCall::Text {
                text: "OPEN".into(),
                origin: Point::new(88, 55),
                scale: 6,
                color: Rgb565::WHITE,
            },
        ]
    );

    let panel = rig.display.panel();
    assert_eq!(
        panel.count(Rgb565::RED) + panel.count(Rgb565::WHITE),
        (PANEL_WIDTH * PANEL_HEIGHT) as usize
    );
    assert!(panel.count(Rgb565::WHITE) > 0);
    assert_eq!(
        rig.sink.events.last(),
        Some(&TimerEvent::DoorOpened { closed_for_secs: 3661 })
    );
}

#[test]
fn alert_is_not_repainted_while_open() {
    let mut rig = Rig::boot(DoorLevel::Closed);
    rig.tick();
    rig.door.set(DoorLevel::Open);
    rig.tick();
    rig.display.take_calls();

    for _ in 0..20 {
        assert_eq!(rig.tick(), TickOutcome::Unchanged);
    }
    assert!(rig.display.calls.is_empty());
    assert_eq!(rig.svc.ticks_in_state(), 20);
}

#[test]
fn opening_leaves_session_start_untouched() {
    let mut rig = Rig::boot_at(5_000, DoorLevel::Closed);
    rig.tick();
    rig.door.set(DoorLevel::Open);
    rig.tick();
    assert_eq!(rig.svc.session_start_ms(), 5_000);
}

// ── Door closes ───────────────────────────────────────────────

#[test]
fn closing_clears_screen_and_restarts_at_zero() {
    let mut rig = Rig::boot(DoorLevel::Closed);
    rig.tick();
    rig.clock.set(3_661_000 - POLL_MS);
    rig.tick();
    rig.door.set(DoorLevel::Open);
    rig.tick();
    rig.display.take_calls();

    rig.door.set(DoorLevel::Closed);
    assert_eq!(rig.tick(), TickOutcome::SessionReset);
    assert_eq!(rig.display.take_calls(), vec![DrawCall::Clear(Rgb565::BLACK)]);
    assert_eq!(rig.svc.state(), StateId::ClosedCounting);
    assert_eq!(rig.svc.displayed_text(), "");
    assert_eq!(rig.sink.events.last(), Some(&TimerEvent::DoorClosed));

    // Next poll: fresh session, title again, nothing to erase.
    assert_eq!(rig.tick(), TickOutcome::Redrawn);
    let calls = rig.display.take_calls();
    assert_eq!(
        calls,
        vec![
            DrawCall::Clear(Rgb565::BLACK),
            title_call(),
            DrawCall::Decoration(Decoration::Bowl, BOWL_ANCHOR),
            rig.time_call("00:00:00"),
        ]
    );
}

#[test]
fn open_excursion_never_resumes_previous_count() {
    let mut rig = Rig::boot(DoorLevel::Closed);
    for _ in 0..25 {
        rig.tick();
    }
    assert_eq!(rig.svc.displayed_text(), "00:00:05");

    rig.door.set(DoorLevel::Open);
    for _ in 0..5 {
        rig.tick();
    }
    rig.door.set(DoorLevel::Closed);
    rig.tick();
    rig.tick();

    assert_eq!(rig.svc.displayed_text(), "00:00:00");
}

// ── Boot with the door open ───────────────────────────────────

#[test]
fn boot_open_alerts_on_first_poll() {
    let mut rig = Rig::boot(DoorLevel::Open);
    assert_eq!(rig.tick(), TickOutcome::AlertShown);
    assert_eq!(rig.svc.state(), StateId::OpenAlert);

    let calls = rig.display.take_calls();
    assert_eq!(RecordingDisplay::texts_named(&calls, "Door Timer").count(), 0);
    assert_eq!(RecordingDisplay::texts_named(&calls, "OPEN").count(), 1);
    assert_eq!(
        rig.sink.events,
        vec![
            TimerEvent::Started(StateId::ClosedCounting),
            TimerEvent::FirstReading(DoorLevel::Open),
            TimerEvent::DoorOpened { closed_for_secs: 0 },
        ]
    );
}

// ── Counter wraparound ────────────────────────────────────────

#[test]
fn elapsed_survives_millisecond_counter_wrap() {
    let mut rig = Rig::boot_at(u32::MAX - 999, DoorLevel::Closed);
    rig.tick();
    rig.clock.set(4_000);
    rig.tick();
    assert_eq!(rig.svc.displayed_text(), "00:00:05");
}

// ── Failures ──────────────────────────────────────────────────

#[test]
fn sensor_failure_is_fatal_for_the_tick() {
    let mut rig = Rig::boot(DoorLevel::Closed);
    rig.door.push(Err(SensorError::GpioReadFailed));
    assert_eq!(rig.try_tick(), Err(Error::Sensor(SensorError::GpioReadFailed)));
    assert!(rig.display.calls.is_empty());
}

#[test]
fn display_failure_is_reported() {
    let mut rig = Rig::boot(DoorLevel::Closed);
    rig.display.fail_writes = true;
    assert_eq!(rig.try_tick(), Err(Error::Display(DisplayError::BusWrite)));
}
