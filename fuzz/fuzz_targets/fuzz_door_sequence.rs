//! Fuzz target: door edge handling and redraw policy
//!
//! Each input byte is one poll: bit 0 is the door level, the rest is the
//! clock advance in 64 ms units.  Verifies:
//! - No panics across arbitrary edge sequences and counter wraps
//! - The state always mirrors the last level read
//! - While closed, the displayed string is the formatted elapsed time
//!
//! cargo fuzz run fuzz_door_sequence

#![no_main]

use std::cell::Cell;

use doortimer::app::events::TimerEvent;
use doortimer::app::ports::{ClockPort, Decoration, DisplaySurface, DoorSensorPort, EventSink};
use doortimer::app::service::TimerService;
use doortimer::config::TimerConfig;
use doortimer::elapsed::format_elapsed;
use doortimer::error::{DisplayError, SensorError};
use doortimer::fsm::StateId;
use doortimer::fsm::context::DoorLevel;
use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::Rectangle;
use libfuzzer_sys::fuzz_target;

struct NullDisplay;

impl DisplaySurface for NullDisplay {
    fn size(&self) -> Size {
        Size::new(320, 170)
    }
    fn clear(&mut self, _: Rgb565) -> Result<(), DisplayError> {
        Ok(())
    }
    fn fill_rect(&mut self, _: Rectangle, _: Rgb565) -> Result<(), DisplayError> {
        Ok(())
    }
    fn measure_text(&self, text: &str, scale: u8) -> Size {
        Size::new(6 * text.len() as u32, 10) * u32::from(scale)
    }
    fn draw_text(&mut self, _: &str, _: Point, _: u8, _: Rgb565) -> Result<(), DisplayError> {
        Ok(())
    }
    fn draw_decoration(&mut self, _: Decoration, _: Point) -> Result<(), DisplayError> {
        Ok(())
    }
}

struct Level(DoorLevel);

impl DoorSensorPort for Level {
    fn read(&mut self) -> Result<DoorLevel, SensorError> {
        Ok(self.0)
    }
}

struct Clock(Cell<u32>);

impl ClockPort for Clock {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _: &TimerEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let Some((&seed, polls)) = data.split_first() else {
        return;
    };
    // Start near the wrap point for high seeds.
    let boot = u32::MAX - u32::from(seed) * 16_000;
    let clock = Clock(Cell::new(boot));
    let Ok(mut svc) = TimerService::new(TimerConfig::default(), boot) else {
        return;
    };
    svc.start(&mut Discard);

    for &byte in polls {
        let open = byte & 1 == 1;
        clock.0.set(clock.0.get().wrapping_add(u32::from(byte >> 1) * 64));
        let mut door = Level(DoorLevel::from_open(open));
        if svc.tick(&mut door, &clock, &mut NullDisplay, &mut Discard).is_err() {
            return;
        }

        if open {
            assert_eq!(svc.state(), StateId::OpenAlert);
        } else {
            assert_eq!(svc.state(), StateId::ClosedCounting);
            let shown = svc.displayed_text();
            if !shown.is_empty() {
                assert_eq!(shown, format_elapsed(svc.elapsed_secs(clock.0.get())).as_str());
            }
        }
    }
});
