//! Reed-switch driver wired into the timer service.
//!
//! Exercises the embedded-hal pin path the firmware uses on the board:
//! a pulled-up input that reads HIGH while the door is open.

use std::cell::Cell;
use std::rc::Rc;

use crate::mock_hw::{ManualClock, RecordingDisplay, VecSink};

use doortimer::app::ports::DoorSensorPort;
use doortimer::app::service::{TickOutcome, TimerService};
use doortimer::config::TimerConfig;
use doortimer::drivers::door_sensor::GpioDoorSensor;
use doortimer::fsm::StateId;
use doortimer::fsm::context::DoorLevel;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin};

/// Input pin whose level the test flips from outside.
#[derive(Clone)]
struct SharedPin(Rc<Cell<bool>>);

impl ErrorType for SharedPin {
    type Error = ErrorKind;
}

impl InputPin for SharedPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.get())
    }
}

#[test]
fn pull_up_wiring_reads_closed_when_low() {
    let level = Rc::new(Cell::new(false));
    let mut sensor = GpioDoorSensor::new(SharedPin(level.clone()), true);
    assert_eq!(sensor.read(), Ok(DoorLevel::Closed));
    level.set(true);
    assert_eq!(sensor.read(), Ok(DoorLevel::Open));
}

#[test]
fn pin_edges_drive_the_state_machine() {
    let level = Rc::new(Cell::new(false));
    let config = TimerConfig::default();
    let mut sensor = GpioDoorSensor::new(SharedPin(level.clone()), config.door_open_when_high);
    let clock = ManualClock::at(0);
    let mut display = RecordingDisplay::new();
    let mut sink = VecSink::default();
    let mut svc = TimerService::new(config, 0).unwrap();
    svc.start(&mut sink);

    let mut poll = |svc: &mut TimerService| {
        clock.advance(200);
        svc.tick(&mut sensor, &clock, &mut display, &mut sink).unwrap()
    };

    assert_eq!(poll(&mut svc), TickOutcome::Redrawn);
    level.set(true);
    assert_eq!(poll(&mut svc), TickOutcome::AlertShown);
    assert_eq!(svc.state(), StateId::OpenAlert);
    assert_eq!(poll(&mut svc), TickOutcome::Unchanged);
    level.set(false);
    assert_eq!(poll(&mut svc), TickOutcome::SessionReset);
    assert_eq!(svc.state(), StateId::ClosedCounting);
}

#[test]
fn inverted_polarity_is_honoured() {
    let level = Rc::new(Cell::new(true));
    let config = TimerConfig {
        door_open_when_high: false,
        ..TimerConfig::default()
    };
    let mut sensor = GpioDoorSensor::new(SharedPin(level), config.door_open_when_high);
    let clock = ManualClock::at(0);
    let mut display = RecordingDisplay::new();
    let mut sink = VecSink::default();
    let mut svc = TimerService::new(config, 0).unwrap();
    svc.start(&mut sink);

    clock.advance(200);
    svc.tick(&mut sensor, &clock, &mut display, &mut sink).unwrap();
    assert_eq!(svc.state(), StateId::ClosedCounting);
}
