//! DoorTimer Firmware — Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  GpioDoorSensor   Esp32TimeAdapter   EgDisplay<TftPanel>     │
//! │  (DoorSensorPort) (ClockPort)        (DisplaySurface)        │
//! │                   LogEventSink (EventSink)                   │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │            TimerService (pure logic)                   │  │
//! │  │  FSM · ElapsedTimer · RenderCache                      │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, PinDriver, Pull};
use esp_idf_hal::peripherals::Peripherals;
use log::{error, info, warn};

use doortimer::adapters::display::EgDisplay;
use doortimer::adapters::log_sink::LogEventSink;
use doortimer::adapters::time::Esp32TimeAdapter;
use doortimer::app::ports::ClockPort;
use doortimer::app::service::{TickOutcome, TimerService};
use doortimer::config::TimerConfig;
use doortimer::drivers::door_sensor::GpioDoorSensor;
use doortimer::drivers::tft::TftPanel;
use doortimer::pins;

/// Build-time JSON override, e.g.
/// `DOOR_TIMER_CONFIG_JSON='{"poll_interval_ms":100}' cargo build`.
const CONFIG_OVERRIDE: Option<&str> = option_env!("DOOR_TIMER_CONFIG_JSON");

fn load_config() -> TimerConfig {
    let Some(json) = CONFIG_OVERRIDE else {
        info!("Config: built-in defaults");
        return TimerConfig::default();
    };
    match TimerConfig::from_json(json) {
        Ok(cfg) => {
            info!("Config: build-time override applied");
            cfg
        }
        Err(e) => {
            warn!("Config override rejected ({}), using defaults", e);
            TimerConfig::default()
        }
    }
}

fn halt() -> ! {
    loop {
        FreeRtos::delay_ms(1_000);
    }
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  DoorTimer v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Config ─────────────────────────────────────────────
    let config = load_config();
    info!(
        "Layout: title='{}' scale {}/{}/{} divisor={} erase={}x{} rotation={}",
        config.title,
        config.title_scale,
        config.timer_scale,
        config.alert_scale,
        config.vertical_divisor,
        config.erase_width,
        config.erase_height,
        config.rotation
    );

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;

    // SAFETY: the door GPIO is claimed once, here; no other driver uses it.
    let door_pin = unsafe { AnyIOPin::new(pins::DOOR_SENSOR_GPIO) };
    let mut door_pin = PinDriver::input(door_pin)?;
    door_pin.set_pull(Pull::Up)?;
    let mut door = GpioDoorSensor::new(door_pin, config.door_open_when_high);

    let panel = match TftPanel::new(peripherals.spi2, config.rotation) {
        Ok(panel) => panel,
        Err(e) => {
            // No screen means nothing useful to do; stay put for the
            // serial console.
            error!("Display init failed: {}, halting", e);
            halt();
        }
    };
    let mut display = EgDisplay::new(panel);

    let clock = Esp32TimeAdapter::new();
    let mut log_sink = LogEventSink::new();

    // ── 4. Timer service ──────────────────────────────────────
    let poll_ms = config.poll_interval_ms;
    let mut service = TimerService::new(config, clock.now_ms())?;
    service.start(&mut log_sink);

    info!("Entering poll loop ({}ms)", poll_ms);

    // ── 5. Poll loop ──────────────────────────────────────────
    loop {
        match service.tick(&mut door, &clock, &mut display, &mut log_sink) {
            Ok(TickOutcome::Unchanged) => {}
            Ok(outcome) => log::trace!("tick: {:?}", outcome),
            Err(e) => {
                error!("Tick failed: {}, halting", e);
                halt();
            }
        }
        FreeRtos::delay_ms(poll_ms);
    }
}
