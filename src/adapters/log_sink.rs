//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing timer events to the ESP-IDF logger
//! (UART / USB-CDC in production).

use log::info;

use crate::app::events::TimerEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`TimerEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &TimerEvent) {
        match event {
            TimerEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
            TimerEvent::FirstReading(level) => {
                info!("DOOR  | boot level={:?}", level);
            }
            TimerEvent::DoorOpened { closed_for_secs } => {
                info!(
                    "DOOR  | opened after {}",
                    crate::elapsed::format_elapsed(*closed_for_secs)
                );
            }
            TimerEvent::DoorClosed => {
                info!("DOOR  | closed, timer restarted");
            }
        }
    }
}
