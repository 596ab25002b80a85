//! Outbound timer events.
//!
//! The [`TimerService`](super::service::TimerService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.

use crate::fsm::StateId;
use crate::fsm::context::DoorLevel;

/// Structured events emitted by the timer core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// The service has started (carries initial state).
    Started(StateId),

    /// The door opened after being closed for `closed_for_secs`.
    DoorOpened { closed_for_secs: u32 },

    /// The door closed; a new session started.
    DoorClosed,

    /// Level seen on the first tick after boot.
    FirstReading(DoorLevel),
}
