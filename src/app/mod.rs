//! Application core — pure domain logic, zero I/O.
//!
//! The door timer's rules live here: edge-triggered door handling,
//! session timing and the redraw policy.  All interaction with hardware
//! happens through **port traits** defined in [`ports`], keeping this
//! layer fully testable without a panel or a reed switch.

pub mod events;
pub mod ports;
pub mod service;
