//! DoorTimer firmware library.
//!
//! Shows how long a door has been shut on a small TFT, and a full-screen
//! alert while it stands open.  Exposes the pure-logic modules for
//! integration testing; the ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod elapsed;
pub mod error;
pub mod fsm;
pub mod pins;
pub mod render;
