//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that drives the timer service against
//! mock adapters.  All tests run on the host (x86_64) with no real
//! hardware required.

mod door_sensor_tests;
mod timer_scenario_tests;
