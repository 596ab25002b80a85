//! Fuzz target: `TimerConfig::from_json`
//!
//! Feeds arbitrary bytes to the config override parser and verifies:
//! - No panics on malformed or hostile JSON
//! - Every accepted config passes `validate()`
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use doortimer::config::TimerConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = TimerConfig::from_json(json) {
        assert!(config.validate().is_ok());
        assert!(config.title.len() <= doortimer::config::TITLE_CAPACITY);
    }
});
