//! Elapsed-time bookkeeping and `HH:MM:SS` formatting.
//!
//! Time comes from a free-running `u32` millisecond counter.  Differences
//! use wrapping arithmetic, so a single counter wrap (~49.7 days) between
//! `start` and `now` still yields the right answer; a session longer than
//! one full wrap does not.  That boundary is accepted, not handled.

use core::fmt::Write;

use heapless::String;

/// Capacity of a formatted elapsed string.  The widest input, `u32::MAX`
/// seconds, formats as "1193046:28:15".
pub const ELAPSED_TEXT_CAPACITY: usize = 16;

/// A formatted `HH:MM:SS` string.
pub type ElapsedText = String<ELAPSED_TEXT_CAPACITY>;

/// Tracks the start of the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedTimer {
    start_ms: u32,
}

impl ElapsedTimer {
    pub fn new(now_ms: u32) -> Self {
        Self { start_ms: now_ms }
    }

    /// Start a new session at `now_ms`.
    pub fn restart(&mut self, now_ms: u32) {
        self.start_ms = now_ms;
    }

    pub fn start_ms(&self) -> u32 {
        self.start_ms
    }

    /// Whole seconds since the session started (floor division).
    pub fn elapsed_secs(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.start_ms) / 1000
    }
}

/// Format seconds as `HH:MM:SS`.  Hours are zero-padded to two digits and
/// never wrap.
pub fn format_elapsed(total_secs: u32) -> ElapsedText {
    let hours = total_secs / 3600;
    let minutes = (total_secs / 60) % 60;
    let seconds = total_secs % 60;

    let mut text = ElapsedText::new();
    // Cannot overflow: the widest u32 input needs 13 of 16 bytes.
    let _ = write!(text, "{hours:02}:{minutes:02}:{seconds:02}");
    text
}
