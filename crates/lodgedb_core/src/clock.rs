//! Timestamp source for booking records.

use chrono::Local;

/// Format of booking timestamps, e.g. `2026-08-22 14:05:00`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A source of formatted wall-clock timestamps.
///
/// The booking ledger stamps each record through this trait so tests can
/// substitute a fixed time.
pub trait Clock: Send + Sync {
    /// Returns the current time formatted as [`TIMESTAMP_FORMAT`].
    fn now_string(&self) -> String;
}

/// The local wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_string(&self) -> String {
        Local::now().format(TIMESTAMP_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn system_clock_output_parses_back() {
        let stamp = SystemClock.now_string();
        assert!(NaiveDateTime::parse_from_str(&stamp, TIMESTAMP_FORMAT).is_ok());
    }
}
