//! Clock context
//!
//! Timestamp lines carry no data of their own; they set the time that the
//! data lines after them belong to. `ClockContext` is that caller-side state.

use chrono::{DateTime, Utc};

/// What a timestamp line did to the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockAdvance {
    /// First timestamp seen
    First,
    /// Later than the current time
    Forward,
    /// Same as the current time
    Unchanged,
    /// Earlier than the current time; still applied
    Regressed { previous: u64 },
}

/// Current stream time, in epoch milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockContext {
    current: Option<u64>,
    advances: u64,
    regressions: u64,
}

impl ClockContext {
    /// Create a clock with no time set
    pub const fn new() -> Self {
        Self {
            current: None,
            advances: 0,
            regressions: 0,
        }
    }

    /// Apply a timestamp line
    ///
    /// Producers may restart or resend, so an earlier time replaces the
    /// current one and is only counted.
    pub fn advance(&mut self, epoch_ms: u64) -> ClockAdvance {
        let advance = match self.current {
            None => ClockAdvance::First,
            Some(previous) if epoch_ms > previous => ClockAdvance::Forward,
            Some(previous) if epoch_ms == previous => ClockAdvance::Unchanged,
            Some(previous) => {
                self.regressions += 1;
                ClockAdvance::Regressed { previous }
            }
        };
        self.current = Some(epoch_ms);
        self.advances += 1;
        advance
    }

    /// Current time, if a timestamp line has been seen
    #[inline]
    pub fn current(&self) -> Option<u64> {
        self.current
    }

    /// Current time as a UTC datetime
    ///
    /// None before the first timestamp or when the value is past chrono's range.
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        let ms = i64::try_from(self.current?).ok()?;
        DateTime::from_timestamp_millis(ms)
    }

    /// Timestamp lines applied
    #[inline]
    pub fn advances(&self) -> u64 {
        self.advances
    }

    /// Timestamp lines that moved the clock backwards
    #[inline]
    pub fn regressions(&self) -> u64 {
        self.regressions
    }
}
