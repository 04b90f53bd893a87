//! Rate-limited warning logger
//!
//! A stream with a systematic fault produces one bad line after another.
//! This logs at most once per interval and reports how many warnings were
//! suppressed in between.

use std::borrow::Cow;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Rate-limited logger for malformed lines and sink failures
///
/// Thread-safe: uses atomic counters and a mutex for the last log time.
#[derive(Debug)]
pub struct RateLimitedLogger {
    /// Minimum interval between log messages
    min_interval: Duration,

    /// Maximum line bytes echoed into a message
    max_data_len: usize,

    /// Last time we logged
    last_log_time: Mutex<Option<Instant>>,

    /// Warnings since last log
    pending: AtomicU64,

    /// Warnings ever recorded
    total: AtomicU64,
}

impl RateLimitedLogger {
    /// Create a logger with the given interval and line truncation limit
    pub fn new(min_interval: Duration, max_data_len: usize) -> Self {
        Self {
            min_interval,
            max_data_len,
            last_log_time: Mutex::new(None),
            pending: AtomicU64::new(0),
            total: AtomicU64::new(0),
        }
    }

    /// Record a warning about `data` and log it if the interval has passed
    ///
    /// Returns true if the warning was logged, false if it was suppressed.
    pub fn warn(
        &self,
        message: &str,
        kind: &str,
        error: &dyn std::fmt::Display,
        data: &[u8],
    ) -> bool {
        self.pending.fetch_add(1, Ordering::Relaxed);
        let total = self.total.fetch_add(1, Ordering::Relaxed) + 1;

        if !self.claim_slot() {
            return false;
        }

        let count = self.pending.swap(0, Ordering::Relaxed);
        let line = truncate_for_log(data, self.max_data_len);

        if count > 1 {
            tracing::warn!(
                kind,
                error = %error,
                line = %line,
                suppressed_count = count - 1,
                total,
                "{message} (rate-limited)"
            );
        } else {
            tracing::warn!(kind, error = %error, line = %line, total, "{message}");
        }
        true
    }

    fn claim_slot(&self) -> bool {
        let mut last_time = self.last_log_time.lock();
        let now = Instant::now();

        match *last_time {
            Some(last) if now.duration_since(last) < self.min_interval => false,
            _ => {
                *last_time = Some(now);
                true
            }
        }
    }

    /// Warnings recorded since the last emitted message
    pub fn pending_count(&self) -> u64 {
        self.pending.load(Ordering::Relaxed)
    }

    /// Warnings ever recorded
    pub fn total_count(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.pending.store(0, Ordering::Relaxed);
        self.total.store(0, Ordering::Relaxed);
        *self.last_log_time.lock() = None;
    }
}

/// Render line bytes for a log message, cut at `max_len` bytes
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn truncate_for_log(data: &[u8], max_len: usize) -> Cow<'_, str> {
    if data.len() > max_len {
        Cow::Owned(format!(
            "{}... (truncated from {} bytes)",
            String::from_utf8_lossy(&data[..max_len]),
            data.len()
        ))
    } else {
        String::from_utf8_lossy(data)
    }
}
