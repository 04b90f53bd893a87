//! Line processor metrics
//!
//! Atomic counters for tracking what the processor did with each line.
//! All operations use relaxed ordering; values are eventually consistent.

use std::sync::atomic::{AtomicU64, Ordering};

use tally_protocol::ErrorKind;

/// Number of malformed-line buckets, one per [`ErrorKind`]
pub const MALFORMED_KINDS: usize = ErrorKind::ALL.len();

/// Metrics for the line processor
///
/// # Thread Safety
///
/// All methods take `&self` and are safe to call from multiple threads, so
/// a reporter can read counters through an `Arc` while the processor runs.
#[derive(Debug)]
pub struct ProcessorMetrics {
    /// Lines handed to the processor, including empty ones
    lines_received: AtomicU64,

    /// Bytes handed to the processor
    bytes_received: AtomicU64,

    /// Timestamp lines that advanced the clock
    timestamps: AtomicU64,

    /// Data lines decoded and accepted by the sink
    decoded: AtomicU64,

    /// Empty lines skipped
    skipped: AtomicU64,

    /// Decoded lines the sink refused
    sink_failures: AtomicU64,

    /// Rejected data lines, indexed by `ErrorKind::index()`
    malformed: [AtomicU64; MALFORMED_KINDS],
}

impl ProcessorMetrics {
    /// Create new metrics instance with all counters at zero
    #[inline]
    pub const fn new() -> Self {
        Self {
            lines_received: AtomicU64::new(0),
            bytes_received: AtomicU64::new(0),
            timestamps: AtomicU64::new(0),
            decoded: AtomicU64::new(0),
            skipped: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
            malformed: [const { AtomicU64::new(0) }; MALFORMED_KINDS],
        }
    }

    /// Record a line entering the processor
    #[inline]
    pub fn record_received(&self, byte_count: u64) {
        self.lines_received.fetch_add(1, Ordering::Relaxed);
        self.bytes_received.fetch_add(byte_count, Ordering::Relaxed);
    }

    /// Record a timestamp line
    #[inline]
    pub fn record_timestamp(&self) {
        self.timestamps.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a data line delivered to the sink
    #[inline]
    pub fn record_decoded(&self) {
        self.decoded.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an empty line
    #[inline]
    pub fn record_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a sink refusal
    #[inline]
    pub fn record_sink_failure(&self) {
        self.sink_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a rejected data line
    #[inline]
    pub fn record_malformed(&self, kind: ErrorKind) {
        self.malformed[kind.index()].fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            lines_received: self.lines_received.load(Ordering::Relaxed),
            bytes_received: self.bytes_received.load(Ordering::Relaxed),
            timestamps: self.timestamps.load(Ordering::Relaxed),
            decoded: self.decoded.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            sink_failures: self.sink_failures.load(Ordering::Relaxed),
            malformed: std::array::from_fn(|i| self.malformed[i].load(Ordering::Relaxed)),
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.lines_received.store(0, Ordering::Relaxed);
        self.bytes_received.store(0, Ordering::Relaxed);
        self.timestamps.store(0, Ordering::Relaxed);
        self.decoded.store(0, Ordering::Relaxed);
        self.skipped.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
        for counter in &self.malformed {
            counter.store(0, Ordering::Relaxed);
        }
    }

    /// Get lines received count
    #[inline]
    pub fn lines_received(&self) -> u64 {
        self.lines_received.load(Ordering::Relaxed)
    }

    /// Get rejected line count for one kind
    #[inline]
    pub fn malformed(&self, kind: ErrorKind) -> u64 {
        self.malformed[kind.index()].load(Ordering::Relaxed)
    }
}

impl Default for ProcessorMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time snapshot of processor metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    /// Lines handed to the processor
    pub lines_received: u64,
    /// Bytes handed to the processor
    pub bytes_received: u64,
    /// Timestamp lines
    pub timestamps: u64,
    /// Data lines accepted by the sink
    pub decoded: u64,
    /// Empty lines
    pub skipped: u64,
    /// Sink refusals
    pub sink_failures: u64,
    /// Rejected data lines by kind
    pub malformed: [u64; MALFORMED_KINDS],
}

impl MetricsSnapshot {
    /// Rejected line count for one kind
    #[inline]
    pub fn malformed(&self, kind: ErrorKind) -> u64 {
        self.malformed[kind.index()]
    }

    /// Rejected line count across all kinds
    #[inline]
    pub fn malformed_total(&self) -> u64 {
        self.malformed.iter().sum()
    }

    /// Fraction of data lines that decoded (0.0 - 1.0)
    ///
    /// Returns None if no data lines have been seen.
    pub fn decode_success_rate(&self) -> Option<f64> {
        let decoded = self.decoded + self.sink_failures;
        let total = decoded + self.malformed_total();
        if total == 0 {
            None
        } else {
            Some(decoded as f64 / total as f64)
        }
    }

    /// Calculate the difference from another snapshot
    pub fn diff(&self, previous: &MetricsSnapshot) -> MetricsSnapshot {
        MetricsSnapshot {
            lines_received: self.lines_received.saturating_sub(previous.lines_received),
            bytes_received: self.bytes_received.saturating_sub(previous.bytes_received),
            timestamps: self.timestamps.saturating_sub(previous.timestamps),
            decoded: self.decoded.saturating_sub(previous.decoded),
            skipped: self.skipped.saturating_sub(previous.skipped),
            sink_failures: self.sink_failures.saturating_sub(previous.sink_failures),
            malformed: std::array::from_fn(|i| {
                self.malformed[i].saturating_sub(previous.malformed[i])
            }),
        }
    }
}
