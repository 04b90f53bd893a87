//! Line processor
//!
//! The stream loop around the stateless decoder. For every complete line the
//! caller has framed:
//!
//! ```text
//! line ──→ empty? ──yes──→ Skipped
//!            │
//!            no
//!            ▼
//!        timestamp? ──yes──→ ClockContext::advance ──→ Timestamp(ms)
//!            │
//!            no
//!            ▼
//!        LineDecoder::decode ──err──→ count + rate-limited warn ──→ Malformed(kind)
//!            │
//!            ok
//!            ▼
//!        MetricSink::accept ──err──→ count + rate-limited warn ──→ SinkFailed
//!            │
//!            ▼
//!         Decoded
//! ```
//!
//! A rejected line never stops the stream.

use std::sync::Arc;
use std::time::Duration;

use tally_config::{Config, DEFAULT_ERROR_LOG_INTERVAL_SECS, DEFAULT_MAX_LOGGED_LINE_BYTES};
use tally_protocol::{DecodeOptions, ErrorKind, LineDecoder, parse_timestamp_line};
use tracing::{debug, info};

use crate::clock::{ClockAdvance, ClockContext};
use crate::error::Result;
use crate::metrics::{MetricsSnapshot, ProcessorMetrics};
use crate::rate_limited_logger::RateLimitedLogger;
use crate::sink::{MetricSink, Observation};

/// What happened to one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Empty line, ignored
    Skipped,
    /// Timestamp line; the clock now holds this value
    Timestamp(u64),
    /// Data line decoded and accepted by the sink
    Decoded,
    /// Data line rejected by the decoder
    Malformed(ErrorKind),
    /// Data line decoded but refused by the sink
    SinkFailed,
}

impl LineOutcome {
    /// Check if the line was dropped
    #[inline]
    pub fn is_dropped(&self) -> bool {
        matches!(self, Self::Malformed(_) | Self::SinkFailed)
    }
}

/// Outcome counts for one `process_lines` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    pub lines: u64,
    pub skipped: u64,
    pub timestamps: u64,
    pub decoded: u64,
    pub malformed: u64,
    pub sink_failures: u64,
}

impl ProcessSummary {
    /// Count one outcome
    pub fn record(&mut self, outcome: LineOutcome) {
        self.lines += 1;
        match outcome {
            LineOutcome::Skipped => self.skipped += 1,
            LineOutcome::Timestamp(_) => self.timestamps += 1,
            LineOutcome::Decoded => self.decoded += 1,
            LineOutcome::Malformed(_) => self.malformed += 1,
            LineOutcome::SinkFailed => self.sink_failures += 1,
        }
    }

    /// Lines that were dropped
    #[inline]
    pub fn dropped(&self) -> u64 {
        self.malformed + self.sink_failures
    }
}

/// Stream loop feeding decoded lines to a sink
pub struct LineProcessor<S> {
    decoder: LineDecoder,
    has_agent_name: bool,
    clock: ClockContext,
    sink: S,
    metrics: Arc<ProcessorMetrics>,
    malformed_logger: RateLimitedLogger,
    sink_logger: RateLimitedLogger,
}

impl<S: MetricSink> LineProcessor<S> {
    /// Create a processor with default decode options
    pub fn new(sink: S, has_agent_name: bool) -> Self {
        Self::with_options(sink, DecodeOptions::default(), has_agent_name)
    }

    /// Create a processor with explicit decode options
    pub fn with_options(sink: S, options: DecodeOptions, has_agent_name: bool) -> Self {
        Self::build(
            sink,
            options,
            has_agent_name,
            Duration::from_secs(DEFAULT_ERROR_LOG_INTERVAL_SECS),
            DEFAULT_MAX_LOGGED_LINE_BYTES,
        )
    }

    /// Create a processor from configuration
    pub fn from_config(config: &Config, sink: S) -> Result<Self> {
        let options = config.decoder.to_options()?;
        Ok(Self::build(
            sink,
            options,
            config.processor.has_agent_name,
            config.processor.error_log_interval(),
            config.processor.max_logged_line_bytes,
        ))
    }

    fn build(
        sink: S,
        options: DecodeOptions,
        has_agent_name: bool,
        log_interval: Duration,
        max_logged_line_bytes: usize,
    ) -> Self {
        Self {
            decoder: LineDecoder::with_options(options),
            has_agent_name,
            clock: ClockContext::new(),
            sink,
            metrics: Arc::new(ProcessorMetrics::new()),
            malformed_logger: RateLimitedLogger::new(log_interval, max_logged_line_bytes),
            sink_logger: RateLimitedLogger::new(log_interval, max_logged_line_bytes),
        }
    }

    /// Process one complete line, without its terminator
    pub fn process_line(&mut self, line: &[u8]) -> LineOutcome {
        self.metrics.record_received(line.len() as u64);

        if line.is_empty() {
            self.metrics.record_skipped();
            return LineOutcome::Skipped;
        }

        if let Some(epoch_ms) = parse_timestamp_line(line) {
            self.apply_timestamp(epoch_ms);
            return LineOutcome::Timestamp(epoch_ms);
        }

        let decoded = match self.decoder.decode(line, self.has_agent_name) {
            Ok(decoded) => decoded,
            Err(e) => {
                let kind = e.kind();
                self.metrics.record_malformed(kind);
                self.malformed_logger
                    .warn("dropping malformed line", kind.as_str(), &e, line);
                return LineOutcome::Malformed(kind);
            }
        };

        let observation = Observation {
            timestamp: self.clock.current(),
            line: &decoded,
        };

        match self.sink.accept(&observation) {
            Ok(()) => {
                self.metrics.record_decoded();
                LineOutcome::Decoded
            }
            Err(e) => {
                self.metrics.record_sink_failure();
                self.sink_logger.warn("sink refused observation", "sink", &e, line);
                LineOutcome::SinkFailed
            }
        }
    }

    fn apply_timestamp(&mut self, epoch_ms: u64) {
        self.metrics.record_timestamp();
        match self.clock.advance(epoch_ms) {
            ClockAdvance::Regressed { previous } => {
                debug!(epoch_ms, previous, "stream clock moved backwards");
            }
            _ => debug!(epoch_ms, "stream clock advanced"),
        }
    }

    /// Process a run of complete lines
    pub fn process_lines<'l, I>(&mut self, lines: I) -> ProcessSummary
    where
        I: IntoIterator<Item = &'l [u8]>,
    {
        let mut summary = ProcessSummary::default();
        for line in lines {
            summary.record(self.process_line(line));
        }
        summary
    }

    /// Current stream clock
    #[inline]
    pub fn clock(&self) -> &ClockContext {
        &self.clock
    }

    /// Processor metrics
    #[inline]
    pub fn metrics(&self) -> &ProcessorMetrics {
        &self.metrics
    }

    /// Shared handle to the metrics, for reporting from another thread
    #[inline]
    pub fn metrics_handle(&self) -> Arc<ProcessorMetrics> {
        Arc::clone(&self.metrics)
    }

    /// The sink
    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Log the final counts and hand back the sink
    pub fn finish(self) -> S {
        let snapshot = self.metrics.snapshot();
        log_summary(&snapshot, &self.clock);
        self.sink
    }
}

fn log_summary(snapshot: &MetricsSnapshot, clock: &ClockContext) {
    info!(
        lines = snapshot.lines_received,
        bytes = snapshot.bytes_received,
        timestamps = snapshot.timestamps,
        decoded = snapshot.decoded,
        malformed = snapshot.malformed_total(),
        sink_failures = snapshot.sink_failures,
        skipped = snapshot.skipped,
        clock_regressions = clock.regressions(),
        "line processor finished"
    );

    for kind in ErrorKind::ALL {
        let count = snapshot.malformed(kind);
        if count > 0 {
            info!(kind = kind.as_str(), count, "malformed lines by kind");
        }
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for LineProcessor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineProcessor")
            .field("options", self.decoder.options())
            .field("has_agent_name", &self.has_agent_name)
            .field("clock", &self.clock)
            .field("sink", &self.sink)
            .finish_non_exhaustive()
    }
}
