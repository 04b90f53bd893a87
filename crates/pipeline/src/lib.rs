//! Tally Pipeline
//!
//! The caller side of the line decoder: a stream loop that classifies each
//! line, keeps the stream clock, decodes data lines and hands them to a sink.
//!
//! # Architecture
//!
//! ```text
//! [Framed lines]            [LineProcessor]                         [Sink]
//!   "1709296245250" ──→ is timestamp ──→ ClockContext
//!   "M\t<id>\t..."  ──→ LineDecoder ──→ Observation { timestamp, line } ──→ MetricSink
//!                            │
//!                            └──→ ProcessorMetrics + rate-limited warn!
//! ```
//!
//! # Key Design
//!
//! - **Borrowed observations**: sinks see the decoded line in place and copy
//!   only what they keep
//! - **Never stops**: malformed lines and sink refusals are counted and logged
//! - **Atomic counters**: `ProcessorMetrics` can be read from another thread
//!   through [`LineProcessor::metrics_handle`]
//!
//! # Example
//!
//! ```
//! use tally_pipeline::{CollectingSink, LineOutcome, LineProcessor};
//!
//! let input =
//!     b"1709296245250\nM\t550e8400-e29b-41d4-a716-446655440000\tagent1\tcpu.load\tn0.75\n";
//! let mut processor = LineProcessor::new(CollectingSink::new(), true);
//!
//! let summary = processor.process_lines(input.split(|&b| b == b'\n'));
//! assert_eq!(summary.timestamps, 1);
//! assert_eq!(summary.decoded, 1);
//!
//! let sink = processor.finish();
//! assert_eq!(sink.observations()[0].timestamp, Some(1709296245250));
//! ```

mod clock;
mod error;
mod logging;
mod metrics;
mod processor;
mod rate_limited_logger;
mod sink;

pub use clock::{ClockAdvance, ClockContext};
pub use error::{PipelineError, Result, SinkError};
pub use logging::init_logging;
pub use metrics::{MALFORMED_KINDS, MetricsSnapshot, ProcessorMetrics};
pub use processor::{LineOutcome, LineProcessor, ProcessSummary};
pub use rate_limited_logger::{RateLimitedLogger, truncate_for_log};
pub use sink::{CollectingSink, MetricSink, NullSink, Observation, OwnedObservation, OwnedValue};
