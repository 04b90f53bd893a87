//! Metric sinks
//!
//! A sink receives every decoded observation. Observations borrow from the
//! line being processed, so a sink that keeps data must copy it out before
//! `accept` returns.

use tally_protocol::{DecodedLine, TypedValue, Uuid};

use crate::error::SinkError;

/// One decoded data line with the stream time it belongs to
#[derive(Debug, Clone, Copy)]
pub struct Observation<'a> {
    /// Clock value when the line was processed (epoch ms), if any
    pub timestamp: Option<u64>,
    /// The decoded line
    pub line: &'a DecodedLine<'a>,
}

/// Destination for decoded observations
pub trait MetricSink {
    /// Take one observation
    ///
    /// An error is counted and logged by the processor; the stream continues.
    fn accept(&mut self, observation: &Observation<'_>) -> Result<(), SinkError>;
}

impl<S: MetricSink + ?Sized> MetricSink for &mut S {
    fn accept(&mut self, observation: &Observation<'_>) -> Result<(), SinkError> {
        (**self).accept(observation)
    }
}

impl<S: MetricSink + ?Sized> MetricSink for Box<S> {
    fn accept(&mut self, observation: &Observation<'_>) -> Result<(), SinkError> {
        (**self).accept(observation)
    }
}

// =============================================================================
// Null Sink
// =============================================================================

/// Sink that discards observations and counts them
#[derive(Debug, Default)]
pub struct NullSink {
    accepted: u64,
}

impl NullSink {
    /// Create a new null sink
    pub const fn new() -> Self {
        Self { accepted: 0 }
    }

    /// Observations discarded so far
    #[inline]
    pub fn accepted(&self) -> u64 {
        self.accepted
    }
}

impl MetricSink for NullSink {
    #[inline]
    fn accept(&mut self, _observation: &Observation<'_>) -> Result<(), SinkError> {
        self.accepted += 1;
        Ok(())
    }
}

// =============================================================================
// Collecting Sink
// =============================================================================

/// Owned copy of a typed value
#[derive(Debug, Clone, PartialEq)]
pub enum OwnedValue {
    Absent,
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Double(f64),
    String(Vec<u8>),
}

impl From<&TypedValue<'_>> for OwnedValue {
    fn from(value: &TypedValue<'_>) -> Self {
        match *value {
            TypedValue::Absent => Self::Absent,
            TypedValue::Int32(v) => Self::Int32(v),
            TypedValue::UInt32(v) => Self::UInt32(v),
            TypedValue::Int64(v) => Self::Int64(v),
            TypedValue::UInt64(v) => Self::UInt64(v),
            TypedValue::Double(v) => Self::Double(v),
            TypedValue::String(s) => Self::String(s.to_vec()),
        }
    }
}

/// Owned copy of an observation
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedObservation {
    pub timestamp: Option<u64>,
    pub record_type: u8,
    pub identifier: Uuid,
    pub agent_name: Option<Vec<u8>>,
    pub metric_name: Vec<u8>,
    pub value: OwnedValue,
}

impl From<&Observation<'_>> for OwnedObservation {
    fn from(observation: &Observation<'_>) -> Self {
        let line = observation.line;
        Self {
            timestamp: observation.timestamp,
            record_type: line.record_type,
            identifier: line.identifier,
            agent_name: line.agent_name.map(|name| name.to_vec()),
            metric_name: line.metric_name.to_vec(),
            value: OwnedValue::from(&line.value),
        }
    }
}

/// Sink that keeps owned copies of every observation
///
/// With a capacity limit, observations past the limit are refused with
/// [`SinkError::Full`].
#[derive(Debug, Default)]
pub struct CollectingSink {
    observations: Vec<OwnedObservation>,
    capacity: Option<usize>,
}

impl CollectingSink {
    /// Create an unbounded collecting sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink that refuses observations beyond `capacity`
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            observations: Vec::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    /// Collected observations, in arrival order
    pub fn observations(&self) -> &[OwnedObservation] {
        &self.observations
    }

    /// Take the collected observations
    pub fn into_observations(self) -> Vec<OwnedObservation> {
        self.observations
    }

    /// Number of collected observations
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Check if nothing has been collected
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

impl MetricSink for CollectingSink {
    fn accept(&mut self, observation: &Observation<'_>) -> Result<(), SinkError> {
        if let Some(capacity) = self.capacity
            && self.observations.len() >= capacity
        {
            return Err(SinkError::Full { capacity });
        }
        self.observations.push(OwnedObservation::from(observation));
        Ok(())
    }
}
