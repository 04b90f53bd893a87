//! Timestamp line classification
//!
//! Timestamp lines carry nothing but an epoch value in milliseconds and set
//! the clock context for the data lines that follow. Classification is total:
//! anything that is not clearly a timestamp is left for the line decoder to
//! reject with a precise error.

/// Check if a line is a timestamp line
///
/// True iff the whole line is one or more ASCII digits whose value fits in
/// a `u64`. Never fails, whatever the input.
///
/// # Example
///
/// ```
/// use tally_protocol::is_timestamp_line;
///
/// assert!(is_timestamp_line(b"1700000000000"));
/// assert!(!is_timestamp_line(b"1700000000000\tX"));
/// assert!(!is_timestamp_line(b""));
/// ```
#[inline]
pub fn is_timestamp_line(payload: &[u8]) -> bool {
    parse_timestamp_line(payload).is_some()
}

/// Parse a timestamp line, returning the epoch value in milliseconds
///
/// Returns `None` for any line that is not a timestamp line.
pub fn parse_timestamp_line(payload: &[u8]) -> Option<u64> {
    if payload.is_empty() {
        return None;
    }

    payload.iter().try_fold(0u64, |acc, &b| {
        if !b.is_ascii_digit() {
            return None;
        }
        acc.checked_mul(10)?.checked_add(u64::from(b - b'0'))
    })
}
