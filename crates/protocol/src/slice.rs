//! Borrowed views into a raw line
//!
//! `LineSlice` is how decoded names and string values refer back to the
//! caller's buffer without copying. The lifetime ties every view to the line
//! it was decoded from, so a reused receive buffer cannot be overwritten while
//! a view is alive.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;
use std::str::Utf8Error;

/// A non-owning view of a byte range inside a raw line
///
/// Equality and hashing consider the bytes only, so two views with the same
/// content compare equal even if they come from different offsets.
///
/// # Example
///
/// ```
/// use tally_protocol::LineSlice;
///
/// let line = b"M\tcpu.load";
/// let name = LineSlice::new(&line[2..], 2);
/// assert_eq!(name, "cpu.load");
/// assert_eq!(name.range(), 2..10);
/// ```
#[derive(Clone, Copy)]
pub struct LineSlice<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> LineSlice<'a> {
    /// Create a view over `bytes`, which start at `offset` in the line
    #[inline]
    pub const fn new(bytes: &'a [u8], offset: usize) -> Self {
        Self { bytes, offset }
    }

    /// Create an empty view positioned at `offset`
    #[inline]
    pub const fn empty(offset: usize) -> Self {
        Self { bytes: &[], offset }
    }

    /// Get the viewed bytes
    #[inline]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Byte offset of the view within the line
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the view in bytes
    #[inline]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the view is empty
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Byte range of the view within the line
    #[inline]
    pub const fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.bytes.len()
    }

    /// Interpret the view as UTF-8
    #[inline]
    pub fn to_str(&self) -> Result<&'a str, Utf8Error> {
        std::str::from_utf8(self.bytes)
    }

    /// Interpret the view as UTF-8, replacing invalid sequences
    #[inline]
    pub fn to_string_lossy(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.bytes)
    }

    /// Copy the viewed bytes out of the line
    ///
    /// Callers that recycle their receive buffer must copy before reuse.
    #[inline]
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }
}

impl PartialEq for LineSlice<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for LineSlice<'_> {}

impl Hash for LineSlice<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl PartialEq<str> for LineSlice<'_> {
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<&str> for LineSlice<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<[u8]> for LineSlice<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.bytes == other
    }
}

impl PartialEq<&[u8]> for LineSlice<'_> {
    fn eq(&self, other: &&[u8]) -> bool {
        self.bytes == *other
    }
}

impl AsRef<[u8]> for LineSlice<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl fmt::Debug for LineSlice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineSlice")
            .field("offset", &self.offset)
            .field("text", &self.to_string_lossy())
            .finish()
    }
}

impl fmt::Display for LineSlice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}
