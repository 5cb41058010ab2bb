//! Byte spans inside expression text.
//!
//! Compact 8-byte representation, used by parse errors to point at the
//! offending part of a parameter.

use std::fmt;

/// Byte range inside an expression's text.
///
/// Layout: 8 bytes total
/// - start: u32 - byte offset from the start of the expression
/// - end: u32 - byte offset (exclusive)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Create from a byte range, saturating offsets that exceed `u32::MAX`.
    ///
    /// Parameter text is user-authored and never approaches 4 GiB, so
    /// saturation only matters for malformed input and keeps this infallible.
    #[inline]
    pub fn from_range(range: std::ops::Range<usize>) -> Self {
        let start = u32::try_from(range.start).unwrap_or(u32::MAX);
        let end = u32::try_from(range.end).unwrap_or(u32::MAX);
        Span { start, end }
    }

    /// Zero-length span at an offset.
    #[inline]
    pub fn point(offset: usize) -> Self {
        Self::from_range(offset..offset)
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Check if span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Shift the span by `offset` bytes.
    ///
    /// Used to re-base spans reported for an argument onto the text of the
    /// enclosing expression.
    #[inline]
    #[must_use]
    pub fn shifted(self, offset: u32) -> Span {
        Span {
            start: self.start.saturating_add(offset),
            end: self.end.saturating_add(offset),
        }
    }

    /// Convert to a `Range<usize>` for slicing.
    #[inline]
    pub fn to_range(self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_basics() {
        let span = Span::new(3, 7);
        assert_eq!(span.len(), 4);
        assert!(!span.is_empty());
        assert_eq!(span.to_range(), 3..7);
        assert!(Span::point(5).is_empty());
    }

    #[test]
    fn span_shifted() {
        assert_eq!(Span::new(1, 2).shifted(10), Span::new(11, 12));
    }

    #[test]
    fn span_debug() {
        assert_eq!(format!("{:?}", Span::new(0, 4)), "0..4");
    }
}
