use crate::BytePos;
use std::{cmp, fmt};

/// A source code location.
///
/// Essentially a `lo..hi` range into the [`SourceMap`](crate::SourceMap). Both ends are offsets
/// from the start of the whole map, not of a single file, so spans from different files never
/// overlap.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    lo: BytePos,
    hi: BytePos,
}

impl Default for Span {
    #[inline(always)]
    fn default() -> Self {
        Self::DUMMY
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Span({}..{})", self.lo.0, self.hi.0)
    }
}

impl Span {
    /// A dummy span.
    pub const DUMMY: Self = Self { lo: BytePos(0), hi: BytePos(0) };

    /// Creates a new span from two byte positions.
    #[inline]
    pub fn new(mut lo: BytePos, mut hi: BytePos) -> Self {
        if lo > hi {
            std::mem::swap(&mut lo, &mut hi);
        }
        Self { lo, hi }
    }

    /// Creates a new span from a raw `lo..hi` range of global offsets.
    #[inline]
    pub fn from_range(range: std::ops::Range<u32>) -> Self {
        Self::new(BytePos(range.start), BytePos(range.end))
    }

    /// Returns the span's start position.
    #[inline(always)]
    pub fn lo(self) -> BytePos {
        self.lo
    }

    /// Returns the span's end position.
    #[inline(always)]
    pub fn hi(self) -> BytePos {
        self.hi
    }

    /// Returns the length of the span in bytes.
    #[inline]
    pub fn len(self) -> u32 {
        self.hi.0 - self.lo.0
    }

    /// Returns `true` if this is a dummy span.
    #[inline]
    pub fn is_dummy(self) -> bool {
        self == Self::DUMMY
    }

    /// Returns `true` if `self` fully encloses `other`.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        self.lo <= other.lo && other.hi <= self.hi
    }

    /// Returns `true` if `self` touches `other`.
    #[inline]
    pub fn overlaps(self, other: Self) -> bool {
        self.lo < other.hi && other.lo < self.hi
    }

    /// Returns a `Span` that would enclose both `self` and `end`.
    #[inline]
    pub fn to(self, end: Self) -> Self {
        Self::new(cmp::min(self.lo, end.lo), cmp::max(self.hi, end.hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment() {
        let contract = Span::from_range(10..100);
        assert!(contract.contains(Span::from_range(10..100)));
        assert!(contract.contains(Span::from_range(20..30)));
        assert!(!contract.contains(Span::from_range(5..30)));
        assert!(!contract.contains(Span::from_range(90..101)));
        assert!(contract.overlaps(Span::from_range(90..101)));
        assert!(!contract.overlaps(Span::from_range(100..101)));
    }

    #[test]
    fn new_orders_bounds() {
        let span = Span::new(BytePos(8), BytePos(3));
        assert_eq!(span.lo(), BytePos(3));
        assert_eq!(span.hi(), BytePos(8));
        assert_eq!(span.len(), 5);
        assert_eq!(span.to(Span::from_range(1..2)), Span::from_range(1..8));
    }
}
