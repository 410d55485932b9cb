//! Byte-offset source spans.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open byte range `[start, end)` into a source file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// A zero-length span at offset 0, used for synthesized nodes.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    #[inline]
    pub const fn at(pos: u32) -> Self {
        Span {
            start: pos,
            end: pos,
        }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Smallest span covering both `self` and `other`.
    #[inline]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    #[inline]
    pub const fn contains(&self, offset: u32) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Slice `source` by this span. Out-of-range spans yield an empty string.
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        source
            .get(self.start as usize..self.end as usize)
            .unwrap_or("")
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
    fn test_merge_and_slice() {
        let a = Span::new(2, 5);
        let b = Span::new(4, 9);
        let merged = a.merge(b);
        assert_eq!(merged, Span::new(2, 9));
        assert_eq!(merged.len(), 7);
        assert_eq!(Span::new(0, 3).slice("abcdef"), "abc");
        assert_eq!(Span::new(4, 40).slice("abcdef"), "");
    }

    #[test]
    fn test_empty_span() {
        assert!(Span::at(3).is_empty());
        assert!(!Span::new(3, 4).is_empty());
        assert!(Span::new(3, 4).contains(3));
        assert!(!Span::new(3, 4).contains(4));
    }
}
