//! Source location and range types for tracking positions in source files.

use serde::{Deserialize, Serialize};

/// A position within a source file.
///
/// # Field Conventions
///
/// - `line` is 1-indexed (first line is line 1)
/// - `column` is 0-indexed (first character is column 0)
/// - `byte_offset` is the absolute byte position from the start of the file
///
/// # Examples
///
/// ```
/// use cem_core::SourceLocation;
///
/// let loc = SourceLocation {
///     line: 10,
///     column: 5,
///     byte_offset: 245,
/// };
///
/// assert_eq!(loc.line, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Line number (1-indexed).
    pub line: u32,

    /// Column number (0-indexed, UTF-8 byte offset within the line).
    pub column: u32,

    /// Absolute byte offset from the start of the file.
    pub byte_offset: u32,
}

impl SourceLocation {
    /// Creates a new source location.
    #[inline]
    #[must_use]
    pub const fn new(line: u32, column: u32, byte_offset: u32) -> Self {
        Self {
            line,
            column,
            byte_offset,
        }
    }
}

/// A half-open span between two [`SourceLocation`]s, used as the range of a
/// [`crate::types::diagnostic::Diagnostic`] or an occurrence.
///
/// # Examples
///
/// ```
/// use cem_core::{Range, SourceLocation};
///
/// let range = Range::new(
///     SourceLocation::new(1, 0, 0),
///     SourceLocation::new(1, 5, 5),
/// );
/// assert!(range.contains_offset(3));
/// assert!(!range.contains_offset(10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
    /// The inclusive start of the span.
    pub start: SourceLocation,
    /// The exclusive end of the span.
    pub end: SourceLocation,
}

impl Range {
    /// Creates a new range from a start and end location.
    #[inline]
    #[must_use]
    pub const fn new(start: SourceLocation, end: SourceLocation) -> Self {
        Self { start, end }
    }

    /// Builds a range directly from byte offsets, leaving line/column at
    /// zero. Used when a caller only has byte offsets available (e.g. a
    /// tree-sitter node before line/column have been computed).
    #[inline]
    #[must_use]
    pub const fn from_byte_offsets(start: u32, end: u32) -> Self {
        Self {
            start: SourceLocation::new(0, 0, start),
            end: SourceLocation::new(0, 0, end),
        }
    }

    /// Returns whether `offset` falls within `[start.byte_offset, end.byte_offset)`.
    #[must_use]
    pub const fn contains_offset(&self, offset: u32) -> bool {
        offset >= self.start.byte_offset && offset < self.end.byte_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_location_new() {
        let loc = SourceLocation::new(10, 5, 245);
        assert_eq!(loc.line, 10);
        assert_eq!(loc.column, 5);
        assert_eq!(loc.byte_offset, 245);
    }

    #[test]
    fn test_source_location_default() {
        let loc = SourceLocation::default();
        assert_eq!(loc.line, 0);
        assert_eq!(loc.column, 0);
        assert_eq!(loc.byte_offset, 0);
    }

    #[test]
    fn test_source_location_serialization() {
        let loc = SourceLocation::new(10, 5, 245);
        let json = serde_json::to_string(&loc).unwrap();
        let parsed: SourceLocation = serde_json::from_str(&json).unwrap();
        assert_eq!(loc, parsed);
    }

    #[test]
    fn test_range_contains_offset() {
        let range = Range::from_byte_offsets(10, 20);
        assert!(!range.contains_offset(9));
        assert!(range.contains_offset(10));
        assert!(range.contains_offset(19));
        assert!(!range.contains_offset(20));
    }

    #[test]
    fn test_range_serialization_round_trip() {
        let range = Range::from_byte_offsets(3, 8);
        let json = serde_json::to_string(&range).unwrap();
        let parsed: Range = serde_json::from_str(&json).unwrap();
        assert_eq!(range, parsed);
    }
}
