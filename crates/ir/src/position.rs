// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Zero-based source locations.
//!
//! These mirror LSP positions without depending on `lsp-types`, so the
//! catalog crate can record declaration sites while staying protocol-free.

use serde::{Deserialize, Serialize};

/// A zero-based line/character pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourcePosition {
    pub line: u32,
    pub character: u32,
}

impl SourcePosition {
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A half-open range between two positions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRange {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl SourceRange {
    pub const fn new(start: SourcePosition, end: SourcePosition) -> Self {
        Self { start, end }
    }

    /// Zero-width range at `position`
    pub const fn point(position: SourcePosition) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// Range spanning `width` characters on a single line
    pub const fn on_line(line: u32, character: u32, width: u32) -> Self {
        Self {
            start: SourcePosition::new(line, character),
            end: SourcePosition::new(line, character + width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_range() {
        let range = SourceRange::point(SourcePosition::new(3, 7));
        assert_eq!(range.start, range.end);
    }

    #[test]
    fn test_on_line() {
        let range = SourceRange::on_line(2, 4, 5);
        assert_eq!(range.start, SourcePosition::new(2, 4));
        assert_eq!(range.end, SourcePosition::new(2, 9));
    }

    #[test]
    fn test_position_ordering() {
        assert!(SourcePosition::new(1, 9) < SourcePosition::new(2, 0));
        assert!(SourcePosition::new(2, 1) > SourcePosition::new(2, 0));
    }
}
