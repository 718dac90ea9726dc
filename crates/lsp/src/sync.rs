// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Document Synchronization
//!
//! Applies the client's content changes to the stored text.
//!
//! ## Ranged edits
//!
//! ```text
//! lines before start     kept verbatim
//! start line             truncated at start column
//!                        + replacement text
//! end line               suffix from end column
//! lines after end        kept verbatim
//! ```
//!
//! Columns arrive in UTF-16 code units and are converted to byte offsets
//! per line. Lines end at `\n`, `\r\n` or a lone `\r`, the same breaks
//! the lexer counts. A column past the end of its line clamps to the line
//! end, before the terminator.
//! A start or end line past the last line rejects the whole edit.

use crate::document::DocumentError;
use tower_lsp::lsp_types::{Position, Range, TextDocumentContentChangeEvent};

/// Apply one content change, returning the new text
pub fn apply_change(text: &str, change: &TextDocumentContentChangeEvent) -> Result<String, DocumentError> {
    match change.range {
        Some(range) => apply_range_edit(text, range, &change.text),
        None => Ok(change.text.clone()),
    }
}

/// Apply a sequence of changes in order
///
/// Either every change applies or the original text is kept.
pub fn apply_changes(
    text: &str,
    changes: &[TextDocumentContentChangeEvent],
) -> Result<String, DocumentError> {
    let mut current = text.to_string();
    for change in changes {
        current = apply_change(&current, change)?;
    }
    Ok(current)
}

/// Replace `range` of `text` with `replacement`
pub fn apply_range_edit(text: &str, range: Range, replacement: &str) -> Result<String, DocumentError> {
    let start = byte_offset(text, range.start)?;
    let end = byte_offset(text, range.end)?;
    if end < start {
        return Err(DocumentError::InvertedRange {
            start: range.start,
            end: range.end,
        });
    }

    let mut edited = String::with_capacity(text.len() - (end - start) + replacement.len());
    edited.push_str(&text[..start]);
    edited.push_str(replacement);
    edited.push_str(&text[end..]);
    Ok(edited)
}

/// Byte offset of `position` in `text`
fn byte_offset(text: &str, position: Position) -> Result<usize, DocumentError> {
    let mut line_count = 0;
    for (index, (line_start, line)) in lines(text).enumerate() {
        if index == position.line as usize {
            return Ok(line_start + utf16_to_byte(line, position.character));
        }
        line_count = index + 1;
    }
    Err(DocumentError::RangeOutOfBounds {
        line: position.line,
        line_count: line_count as u32,
    })
}

/// Lines of `text` as `(start byte, content)`, split on `\n`, `\r\n` or a lone `\r`
///
/// Content excludes the terminator, so a clamped column never lands
/// inside a `\r\n` pair.
fn lines(text: &str) -> impl Iterator<Item = (usize, &str)> + '_ {
    let bytes = text.as_bytes();
    let mut next = Some(0);
    std::iter::from_fn(move || {
        let start = next?;
        match bytes[start..].iter().position(|b| matches!(b, b'\n' | b'\r')) {
            Some(offset) => {
                let end = start + offset;
                let crlf = bytes[end] == b'\r' && bytes.get(end + 1) == Some(&b'\n');
                next = Some(end + if crlf { 2 } else { 1 });
                Some((start, &text[start..end]))
            }
            None => {
                next = None;
                Some((start, &text[start..]))
            }
        }
    })
}

/// Byte index in `line` of the UTF-16 column `column`, clamped to the line end
pub(crate) fn utf16_to_byte(line: &str, column: u32) -> usize {
    let mut units = 0u32;
    for (index, ch) in line.char_indices() {
        if units >= column {
            return index;
        }
        units += ch.len_utf16() as u32;
    }
    line.len()
}

/// Text of line `line`, without its terminator
pub(crate) fn line_text(text: &str, line: u32) -> Option<&str> {
    lines(text).nth(line as usize).map(|(_, content)| content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: (u32, u32), end: (u32, u32)) -> Range {
        Range::new(Position::new(start.0, start.1), Position::new(end.0, end.1))
    }

    fn edit(range: Range, text: &str) -> TextDocumentContentChangeEvent {
        TextDocumentContentChangeEvent {
            range: Some(range),
            range_length: None,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_single_character_replace() {
        let text = "select *\nfrom orders\nWHERE id = 1";
        let edited = apply_range_edit(text, range((2, 11), (2, 12)), "2").unwrap();
        assert_eq!(edited, "select *\nfrom orders\nWHERE id = 2");
    }

    #[test]
    fn test_out_of_range_end_line_is_rejected() {
        let text = "WHERE id = 1";
        let result = apply_range_edit(text, range((0, 11), (3, 0)), "2");
        assert!(matches!(
            result,
            Err(DocumentError::RangeOutOfBounds { line: 3, line_count: 1 })
        ));
    }

    #[test]
    fn test_multi_line_edit() {
        let text = "with a as (\n  select 1\n)\nselect * from a";
        let edited = apply_range_edit(text, range((0, 5), (2, 1)), "b as (select 2)").unwrap();
        assert_eq!(edited, "with b as (select 2)\nselect * from a");
    }

    #[test]
    fn test_insert_at_end_of_text() {
        let text = "select 1\n";
        let edited = apply_range_edit(text, range((1, 0), (1, 0)), "from t").unwrap();
        assert_eq!(edited, "select 1\nfrom t");
    }

    #[test]
    fn test_columns_are_utf16() {
        // 'é' is one UTF-16 unit, two bytes; '😀' is two units, four bytes
        let text = "select 'é😀' as x";
        let edited = apply_range_edit(text, range((0, 16), (0, 17)), "y").unwrap();
        assert_eq!(edited, "select 'é😀' as y");
    }

    #[test]
    fn test_column_past_line_end_clamps() {
        let text = "ab\ncd";
        let edited = apply_range_edit(text, range((0, 10), (0, 10)), "!").unwrap();
        assert_eq!(edited, "ab!\ncd");
    }

    #[test]
    fn test_inverted_range() {
        let result = apply_range_edit("abc", range((0, 2), (0, 1)), "");
        assert!(matches!(result, Err(DocumentError::InvertedRange { .. })));
    }

    #[test]
    fn test_changes_apply_in_order() {
        let changes = vec![
            TextDocumentContentChangeEvent {
                range: None,
                range_length: None,
                text: "select 1".to_string(),
            },
            edit(range((0, 7), (0, 8)), "42"),
        ];
        assert_eq!(apply_changes("old", &changes).unwrap(), "select 42");
    }

    #[test]
    fn test_failed_change_keeps_nothing() {
        let changes = vec![edit(range((0, 0), (0, 0)), "x"), edit(range((9, 0), (9, 0)), "y")];
        assert!(apply_changes("abc", &changes).is_err());
    }

    #[test]
    fn test_line_text_strips_carriage_return() {
        assert_eq!(line_text("a\r\nb", 0), Some("a"));
        assert_eq!(line_text("a\r\nb", 1), Some("b"));
        assert_eq!(line_text("a", 1), None);
        assert_eq!(line_text("a\rb", 1), Some("b"));
    }

    #[test]
    fn test_crlf_edit_stays_before_line_break() {
        let text = "select 1\r\nfrom t\r\n";
        let edited = apply_range_edit(text, range((0, 7), (0, 99)), "2").unwrap();
        assert_eq!(edited, "select 2\r\nfrom t\r\n");

        let edited = apply_range_edit(text, range((1, 100), (1, 100)), " as t2").unwrap();
        assert_eq!(edited, "select 1\r\nfrom t as t2\r\n");

        let edited = apply_range_edit(text, range((2, 0), (2, 0)), "where 1").unwrap();
        assert_eq!(edited, "select 1\r\nfrom t\r\nwhere 1");
    }

    #[test]
    fn test_lone_carriage_return_breaks_line() {
        let text = "select 1\rfrom t";
        let edited = apply_range_edit(text, range((1, 5), (1, 6)), "u").unwrap();
        assert_eq!(edited, "select 1\rfrom u");

        let edited = apply_range_edit(text, range((0, 50), (0, 50)), "0").unwrap();
        assert_eq!(edited, "select 10\rfrom t");

        let result = apply_range_edit(text, range((2, 0), (2, 0)), "x");
        assert!(matches!(
            result,
            Err(DocumentError::RangeOutOfBounds { line: 2, line_count: 2 })
        ));
    }
}
