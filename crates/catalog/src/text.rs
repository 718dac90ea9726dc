// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Byte offset to editor position conversion

use dbt_lsp_ir::SourcePosition;

/// Start offsets of every line in a text
#[derive(Debug, Clone)]
pub(crate) struct LineIndex<'a> {
    text: &'a str,
    starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        let starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { text, starts }
    }

    /// Zero-based line and UTF-16 column of a byte offset
    pub(crate) fn position(&self, offset: usize) -> SourcePosition {
        let offset = offset.min(self.text.len());
        let line = self.starts.partition_point(|&start| start <= offset) - 1;
        let start = self.starts[line];
        let character = self
            .text
            .get(start..offset)
            .map(|prefix| prefix.encode_utf16().count())
            .unwrap_or_default();
        SourcePosition::new(line as u32, character as u32)
    }
}

/// UTF-16 width of a string
pub(crate) fn utf16_len(text: &str) -> u32 {
    text.encode_utf16().count() as u32
}
