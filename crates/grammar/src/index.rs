// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Token index
//!
//! Answers "which token is under the cursor" in O(log k), where k is the
//! number of tokens on the queried line.
//!
//! The stream is already in document order, so every line's tokens form one
//! contiguous run of the arena. The index stores only that run's bounds.

use crate::error::TokenLookupError;
use crate::stream::{TokenId, TokenRef, TokenStream};
use crate::token::Token;
use std::collections::HashMap;
use std::ops::Range;

/// Line-bucketed view over an owned [`TokenStream`]
#[derive(Debug, Clone, Default)]
pub struct TokenIndex {
    stream: TokenStream,
    lines: HashMap<u32, Range<usize>>,
}

impl TokenIndex {
    pub fn new(stream: TokenStream) -> Self {
        let mut lines: HashMap<u32, Range<usize>> = HashMap::new();
        let mut run: Option<(u32, Range<usize>)> = None;

        for (position, token) in stream.as_slice().iter().enumerate() {
            match run.as_mut() {
                Some((line, range)) if *line == token.line => range.end = position + 1,
                _ => {
                    if let Some((line, range)) = run.take() {
                        lines.insert(line, range);
                    }
                    run = Some((token.line, position..position + 1));
                }
            }
        }
        if let Some((line, range)) = run {
            lines.insert(line, range);
        }

        Self { stream, lines }
    }

    pub fn stream(&self) -> &TokenStream {
        &self.stream
    }

    /// Tokens on `line`, ordered by column
    pub fn line_tokens(&self, line: u32) -> &[Token] {
        self.lines
            .get(&line)
            .map(|range| &self.stream.as_slice()[range.clone()])
            .unwrap_or(&[])
    }

    pub fn cursor(&self, id: TokenId) -> Option<TokenRef<'_>> {
        self.stream.cursor(id)
    }

    /// Find the token covering `(line, column)`
    pub fn find_token_at(&self, line: u32, column: u32) -> Result<TokenRef<'_>, TokenLookupError> {
        let range = self
            .lines
            .get(&line)
            .ok_or(TokenLookupError::EmptyLine { line })?;
        let tokens = &self.stream.as_slice()[range.clone()];

        let offset = tokens.partition_point(|token| token.end_column() <= column);
        match tokens.get(offset) {
            Some(token) if token.covers(column) => self
                .stream
                .cursor(TokenId::from(range.start + offset))
                .ok_or(TokenLookupError::NoTokenAtColumn { line, column }),
            _ => Err(TokenLookupError::NoTokenAtColumn { line, column }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::token::TokenKind;
    use dbt_lsp_ir::Dialect;

    fn index(input: &str) -> TokenIndex {
        TokenIndex::new(parse(input, Dialect::Snowflake).stream)
    }

    #[test]
    fn test_find_each_character_of_token() {
        let index = index("select orders_id from t");
        for column in 7..16 {
            let found = index.find_token_at(0, column).unwrap();
            assert_eq!(found.literal(), "orders_id");
        }
    }

    #[test]
    fn test_gap_between_tokens() {
        let index = index("select   a");
        assert_eq!(
            index.find_token_at(0, 7).unwrap_err(),
            TokenLookupError::NoTokenAtColumn { line: 0, column: 7 }
        );
    }

    #[test]
    fn test_past_end_of_line() {
        let index = index("select a");
        assert!(matches!(
            index.find_token_at(0, 40),
            Err(TokenLookupError::NoTokenAtColumn { .. })
        ));
    }

    #[test]
    fn test_blank_line() {
        let index = index("select a\n\nfrom t");
        assert_eq!(
            index.find_token_at(1, 0).unwrap_err(),
            TokenLookupError::EmptyLine { line: 1 }
        );
        assert_eq!(index.find_token_at(2, 0).unwrap().literal(), "from");
    }

    #[test]
    fn test_adjacent_tokens() {
        let index = index("{{ref('x')}}");
        assert_eq!(index.find_token_at(0, 0).unwrap().kind(), TokenKind::ExprOpen);
        assert_eq!(index.find_token_at(0, 1).unwrap().kind(), TokenKind::ExprOpen);
        assert_eq!(index.find_token_at(0, 2).unwrap().kind(), TokenKind::RefKeyword);
        assert_eq!(index.find_token_at(0, 7).unwrap().kind(), TokenKind::Ref);
    }

    #[test]
    fn test_line_tokens_sorted() {
        let index = index("a b c\nd");
        let columns: Vec<u32> = index.line_tokens(0).iter().map(|t| t.column).collect();
        assert_eq!(columns, vec![0, 2, 4]);
        assert!(index.line_tokens(5).is_empty());
    }
}
