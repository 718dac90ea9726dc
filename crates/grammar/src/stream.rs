// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Token arena
//!
//! The parser appends every token to a single `Vec`. A token's predecessor
//! is always the entry at `index - 1`, so walking backwards can never cycle
//! and the whole stream is freed in one drop when a document is reparsed.

use crate::token::{Token, TokenKind};

/// Position of a token inside a [`TokenStream`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(u32);

impl TokenId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The token appended immediately before this one
    pub fn prev(self) -> Option<TokenId> {
        self.0.checked_sub(1).map(TokenId)
    }

    /// The token `steps` positions earlier
    pub fn back(self, steps: u32) -> Option<TokenId> {
        self.0.checked_sub(steps).map(TokenId)
    }
}

impl From<usize> for TokenId {
    fn from(index: usize) -> Self {
        TokenId(index as u32)
    }
}

/// Ordered, owned sequence of tokens in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn get(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> impl Iterator<Item = (TokenId, &Token)> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(index, token)| (TokenId::from(index), token))
    }

    /// A cursor positioned on `id`, if it exists
    pub fn cursor(&self, id: TokenId) -> Option<TokenRef<'_>> {
        self.get(id).map(|_| TokenRef { stream: self, id })
    }
}

/// Borrowed view of one token that can walk to its predecessors
#[derive(Debug, Clone, Copy)]
pub struct TokenRef<'a> {
    stream: &'a TokenStream,
    id: TokenId,
}

impl<'a> TokenRef<'a> {
    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn token(&self) -> &'a Token {
        &self.stream.tokens[self.id.index()]
    }

    pub fn kind(&self) -> TokenKind {
        self.token().kind
    }

    pub fn literal(&self) -> &'a str {
        &self.token().literal
    }

    pub fn prev(&self) -> Option<TokenRef<'a>> {
        self.lookback(1)
    }

    /// The token exactly `steps` positions back
    pub fn lookback(&self, steps: u32) -> Option<TokenRef<'a>> {
        self.id.back(steps).and_then(|id| self.stream.cursor(id))
    }

    /// Nearest preceding token of `kind` within `max_steps`
    pub fn find_back(&self, kind: TokenKind, max_steps: u32) -> Option<TokenRef<'a>> {
        (1..=max_steps)
            .map_while(|steps| self.lookback(steps))
            .find(|candidate| candidate.kind() == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream() -> TokenStream {
        TokenStream::new(vec![
            Token::new(TokenKind::Package, "pkg", 0, 3),
            Token::new(TokenKind::Dot, ".", 0, 6),
            Token::new(TokenKind::Macro, "my_macro", 0, 7),
            Token::new(TokenKind::LParen, "(", 0, 15),
        ])
    }

    #[test]
    fn test_prev_terminates_at_start() {
        let stream = stream();
        let mut cursor = stream.cursor(TokenId::from(3)).unwrap();
        let mut steps = 0;
        while let Some(prev) = cursor.prev() {
            cursor = prev;
            steps += 1;
        }
        assert_eq!(steps, 3);
        assert_eq!(cursor.id(), TokenId::from(0));
    }

    #[test]
    fn test_lookback_exact() {
        let stream = stream();
        let cursor = stream.cursor(TokenId::from(2)).unwrap();
        assert_eq!(cursor.lookback(2).unwrap().kind(), TokenKind::Package);
        assert!(cursor.lookback(3).is_none());
    }

    #[test]
    fn test_find_back_is_bounded() {
        let stream = stream();
        let cursor = stream.cursor(TokenId::from(3)).unwrap();
        assert_eq!(
            cursor.find_back(TokenKind::Package, 3).unwrap().literal(),
            "pkg"
        );
        assert!(cursor.find_back(TokenKind::Package, 2).is_none());
    }

    #[test]
    fn test_cursor_out_of_bounds() {
        assert!(stream().cursor(TokenId::from(9)).is_none());
    }
}
