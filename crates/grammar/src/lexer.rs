// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Lexer
//!
//! Byte-oriented scanner over SQL interleaved with `{{ }}` / `{% %}`
//! template delimiters. It never fails: bytes it cannot classify become
//! [`TokenKind::Illegal`] tokens and scanning continues.
//!
//! Quote characters are emitted as standalone tokens rather than string
//! literals, so the parser can see the identifier inside `ref('orders')`.

use crate::keywords::{KeywordTable, keyword_table};
use crate::token::{Token, TokenKind};
use dbt_lsp_ir::Dialect;

/// Lazy token producer over one input string
pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    /// Byte offset of the next unread byte
    pos: usize,
    line: u32,
    /// UTF-16 column of `pos`
    column: u32,
    keywords: &'static KeywordTable,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str, dialect: Dialect) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            line: 0,
            column: 0,
            keywords: keyword_table(dialect),
            finished: false,
        }
    }

    /// Produce the next token.
    ///
    /// Returns [`TokenKind::Eof`] at end of input; calling again after that
    /// keeps returning `Eof`.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let line = self.line;
        let column = self.column;
        let start = self.pos;

        let Some(byte) = self.current() else {
            self.finished = true;
            return Token::new(TokenKind::Eof, "", line, column);
        };

        let kind = match byte {
            b'=' => self.single(TokenKind::Assign),
            b';' => self.single(TokenKind::Semicolon),
            b'(' => self.single(TokenKind::LParen),
            b')' => self.single(TokenKind::RParen),
            b',' => self.single(TokenKind::Comma),
            b'.' => self.single(TokenKind::Dot),
            b'+' => self.single(TokenKind::Plus),
            b'-' => self.single(TokenKind::Minus),
            b'/' => self.single(TokenKind::Slash),
            b'*' => self.single(TokenKind::Asterisk),
            b'\'' => self.single(TokenKind::SingleQuote),
            b'"' => self.single(TokenKind::DoubleQuote),
            b'`' => self.single(TokenKind::Backtick),
            b'!' => self.pair(b'=', TokenKind::NotEq, TokenKind::Bang),
            b'<' => self.pair(b'=', TokenKind::LtEq, TokenKind::Lt),
            b'>' => self.pair(b'=', TokenKind::GtEq, TokenKind::Gt),
            b'{' => match self.peek() {
                Some(b'{') => self.double(TokenKind::ExprOpen),
                Some(b'%') => self.double(TokenKind::StmtOpen),
                _ => self.single(TokenKind::LBrace),
            },
            b'}' => self.pair(b'}', TokenKind::ExprClose, TokenKind::RBrace),
            b'%' => self.pair(b'}', TokenKind::StmtClose, TokenKind::Percent),
            b if is_ident_start(b) => return self.read_identifier(line, column),
            b if b.is_ascii_digit() => return self.read_number(line, column),
            b if b.is_ascii() => self.single(TokenKind::Illegal),
            _ => {
                self.bump_char();
                TokenKind::Illegal
            }
        };

        Token::new(kind, &self.input[start..self.pos], line, column)
    }

    fn current(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos + 1).copied()
    }

    /// Advance past one ASCII byte
    fn bump(&mut self) {
        self.pos += 1;
        self.column += 1;
    }

    /// Advance past one full UTF-8 character
    fn bump_char(&mut self) {
        match self.input[self.pos..].chars().next() {
            Some(ch) => {
                self.pos += ch.len_utf8();
                self.column += ch.len_utf16() as u32;
            }
            None => self.pos = self.bytes.len(),
        }
    }

    fn newline(&mut self) {
        self.line += 1;
        self.column = 0;
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.bump();
        kind
    }

    fn double(&mut self, kind: TokenKind) -> TokenKind {
        self.bump();
        self.bump();
        kind
    }

    /// Two-character token if the next byte is `second`, else the one-character kind
    fn pair(&mut self, second: u8, two: TokenKind, one: TokenKind) -> TokenKind {
        if self.peek() == Some(second) {
            self.double(two)
        } else {
            self.single(one)
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(byte) = self.current() {
            match byte {
                b' ' | b'\t' => self.bump(),
                b'\n' => {
                    self.pos += 1;
                    self.newline();
                }
                b'\r' => {
                    self.pos += 1;
                    if self.current() == Some(b'\n') {
                        self.pos += 1;
                    }
                    self.newline();
                }
                _ => break,
            }
        }
    }

    fn read_identifier(&mut self, line: u32, column: u32) -> Token {
        let start = self.pos;
        while self.current().is_some_and(is_ident_continue) {
            self.bump();
        }
        let literal = &self.input[start..self.pos];
        let kind = self.keywords.lookup(literal).unwrap_or(TokenKind::Ident);
        Token::new(kind, literal, line, column)
    }

    fn read_number(&mut self, line: u32, column: u32) -> Token {
        let start = self.pos;
        while self.current().is_some_and(|b| b.is_ascii_digit()) {
            self.bump();
        }
        Token::new(TokenKind::Int, &self.input[start..self.pos], line, column)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields every token before end of input; `Eof` itself is not yielded
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        (token.kind != TokenKind::Eof).then_some(token)
    }
}

fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

fn is_ident_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Collect every token of `input`, excluding `Eof`
pub fn tokenize(input: &str, dialect: Dialect) -> Vec<Token> {
    Lexer::new(input, dialect).collect()
}
