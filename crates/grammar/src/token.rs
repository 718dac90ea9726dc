// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Tokens
//!
//! A token is the smallest unit the resolver reasons about. Its kind is
//! assigned by the lexer (punctuation, keywords, literals) and may later be
//! narrowed by the parser into one of the template-aware kinds
//! ([`TokenKind::Ref`], [`TokenKind::Macro`], ...).

use crate::keywords::Keyword;
use std::fmt;

/// Closed set of token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A character the lexer does not recognise
    Illegal,
    /// End of input, produced exactly once
    Eof,

    /// Identifier with no special meaning
    Ident,
    /// Run of decimal digits
    Int,
    /// Dialect reserved word
    Keyword(Keyword),

    // Template keywords as lexed
    RefKeyword,
    VarKeyword,
    SourceKeyword,
    Config,

    // Identifiers reclassified by the parser
    Ref,
    Var,
    Source,
    SourceTable,
    Macro,
    Package,

    // Operators
    Assign,
    Plus,
    Minus,
    Bang,
    Asterisk,
    Slash,
    Percent,
    Lt,
    Gt,
    NotEq,
    LtEq,
    GtEq,

    // Delimiters
    Comma,
    Semicolon,
    Dot,
    LParen,
    RParen,
    LBrace,
    RBrace,
    SingleQuote,
    DoubleQuote,
    Backtick,

    /// `{{`
    ExprOpen,
    /// `}}`
    ExprClose,
    /// `{%`
    StmtOpen,
    /// `%}`
    StmtClose,
}

impl TokenKind {
    /// True for the template keywords `ref`, `var`, `source` and `config`
    pub fn is_template_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::RefKeyword | TokenKind::VarKeyword | TokenKind::SourceKeyword | TokenKind::Config
        )
    }

    /// True for `'` and `"`
    pub fn is_quote(self) -> bool {
        matches!(self, TokenKind::SingleQuote | TokenKind::DoubleQuote)
    }

    /// True for `{{` and `{%`
    pub fn opens_template(self) -> bool {
        matches!(self, TokenKind::ExprOpen | TokenKind::StmtOpen)
    }

    /// True for `}}` and `%}`
    pub fn closes_template(self) -> bool {
        matches!(self, TokenKind::ExprClose | TokenKind::StmtClose)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Illegal => f.write_str("ILLEGAL"),
            TokenKind::Eof => f.write_str("EOF"),
            TokenKind::Ident => f.write_str("IDENT"),
            TokenKind::Int => f.write_str("INT"),
            TokenKind::Keyword(kw) => write!(f, "{}", kw.as_str().to_ascii_uppercase()),
            TokenKind::RefKeyword => f.write_str("ref"),
            TokenKind::VarKeyword => f.write_str("var"),
            TokenKind::SourceKeyword => f.write_str("source"),
            TokenKind::Config => f.write_str("CONFIG"),
            TokenKind::Ref => f.write_str("REF"),
            TokenKind::Var => f.write_str("VAR"),
            TokenKind::Source => f.write_str("SOURCE"),
            TokenKind::SourceTable => f.write_str("SOURCE_TABLE"),
            TokenKind::Macro => f.write_str("MACRO"),
            TokenKind::Package => f.write_str("PACKAGE"),
            TokenKind::Assign => f.write_str("="),
            TokenKind::Plus => f.write_str("+"),
            TokenKind::Minus => f.write_str("-"),
            TokenKind::Bang => f.write_str("!"),
            TokenKind::Asterisk => f.write_str("*"),
            TokenKind::Slash => f.write_str("/"),
            TokenKind::Percent => f.write_str("%"),
            TokenKind::Lt => f.write_str("<"),
            TokenKind::Gt => f.write_str(">"),
            TokenKind::NotEq => f.write_str("!="),
            TokenKind::LtEq => f.write_str("<="),
            TokenKind::GtEq => f.write_str(">="),
            TokenKind::Comma => f.write_str(","),
            TokenKind::Semicolon => f.write_str(";"),
            TokenKind::Dot => f.write_str("."),
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::LBrace => f.write_str("{"),
            TokenKind::RBrace => f.write_str("}"),
            TokenKind::SingleQuote => f.write_str("'"),
            TokenKind::DoubleQuote => f.write_str("\""),
            TokenKind::Backtick => f.write_str("`"),
            TokenKind::ExprOpen => f.write_str("{{"),
            TokenKind::ExprClose => f.write_str("}}"),
            TokenKind::StmtOpen => f.write_str("{%"),
            TokenKind::StmtClose => f.write_str("%}"),
        }
    }
}

/// A lexical unit with its zero-based start position
///
/// `column` counts UTF-16 code units, matching LSP positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind,
            literal: literal.into(),
            line,
            column,
        }
    }

    /// Width of the literal in UTF-16 code units
    pub fn width(&self) -> u32 {
        if self.literal.is_ascii() {
            self.literal.len() as u32
        } else {
            self.literal.encode_utf16().count() as u32
        }
    }

    /// Column one past the last character
    pub fn end_column(&self) -> u32 {
        self.column + self.width()
    }

    /// Whether `column` on this token's line falls inside it
    pub fn covers(&self, column: u32) -> bool {
        column >= self.column && column < self.end_column()
    }
}
