// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Lookup outcomes for cursor queries.
//!
//! Lexing and parsing never fail. The only error this crate reports is a
//! cursor position that no token covers, and callers need to tell a blank
//! line apart from a gap between tokens.

use thiserror::Error;

/// Why [`crate::TokenIndex::find_token_at`] found nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenLookupError {
    /// The line holds no tokens at all
    #[error("line {line} has no tokens")]
    EmptyLine { line: u32 },

    /// The line has tokens but none covers the column
    #[error("no token at line {line}, column {column}")]
    NoTokenAtColumn { line: u32, column: u32 },
}
