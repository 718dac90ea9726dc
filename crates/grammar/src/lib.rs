// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # dbt Template SQL Grammar
//!
//! Front end for SQL files that mix a warehouse dialect with template
//! syntax (`{{ ref('orders') }}`, `{% set x = var('y') %}`).
//!
//! ## Pipeline
//!
//! ```text
//! text ──► Lexer ──► Parser ──► ParseOutput { TokenStream, CTE names }
//!                                     │
//!                                     ▼
//!                                TokenIndex ──► find_token_at(line, column)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use dbt_lsp_grammar::{parse, TokenIndex, TokenKind};
//! use dbt_lsp_ir::Dialect;
//!
//! let output = parse("select * from {{ ref('orders') }}", Dialect::Snowflake);
//! let index = TokenIndex::new(output.stream);
//! let token = index.find_token_at(0, 24).unwrap();
//! assert_eq!(token.kind(), TokenKind::Ref);
//! assert_eq!(token.literal(), "orders");
//! ```

pub mod error;
pub mod index;
pub mod keywords;
pub mod lexer;
pub mod parser;
pub mod stream;
pub mod token;

pub use error::TokenLookupError;
pub use index::TokenIndex;
pub use keywords::{Keyword, KeywordTable, keyword_table};
pub use lexer::{Lexer, tokenize};
pub use parser::{ParseOutput, Parser, parse};
pub use stream::{TokenId, TokenRef, TokenStream};
pub use token::{Token, TokenKind};
