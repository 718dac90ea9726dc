// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Cursor resolution
//!
//! Maps an editor position to the project entity under the cursor.
//!
//! ```text
//! position ──► TokenIndex::find_token_at ──► TokenKind
//!                                               │
//!   Ref ─────────► catalog.models
//!   Source ──────► catalog.sources
//!   SourceTable ─► lookback to the Source token ──► sources[source].tables
//!   Var ─────────► catalog.variables
//!   Macro ───────► lookback(2) == Package ? package : project ──► catalog.macros
//!   anything else ► Symbol::Plain (function docs / same-file definitions)
//! ```
//!
//! No token under the cursor, or a name the catalog does not know, resolves
//! to `None`.

use crate::document::Document;
use dbt_lsp_catalog::{
    MacroDetails, ModelDetails, ProjectCatalog, SourceDetails, SourceTableDetails,
    VariableDetails,
};
use dbt_lsp_grammar::{TokenKind, TokenRef};
use tower_lsp::lsp_types::Position;
use tracing::debug;

/// How far a source table token may sit from its source name
const SOURCE_LOOKBACK: u32 = 4;

/// Distance from a macro name back to its package qualifier (`pkg . name`)
const PACKAGE_LOOKBACK: u32 = 2;

/// Entity under the cursor
#[derive(Debug, Clone, Copy)]
pub enum Symbol<'a> {
    Model(&'a ModelDetails),
    Source(&'a SourceDetails),
    SourceTable {
        source: &'a SourceDetails,
        table: &'a SourceTableDetails,
    },
    Variable(&'a VariableDetails),
    Macro(&'a MacroDetails),
    /// A token with no catalog meaning: function names, CTE references
    Plain(TokenRef<'a>),
}

/// Resolve the entity at `position`
pub fn resolve<'a>(
    document: &'a Document,
    catalog: &'a ProjectCatalog,
    position: Position,
) -> Option<Symbol<'a>> {
    let token = document.token_at(position)?;
    let name = token.literal();
    debug!(kind = %token.kind(), name, "token under cursor");

    match token.kind() {
        TokenKind::Ref => catalog.model(name).map(Symbol::Model),
        TokenKind::Source => catalog.source(name).map(Symbol::Source),
        TokenKind::SourceTable => {
            let source_token = token.find_back(TokenKind::Source, SOURCE_LOOKBACK)?;
            let source = catalog.source(source_token.literal())?;
            let table = source.tables.get(name)?;
            Some(Symbol::SourceTable { source, table })
        }
        TokenKind::Var => catalog.variable(name).map(Symbol::Variable),
        TokenKind::Macro => {
            let package = macro_package(token).unwrap_or(&catalog.project_name);
            catalog.macro_in(package, name).map(Symbol::Macro)
        }
        _ => Some(Symbol::Plain(token)),
    }
}

/// Explicit package of a qualified macro call
fn macro_package<'a>(token: TokenRef<'a>) -> Option<&'a str> {
    token
        .lookback(PACKAGE_LOOKBACK)
        .filter(|candidate| candidate.kind() == TokenKind::Package)
        .map(|package| package.literal())
}
