// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Hover Information Provider
//!
//! | under the cursor      | hover text                                     |
//! |-----------------------|------------------------------------------------|
//! | `ref('orders')`       | model description                              |
//! | `source('raw', ..)`   | source description                             |
//! | `source(.., 'orders')`| `Source: raw\n<desc>\n\nTable: orders\n<desc>`  |
//! | `var('start_date')`   | `start_date: 2018-01-01`                        |
//! | `{{ my_macro(..) }}`  | macro signature                                |
//! | anything else         | builtin function docs for the project dialect  |
//!
//! Empty text yields no hover.

use crate::document::Document;
use crate::resolver::{Symbol, resolve};
use dbt_lsp_catalog::ProjectCatalog;
use dbt_lsp_function_registry::HoverInfoProvider;
use dbt_lsp_ir::Dialect;
use tower_lsp::lsp_types::{Hover, HoverContents, MarkedString, Position};

/// Hover engine
pub struct HoverEngine {
    hover_provider: HoverInfoProvider,
}

impl Default for HoverEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HoverEngine {
    pub fn new() -> Self {
        Self {
            hover_provider: HoverInfoProvider::new(),
        }
    }

    /// Hover for `position` in `document`
    pub fn hover(&self, document: &Document, catalog: &ProjectCatalog, position: Position) -> Option<Hover> {
        let symbol = resolve(document, catalog, position)?;
        let text = self.hover_text(symbol, document.dialect())?;
        if text.is_empty() {
            return None;
        }
        Some(Hover {
            contents: HoverContents::Scalar(MarkedString::String(text)),
            range: None,
        })
    }

    /// Text shown for `symbol`
    pub fn hover_text(&self, symbol: Symbol<'_>, dialect: Dialect) -> Option<String> {
        match symbol {
            Symbol::Model(model) => Some(model.description.clone()),
            Symbol::Source(source) => Some(source.description.clone()),
            Symbol::SourceTable { source, table } => Some(format!(
                "Source: {}\n{}\n\nTable: {}\n{}",
                source.name, source.description, table.name, table.description
            )),
            Symbol::Variable(variable) => Some(format!("{}: {}", variable.name, variable.value)),
            Symbol::Macro(details) => Some(details.description.clone()),
            Symbol::Plain(token) => self.hover_provider.get_function_hover(token.literal(), dialect),
        }
    }
}
