// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Completion module
//!
//! - `context`: picks what is being completed from the text before the cursor
//! - `render`: converts catalog entries and builtin functions to completion items
//!
//! ## Flow
//!
//! ```text
//! cursor line ──► split at cursor ──► detect_context(before)
//!                                          │
//!          Ref / Source / Var ─────────────┼──► catalog items + closing suffix
//!          Macro ──────────────────────────┼──► macro items
//!          Function ───────────────────────┴──► dialect builtin functions
//!                                          ▼
//!                          sort by sort_text, cap at maxItems
//! ```

pub mod context;
pub mod render;

use crate::config::CompletionConfig;
use crate::document::Document;
use crate::sync::{line_text, utf16_to_byte};
use dbt_lsp_catalog::ProjectCatalog;
use dbt_lsp_function_registry::FunctionRegistry;
use tower_lsp::lsp_types::{CompletionItem, CompletionList, CompletionResponse, Position};
use tracing::debug;

pub use context::{CompletionContext, closing_suffix, detect_context};
pub use render::CompletionRenderer;

/// Completion engine
pub struct CompletionEngine {
    functions: &'static FunctionRegistry,
    max_items: Option<usize>,
}

impl CompletionEngine {
    pub fn new(config: &CompletionConfig) -> Self {
        Self {
            functions: FunctionRegistry::global(),
            max_items: config.max_items,
        }
    }

    /// Completion items at `position`
    ///
    /// Returns `None` when the position is past the end of the document.
    pub fn complete(
        &self,
        document: &Document,
        catalog: &ProjectCatalog,
        position: Position,
    ) -> Option<CompletionResponse> {
        let line = line_text(document.text(), position.line)?;
        let cursor = utf16_to_byte(line, position.character);
        let (before, after) = line.split_at(cursor);

        let context = detect_context(before);
        let suffix = context
            .function_name()
            .map(|function| closing_suffix(before, after, function))
            .unwrap_or_default();
        debug!(?context, %suffix, "completion context");

        let mut items = match context {
            CompletionContext::Ref { .. } => CompletionRenderer::render_models(catalog, &suffix),
            CompletionContext::Source { quote } => {
                CompletionRenderer::render_sources(catalog, quote, &suffix)
            }
            CompletionContext::Var { .. } => CompletionRenderer::render_variables(catalog, &suffix),
            CompletionContext::Macro => CompletionRenderer::render_macros(catalog),
            CompletionContext::Function => {
                CompletionRenderer::render_functions(self.functions.get_functions(document.dialect()))
            }
        };
        items.sort_by(|a, b| sort_key(a).cmp(sort_key(b)));

        Some(self.respond(items))
    }

    fn respond(&self, mut items: Vec<CompletionItem>) -> CompletionResponse {
        match self.max_items {
            Some(max) if items.len() > max => {
                items.truncate(max);
                CompletionResponse::List(CompletionList {
                    is_incomplete: true,
                    items,
                })
            }
            _ => CompletionResponse::Array(items),
        }
    }
}

fn sort_key(item: &CompletionItem) -> &str {
    item.sort_text.as_deref().unwrap_or(&item.label)
}
