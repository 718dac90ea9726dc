// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Completion rendering
//!
//! Builds LSP completion items from catalog entries and builtin functions.

use dbt_lsp_catalog::ProjectCatalog;
use dbt_lsp_function_registry::{FunctionMetadata, format_function_docs};
use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, Documentation, MarkupContent, MarkupKind,
};

/// Completion renderer
pub struct CompletionRenderer;

impl CompletionRenderer {
    /// One item per model, for `ref('`
    pub fn render_models(catalog: &ProjectCatalog, suffix: &str) -> Vec<CompletionItem> {
        catalog
            .models
            .values()
            .map(|model| CompletionItem {
                label: model.name.clone(),
                kind: Some(CompletionItemKind::REFERENCE),
                detail: Some(format!("Project: {}", model.package)),
                documentation: Some(Documentation::String(model.description.clone())),
                insert_text: Some(format!("{}{suffix}", model.name)),
                sort_text: Some(model.name.clone()),
                ..Default::default()
            })
            .collect()
    }

    /// One item per source table, for `source('`
    ///
    /// Inserting completes both arguments: `raw', 'orders`.
    pub fn render_sources(catalog: &ProjectCatalog, quote: char, suffix: &str) -> Vec<CompletionItem> {
        catalog
            .sources
            .values()
            .flat_map(|source| {
                source.tables.values().map(move |table| {
                    let label = format!("{} - {}", source.name, table.name);
                    CompletionItem {
                        kind: Some(CompletionItemKind::REFERENCE),
                        detail: Some(format!("Source: {}", source.name)),
                        documentation: Some(Documentation::String(format!(
                            "{}\n\nTable: {}\n{}",
                            source.description, table.name, table.description
                        ))),
                        insert_text: Some(format!(
                            "{}{quote}, {quote}{}{suffix}",
                            source.name, table.name
                        )),
                        sort_text: Some(label.clone()),
                        label,
                        ..Default::default()
                    }
                })
            })
            .collect()
    }

    /// One item per project variable, for `var('`
    pub fn render_variables(catalog: &ProjectCatalog, suffix: &str) -> Vec<CompletionItem> {
        catalog
            .variables
            .values()
            .map(|variable| CompletionItem {
                label: variable.name.clone(),
                kind: Some(CompletionItemKind::VARIABLE),
                detail: Some(variable.name.clone()),
                documentation: Some(Documentation::String(variable.value.clone())),
                insert_text: Some(format!("{}{suffix}", variable.name)),
                sort_text: Some(variable.name.clone()),
                ..Default::default()
            })
            .collect()
    }

    /// One item per macro; package macros insert as `package.name`
    pub fn render_macros(catalog: &ProjectCatalog) -> Vec<CompletionItem> {
        catalog
            .all_macros()
            .map(|details| {
                let insert_text = if catalog.is_root_package(&details.package) {
                    details.name.clone()
                } else {
                    format!("{}.{}", details.package, details.name)
                };
                CompletionItem {
                    label: details.name.clone(),
                    kind: Some(CompletionItemKind::SNIPPET),
                    detail: Some(format!("Project: {}", details.package)),
                    documentation: Some(Documentation::String(details.description.clone())),
                    insert_text: Some(insert_text),
                    sort_text: Some(details.name.clone()),
                    ..Default::default()
                }
            })
            .collect()
    }

    /// Builtin functions of the project dialect
    pub fn render_functions(functions: &[FunctionMetadata]) -> Vec<CompletionItem> {
        functions
            .iter()
            .map(|func| CompletionItem {
                label: func.name.clone(),
                kind: Some(CompletionItemKind::FUNCTION),
                detail: Some(func.signature()),
                documentation: Some(Documentation::MarkupContent(MarkupContent {
                    kind: MarkupKind::Markdown,
                    value: format_function_docs(func),
                })),
                insert_text: Some(func.name.clone()),
                sort_text: Some(func.name.clone()),
                ..Default::default()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbt_lsp_test_utils::ProjectCatalogBuilder;

    fn catalog() -> ProjectCatalog {
        ProjectCatalogBuilder::new("jaffle_shop")
            .with_source("raw", "Raw data")
            .with_source_table("raw", "orders", "One row per order")
            .with_macro("jaffle_shop", "cents_to_dollars", "cents_to_dollars(column_name)")
            .with_macro("dbt_utils", "star", "star(from)")
            .build()
    }

    #[test]
    fn test_source_items_insert_both_arguments() {
        let items = CompletionRenderer::render_sources(&catalog(), '"', "\") }}");
        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.label, "raw - orders");
        assert_eq!(item.detail.as_deref(), Some("Source: raw"));
        assert_eq!(item.insert_text.as_deref(), Some("raw\", \"orders\") }}"));
        assert_eq!(
            item.documentation,
            Some(Documentation::String("Raw data\n\nTable: orders\nOne row per order".to_string()))
        );
    }

    #[test]
    fn test_package_macros_are_qualified() {
        let mut items = CompletionRenderer::render_macros(&catalog());
        items.sort_by(|a, b| a.label.cmp(&b.label));
        assert_eq!(items[0].insert_text.as_deref(), Some("cents_to_dollars"));
        assert_eq!(items[1].insert_text.as_deref(), Some("dbt_utils.star"));
        assert_eq!(items[1].detail.as_deref(), Some("Project: dbt_utils"));
        assert!(items.iter().all(|item| item.kind == Some(CompletionItemKind::SNIPPET)));
    }

    #[test]
    fn test_function_items() {
        let functions = vec![FunctionMetadata::new("COALESCE").with_description("First non-null")];
        let items = CompletionRenderer::render_functions(&functions);
        assert_eq!(items[0].label, "COALESCE");
        assert_eq!(items[0].insert_text.as_deref(), Some("COALESCE"));
        assert_eq!(items[0].kind, Some(CompletionItemKind::FUNCTION));
    }
}
