// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Hover Information Provider
//!
//! Markdown documentation for builtin functions, shown on hover and as the
//! `documentation` of function completion items.
//!
//! ## Examples
//!
//! ```rust
//! use dbt_lsp_function_registry::{Dialect, HoverInfoProvider};
//!
//! let provider = HoverInfoProvider::new();
//! let info = provider.get_function_hover("coalesce", Dialect::Snowflake);
//! assert!(info.unwrap().starts_with("```sql\nCOALESCE(expr, ...)"));
//! ```

use crate::{Dialect, FunctionMetadata, FunctionRegistry, FunctionType};

/// Hover information provider backed by the global [`FunctionRegistry`]
#[derive(Debug, Clone, Copy)]
pub struct HoverInfoProvider {
    function_registry: &'static FunctionRegistry,
}

impl HoverInfoProvider {
    pub fn new() -> Self {
        Self {
            function_registry: FunctionRegistry::global(),
        }
    }

    /// Hover text for the function named `name` (case-insensitive), or
    /// `None` when the dialect has no such builtin
    pub fn get_function_hover(&self, name: &str, dialect: Dialect) -> Option<String> {
        self.function_registry
            .get_function(dialect, name)
            .map(format_function_docs)
    }

    /// Check if a word is a known function name
    pub fn is_function(&self, word: &str, dialect: Dialect) -> bool {
        self.function_registry.has_function(dialect, word)
    }
}

impl Default for HoverInfoProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Markdown body: signature block, kind, description, optional example
pub fn format_function_docs(func: &FunctionMetadata) -> String {
    let mut doc = format!("```sql\n{}\n```", func.signature());

    let kind = match func.function_type {
        FunctionType::Scalar => None,
        FunctionType::Aggregate => Some("Aggregate function"),
        FunctionType::Window => Some("Window function"),
        FunctionType::Table => Some("Table function"),
    };
    if let Some(kind) = kind {
        doc.push_str("\n\n*");
        doc.push_str(kind);
        doc.push('*');
    }

    doc.push_str("\n\n");
    doc.push_str(func.description.as_deref().unwrap_or("SQL function"));

    if let Some(example) = &func.example {
        doc.push_str("\n\n```sql\n");
        doc.push_str(example);
        doc.push_str("\n```");
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_function_hover() {
        let provider = HoverInfoProvider::new();
        let info = provider
            .get_function_hover("dateadd", Dialect::Snowflake)
            .unwrap();
        assert!(info.contains("DATEADD(date_or_time_part, value, date_or_time_expr)"));
        assert!(info.contains("dateadd(day, -7, current_date)"));
    }

    #[test]
    fn test_unknown_function_has_no_hover() {
        let provider = HoverInfoProvider::new();
        assert!(provider.get_function_hover("orders", Dialect::Snowflake).is_none());
        assert!(provider.get_function_hover("dateadd", Dialect::Postgres).is_none());
    }

    #[test]
    fn test_is_function() {
        let provider = HoverInfoProvider::new();
        assert!(provider.is_function("COUNT", Dialect::Generic));
        assert!(provider.is_function("sum", Dialect::BigQuery));
        assert!(!provider.is_function("NOTAREALFUNCTION", Dialect::Snowflake));
    }

    #[test]
    fn test_format_marks_aggregates() {
        let func = FunctionMetadata::new("MEDIAN")
            .with_type(FunctionType::Aggregate)
            .with_description("Median");
        assert_eq!(
            format_function_docs(&func),
            "```sql\nMEDIAN()\n```\n\n*Aggregate function*\n\nMedian"
        );
    }

    #[test]
    fn test_format_without_description() {
        let func = FunctionMetadata::new("NOW");
        assert_eq!(format_function_docs(&func), "```sql\nNOW()\n```\n\nSQL function");
    }
}
