// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use crate::{Dialect, FunctionMetadata, builtin};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Function registry for builtin warehouse functions
///
/// Each dialect maps to its own list, sorted by name. Dialects without a
/// dedicated list resolve to the ANSI functions.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    /// Functions organized by dialect
    functions: HashMap<Dialect, Vec<FunctionMetadata>>,
    common: Vec<FunctionMetadata>,
}

impl FunctionRegistry {
    /// Create a new function registry with all builtin functions loaded
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dbt_lsp_function_registry::{Dialect, FunctionRegistry};
    ///
    /// let registry = FunctionRegistry::new();
    /// assert!(registry.has_function(Dialect::Snowflake, "iff"));
    /// ```
    pub fn new() -> Self {
        let postgres = builtin::postgres::all_functions();
        let mut functions = HashMap::new();
        functions.insert(Dialect::Snowflake, builtin::snowflake::all_functions());
        functions.insert(Dialect::Redshift, postgres.clone());
        functions.insert(Dialect::Postgres, postgres);
        functions.insert(Dialect::BigQuery, builtin::bigquery::all_functions());
        functions.insert(Dialect::Databricks, builtin::databricks::all_functions());
        functions.insert(Dialect::DuckDb, builtin::duckdb::all_functions());

        let mut common = builtin::common::all_functions();
        common.sort_by(|a, b| a.name.cmp(&b.name));

        Self { functions, common }
    }

    /// Process-wide registry, built on first use
    pub fn global() -> &'static FunctionRegistry {
        static REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();
        REGISTRY.get_or_init(FunctionRegistry::new)
    }

    /// All functions for a dialect, sorted by name
    pub fn get_functions(&self, dialect: Dialect) -> &[FunctionMetadata] {
        self.functions
            .get(&dialect)
            .map(Vec::as_slice)
            .unwrap_or(self.common.as_slice())
    }

    /// Lookup a single function by name (case-insensitive)
    pub fn get_function(&self, dialect: Dialect, name: &str) -> Option<&FunctionMetadata> {
        self.get_functions(dialect)
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Check if a function exists for a specific dialect
    pub fn has_function(&self, dialect: Dialect, name: &str) -> bool {
        self.get_function(dialect, name).is_some()
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry() {
        let registry = FunctionRegistry::new();
        for dialect in [
            Dialect::Snowflake,
            Dialect::Postgres,
            Dialect::Redshift,
            Dialect::BigQuery,
            Dialect::Databricks,
            Dialect::DuckDb,
            Dialect::Generic,
        ] {
            assert!(!registry.get_functions(dialect).is_empty(), "{dialect}");
        }
    }

    #[test]
    fn test_get_function_case_insensitive() {
        let registry = FunctionRegistry::new();

        let upper = registry.get_function(Dialect::Snowflake, "DATEADD");
        let lower = registry.get_function(Dialect::Snowflake, "dateadd");
        let mixed = registry.get_function(Dialect::Snowflake, "DateAdd");

        assert!(upper.is_some());
        assert_eq!(upper, lower);
        assert_eq!(upper, mixed);
    }

    #[test]
    fn test_dialect_specific_functions() {
        let registry = FunctionRegistry::new();
        assert!(registry.has_function(Dialect::Snowflake, "IFF"));
        assert!(!registry.has_function(Dialect::Postgres, "IFF"));
        assert!(registry.has_function(Dialect::Redshift, "STRING_AGG"));
        assert!(registry.has_function(Dialect::Generic, "COALESCE"));
        assert!(!registry.has_function(Dialect::Generic, "IFF"));
    }

    #[test]
    fn test_functions_sorted_and_unique() {
        let registry = FunctionRegistry::global();
        let names: Vec<&str> = registry
            .get_functions(Dialect::Snowflake)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted);
    }
}
