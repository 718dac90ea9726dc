// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Catalog metadata types
//!
//! One immutable [`ProjectCatalog`] describes everything the server knows
//! about a dbt project at a point in time. Paths are absolute; ranges are
//! zero-based with UTF-16 columns.

use dbt_lsp_ir::{Dialect, SourceRange};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Where a model is declared in schema YAML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaLocation {
    pub path: PathBuf,
    pub range: SourceRange,
}

/// A model or seed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDetails {
    /// Name used in `ref()`: the alias if configured, else the file stem
    pub name: String,
    /// The `.sql` or `.csv` file
    pub path: PathBuf,
    /// Project or installed package that owns the model
    pub package: String,
    pub description: String,
    pub schema: Option<SchemaLocation>,
}

/// A macro definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroDetails {
    pub name: String,
    pub package: String,
    /// Signature text, e.g. `cents_to_dollars(column_name, scale=2)`
    pub description: String,
    pub path: PathBuf,
    /// Range of the signature inside the `{% macro %}` tag
    pub range: SourceRange,
}

/// A project variable from `dbt_project.yml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDetails {
    pub name: String,
    /// Rendered value: scalars as-is, sequences and maps as YAML
    pub value: String,
    pub path: PathBuf,
    pub range: SourceRange,
}

/// One table of a source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTableDetails {
    pub name: String,
    pub description: String,
    pub path: PathBuf,
    pub range: SourceRange,
}

/// A source declared in schema YAML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDetails {
    pub name: String,
    pub description: String,
    pub path: PathBuf,
    pub range: SourceRange,
    pub tables: HashMap<String, SourceTableDetails>,
}

/// Immutable snapshot of a dbt project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCatalog {
    /// `name` from the root `dbt_project.yml`
    pub project_name: String,
    pub project_root: PathBuf,
    pub dialect: Dialect,
    pub models: HashMap<String, ModelDetails>,
    /// package name → macro name → details
    pub macros: HashMap<String, HashMap<String, MacroDetails>>,
    pub variables: HashMap<String, VariableDetails>,
    pub sources: HashMap<String, SourceDetails>,
}

impl ProjectCatalog {
    pub fn model(&self, name: &str) -> Option<&ModelDetails> {
        self.models.get(name)
    }

    pub fn source(&self, name: &str) -> Option<&SourceDetails> {
        self.sources.get(name)
    }

    pub fn source_table(&self, source: &str, table: &str) -> Option<&SourceTableDetails> {
        self.sources.get(source)?.tables.get(table)
    }

    pub fn variable(&self, name: &str) -> Option<&VariableDetails> {
        self.variables.get(name)
    }

    /// Macro `name` defined by `package`
    pub fn macro_in(&self, package: &str, name: &str) -> Option<&MacroDetails> {
        self.macros.get(package)?.get(name)
    }

    /// Every macro across all packages
    pub fn all_macros(&self) -> impl Iterator<Item = &MacroDetails> {
        self.macros.values().flat_map(HashMap::values)
    }

    pub fn is_root_package(&self, package: &str) -> bool {
        package == self.project_name
    }
}
