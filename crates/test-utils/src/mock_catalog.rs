// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! In-memory catalogs for testing
//!
//! [`ProjectCatalogBuilder`] lays entries out the way a project on disk
//! would: models under `<root>/models`, macros under `<root>/macros`,
//! variables in `<root>/dbt_project.yml`.

use dbt_lsp_catalog::{
    CatalogError, CatalogResult, CatalogSource, MacroDetails, ModelDetails, ProjectCatalog,
    SchemaLocation, SourceDetails, SourceTableDetails, VariableDetails,
};
use dbt_lsp_ir::{Dialect, SourceRange};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// Builder for project catalogs with a fluent API
#[derive(Debug, Clone)]
pub struct ProjectCatalogBuilder {
    catalog: ProjectCatalog,
}

impl ProjectCatalogBuilder {
    /// An empty catalog for `project` rooted at `/work/<project>`
    pub fn new(project: &str) -> Self {
        Self {
            catalog: ProjectCatalog {
                project_name: project.to_string(),
                project_root: PathBuf::from("/work").join(project),
                ..Default::default()
            },
        }
    }

    /// Move the project root; call before adding entries
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.catalog.project_root = root.into();
        self
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.catalog.dialect = dialect;
        self
    }

    /// Add a root project model
    pub fn with_model(self, name: &str, description: &str) -> Self {
        let package = self.catalog.project_name.clone();
        self.with_model_in(&package, name, description)
    }

    /// Add a model owned by `package`
    pub fn with_model_in(mut self, package: &str, name: &str, description: &str) -> Self {
        let path = self.package_root(package).join("models").join(format!("{name}.sql"));
        self.catalog.models.insert(
            name.to_string(),
            ModelDetails {
                name: name.to_string(),
                path,
                package: package.to_string(),
                description: description.to_string(),
                schema: None,
            },
        );
        self
    }

    /// Record where `model` is declared in schema YAML, adding the model if needed
    pub fn with_model_schema(mut self, model: &str, path: impl Into<PathBuf>, range: SourceRange) -> Self {
        if !self.catalog.models.contains_key(model) {
            self = self.with_model(model, "");
        }
        if let Some(details) = self.catalog.models.get_mut(model) {
            details.schema = Some(SchemaLocation {
                path: path.into(),
                range,
            });
        }
        self
    }

    pub fn with_source(mut self, name: &str, description: &str) -> Self {
        let path = self.sources_file();
        let source = self
            .catalog
            .sources
            .entry(name.to_string())
            .or_insert_with(|| SourceDetails {
                name: name.to_string(),
                description: String::new(),
                path,
                range: SourceRange::on_line(3, 10, name.len() as u32),
                tables: Default::default(),
            });
        source.description = description.to_string();
        self
    }

    /// Add a table to `source`, adding the source if needed
    pub fn with_source_table(mut self, source: &str, table: &str, description: &str) -> Self {
        if !self.catalog.sources.contains_key(source) {
            self = self.with_source(source, "");
        }
        let path = self.sources_file();
        if let Some(details) = self.catalog.sources.get_mut(source) {
            let line = 6 + 2 * details.tables.len() as u32;
            details.tables.insert(
                table.to_string(),
                SourceTableDetails {
                    name: table.to_string(),
                    description: description.to_string(),
                    path,
                    range: SourceRange::on_line(line, 14, table.len() as u32),
                },
            );
        }
        self
    }

    pub fn with_variable(mut self, name: &str, value: &str) -> Self {
        let line = 5 + self.catalog.variables.len() as u32;
        self.catalog.variables.insert(
            name.to_string(),
            VariableDetails {
                name: name.to_string(),
                value: value.to_string(),
                path: self.catalog.project_root.join("dbt_project.yml"),
                range: SourceRange::on_line(line, 2, name.len() as u32),
            },
        );
        self
    }

    /// Add macro `name` of `package`; `signature` becomes its description
    pub fn with_macro(mut self, package: &str, name: &str, signature: &str) -> Self {
        let path = self.package_root(package).join("macros").join(format!("{name}.sql"));
        let details = MacroDetails {
            name: name.to_string(),
            package: package.to_string(),
            description: signature.to_string(),
            path,
            // `{% macro ` precedes the signature
            range: SourceRange::on_line(0, 9, signature.encode_utf16().count() as u32),
        };
        self.catalog
            .macros
            .entry(package.to_string())
            .or_default()
            .insert(name.to_string(), details);
        self
    }

    pub fn build(self) -> ProjectCatalog {
        self.catalog
    }

    fn package_root(&self, package: &str) -> PathBuf {
        if self.catalog.is_root_package(package) {
            self.catalog.project_root.clone()
        } else {
            self.catalog.project_root.join("dbt_packages").join(package)
        }
    }

    fn sources_file(&self) -> PathBuf {
        self.catalog.project_root.join("models").join("sources.yml")
    }
}

/// Catalog source serving a fixed catalog
///
/// Counts loads, and fails them with a profile error after
/// [`fail_with`](Self::fail_with).
#[derive(Debug)]
pub struct MockCatalogSource {
    catalog: Mutex<ProjectCatalog>,
    failure: Mutex<Option<String>>,
    loads: AtomicUsize,
}

impl MockCatalogSource {
    pub fn new(catalog: ProjectCatalog) -> Self {
        Self {
            catalog: Mutex::new(catalog),
            failure: Mutex::new(None),
            loads: AtomicUsize::new(0),
        }
    }

    /// Serve `catalog` from the next load on
    pub fn set_catalog(&self, catalog: ProjectCatalog) {
        *self.catalog.lock().unwrap_or_else(PoisonError::into_inner) = catalog;
    }

    /// Make every following load fail
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = Some(message.to_string());
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CatalogSource for MockCatalogSource {
    async fn load(&self) -> CatalogResult<ProjectCatalog> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.failure.lock().unwrap_or_else(PoisonError::into_inner).clone() {
            return Err(CatalogError::Profile(message));
        }
        Ok(self.catalog.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }
}
