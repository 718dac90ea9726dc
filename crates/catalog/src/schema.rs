// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Models and sources pass
//!
//! Models are the `.sql` files under model paths plus `.csv` seeds. Schema
//! YAML files next to them contribute descriptions, aliases and the
//! location used by "go to schema", and declare sources.

use crate::docs::DocsBlocks;
use crate::error::{CatalogError, CatalogResult};
use crate::metadata::{ModelDetails, SchemaLocation, SourceDetails, SourceTableDetails};
use crate::project::DbtProject;
use crate::walk::{file_stem, files_with_extension};
use crate::yaml_scan::SchemaPositions;
use dbt_lsp_ir::SourceRange;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Description given to every seed
pub const SEED_DESCRIPTION: &str = "Seed File";

#[derive(Debug, Default, Deserialize)]
struct SchemaFile {
    models: Option<Vec<SchemaModel>>,
    sources: Option<Vec<SchemaSource>>,
}

#[derive(Debug, Deserialize)]
struct SchemaModel {
    name: String,
    description: Option<String>,
    config: Option<ModelConfig>,
}

#[derive(Debug, Deserialize)]
struct ModelConfig {
    alias: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SchemaSource {
    name: String,
    description: Option<String>,
    tables: Option<Vec<SchemaTable>>,
}

#[derive(Debug, Deserialize)]
struct SchemaTable {
    name: String,
    description: Option<String>,
}

/// What schema YAML says about one model
#[derive(Debug, Clone)]
struct SchemaEntry {
    description: String,
    alias: Option<String>,
    location: SchemaLocation,
}

/// Models and sources of one project
#[derive(Debug, Default)]
pub(crate) struct ProjectModels {
    pub models: HashMap<String, ModelDetails>,
    pub sources: HashMap<String, SourceDetails>,
}

/// Docs blocks from every project, root last so its blocks win
pub(crate) fn collect_docs(projects: &[&DbtProject]) -> DocsBlocks {
    let mut docs = DocsBlocks::default();
    for project in projects {
        for file in files_with_extension(&project.docs_paths, &["md"]) {
            match std::fs::read_to_string(&file) {
                Ok(text) => docs.collect(&text),
                Err(e) => warn!(file = %file.display(), error = %e, "skipping docs file"),
            }
        }
    }
    debug!(blocks = docs.len(), "collected docs blocks");
    docs
}

/// Models, seeds and sources of `project`
pub(crate) fn collect_models(project: &DbtProject, docs: &DocsBlocks) -> ProjectModels {
    let mut schema_entries = HashMap::new();
    let mut sources = HashMap::new();

    for file in files_with_extension(&project.model_paths, &["yml", "yaml"]) {
        match read_schema_file(&file, docs) {
            Ok((entries, file_sources)) => {
                schema_entries.extend(entries);
                sources.extend(file_sources);
            }
            Err(e) => warn!(file = %file.display(), error = %e, "skipping schema file"),
        }
    }

    let mut models = HashMap::new();
    for file in files_with_extension(&project.model_paths, &["sql"]) {
        let Some(stem) = file_stem(&file) else {
            continue;
        };
        let schema = schema_entries.get(&stem);
        let name = schema
            .and_then(|entry| entry.alias.clone())
            .filter(|alias| !alias.is_empty())
            .unwrap_or(stem);
        models.insert(
            name.clone(),
            ModelDetails {
                name,
                path: file,
                package: project.name.clone(),
                description: schema
                    .map(|entry| entry.description.clone())
                    .unwrap_or_default(),
                schema: schema.map(|entry| entry.location.clone()),
            },
        );
    }

    for file in files_with_extension(&project.seed_paths, &["csv"]) {
        let Some(name) = file_stem(&file) else {
            continue;
        };
        models.insert(
            name.clone(),
            ModelDetails {
                name,
                path: file,
                package: project.name.clone(),
                description: SEED_DESCRIPTION.to_string(),
                schema: None,
            },
        );
    }

    debug!(
        project = %project.name,
        models = models.len(),
        sources = sources.len(),
        "collected models"
    );
    ProjectModels { models, sources }
}

type SchemaContents = (HashMap<String, SchemaEntry>, HashMap<String, SourceDetails>);

fn read_schema_file(path: &Path, docs: &DocsBlocks) -> CatalogResult<SchemaContents> {
    let text = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    if text.trim().is_empty() {
        return Ok(Default::default());
    }
    let schema: SchemaFile = serde_yaml::from_str(&text).map_err(|e| CatalogError::yaml(path, e))?;
    let mut positions = SchemaPositions::scan(&text);

    let mut entries = HashMap::new();
    for model in schema.models.unwrap_or_default() {
        let position = positions.model(&model.name).unwrap_or_default();
        let entry = SchemaEntry {
            description: docs.expand(model.description.as_deref().unwrap_or_default()),
            alias: model.config.and_then(|config| config.alias),
            location: SchemaLocation {
                path: path.to_path_buf(),
                range: SourceRange::point(position),
            },
        };
        entries.insert(model.name, entry);
    }

    let mut sources = HashMap::new();
    for source in schema.sources.unwrap_or_default() {
        let (handle, position) = match positions.source(&source.name) {
            Some((handle, position)) => (Some(handle), position),
            None => (None, Default::default()),
        };
        let tables = source
            .tables
            .unwrap_or_default()
            .into_iter()
            .map(|table| {
                let position = handle
                    .as_ref()
                    .and_then(|handle| positions.table(handle, &table.name))
                    .unwrap_or_default();
                let details = SourceTableDetails {
                    description: docs.expand(table.description.as_deref().unwrap_or_default()),
                    path: path.to_path_buf(),
                    range: SourceRange::point(position),
                    name: table.name.clone(),
                };
                (table.name, details)
            })
            .collect();
        sources.insert(
            source.name.clone(),
            SourceDetails {
                description: docs.expand(source.description.as_deref().unwrap_or_default()),
                path: path.to_path_buf(),
                range: SourceRange::point(position),
                tables,
                name: source.name,
            },
        );
    }

    Ok((entries, sources))
}
