// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Filesystem catalog source
//!
//! Loads a [`ProjectCatalog`] from a dbt project on disk.
//!
//! ## Flow
//!
//! ```text
//! start dir ──► find dbt_project.yml ──► DbtProject + installed packages
//!                                              │
//!            ┌─────────────────────────────────┼───────────────────────┐
//!            ▼                                 ▼                       ▼
//!     models + sources                      macros                 variables
//!     (spawn_blocking)                  (spawn_blocking)        (spawn_blocking)
//!            └─────────────── tokio::join! ────┴───────────────────────┘
//!                                              ▼
//!                                        ProjectCatalog
//! ```
//!
//! A pass that fails leaves its collection empty; the other passes still
//! contribute.

use crate::error::CatalogResult;
use crate::macros::parse_macros;
use crate::metadata::{MacroDetails, ModelDetails, ProjectCatalog, SourceDetails, VariableDetails};
use crate::profiles::ProfileSearch;
use crate::project::{DbtProject, PROJECT_FILE, find_project_root};
use crate::r#trait::CatalogSource;
use crate::schema::{collect_docs, collect_models};
use crate::vars::collect_variables;
use crate::walk::files_with_extension;
use async_trait::async_trait;
use dbt_lsp_ir::Dialect;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

type Models = (HashMap<String, ModelDetails>, HashMap<String, SourceDetails>);
type Macros = HashMap<String, HashMap<String, MacroDetails>>;
type Variables = HashMap<String, VariableDetails>;

/// Catalog source reading a dbt project from disk
#[derive(Debug, Clone)]
pub struct FsCatalogSource {
    start: PathBuf,
    profiles: ProfileSearch,
}

impl FsCatalogSource {
    /// Search for the project upward from `start`
    pub fn new(start: impl Into<PathBuf>) -> Self {
        Self {
            start: start.into(),
            profiles: ProfileSearch::from_env(),
        }
    }

    /// Replace the `profiles.yml` search locations
    pub fn with_profile_search(mut self, profiles: ProfileSearch) -> Self {
        self.profiles = profiles;
        self
    }

    fn dialect(&self, project: &DbtProject) -> Dialect {
        let Some(profile) = project.profile.as_deref() else {
            warn!(project = %project.name, "no profile configured, using generic dialect");
            return Dialect::Generic;
        };
        match self.profiles.resolve_dialect(profile, &project.root) {
            Ok(dialect) => dialect,
            Err(e) => {
                warn!(profile, error = %e, "could not resolve dialect, using generic");
                Dialect::Generic
            }
        }
    }
}

#[async_trait]
impl CatalogSource for FsCatalogSource {
    async fn load(&self) -> CatalogResult<ProjectCatalog> {
        let root = find_project_root(&self.start)?;
        let project = DbtProject::load(&root)?;
        let dialect = self.dialect(&project);
        let packages = discover_packages(&project);
        info!(
            project = %project.name,
            root = %root.display(),
            %dialect,
            packages = packages.len(),
            "loading project catalog"
        );

        let project = Arc::new(project);
        let packages = Arc::new(packages);

        let models = {
            let (project, packages) = (Arc::clone(&project), Arc::clone(&packages));
            run_pass("models", move || models_pass(&project, &packages))
        };
        let macros = {
            let (project, packages) = (Arc::clone(&project), Arc::clone(&packages));
            run_pass("macros", move || macros_pass(&project, &packages))
        };
        let variables = {
            let project = Arc::clone(&project);
            run_pass("variables", move || collect_variables(&project))
        };
        let ((models, sources), macros, variables) = tokio::join!(models, macros, variables);

        info!(
            models = models.len(),
            sources = sources.len(),
            macros = macros.values().map(HashMap::len).sum::<usize>(),
            variables = variables.len(),
            "project catalog loaded"
        );

        Ok(ProjectCatalog {
            project_name: project.name.clone(),
            project_root: root,
            dialect,
            models,
            macros,
            variables,
            sources,
        })
    }
}

/// Run a blocking pass off the async runtime
///
/// Passes skip unreadable files themselves; a pass that panics yields an
/// empty result.
async fn run_pass<T, F>(name: &'static str, pass: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Default + Send + 'static,
{
    match tokio::task::spawn_blocking(pass).await {
        Ok(value) => value,
        Err(e) => {
            warn!(pass = name, error = %e, "catalog pass aborted");
            T::default()
        }
    }
}

/// Installed packages: subdirectories of the packages dir with a project file
fn discover_packages(project: &DbtProject) -> Vec<DbtProject> {
    let Some(dir) = &project.packages_dir else {
        return Vec::new();
    };
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "cannot list packages");
            return Vec::new();
        }
    };

    let mut roots: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.join(PROJECT_FILE).is_file())
        .collect();
    roots.sort();

    roots
        .into_iter()
        .filter_map(|root| match DbtProject::load(&root) {
            Ok(mut package) => {
                if package.name.is_empty() {
                    package.name = root
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_default();
                }
                debug!(package = %package.name, "found installed package");
                Some(package)
            }
            Err(e) => {
                warn!(package = %root.display(), error = %e, "skipping package");
                None
            }
        })
        .collect()
}

/// Packages first, root project last, so the root wins name collisions
fn in_priority_order<'a>(project: &'a DbtProject, packages: &'a [DbtProject]) -> Vec<&'a DbtProject> {
    packages.iter().chain(std::iter::once(project)).collect()
}

fn models_pass(project: &DbtProject, packages: &[DbtProject]) -> Models {
    let projects = in_priority_order(project, packages);
    let docs = collect_docs(&projects);

    let mut models = HashMap::new();
    let mut sources = HashMap::new();
    for project in projects {
        let collected = collect_models(project, &docs);
        models.extend(collected.models);
        sources.extend(collected.sources);
    }
    (models, sources)
}

fn macros_pass(project: &DbtProject, packages: &[DbtProject]) -> Macros {
    let mut macros: Macros = HashMap::new();
    for project in in_priority_order(project, packages) {
        for file in files_with_extension(&project.macro_paths, &["sql"]) {
            let text = match std::fs::read_to_string(&file) {
                Ok(text) => text,
                Err(e) => {
                    warn!(file = %file.display(), error = %e, "skipping macro file");
                    continue;
                }
            };
            for details in parse_macros(&text, &file, &project.name) {
                macros
                    .entry(details.package.clone())
                    .or_default()
                    .insert(details.name.clone(), details);
            }
        }
    }
    macros
}
