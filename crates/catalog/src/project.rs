// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # dbt_project.yml
//!
//! Project discovery and the resolved directory layout of one project
//! (the root project or an installed package).

use crate::error::{CatalogError, CatalogResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project file name searched for during discovery
pub const PROJECT_FILE: &str = "dbt_project.yml";

/// Walk upward from `start` to the first directory holding `dbt_project.yml`
pub fn find_project_root(start: &Path) -> CatalogResult<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(PROJECT_FILE).is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| CatalogError::ProjectNotFound {
            start: start.to_path_buf(),
        })
}

/// `dbt_project.yml` as written; every field may be absent or null
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawProject {
    name: Option<String>,
    profile: Option<String>,
    model_paths: Option<Vec<String>>,
    seed_paths: Option<Vec<String>>,
    macro_paths: Option<Vec<String>>,
    packages_install_path: Option<String>,
    docs_paths: Option<Vec<String>>,
    vars: Option<serde_yaml::Value>,
}

/// A loaded project with absolute, existing directories
#[derive(Debug, Clone, Default)]
pub struct DbtProject {
    pub root: PathBuf,
    pub name: String,
    pub profile: Option<String>,
    pub model_paths: Vec<PathBuf>,
    pub seed_paths: Vec<PathBuf>,
    pub macro_paths: Vec<PathBuf>,
    pub docs_paths: Vec<PathBuf>,
    pub packages_dir: Option<PathBuf>,
    pub vars: Option<serde_yaml::Value>,
    /// Raw text of `dbt_project.yml`, kept for position scanning
    pub text: String,
}

impl DbtProject {
    /// Read `<root>/dbt_project.yml` and resolve its directories
    pub fn load(root: &Path) -> CatalogResult<Self> {
        let file = root.join(PROJECT_FILE);
        let text = std::fs::read_to_string(&file).map_err(|e| CatalogError::io(&file, e))?;
        let raw: RawProject = if text.trim().is_empty() {
            RawProject::default()
        } else {
            serde_yaml::from_str(&text).map_err(|e| CatalogError::yaml(&file, e))?
        };
        Ok(Self::resolve(root, raw, text))
    }

    fn resolve(root: &Path, raw: RawProject, text: String) -> Self {
        let model_paths = resolve_dirs(root, raw.model_paths, "models");
        let macro_paths = resolve_dirs(root, raw.macro_paths, "macros");
        let seed_paths = resolve_dirs(root, raw.seed_paths, "seeds");

        // dbt reads docs blocks from every resource path unless told otherwise
        let docs_paths = match raw.docs_paths.filter(|paths| !paths.is_empty()) {
            Some(paths) => existing(root, paths),
            None => {
                let mut paths = existing(root, vec!["docs".to_string()]);
                paths.extend(model_paths.iter().cloned());
                paths.extend(macro_paths.iter().cloned());
                paths
            }
        };

        let packages_dir = raw
            .packages_install_path
            .filter(|path| !path.is_empty())
            .unwrap_or_else(|| "dbt_packages".to_string());
        let packages_dir = Some(root.join(packages_dir)).filter(|dir| dir.is_dir());

        let name = raw.name.unwrap_or_default();
        debug!(project = %name, root = %root.display(), "resolved dbt project");

        Self {
            root: root.to_path_buf(),
            name,
            profile: raw.profile,
            model_paths,
            seed_paths,
            macro_paths,
            docs_paths,
            packages_dir,
            vars: raw.vars,
            text,
        }
    }
}

fn resolve_dirs(root: &Path, configured: Option<Vec<String>>, default: &str) -> Vec<PathBuf> {
    match configured.filter(|paths| !paths.is_empty()) {
        Some(paths) => existing(root, paths),
        None => existing(root, vec![default.to_string()]),
    }
}

fn existing(root: &Path, paths: Vec<String>) -> Vec<PathBuf> {
    paths
        .into_iter()
        .map(|path| root.join(path))
        .filter(|dir| dir.is_dir())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_find_project_root_from_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PROJECT_FILE), "name: shop\n").unwrap();
        let nested = dir.path().join("models/staging");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_root(&nested).unwrap(), dir.path());
    }

    #[test]
    fn test_project_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            find_project_root(dir.path()),
            Err(CatalogError::ProjectNotFound { .. })
        ));
    }

    #[test]
    fn test_default_paths_only_when_present() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PROJECT_FILE), "name: shop\nprofile: shop\n").unwrap();
        fs::create_dir(dir.path().join("models")).unwrap();
        fs::create_dir(dir.path().join("macros")).unwrap();

        let project = DbtProject::load(dir.path()).unwrap();
        assert_eq!(project.name, "shop");
        assert_eq!(project.profile.as_deref(), Some("shop"));
        assert_eq!(project.model_paths, vec![dir.path().join("models")]);
        assert!(project.seed_paths.is_empty());
        assert!(project.packages_dir.is_none());
        assert_eq!(
            project.docs_paths,
            vec![dir.path().join("models"), dir.path().join("macros")]
        );
    }

    #[test]
    fn test_configured_paths_and_null_fields() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(PROJECT_FILE),
            "name: shop\nmodel-paths: [\"transform\", \"missing\"]\nseed-paths:\nvars:\n",
        )
        .unwrap();
        fs::create_dir(dir.path().join("transform")).unwrap();
        fs::create_dir(dir.path().join("seeds")).unwrap();

        let project = DbtProject::load(dir.path()).unwrap();
        assert_eq!(project.model_paths, vec![dir.path().join("transform")]);
        assert_eq!(project.seed_paths, vec![dir.path().join("seeds")]);
        assert!(project.vars.is_none());
    }

    #[test]
    fn test_invalid_yaml_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PROJECT_FILE), "name: [unclosed\n").unwrap();
        assert!(matches!(
            DbtProject::load(dir.path()),
            Err(CatalogError::Yaml { .. })
        ));
    }
}
