// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # profiles.yml
//!
//! The warehouse dialect comes from the adapter `type` of the profile's
//! default target:
//!
//! ```yaml
//! jaffle_shop:
//!   target: dev
//!   outputs:
//!     dev:
//!       type: snowflake
//! ```

use crate::error::{CatalogError, CatalogResult};
use dbt_lsp_ir::Dialect;
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

const PROFILES_FILE: &str = "profiles.yml";

/// Directories searched for `profiles.yml`, besides the project root
#[derive(Debug, Clone, Default)]
pub struct ProfileSearch {
    /// `$DBT_PROFILES_DIR`
    pub profiles_dir: Option<PathBuf>,
    /// User home; `~/.dbt` is searched last
    pub home: Option<PathBuf>,
}

impl ProfileSearch {
    pub fn from_env() -> Self {
        Self {
            profiles_dir: std::env::var_os("DBT_PROFILES_DIR").map(PathBuf::from),
            home: std::env::var_os("HOME")
                .or_else(|| std::env::var_os("USERPROFILE"))
                .map(PathBuf::from),
        }
    }

    /// Candidate files in lookup order
    pub fn candidates(&self, project_root: &Path) -> Vec<PathBuf> {
        let mut files = Vec::with_capacity(3);
        if let Some(dir) = &self.profiles_dir {
            files.push(dir.join(PROFILES_FILE));
        }
        files.push(project_root.join(PROFILES_FILE));
        if let Some(home) = &self.home {
            files.push(home.join(".dbt").join(PROFILES_FILE));
        }
        files
    }

    /// Dialect of `profile` from the first `profiles.yml` that exists
    pub fn resolve_dialect(&self, profile: &str, project_root: &Path) -> CatalogResult<Dialect> {
        let file = self
            .candidates(project_root)
            .into_iter()
            .find(|file| file.is_file())
            .ok_or_else(|| CatalogError::Profile("no profiles.yml found".to_string()))?;
        debug!(file = %file.display(), profile, "reading profiles");

        let text = std::fs::read_to_string(&file).map_err(|e| CatalogError::io(&file, e))?;
        dialect_from_profiles(&text, profile, &file)
    }
}

/// Adapter type of `profile`'s default target in a `profiles.yml` text
pub fn dialect_from_profiles(text: &str, profile: &str, path: &Path) -> CatalogResult<Dialect> {
    let profiles: Value = serde_yaml::from_str(text).map_err(|e| CatalogError::yaml(path, e))?;

    let entry = profiles
        .get(profile)
        .ok_or_else(|| CatalogError::Profile(format!("profile '{profile}' not found")))?;
    let target = entry
        .get("target")
        .and_then(Value::as_str)
        .ok_or_else(|| CatalogError::Profile(format!("profile '{profile}' has no target")))?;
    let adapter = entry
        .get("outputs")
        .and_then(|outputs| outputs.get(target))
        .and_then(|output| output.get("type"))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            CatalogError::Profile(format!(
                "target '{target}' of profile '{profile}' has no adapter type"
            ))
        })?;

    Ok(Dialect::from_profile_type(adapter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const PROFILES: &str = "jaffle_shop:\n  target: dev\n  outputs:\n    dev:\n      type: postgres\n      host: localhost\n    prod:\n      type: snowflake\n";

    #[test]
    fn test_dialect_of_default_target() {
        let dialect = dialect_from_profiles(PROFILES, "jaffle_shop", Path::new("p.yml")).unwrap();
        assert_eq!(dialect, Dialect::Postgres);
    }

    #[test]
    fn test_missing_profile_and_target() {
        let missing = dialect_from_profiles(PROFILES, "other", Path::new("p.yml"));
        assert!(matches!(missing, Err(CatalogError::Profile(_))));

        let text = "shop:\n  target: ci\n  outputs:\n    dev:\n      type: duckdb\n";
        let no_target = dialect_from_profiles(text, "shop", Path::new("p.yml"));
        assert!(matches!(no_target, Err(CatalogError::Profile(_))));
    }

    #[test]
    fn test_unknown_adapter_is_generic() {
        let text = "shop:\n  target: dev\n  outputs:\n    dev:\n      type: oracle\n";
        let dialect = dialect_from_profiles(text, "shop", Path::new("p.yml")).unwrap();
        assert_eq!(dialect, Dialect::Generic);
    }

    #[test]
    fn test_lookup_order() {
        let profiles_dir = tempfile::tempdir().unwrap();
        let project = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        let search = ProfileSearch {
            profiles_dir: Some(profiles_dir.path().to_path_buf()),
            home: Some(home.path().to_path_buf()),
        };

        fs::create_dir(home.path().join(".dbt")).unwrap();
        fs::write(
            home.path().join(".dbt").join(PROFILES_FILE),
            "shop:\n  target: dev\n  outputs:\n    dev:\n      type: bigquery\n",
        )
        .unwrap();
        assert_eq!(search.resolve_dialect("shop", project.path()).unwrap(), Dialect::BigQuery);

        fs::write(
            project.path().join(PROFILES_FILE),
            "shop:\n  target: dev\n  outputs:\n    dev:\n      type: duckdb\n",
        )
        .unwrap();
        assert_eq!(search.resolve_dialect("shop", project.path()).unwrap(), Dialect::DuckDb);

        fs::write(
            profiles_dir.path().join(PROFILES_FILE),
            "shop:\n  target: dev\n  outputs:\n    dev:\n      type: redshift\n",
        )
        .unwrap();
        assert_eq!(search.resolve_dialect("shop", project.path()).unwrap(), Dialect::Redshift);
    }

    #[test]
    fn test_no_profiles_file() {
        let project = tempfile::tempdir().unwrap();
        let search = ProfileSearch::default();
        assert!(matches!(
            search.resolve_dialect("shop", project.path()),
            Err(CatalogError::Profile(_))
        ));
    }
}
