// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for catalog loading

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while building a project catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No `dbt_project.yml` between the start directory and the filesystem root
    #[error("no dbt_project.yml found in {} or any parent directory", start.display())]
    ProjectNotFound { start: PathBuf },

    /// A file or directory could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A YAML file did not parse into the expected shape
    #[error("invalid YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `profiles.yml` is missing the profile, its target, or the adapter type
    #[error("profile error: {0}")]
    Profile(String),
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CatalogError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn yaml(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        CatalogError::Yaml {
            path: path.into(),
            source,
        }
    }
}
