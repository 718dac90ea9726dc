// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Server Configuration
//!
//! Configuration comes from two places:
//!
//! - the command line ([`Cli`]), parsed once at startup
//! - the client's `initializationOptions`, read during `initialize`
//!
//! ## Example
//!
//! ```json
//! {
//!   "fusionPath": "/usr/local/bin/dbt",
//!   "projectRoot": "/home/me/jaffle_shop",
//!   "completion": { "maxItems": 200 }
//! }
//! ```
//!
//! The fusion executable given on the command line wins over the one in
//! the initialization options. The project root only comes from the
//! initialization options (or the workspace, when absent).

use clap::Parser;
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;

/// Default executable for `--fusion` given without a value
pub const DEFAULT_FUSION_EXECUTABLE: &str = "dbt";

/// Command line arguments of `dbt-language-server`
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "dbt-language-server", version, about = "Language server for dbt projects")]
pub struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub debug: bool,

    /// Run dbt Fusion static analysis, optionally naming the executable
    #[arg(
        short,
        long,
        value_name = "PATH",
        num_args = 0..=1,
        default_missing_value = DEFAULT_FUSION_EXECUTABLE
    )]
    pub fusion: Option<String>,
}

/// Completion settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompletionConfig {
    /// Upper bound on returned items; unlimited when unset
    pub max_items: Option<usize>,
}

/// Effective server configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    /// dbt Fusion executable; static analysis is off when unset
    pub fusion_path: Option<String>,

    /// Directory to start the `dbt_project.yml` search from
    pub project_root: Option<PathBuf>,

    pub completion: CompletionConfig,
}

impl ServerConfig {
    /// Configuration carried over from the command line
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            fusion_path: cli.fusion.clone(),
            ..Default::default()
        }
    }

    /// Overlay the client's `initializationOptions`
    ///
    /// `None` and `null` leave the configuration unchanged.
    pub fn with_init_options(self, options: Option<&Value>) -> Result<Self, ConfigError> {
        let options = match options {
            None | Some(Value::Null) => return Ok(self),
            Some(options) => options,
        };
        let client: ServerConfig =
            serde_json::from_value(options.clone()).map_err(ConfigError::InvalidOptions)?;

        let merged = Self {
            fusion_path: self.fusion_path.or(client.fusion_path),
            project_root: client.project_root.or(self.project_root),
            completion: client.completion,
        };
        merged.validate()?;
        Ok(merged)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self
            .fusion_path
            .as_deref()
            .is_some_and(|path| path.trim().is_empty())
        {
            return Err(ConfigError::EmptyFusionPath);
        }

        if self.completion.max_items == Some(0) {
            return Err(ConfigError::InvalidMaxItems);
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `initializationOptions` has the wrong shape
    #[error("Invalid initialization options: {0}")]
    InvalidOptions(#[source] serde_json::Error),

    #[error("fusionPath must not be empty")]
    EmptyFusionPath,

    #[error("completion.maxItems must be greater than 0")]
    InvalidMaxItems,
}
