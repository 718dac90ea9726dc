// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # dbt Language Server - Catalog Layer
//!
//! Everything the server knows about a dbt project outside the open
//! document: models, seeds, sources, macros and variables, together with
//! where each one is declared.
//!
//! ## Architecture
//!
//! - [`CatalogSource`] produces an immutable [`ProjectCatalog`] snapshot
//! - [`FsCatalogSource`] builds it from a project on disk: `dbt_project.yml`,
//!   `profiles.yml`, schema YAML, docs blocks, macro files and installed
//!   packages
//! - Declaration positions are recovered from the YAML text so hover and
//!   go-to-definition can point at `- name: orders`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dbt_lsp_catalog::{CatalogSource, FsCatalogSource};
//!
//! # async fn run() -> dbt_lsp_catalog::CatalogResult<()> {
//! let catalog = FsCatalogSource::new("/path/to/jaffle_shop").load().await?;
//! if let Some(model) = catalog.model("orders") {
//!     println!("{} ({})", model.name, model.path.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Implementing the CatalogSource Trait
//!
//! ```rust
//! use dbt_lsp_catalog::{CatalogResult, CatalogSource, ProjectCatalog};
//! use async_trait::async_trait;
//!
//! struct EmptyProject;
//!
//! #[async_trait]
//! impl CatalogSource for EmptyProject {
//!     async fn load(&self) -> CatalogResult<ProjectCatalog> {
//!         Ok(ProjectCatalog::default())
//!     }
//! }
//! ```

mod docs;
mod macros;
mod schema;
mod text;
mod vars;
mod walk;
mod yaml_scan;

pub mod error;
pub mod loader;
pub mod metadata;
pub mod profiles;
pub mod project;
pub mod r#trait;

// Re-exports
pub use error::{CatalogError, CatalogResult};
pub use loader::FsCatalogSource;
pub use metadata::{
    MacroDetails, ModelDetails, ProjectCatalog, SchemaLocation, SourceDetails,
    SourceTableDetails, VariableDetails,
};
pub use profiles::{ProfileSearch, dialect_from_profiles};
pub use project::{DbtProject, PROJECT_FILE, find_project_root};
pub use r#trait::CatalogSource;
pub use schema::SEED_DESCRIPTION;
