// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Catalog source trait
//!
//! Anything that can produce a [`ProjectCatalog`] snapshot. The server only
//! depends on this trait, so tests can hand it an in-memory catalog.

use crate::error::CatalogResult;
use crate::metadata::ProjectCatalog;

/// Producer of project catalog snapshots
///
/// # Examples
///
/// ```rust,ignore
/// use dbt_lsp_catalog::{CatalogSource, FsCatalogSource};
///
/// let source = FsCatalogSource::new("/path/to/jaffle_shop");
/// let catalog = source.load().await?;
/// println!("{} models", catalog.models.len());
/// ```
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Build a fresh catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ProjectNotFound` when there is no project to
    /// load. Failures inside a single collection pass are logged and leave
    /// that collection empty rather than failing the whole load.
    async fn load(&self) -> CatalogResult<ProjectCatalog>;
}
