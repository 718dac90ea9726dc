// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Catalog manager
//!
//! Holds the current [`ProjectCatalog`] snapshot.
//!
//! Readers clone the `Arc` and work on that snapshot for the rest of the
//! request. A refresh loads a complete new catalog without holding any lock,
//! then swaps the pointer. A failed refresh keeps the previous snapshot.

use dbt_lsp_catalog::{CatalogResult, CatalogSource, ProjectCatalog};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Catalog manager
pub struct CatalogManager {
    source: RwLock<Option<Arc<dyn CatalogSource>>>,
    snapshot: RwLock<Arc<ProjectCatalog>>,
}

impl Default for CatalogManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogManager {
    /// A manager with an empty catalog and no source yet
    pub fn new() -> Self {
        Self {
            source: RwLock::new(None),
            snapshot: RwLock::new(Arc::new(ProjectCatalog::default())),
        }
    }

    pub fn with_source(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source: RwLock::new(Some(source)),
            snapshot: RwLock::new(Arc::new(ProjectCatalog::default())),
        }
    }

    /// Whether a source has been configured
    pub async fn has_source(&self) -> bool {
        self.source.read().await.is_some()
    }

    /// Replace where catalogs are loaded from
    pub async fn set_source(&self, source: Arc<dyn CatalogSource>) {
        *self.source.write().await = Some(source);
    }

    /// The current catalog
    pub async fn snapshot(&self) -> Arc<ProjectCatalog> {
        Arc::clone(&*self.snapshot.read().await)
    }

    /// Reload the catalog and publish it
    ///
    /// Without a source the current snapshot is returned unchanged.
    pub async fn refresh(&self) -> CatalogResult<Arc<ProjectCatalog>> {
        let source = self.source.read().await.clone();
        let Some(source) = source else {
            debug!("no catalog source configured, keeping current catalog");
            return Ok(self.snapshot().await);
        };

        let catalog = Arc::new(source.load().await?);
        *self.snapshot.write().await = Arc::clone(&catalog);
        info!(
            project = %catalog.project_name,
            dialect = %catalog.dialect,
            models = catalog.models.len(),
            "catalog refreshed"
        );
        Ok(catalog)
    }
}
