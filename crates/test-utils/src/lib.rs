// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for the dbt language server
//!
//! This crate provides common testing components including:
//! - An in-memory project catalog builder
//! - A mock catalog source with load counting and injected failures
//! - A small dbt project written to a temporary directory

pub mod fixtures;
pub mod mock_catalog;

// Re-exports for convenience
pub use fixtures::ProjectFixture;
pub use mock_catalog::{MockCatalogSource, ProjectCatalogBuilder};
