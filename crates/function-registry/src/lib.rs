// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Builtin Function Registry
//!
//! Documentation for warehouse builtin functions, per dialect. The server
//! falls back to it when the cursor is on plain SQL: hover shows the
//! signature and description, completion offers the function names.
//!
//! ## Features
//!
//! - ANSI functions shared by every dialect, plus per-dialect additions for
//!   Snowflake, PostgreSQL/Redshift, BigQuery, Databricks and DuckDB
//! - Case-insensitive lookup by dialect
//! - Re-exports metadata types from the ir crate
//!
//! ## Usage
//!
//! ```rust
//! use dbt_lsp_function_registry::{Dialect, FunctionRegistry};
//!
//! let registry = FunctionRegistry::new();
//! let snowflake = registry.get_functions(Dialect::Snowflake);
//! assert!(snowflake.iter().any(|f| f.name == "IFF"));
//! ```

pub mod builtin;
pub mod hover;
pub mod registry;

// Re-exports from ir for convenience
pub use dbt_lsp_ir::{Dialect, FunctionMetadata, FunctionParameter, FunctionType};

pub use hover::{HoverInfoProvider, format_function_docs};
pub use registry::FunctionRegistry;
