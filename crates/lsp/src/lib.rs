// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # dbt Language Server - Language Server Protocol
//!
//! The LSP server for dbt projects: SQL models with Jinja `ref`, `source`,
//! `var` and macro calls.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Client (VS Code, etc.)          │
//! └──────────────┬──────────────────────────┘
//!                │ LSP Protocol (stdio)
//!                ↓
//! ┌─────────────────────────────────────────┐
//! │         LSP Backend (tower-lsp)         │
//! ├─────────────────────────────────────────┤
//! │  • didOpen / didChange / didSave / ...  │
//! │  • hover / definition / completion      │
//! │  • executeCommand dbt.goToSchema        │
//! └──────────────┬──────────────────────────┘
//!                │
//!     ┌──────────┼──────────────┬───────────────┐
//!     ↓          ↓              ↓               ↓
//! ┌────────┐ ┌──────────┐ ┌───────────┐ ┌──────────────┐
//! │ Config │ │ Document │ │  Catalog  │ │  dbt Fusion  │
//! │        │ │  Store   │ │  Manager  │ │ diagnostics  │
//! └────────┘ └──────────┘ └───────────┘ └──────────────┘
//! ```
//!
//! Every document keeps its text and a [`dbt_lsp_grammar::TokenIndex`].
//! Cursor requests resolve the token under the cursor against the current
//! catalog snapshot ([`resolver`]).
//!
//! ## Starting the Server
//!
//! ```rust,no_run
//! use dbt_lsp_server::{Backend, ServerConfig};
//! use tower_lsp::{LspService, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::default();
//!     let (service, socket) = LspService::new(move |client| Backend::new(client, config));
//!     Server::new(tokio::io::stdin(), tokio::io::stdout(), socket)
//!         .concurrency_level(1)
//!         .serve(service)
//!         .await;
//! }
//! ```
//!
//! ## Configuration
//!
//! Command line flags (`--debug`, `--fusion[=PATH]`) and the client's
//! `initializationOptions`:
//!
//! ```json
//! {
//!   "fusionPath": "/usr/local/bin/dbt",
//!   "projectRoot": "/work/jaffle_shop",
//!   "completion": { "maxItems": 200 }
//! }
//! ```
//!
//! ## Error Handling
//!
//! - Lookup misses answer `null`
//! - A failed catalog refresh keeps the previous snapshot
//! - An out-of-range edit is rejected and the document is left as it was
//! - A missing or invalid dbt Fusion executable disables diagnostics

pub mod backend;
pub mod catalog_manager;
pub mod commands;
pub mod completion;
pub mod config;
pub mod definition;
pub mod diagnostic;
pub mod document;
pub mod hover;
pub mod resolver;
pub mod sync;

// Re-exports for convenience
pub use backend::{Backend, server_capabilities};
pub use catalog_manager::CatalogManager;
pub use commands::{CommandError, GO_TO_SCHEMA};
pub use completion::CompletionEngine;
pub use config::{Cli, CompletionConfig, ConfigError, ServerConfig};
pub use definition::find_definition;
pub use diagnostic::{DiagnosticError, DiagnosticSink, FusionRunner};
pub use document::{Document, DocumentError, DocumentStore};
pub use hover::HoverEngine;
pub use resolver::{Symbol, resolve};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server name
pub const SERVER_NAME: &str = "dbt-language-server";
