// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # LSP Backend Implementation
//!
//! The tower-lsp [`LanguageServer`] for dbt projects.
//!
//! ## Architecture
//!
//! ```text
//! Client → Backend ──► DocumentStore (text + token index per document)
//!             │
//!             ├──► CatalogManager (project snapshot, refreshed on open/save)
//!             ├──► Hover / Definition / Completion engines
//!             └──► FusionRunner (optional, spawned per open/save)
//! ```
//!
//! ## Supported LSP Features
//!
//! - textDocument/didOpen, didChange (incremental), didSave, didClose
//! - textDocument/hover
//! - textDocument/definition
//! - textDocument/completion
//! - workspace/executeCommand: `dbt.goToSchema`
//!
//! Requests run one at a time; the binary serves with concurrency level 1.

use crate::catalog_manager::CatalogManager;
use crate::commands::{CommandError, GO_TO_SCHEMA, GoToSchemaArgs, go_to_schema, supported_commands};
use crate::completion::CompletionEngine;
use crate::config::ServerConfig;
use crate::definition::find_definition;
use crate::diagnostic::{FusionRunner, validate_fusion};
use crate::document::{DocumentError, DocumentStore};
use crate::hover::HoverEngine;
use crate::{SERVER_NAME, VERSION};
use dbt_lsp_catalog::{CatalogSource, FsCatalogSource, ProjectCatalog};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use tracing::{debug, error, info, warn};

/// LSP backend implementation
pub struct Backend {
    /// LSP client for notifications and server-to-client requests
    client: Client,

    /// Open documents
    documents: DocumentStore,

    /// Current project catalog
    catalog: CatalogManager,

    /// Effective configuration after `initialize`
    config: RwLock<ServerConfig>,

    /// Set once a dbt Fusion executable has been validated
    fusion: RwLock<Option<Arc<FusionRunner>>>,

    hover: HoverEngine,
}

impl Backend {
    /// Create a backend; the catalog source is chosen during `initialize`
    pub fn new(client: Client, config: ServerConfig) -> Self {
        Self::with_catalog(client, config, CatalogManager::new())
    }

    /// Create a backend that loads its catalog from `source`
    pub fn with_catalog_source(client: Client, config: ServerConfig, source: Arc<dyn CatalogSource>) -> Self {
        Self::with_catalog(client, config, CatalogManager::with_source(source))
    }

    fn with_catalog(client: Client, config: ServerConfig, catalog: CatalogManager) -> Self {
        Self {
            client,
            documents: DocumentStore::new(),
            catalog,
            config: RwLock::new(config),
            fusion: RwLock::new(None),
            hover: HoverEngine::new(),
        }
    }

    /// Get the document store
    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    async fn log_message(&self, message: impl Into<String>, message_type: MessageType) {
        self.client.log_message(message_type, message.into()).await;
    }

    /// Reload the catalog, reparsing open documents when the dialect moved
    ///
    /// A failed load keeps serving the previous snapshot.
    async fn refresh_catalog(&self) -> Arc<ProjectCatalog> {
        let previous = self.catalog.snapshot().await.dialect;
        match self.catalog.refresh().await {
            Ok(catalog) => {
                if catalog.dialect != previous {
                    info!(from = %previous, to = %catalog.dialect, "dialect changed, reparsing documents");
                    self.documents.reparse_all(catalog.dialect).await;
                }
                catalog
            }
            Err(e) => {
                warn!(error = %e, "catalog refresh failed");
                self.log_message(format!("Failed to load dbt project: {e}"), MessageType::WARNING)
                    .await;
                self.catalog.snapshot().await
            }
        }
    }

    /// Start a dbt Fusion compile for `uri` in the background
    async fn run_fusion(&self, uri: Url) {
        let Some(runner) = self.fusion.read().await.clone() else {
            return;
        };
        let catalog = self.catalog.snapshot().await;
        if catalog.project_name.is_empty() {
            debug!(%uri, "no dbt project loaded, skipping dbt Fusion");
            return;
        }

        let client = self.client.clone();
        tokio::spawn(async move {
            if let Err(e) = runner
                .run(uri, &catalog.project_name, &catalog.project_root, &client)
                .await
            {
                error!(error = %e, "dbt Fusion run failed");
                client
                    .log_message(MessageType::ERROR, format!("dbt Fusion run failed: {e}"))
                    .await;
            }
        });
    }

    /// Validate the configured executable and enable diagnostics
    async fn configure_fusion(&self, path: &str) {
        let Some(artifacts_root) = FusionRunner::default_artifacts_root() else {
            warn!("no home directory for fusion artifacts, dbt Fusion disabled");
            return;
        };

        match validate_fusion(path).await {
            Ok(version) => {
                info!(%path, %version, "dbt Fusion enabled");
                *self.fusion.write().await = Some(Arc::new(FusionRunner::new(path, artifacts_root)));
            }
            Err(e) => {
                warn!(error = %e, "dbt Fusion disabled");
                self.log_message(e.to_string(), MessageType::WARNING).await;
            }
        }
    }
}

/// Capabilities advertised in `initialize`
pub fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Options(TextDocumentSyncOptions {
            open_close: Some(true),
            change: Some(TextDocumentSyncKind::INCREMENTAL),
            save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                include_text: Some(false),
            })),
            ..Default::default()
        })),
        hover_provider: Some(HoverProviderCapability::Simple(true)),
        definition_provider: Some(OneOf::Left(true)),
        completion_provider: Some(CompletionOptions {
            resolve_provider: Some(false),
            trigger_characters: Some(
                ["'", "\"", "{", "(", " "]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            ),
            ..Default::default()
        }),
        execute_command_provider: Some(ExecuteCommandOptions {
            commands: supported_commands(),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Directory to start the `dbt_project.yml` search from
///
/// `projectRoot` from the options, then the first workspace folder, then the
/// root URI.
#[allow(deprecated)]
pub fn project_start(config: &ServerConfig, params: &InitializeParams) -> Option<PathBuf> {
    config
        .project_root
        .clone()
        .or_else(|| {
            params
                .workspace_folders
                .as_ref()?
                .first()?
                .uri
                .to_file_path()
                .ok()
        })
        .or_else(|| params.root_uri.as_ref()?.to_file_path().ok())
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!(client = ?params.client_info, "initializing dbt language server");

        let current = self.config.read().await.clone();
        let config = match current
            .clone()
            .with_init_options(params.initialization_options.as_ref())
        {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "ignoring initialization options");
                self.client
                    .show_message(MessageType::WARNING, format!("dbt language server: {e}"))
                    .await;
                current
            }
        };

        if !self.catalog.has_source().await {
            match project_start(&config, &params).or_else(|| std::env::current_dir().ok()) {
                Some(start) => {
                    info!(start = %start.display(), "using dbt project search root");
                    self.catalog
                        .set_source(Arc::new(FsCatalogSource::new(start)))
                        .await;
                }
                None => warn!("no project root available, catalog will stay empty"),
            }
        }

        if let Some(path) = config.fusion_path.as_deref() {
            self.configure_fusion(path).await;
        }
        *self.config.write().await = config;

        Ok(InitializeResult {
            capabilities: server_capabilities(),
            server_info: Some(ServerInfo {
                name: SERVER_NAME.to_string(),
                version: Some(VERSION.to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        let catalog = self.refresh_catalog().await;
        info!(project = %catalog.project_name, "dbt language server ready");
        self.log_message(
            format!(
                "dbt language server ready: project '{}' ({})",
                catalog.project_name, catalog.dialect
            ),
            MessageType::INFO,
        )
        .await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!("shutting down dbt language server");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let document = params.text_document;
        info!(uri = %document.uri, version = document.version, "document opened");

        let catalog = self.refresh_catalog().await;
        self.documents
            .open(document.uri.clone(), document.text, catalog.dialect)
            .await;
        self.run_fusion(document.uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        debug!(%uri, version = params.text_document.version, changes = params.content_changes.len(), "document changed");

        match self.documents.update(&uri, &params.content_changes).await {
            Ok(_) => {}
            Err(DocumentError::DocumentNotFound(uri)) => {
                warn!(%uri, "change for a document that is not open");
            }
            Err(e) => {
                error!(%uri, error = %e, "rejected document change");
                self.log_message(format!("Rejected change to {uri}: {e}"), MessageType::ERROR)
                    .await;
            }
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let uri = params.text_document.uri;
        info!(%uri, "document saved");
        self.refresh_catalog().await;
        self.run_fusion(uri).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        info!(%uri, "document closed");

        if !self.documents.close(&uri).await {
            warn!(%uri, "close for a document that is not open");
        }
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;
        debug!(%uri, line = position.line, character = position.character, "hover");

        let Some(document) = self.documents.get(&uri).await else {
            warn!(%uri, "hover on a document that is not open");
            return Ok(None);
        };
        let catalog = self.catalog.snapshot().await;
        Ok(self.hover.hover(&document, &catalog, position))
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;
        debug!(%uri, line = position.line, character = position.character, "definition");

        let Some(document) = self.documents.get(&uri).await else {
            warn!(%uri, "definition on a document that is not open");
            return Ok(None);
        };
        let catalog = self.catalog.snapshot().await;
        Ok(find_definition(&uri, &document, &catalog, position).map(GotoDefinitionResponse::Scalar))
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;
        debug!(%uri, line = position.line, character = position.character, "completion");

        let Some(document) = self.documents.get(&uri).await else {
            warn!(%uri, "completion on a document that is not open");
            return Ok(None);
        };
        let catalog = self.catalog.snapshot().await;
        let engine = CompletionEngine::new(&self.config.read().await.completion);
        Ok(engine.complete(&document, &catalog, position))
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        info!(command = %params.command, "execute command");

        if params.command != GO_TO_SCHEMA {
            let e = CommandError::UnknownCommand(params.command);
            warn!(error = %e, "rejected command");
            return Err(Error::invalid_params(e.to_string()));
        }

        let args = GoToSchemaArgs::from_arguments(&params.arguments)
            .map_err(|e| Error::invalid_params(e.to_string()))?;
        let document = self.documents.get(&args.uri).await;
        let catalog = self.catalog.snapshot().await;
        let Some(location) = go_to_schema(&args, document.as_deref(), &catalog) else {
            debug!(uri = %args.uri, "no schema entry for model");
            return Ok(None);
        };

        // the client answers showDocument on the same connection
        let client = self.client.clone();
        let show = ShowDocumentParams {
            uri: location.uri.clone(),
            external: Some(false),
            take_focus: Some(true),
            selection: Some(location.range),
        };
        tokio::spawn(async move {
            if let Err(e) = client.show_document(show).await {
                warn!(error = %e, "showDocument failed");
            }
        });

        Ok(serde_json::to_value(location).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities() {
        let capabilities = server_capabilities();

        let Some(TextDocumentSyncCapability::Options(sync)) = capabilities.text_document_sync else {
            panic!("expected sync options");
        };
        assert_eq!(sync.change, Some(TextDocumentSyncKind::INCREMENTAL));
        assert_eq!(sync.open_close, Some(true));
        assert!(sync.save.is_some());

        let triggers = capabilities
            .completion_provider
            .and_then(|options| options.trigger_characters)
            .unwrap();
        assert_eq!(triggers, ["'", "\"", "{", "(", " "]);

        assert_eq!(
            capabilities.execute_command_provider.unwrap().commands,
            ["dbt.goToSchema"]
        );
        assert_eq!(capabilities.definition_provider, Some(OneOf::Left(true)));
    }

    #[test]
    fn test_project_start_order() {
        let folder = WorkspaceFolder {
            uri: Url::parse("file:///work/folder").unwrap(),
            name: "folder".to_string(),
        };
        let params = InitializeParams {
            workspace_folders: Some(vec![folder]),
            ..Default::default()
        };

        let config = ServerConfig::default();
        assert_eq!(project_start(&config, &params), Some(PathBuf::from("/work/folder")));

        let config = ServerConfig {
            project_root: Some(PathBuf::from("/work/jaffle_shop")),
            ..Default::default()
        };
        assert_eq!(
            project_start(&config, &params),
            Some(PathBuf::from("/work/jaffle_shop"))
        );

        assert_eq!(project_start(&ServerConfig::default(), &InitializeParams::default()), None);
    }
}
