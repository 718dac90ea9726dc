// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Document Management
//!
//! One [`Document`] per open editor buffer, keyed by URI.
//!
//! ## Lifecycle
//!
//! ```text
//! didOpen ──► Document::new (parse) ──► store
//! didChange ──► apply changes to text ──► Document::new (full reparse) ──► replace
//! didClose ──► remove
//! ```
//!
//! A document is immutable once built. Every edit produces a new
//! [`Document`] which replaces the old one in the store, so request
//! handlers holding an `Arc<Document>` never observe a half-built parse.

use crate::sync::apply_changes;
use dbt_lsp_grammar::{TokenId, TokenIndex, TokenRef, parse};
use dbt_lsp_ir::Dialect;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp::lsp_types::{Position, TextDocumentContentChangeEvent, Url};
use tracing::debug;

/// A parsed document
#[derive(Debug)]
pub struct Document {
    text: String,
    dialect: Dialect,
    index: TokenIndex,
    /// Same-file definitions (CTE names)
    definitions: HashMap<String, TokenId>,
}

impl Document {
    /// Parse `text` with the keyword table of `dialect`
    pub fn new(text: impl Into<String>, dialect: Dialect) -> Self {
        let text = text.into();
        let output = parse(&text, dialect);
        let definitions = output.definitions();
        let index = TokenIndex::new(output.stream);
        debug!(
            tokens = index.stream().len(),
            definitions = definitions.len(),
            %dialect,
            "parsed document"
        );
        Self {
            text,
            dialect,
            index,
            definitions,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn index(&self) -> &TokenIndex {
        &self.index
    }

    /// Token covering `position`, if any
    pub fn token_at(&self, position: Position) -> Option<TokenRef<'_>> {
        self.index
            .find_token_at(position.line, position.character)
            .ok()
    }

    /// Declaring token of a same-file definition named `name`
    pub fn definition(&self, name: &str) -> Option<TokenRef<'_>> {
        let id = self.definitions.get(name)?;
        self.index.cursor(*id)
    }

    /// The document after `changes`, reparsed from scratch
    pub fn apply(&self, changes: &[TextDocumentContentChangeEvent]) -> Result<Self, DocumentError> {
        let text = apply_changes(&self.text, changes)?;
        Ok(Self::new(text, self.dialect))
    }
}

/// Open documents
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: RwLock<HashMap<Url, Arc<Document>>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and store a document, replacing any previous version
    pub async fn open(&self, uri: Url, text: impl Into<String>, dialect: Dialect) -> Arc<Document> {
        let document = Arc::new(Document::new(text, dialect));
        self.documents
            .write()
            .await
            .insert(uri, Arc::clone(&document));
        document
    }

    /// Apply content changes and reparse
    ///
    /// On error the stored document is left as it was.
    pub async fn update(
        &self,
        uri: &Url,
        changes: &[TextDocumentContentChangeEvent],
    ) -> Result<Arc<Document>, DocumentError> {
        let mut documents = self.documents.write().await;
        let current = documents
            .get(uri)
            .ok_or_else(|| DocumentError::DocumentNotFound(uri.clone()))?;
        let updated = Arc::new(current.apply(changes)?);
        documents.insert(uri.clone(), Arc::clone(&updated));
        Ok(updated)
    }

    /// Reparse every open document with `dialect`
    ///
    /// Used when a catalog refresh switches the project's dialect.
    pub async fn reparse_all(&self, dialect: Dialect) {
        let mut documents = self.documents.write().await;
        for document in documents.values_mut() {
            if document.dialect() != dialect {
                *document = Arc::new(Document::new(document.text(), dialect));
            }
        }
    }

    pub async fn get(&self, uri: &Url) -> Option<Arc<Document>> {
        self.documents.read().await.get(uri).cloned()
    }

    /// Remove a document; `false` if it was not open
    pub async fn close(&self, uri: &Url) -> bool {
        self.documents.write().await.remove(uri).is_some()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

/// Document-related errors
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Document not found: {0}")]
    DocumentNotFound(Url),

    /// An edit addressed a line the document does not have
    #[error("Edit position line {line} is out of bounds ({line_count} lines)")]
    RangeOutOfBounds { line: u32, line_count: u32 },

    #[error("Edit range ends before it starts: {start:?} > {end:?}")]
    InvertedRange { start: Position, end: Position },
}
