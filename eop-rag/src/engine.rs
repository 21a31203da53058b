//! Retrieval engine orchestrator.
//!
//! The [`RetrievalEngine`] owns the document table and the global chunk list
//! and coordinates ingestion (normalize → chunk → store) and querying
//! (score → rank → assemble).
//!
//! # Example
//!
//! ```rust,ignore
//! use eop_rag::{DocumentContent, RagConfig, RetrievalEngine};
//!
//! let engine = RetrievalEngine::builder()
//!     .config(RagConfig::default())
//!     .with_builtin_documents()
//!     .build()?;
//!
//! engine.initialize().await?;
//! engine.ingest("notes.txt", DocumentContent::text("Evacuate via stairs.")).await?;
//! let context = engine.get_enhanced_context("evacuation stairs").await;
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::builtin::{SeedDocument, eop_sample_document};
use crate::chunking::{Chunker, SentenceChunker};
use crate::config::RagConfig;
use crate::context::{ContextAssembler, EnhancedContext};
use crate::discovery::discover_documents;
use crate::document::{Chunk, DocumentRecord, RetrievalResult, ScoredChunk};
use crate::error::{RagError, Result};
use crate::ingest::{DocumentContent, mime_type_for_path, normalize_text};
use crate::scoring::{LexicalScorer, LexicalWeights};

/// Snapshot of what the engine has indexed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IndexStatus {
    /// Whether [`RetrievalEngine::initialize`] has run.
    pub initialized: bool,
    /// Number of entries in the document table.
    pub documents_count: usize,
    /// Number of chunks in the global chunk list.
    pub chunks_count: usize,
    /// Document names in first-ingestion order.
    pub documents: Vec<String>,
}

#[derive(Debug, Default)]
struct IndexState {
    initialized: bool,
    documents: HashMap<String, DocumentRecord>,
    order: Vec<String>,
    chunks: Vec<Chunk>,
}

/// Record a prepared document and append its chunks under an exclusive guard.
fn insert_locked(state: &mut IndexState, record: DocumentRecord, chunks: Vec<Chunk>) {
    let name = record.name.clone();
    if state.documents.insert(name.clone(), record).is_some() {
        warn!(document.name = %name, "document re-ingested; earlier chunks remain indexed");
    } else {
        state.order.push(name);
    }
    state.chunks.extend(chunks);
}

/// The retrieval engine.
///
/// Chunks are append-only during ingestion and read-only during scoring; a
/// `tokio::sync::RwLock` gives queries shared access while ingestion holds
/// exclusive access for the duration of a single document insert.
///
/// Re-ingesting a name replaces its [`DocumentRecord`] but leaves the chunks
/// from earlier ingestions in the chunk list.
pub struct RetrievalEngine {
    config: RagConfig,
    chunker: Arc<dyn Chunker>,
    scorer: LexicalScorer,
    assembler: ContextAssembler,
    seeds: Vec<SeedDocument>,
    state: RwLock<IndexState>,
}

impl RetrievalEngine {
    /// Create a new [`RetrievalEngineBuilder`].
    pub fn builder() -> RetrievalEngineBuilder {
        RetrievalEngineBuilder::default()
    }

    /// Return a reference to the engine configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Mark the engine initialized, ingesting any seed documents first.
    ///
    /// Calling this again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns the first ingestion error raised by a seed document.
    pub async fn initialize(&self) -> Result<()> {
        let mut state = self.state.write().await;
        if state.initialized {
            return Ok(());
        }

        let mut prepared = Vec::with_capacity(self.seeds.len());
        for seed in &self.seeds {
            prepared.push(self.prepare(&seed.name, seed.content.clone())?);
        }
        for (record, chunks) in prepared {
            insert_locked(&mut state, record, chunks);
        }

        state.initialized = true;
        info!(seed_count = self.seeds.len(), "retrieval engine initialized");
        Ok(())
    }

    /// Ingest a document: normalize → chunk → store.
    ///
    /// Returns the number of chunks created. Empty text produces zero chunks.
    /// Either every chunk of the document is added or none is.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidDocument`] if `name` is blank.
    pub async fn ingest(&self, name: &str, content: DocumentContent) -> Result<usize> {
        let (record, chunks) = self.prepare(name, content)?;
        let chunk_count = chunks.len();

        insert_locked(&mut *self.state.write().await, record, chunks);

        info!(document.name = name, chunk_count, "ingested document");
        Ok(chunk_count)
    }

    /// Normalize and chunk a document without touching the index.
    fn prepare(
        &self,
        name: &str,
        content: DocumentContent,
    ) -> Result<(DocumentRecord, Vec<Chunk>)> {
        if name.trim().is_empty() {
            error!("rejected document with empty name");
            return Err(RagError::InvalidDocument("document name must not be empty".to_string()));
        }

        let text = normalize_text(&content.into_text(name));
        let chunks = self.chunker.chunk(&text, name);
        let record = DocumentRecord {
            name: name.to_string(),
            chunk_count: chunks.len(),
            content: text,
            processed_at: Utc::now(),
        };
        Ok((record, chunks))
    }

    /// Ingest an uploaded file if its type is indexable.
    ///
    /// Returns `Ok(None)` for uploads that are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::UnreadableContent`] for text uploads that are not
    /// valid UTF-8, or [`RagError::InvalidDocument`] for a blank name.
    pub async fn ingest_upload(
        &self,
        name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Option<usize>> {
        let Some(content) = DocumentContent::from_upload(name, mime_type, bytes)
            .inspect_err(|e| error!(document.name = name, error = %e, "failed to read upload"))?
        else {
            info!(document.name = name, mime_type, "skipping non-indexable upload");
            return Ok(None);
        };
        self.ingest(name, content).await.map(Some)
    }

    /// Read a file from disk and ingest it under its file name.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Io`] if the file cannot be read,
    /// [`RagError::UnreadableContent`] if a text file is not valid UTF-8, and
    /// [`RagError::InvalidDocument`] if the file type is not indexable.
    pub async fn ingest_file(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                RagError::InvalidDocument(format!("'{}' has no file name", path.display()))
            })?;

        let bytes = tokio::fs::read(path).await.map_err(|source| {
            error!(path = %path.display(), error = %source, "failed to read document");
            RagError::Io { path: path.to_path_buf(), source }
        })?;

        match self.ingest_upload(&name, mime_type_for_path(path), bytes).await? {
            Some(count) => Ok(count),
            None => Err(RagError::InvalidDocument(format!(
                "'{name}' is not an indexable document type"
            ))),
        }
    }

    /// Ingest every document found under `root`.
    ///
    /// Returns `(document name, chunk count)` pairs in path order.
    ///
    /// # Errors
    ///
    /// Returns the first discovery or ingestion error. Documents ingested
    /// before the failure stay indexed.
    pub async fn ingest_dir(&self, root: impl AsRef<Path>) -> Result<Vec<(String, usize)>> {
        let mut ingested = Vec::new();
        for path in discover_documents(root)? {
            let count = self.ingest_file(&path).await?;
            let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            ingested.push((name, count));
        }
        Ok(ingested)
    }

    /// Rank indexed chunks for `query`.
    ///
    /// Uses `max_retrieved_chunks` when `limit` is `None`. Returns an empty
    /// list if the engine is not initialized or holds no chunks.
    pub async fn search(&self, query: &str, limit: Option<usize>) -> Vec<ScoredChunk> {
        let state = self.state.read().await;
        if !state.initialized || state.chunks.is_empty() {
            return Vec::new();
        }
        let limit = limit.unwrap_or(self.config.max_retrieved_chunks);
        self.scorer.search(query, &state.chunks, limit)
    }

    /// Rank chunks and collect their distinct sources.
    pub async fn retrieve(&self, query: &str) -> RetrievalResult {
        RetrievalResult::new(self.search(query, None).await)
    }

    /// Build the prompt augmentation block for `query`.
    ///
    /// An empty index and a query without matches are reported with
    /// different [`ContextStatus`](crate::ContextStatus) values and messages.
    pub async fn get_enhanced_context(&self, query: &str) -> EnhancedContext {
        let state = self.state.read().await;
        if !state.initialized || state.chunks.is_empty() {
            return EnhancedContext::not_initialized();
        }

        let ranked = self.scorer.search(query, &state.chunks, self.config.max_retrieved_chunks);
        drop(state);

        let result = RetrievalResult::new(ranked);
        let enhanced = self.assembler.enhanced(&result, query);
        info!(
            chunk_count = enhanced.chunk_count,
            sources = enhanced.sources.len(),
            "assembled context"
        );
        enhanced
    }

    /// Report counts and document names.
    pub async fn get_status(&self) -> IndexStatus {
        let state = self.state.read().await;
        IndexStatus {
            initialized: state.initialized,
            documents_count: state.documents.len(),
            chunks_count: state.chunks.len(),
            documents: state.order.clone(),
        }
    }

    /// Look up the current record for a document name.
    pub async fn document(&self, name: &str) -> Option<DocumentRecord> {
        self.state.read().await.documents.get(name).cloned()
    }

    /// Copy of the global chunk list in insertion order.
    pub async fn chunks(&self) -> Vec<Chunk> {
        self.state.read().await.chunks.clone()
    }

    /// Drop every document and chunk. The initialized flag is kept.
    pub async fn clear_index(&self) {
        let mut state = self.state.write().await;
        let documents = state.documents.len();
        let chunks = state.chunks.len();
        state.documents.clear();
        state.order.clear();
        state.chunks.clear();
        info!(documents, chunks, "index cleared");
    }
}

/// Builder for constructing a [`RetrievalEngine`].
///
/// Every field is optional: the defaults are [`RagConfig::default`], a
/// [`SentenceChunker`] derived from the config, default [`LexicalWeights`]
/// and no seed documents.
#[derive(Default)]
pub struct RetrievalEngineBuilder {
    config: Option<RagConfig>,
    chunker: Option<Arc<dyn Chunker>>,
    weights: Option<LexicalWeights>,
    seeds: Vec<SeedDocument>,
}

impl RetrievalEngineBuilder {
    /// Set the engine configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the default sentence chunker.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Set the lexical scoring weights.
    pub fn weights(mut self, weights: LexicalWeights) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Add a document to ingest during [`RetrievalEngine::initialize`].
    pub fn seed_document(mut self, seed: SeedDocument) -> Self {
        self.seeds.push(seed);
        self
    }

    /// Seed the built-in EOP sample document.
    pub fn with_builtin_documents(self) -> Self {
        self.seed_document(eop_sample_document())
    }

    /// Build the [`RetrievalEngine`].
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if a seed document has a blank name.
    pub fn build(self) -> Result<RetrievalEngine> {
        if self.seeds.iter().any(|seed| seed.name.trim().is_empty()) {
            return Err(RagError::ConfigError("seed documents must have a name".to_string()));
        }

        let config = self.config.unwrap_or_default();
        let chunker =
            self.chunker.unwrap_or_else(|| Arc::new(SentenceChunker::from_config(&config)));
        let assembler = ContextAssembler::new(config.corpus_name.clone());

        Ok(RetrievalEngine {
            chunker,
            scorer: LexicalScorer::new(self.weights.unwrap_or_default()),
            assembler,
            seeds: self.seeds,
            state: RwLock::new(IndexState::default()),
            config,
        })
    }
}
