//! Lexical retrieval-augmented generation for the EOP/ECM chat assistant.
//!
//! This crate provides:
//! - Document ingestion with whitespace normalization and binary placeholders
//! - Sentence-accumulating chunking with a word-based overlap tail
//! - Term-frequency scoring with an exact-phrase bonus
//! - Context assembly into a prompt augmentation block
//!
//! All of it is driven through [`RetrievalEngine`], which owns the document
//! table and the chunk list. Nothing here performs semantic search or talks
//! to an LLM provider.

pub mod builtin;
pub mod chunking;
pub mod config;
pub mod context;
pub mod discovery;
pub mod document;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod scoring;

pub use builtin::{EOP_SAMPLE_NAME, SeedDocument, eop_sample_document};
pub use chunking::{Chunker, SentenceChunker, split_sentences};
pub use config::{RagConfig, RagConfigBuilder};
pub use context::{ContextAssembler, ContextStatus, EnhancedContext};
pub use discovery::discover_documents;
pub use document::{Chunk, DocumentRecord, RetrievalResult, ScoredChunk};
pub use engine::{IndexStatus, RetrievalEngine, RetrievalEngineBuilder};
pub use error::{RagError, Result};
pub use ingest::{DocumentContent, binary_placeholder, normalize_text};
pub use scoring::{LexicalScorer, LexicalWeights, ParsedQuery};
