//! Data types for documents, chunks, and search results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An ingested document as recorded in the engine's document table.
///
/// Keyed by `name`. Re-ingesting the same name replaces this record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Caller-supplied unique name.
    pub name: String,
    /// The normalized full text.
    pub content: String,
    /// Number of chunks produced from `content`.
    pub chunk_count: usize,
    /// When the document was processed.
    pub processed_at: DateTime<Utc>,
}

/// A contiguous segment of a document's normalized text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    /// Identifier of the form `{source}_chunk_{index}`.
    pub id: String,
    /// The chunk text, terminated with a period.
    pub text: String,
    /// Name of the source document.
    pub source: String,
    /// Zero-based position within the source document.
    pub chunk_index: usize,
    /// Character length of the accumulated sentence buffer (excluding the closing period).
    pub length: usize,
}

impl Chunk {
    /// Build a chunk from a finished sentence buffer, appending the closing period.
    pub fn from_buffer(source: &str, chunk_index: usize, buffer: &str) -> Self {
        Self {
            id: format!("{source}_chunk_{chunk_index}"),
            text: format!("{buffer}."),
            source: source.to_string(),
            chunk_index,
            length: buffer.chars().count(),
        }
    }
}

/// A [`Chunk`] paired with its relevance score for a single query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScoredChunk {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// Lexical relevance score (always positive in search results).
    pub score: u32,
}

/// Ranked chunks for one query plus the documents they came from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalResult {
    /// Chunks in rank order.
    pub chunks: Vec<ScoredChunk>,
    /// Distinct source names, in order of first appearance in `chunks`.
    pub sources: Vec<String>,
}

impl RetrievalResult {
    /// Wrap a ranked list, collecting its distinct sources.
    pub fn new(chunks: Vec<ScoredChunk>) -> Self {
        let mut sources: Vec<String> = Vec::new();
        for scored in &chunks {
            if !sources.iter().any(|s| s == &scored.chunk.source) {
                sources.push(scored.chunk.source.clone());
            }
        }
        Self { chunks, sources }
    }

    /// Whether no chunk matched.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
