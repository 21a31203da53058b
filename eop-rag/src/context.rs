//! Context assembly for prompt augmentation.
//!
//! [`ContextAssembler`] turns ranked chunks into a markdown block that is
//! appended to an outgoing LLM prompt. It knows nothing about providers; an
//! empty string means there is nothing to add.

use serde::{Deserialize, Serialize};

use crate::document::{RetrievalResult, ScoredChunk};

/// Outcome of a context request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContextStatus {
    /// The engine is not initialized or holds no chunks.
    NotInitialized,
    /// Chunks exist but none scored above zero.
    NoMatches,
    /// At least one chunk matched.
    Found,
}

/// Augmentation block plus a user-facing status message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnhancedContext {
    /// Formatted context, empty unless `status` is [`ContextStatus::Found`].
    pub context: String,
    /// Distinct source documents in order of first appearance.
    pub sources: Vec<String>,
    /// Number of chunks included in `context`.
    #[serde(rename = "chunks")]
    pub chunk_count: usize,
    /// Human-readable description of the outcome.
    pub message: String,
    /// Machine-readable outcome.
    pub status: ContextStatus,
}

impl EnhancedContext {
    /// Result for an engine with nothing indexed.
    pub fn not_initialized() -> Self {
        Self::empty(
            ContextStatus::NotInitialized,
            "RAG system not initialized or no documents loaded.",
        )
    }

    /// Result for a query that matched nothing.
    pub fn no_matches() -> Self {
        Self::empty(
            ContextStatus::NoMatches,
            "No relevant information found in the indexed documents.",
        )
    }

    fn empty(status: ContextStatus, message: &str) -> Self {
        Self {
            context: String::new(),
            sources: Vec::new(),
            chunk_count: 0,
            message: message.to_string(),
            status,
        }
    }
}

/// Formats ranked chunks into a reference block that restates the query.
#[derive(Debug, Clone)]
pub struct ContextAssembler {
    corpus_name: String,
}

impl ContextAssembler {
    /// Create an assembler whose header names `corpus_name`.
    pub fn new(corpus_name: impl Into<String>) -> Self {
        Self { corpus_name: corpus_name.into() }
    }

    /// Format ranked chunks for `query`. Returns an empty string for no chunks.
    pub fn assemble(&self, ranked: &[ScoredChunk], query: &str) -> String {
        if ranked.is_empty() {
            return String::new();
        }

        let mut context = format!("\n\n## Relevant Information from {}:\n\n", self.corpus_name);
        for (i, scored) in ranked.iter().enumerate() {
            context.push_str(&format!(
                "### Reference {} (from {}):\n{}\n\n",
                i + 1,
                scored.chunk.source,
                scored.chunk.text
            ));
        }
        context.push_str(&format!(
            "## Query Context:\nBased on the above references from the {}, please answer: {query}\n\n",
            self.corpus_name
        ));
        context
    }

    /// Build the full context response for a retrieval result.
    pub fn enhanced(&self, result: &RetrievalResult, query: &str) -> EnhancedContext {
        if result.is_empty() {
            return EnhancedContext::no_matches();
        }
        let chunk_count = result.chunks.len();
        EnhancedContext {
            context: self.assemble(&result.chunks, query),
            sources: result.sources.clone(),
            chunk_count,
            message: format!(
                "Found {chunk_count} relevant sections from {} document(s).",
                result.sources.len()
            ),
            status: ContextStatus::Found,
        }
    }
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new("EOP Paper")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Chunk;

    fn scored(source: &str, buffer: &str, score: u32) -> ScoredChunk {
        ScoredChunk { chunk: Chunk::from_buffer(source, 0, buffer), score }
    }

    #[test]
    fn empty_ranking_assembles_to_empty_string() {
        assert_eq!(ContextAssembler::default().assemble(&[], "anything"), "");
    }

    #[test]
    fn references_are_numbered_in_rank_order() {
        let assembler = ContextAssembler::new("Handbook");
        let ranked = vec![scored("b.md", "Second source", 9), scored("a.md", "First source", 4)];
        let context = assembler.assemble(&ranked, "what now?");

        assert!(context.starts_with("\n\n## Relevant Information from Handbook:\n\n"));
        let first = context.find("### Reference 1 (from b.md):\nSecond source.\n\n").unwrap();
        let second = context.find("### Reference 2 (from a.md):\nFirst source.\n\n").unwrap();
        assert!(first < second);
        assert!(context.ends_with(
            "## Query Context:\nBased on the above references from the Handbook, please answer: what now?\n\n"
        ));
    }

    #[test]
    fn enhanced_context_reports_counts() {
        let result = RetrievalResult::new(vec![
            scored("a.md", "x", 3),
            scored("b.md", "y", 2),
            scored("a.md", "z", 1),
        ]);
        let enhanced = ContextAssembler::default().enhanced(&result, "q");
        assert_eq!(enhanced.status, ContextStatus::Found);
        assert_eq!(enhanced.chunk_count, 3);
        assert_eq!(enhanced.sources, vec!["a.md".to_string(), "b.md".to_string()]);
        assert_eq!(enhanced.message, "Found 3 relevant sections from 2 document(s).");
    }

    #[test]
    fn empty_states_have_distinct_messages() {
        let none = EnhancedContext::not_initialized();
        let missed = EnhancedContext::no_matches();
        assert_ne!(none.message, missed.message);
        assert!(none.context.is_empty() && missed.context.is_empty());
    }
}
