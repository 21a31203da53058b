//! Configuration for the retrieval engine.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Configuration parameters for the retrieval engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RagConfig {
    /// Maximum chunk size in characters before a new chunk is started.
    pub max_chunk_size: usize,
    /// Approximate number of characters carried over into the next chunk.
    pub chunk_overlap: usize,
    /// Characters-per-word divisor used to turn `chunk_overlap` into a word count.
    pub overlap_chars_per_word: usize,
    /// Default number of ranked chunks returned by a search.
    pub max_retrieved_chunks: usize,
    /// Label for the indexed corpus, used in the assembled context header.
    pub corpus_name: String,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: 1000,
            chunk_overlap: 200,
            overlap_chars_per_word: 6,
            max_retrieved_chunks: 5,
            corpus_name: "EOP Paper".to_string(),
        }
    }
}

impl RagConfig {
    /// Create a new builder for constructing a [`RagConfig`].
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::default()
    }

    /// Number of trailing words seeded into a new chunk.
    pub fn overlap_words(&self) -> usize {
        self.chunk_overlap / self.overlap_chars_per_word.max(1)
    }
}

/// Builder for constructing a validated [`RagConfig`].
#[derive(Debug, Clone, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Set the maximum chunk size in characters.
    pub fn max_chunk_size(mut self, size: usize) -> Self {
        self.config.max_chunk_size = size;
        self
    }

    /// Set the overlap carried between consecutive chunks in characters.
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Set the characters-per-word divisor for the overlap tail.
    pub fn overlap_chars_per_word(mut self, divisor: usize) -> Self {
        self.config.overlap_chars_per_word = divisor;
        self
    }

    /// Set the default number of chunks returned by a search.
    pub fn max_retrieved_chunks(mut self, k: usize) -> Self {
        self.config.max_retrieved_chunks = k;
        self
    }

    /// Set the corpus label used in the context header.
    pub fn corpus_name(mut self, name: impl Into<String>) -> Self {
        self.config.corpus_name = name.into();
        self
    }

    /// Build the [`RagConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if:
    /// - `max_chunk_size == 0`
    /// - `chunk_overlap >= max_chunk_size`
    /// - `overlap_chars_per_word == 0`
    /// - `max_retrieved_chunks == 0`
    pub fn build(self) -> Result<RagConfig> {
        if self.config.max_chunk_size == 0 {
            return Err(RagError::ConfigError(
                "max_chunk_size must be greater than zero".to_string(),
            ));
        }
        if self.config.chunk_overlap >= self.config.max_chunk_size {
            return Err(RagError::ConfigError(format!(
                "chunk_overlap ({}) must be less than max_chunk_size ({})",
                self.config.chunk_overlap, self.config.max_chunk_size
            )));
        }
        if self.config.overlap_chars_per_word == 0 {
            return Err(RagError::ConfigError(
                "overlap_chars_per_word must be greater than zero".to_string(),
            ));
        }
        if self.config.max_retrieved_chunks == 0 {
            return Err(RagError::ConfigError(
                "max_retrieved_chunks must be greater than zero".to_string(),
            ));
        }
        Ok(self.config)
    }
}
