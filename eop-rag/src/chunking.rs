//! Document chunking.
//!
//! This module provides the [`Chunker`] trait and [`SentenceChunker`], which
//! accumulates whole sentences into bounded chunks and seeds each new chunk
//! with the trailing words of the previous one.

use crate::config::RagConfig;
use crate::document::Chunk;

/// A strategy for splitting normalized text into chunks.
pub trait Chunker: Send + Sync {
    /// Split `text` into chunks attributed to `source`.
    ///
    /// Returns an empty `Vec` when the text contains no sentences.
    fn chunk(&self, text: &str, source: &str) -> Vec<Chunk>;
}

/// Splits text on sentence terminators and packs sentences into chunks.
///
/// Sentences are joined with `". "`. When adding the next sentence would
/// push a non-empty buffer past `max_chunk_size` characters, the buffer is
/// closed with a trailing period and the next buffer starts with the last
/// `overlap_words` words of the closed one. A single sentence longer than
/// `max_chunk_size` is never split.
///
/// Chunk IDs are generated as `{source}_chunk_{index}`.
///
/// # Example
///
/// ```rust,ignore
/// use eop_rag::{Chunker, SentenceChunker};
///
/// let chunker = SentenceChunker::new(1000, 33);
/// let chunks = chunker.chunk("Cats are mammals. Dogs are mammals too.", "pets.txt");
/// ```
#[derive(Debug, Clone)]
pub struct SentenceChunker {
    max_chunk_size: usize,
    overlap_words: usize,
}

impl SentenceChunker {
    /// Create a new `SentenceChunker`.
    ///
    /// # Arguments
    ///
    /// * `max_chunk_size`: character threshold that closes a chunk
    /// * `overlap_words`: number of trailing words carried into the next chunk
    pub fn new(max_chunk_size: usize, overlap_words: usize) -> Self {
        Self { max_chunk_size, overlap_words }
    }

    /// Create a chunker from engine configuration.
    pub fn from_config(config: &RagConfig) -> Self {
        Self::new(config.max_chunk_size, config.overlap_words())
    }

    fn overlap_tail(&self, buffer: &str) -> String {
        let words: Vec<&str> = buffer.split(' ').collect();
        let start = words.len().saturating_sub(self.overlap_words);
        words[start..].join(" ")
    }
}

impl Default for SentenceChunker {
    fn default() -> Self {
        Self::from_config(&RagConfig::default())
    }
}

/// Split on `.`, `!` and `?`, dropping fragments that are blank after trimming.
pub fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(['.', '!', '?']).map(str::trim).filter(|s| !s.is_empty())
}

impl Chunker for SentenceChunker {
    fn chunk(&self, text: &str, source: &str) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut buffer = String::new();
        let mut chunk_index = 0;

        for sentence in split_sentences(text) {
            let potential = if buffer.is_empty() {
                sentence.to_string()
            } else {
                format!("{buffer}. {sentence}")
            };

            if potential.chars().count() > self.max_chunk_size && !buffer.is_empty() {
                chunks.push(Chunk::from_buffer(source, chunk_index, &buffer));
                chunk_index += 1;

                let tail = self.overlap_tail(&buffer);
                buffer = if tail.is_empty() {
                    sentence.to_string()
                } else {
                    format!("{tail}. {sentence}")
                };
            } else {
                buffer = potential;
            }
        }

        if !buffer.trim().is_empty() {
            chunks.push(Chunk::from_buffer(source, chunk_index, &buffer));
        }

        chunks
    }
}
