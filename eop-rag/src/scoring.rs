//! Lexical relevance scoring.
//!
//! Scores are computed from literal term occurrence counts. Terms are matched
//! as plain substrings, so characters such as `.*+?^${}()|[]\` in queries or
//! chunk text have no special meaning and cannot fail.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::{Chunk, ScoredChunk};

/// Weights used by [`LexicalScorer`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LexicalWeights {
    /// Query tokens shorter than this many characters are ignored.
    pub min_term_len: usize,
    /// Tokens longer than this many characters use `long_term_weight`.
    pub long_term_threshold: usize,
    /// Weight per occurrence of a long term.
    pub long_term_weight: u32,
    /// Weight per occurrence of any other term.
    pub short_term_weight: u32,
    /// Flat bonus when the whole query appears verbatim in the chunk.
    pub exact_phrase_bonus: u32,
}

impl Default for LexicalWeights {
    fn default() -> Self {
        Self {
            min_term_len: 3,
            long_term_threshold: 4,
            long_term_weight: 2,
            short_term_weight: 1,
            exact_phrase_bonus: 10,
        }
    }
}

/// A query prepared for scoring: lower-cased phrase plus its weighted terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    phrase: String,
    terms: Vec<(String, u32)>,
}

impl ParsedQuery {
    /// The lower-cased query used for the exact-phrase check.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Retained terms in query order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|(term, _)| term.as_str())
    }
}

/// Term-frequency scorer with an exact-phrase bonus.
///
/// # Example
///
/// ```rust,ignore
/// use eop_rag::LexicalScorer;
///
/// let scorer = LexicalScorer::default();
/// let ranked = scorer.search("emergency evacuation", &chunks, 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LexicalScorer {
    weights: LexicalWeights,
}

impl LexicalScorer {
    /// Create a scorer with custom weights.
    pub fn new(weights: LexicalWeights) -> Self {
        Self { weights }
    }

    /// Lower-case and tokenize a query on whitespace, dropping short tokens.
    pub fn parse_query(&self, query: &str) -> ParsedQuery {
        let phrase = query.to_lowercase();
        let terms = phrase
            .split_whitespace()
            .filter(|term| term.chars().count() >= self.weights.min_term_len)
            .map(|term| {
                let weight = if term.chars().count() > self.weights.long_term_threshold {
                    self.weights.long_term_weight
                } else {
                    self.weights.short_term_weight
                };
                (term.to_string(), weight)
            })
            .collect();
        ParsedQuery { phrase, terms }
    }

    /// Score one chunk against a parsed query.
    pub fn score(&self, query: &ParsedQuery, chunk: &Chunk) -> u32 {
        let text = chunk.text.to_lowercase();
        let mut score = query.terms.iter().fold(0u32, |acc, (term, weight)| {
            let count = u32::try_from(count_occurrences(&text, term)).unwrap_or(u32::MAX);
            acc.saturating_add(count.saturating_mul(*weight))
        });

        if text.contains(query.phrase.as_str()) {
            score = score.saturating_add(self.weights.exact_phrase_bonus);
        }
        score
    }

    /// Rank `chunks` against `query`, returning at most `limit` positive scores.
    ///
    /// Ordering is by descending score; ties keep the order of `chunks`.
    pub fn search(&self, query: &str, chunks: &[Chunk], limit: usize) -> Vec<ScoredChunk> {
        let parsed = self.parse_query(query);
        let mut scored: Vec<ScoredChunk> = chunks
            .iter()
            .filter_map(|chunk| {
                let score = self.score(&parsed, chunk);
                (score > 0).then(|| ScoredChunk { chunk: chunk.clone(), score })
            })
            .collect();

        let matched = scored.len();
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(limit);

        debug!(
            terms = parsed.terms.len(),
            candidates = chunks.len(),
            matched,
            returned = scored.len(),
            "lexical search completed"
        );
        scored
    }
}

/// Count non-overlapping literal occurrences of `needle` in `haystack`.
fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(source: &str, index: usize, buffer: &str) -> Chunk {
        Chunk::from_buffer(source, index, buffer)
    }

    #[test]
    fn short_tokens_are_dropped_and_long_tokens_weighted() {
        let scorer = LexicalScorer::default();
        let parsed = scorer.parse_query("The  data of EVIDENCE is ok");
        let terms: Vec<&str> = parsed.terms().collect();
        assert_eq!(terms, vec!["the", "data", "evidence"]);
        assert_eq!(parsed.phrase(), "the  data of evidence is ok");
    }

    #[test]
    fn counts_every_occurrence_with_weight() {
        let scorer = LexicalScorer::default();
        let c = chunk("a", 0, "Cats are mammals. Dogs are mammals too. Fish are not mammals");
        // three occurrences at weight 2, plus the phrase bonus
        assert_eq!(scorer.score(&scorer.parse_query("mammals"), &c), 16);
        // "dogs" is four characters, weight 1; "are" appears three times
        assert_eq!(scorer.score(&scorer.parse_query("dogs are"), &c), 1 + 3 + 10);
    }

    #[test]
    fn counts_are_non_overlapping() {
        assert_eq!(count_occurrences("aaaa", "aa"), 2);
        assert_eq!(count_occurrences("abc", ""), 0);
    }

    #[test]
    fn exact_phrase_bonus_requires_contiguous_query() {
        let scorer = LexicalScorer::default();
        let c = chunk("a", 0, "emergency plans need evacuation routes");
        let together = scorer.score(&scorer.parse_query("evacuation routes"), &c);
        let apart = scorer.score(&scorer.parse_query("routes evacuation"), &c);
        assert_eq!(together, apart + 10);
    }

    #[test]
    fn empty_query_matches_every_chunk_with_phrase_bonus() {
        let scorer = LexicalScorer::default();
        let c = chunk("a", 0, "anything at all");
        assert_eq!(scorer.score(&scorer.parse_query(""), &c), 10);
        assert_eq!(scorer.score(&scorer.parse_query(" "), &c), 10);
        assert_eq!(scorer.score(&scorer.parse_query("   "), &c), 0);

        let ranked = scorer.search("", &[c], 5);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].score, 10);
    }

    #[test]
    fn special_characters_are_literal() {
        let scorer = LexicalScorer::default();
        let c = chunk("a", 0, "costs (in $) are [estimated] at 3.5* per unit? yes|no \\ ^end {x}");
        let ranked = scorer.search("(in $) [estimated] 3.5* unit? yes|no \\ ^end {x}", &[c], 5);
        assert_eq!(ranked.len(), 1);
        assert!(ranked[0].score > 0);
    }

    #[test]
    fn ties_keep_insertion_order_and_limit_applies() {
        let scorer = LexicalScorer::default();
        let chunks = vec![
            chunk("a", 0, "shelter"),
            chunk("b", 0, "shelter shelter"),
            chunk("c", 0, "shelter"),
            chunk("d", 0, "nothing here"),
        ];
        let ranked = scorer.search("shelter", &chunks, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].chunk.source, "b");
        assert_eq!(ranked[1].chunk.source, "a");

        let all = scorer.search("shelter", &chunks, 10);
        let order: Vec<&str> = all.iter().map(|s| s.chunk.source.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }
}
