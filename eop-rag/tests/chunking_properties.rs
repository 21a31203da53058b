//! Property tests for sentence chunking and normalization.

use eop_rag::{Chunk, Chunker, SentenceChunker, normalize_text};
use proptest::prelude::*;

const MAX_CHUNK_SIZE: usize = 60;
// 23 / 6 = 3 overlap words; each carried word is at most five characters
// (four letters plus a sentence period), so the seeded tail stays under the overlap.
const CHUNK_OVERLAP: usize = 23;
const OVERLAP_WORDS: usize = CHUNK_OVERLAP / 6;

/// A sentence of 1-10 short lowercase words, at most 49 characters.
fn arb_sentence() -> impl Strategy<Value = String> {
    proptest::collection::vec("[a-z]{1,4}", 1..10).prop_map(|words| words.join(" "))
}

fn arb_sentences() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(arb_sentence(), 0..40)
}

fn render(sentences: &[String]) -> String {
    if sentences.is_empty() {
        return String::new();
    }
    format!("{}.", sentences.join(". "))
}

fn buffer_of(chunk: &Chunk) -> &str {
    chunk.text.strip_suffix('.').unwrap_or(&chunk.text)
}

/// Strip the overlap tail carried over from `previous`, returning the new sentences.
fn core_sentences<'a>(chunk: &'a Chunk, previous: Option<&Chunk>) -> Vec<&'a str> {
    let mut body = buffer_of(chunk);
    if let Some(previous) = previous {
        let words: Vec<&str> = buffer_of(previous).split(' ').collect();
        let tail = words[words.len().saturating_sub(OVERLAP_WORDS)..].join(" ");
        let prefix = format!("{tail}. ");
        body = body.strip_prefix(prefix.as_str()).expect("chunk starts with overlap tail");
    }
    body.split(". ").collect()
}

mod prop_chunk_coverage {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// *For any* sentence sequence, removing each chunk's overlap tail and
        /// concatenating the rest reproduces the sentences in order.
        #[test]
        fn core_sentences_reconstruct_input(sentences in arb_sentences()) {
            let chunker = SentenceChunker::new(MAX_CHUNK_SIZE, OVERLAP_WORDS);
            let chunks = chunker.chunk(&render(&sentences), "doc");

            let mut rebuilt: Vec<String> = Vec::new();
            for (i, chunk) in chunks.iter().enumerate() {
                let previous = i.checked_sub(1).map(|p| &chunks[p]);
                rebuilt.extend(core_sentences(chunk, previous).into_iter().map(str::to_string));
            }
            prop_assert_eq!(rebuilt, sentences);
        }

        /// *For any* input, chunk indices and IDs are sequential from zero.
        #[test]
        fn chunk_indices_are_sequential(sentences in arb_sentences()) {
            let chunker = SentenceChunker::new(MAX_CHUNK_SIZE, OVERLAP_WORDS);
            for (i, chunk) in chunker.chunk(&render(&sentences), "doc").iter().enumerate() {
                prop_assert_eq!(chunk.chunk_index, i);
                prop_assert_eq!(&chunk.id, &format!("doc_chunk_{i}"));
                prop_assert!(chunk.text.ends_with('.'));
            }
        }
    }
}

mod prop_chunk_size_bound {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// *For any* sentences no longer than the maximum, no chunk exceeds
        /// the maximum plus the overlap.
        #[test]
        fn chunks_stay_within_soft_bound(sentences in arb_sentences()) {
            let chunker = SentenceChunker::new(MAX_CHUNK_SIZE, OVERLAP_WORDS);
            for chunk in chunker.chunk(&render(&sentences), "doc") {
                prop_assert!(
                    chunk.length <= MAX_CHUNK_SIZE + CHUNK_OVERLAP,
                    "chunk of {} chars exceeds bound",
                    chunk.length,
                );
            }
        }

        /// *For any* single oversized sentence, it is emitted whole in one chunk.
        #[test]
        fn oversized_sentence_is_not_split(words in proptest::collection::vec("[a-z]{3,8}", 20..40)) {
            let sentence = words.join(" ");
            prop_assume!(sentence.len() > MAX_CHUNK_SIZE);
            let chunker = SentenceChunker::new(MAX_CHUNK_SIZE, OVERLAP_WORDS);
            let chunks = chunker.chunk(&format!("{sentence}."), "doc");
            prop_assert_eq!(chunks.len(), 1);
            prop_assert_eq!(buffer_of(&chunks[0]), sentence.as_str());
        }
    }
}

mod prop_normalization {
    use super::*;

    proptest! {
        /// *For any* text, normalization is idempotent and leaves no whitespace runs.
        #[test]
        fn normalization_is_idempotent(text in "[a-zA-Z.!? \t\n\r]{0,200}") {
            let once = normalize_text(&text);
            prop_assert_eq!(normalize_text(&once), once.clone());
            prop_assert!(!once.contains("  "));
            prop_assert_eq!(once.trim(), once.as_str());
        }
    }
}
