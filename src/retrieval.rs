//! Lexical relevance ranking over a document's chunks.
//!
//! Scores each chunk by how many distinct query terms appear in it and
//! returns the top-K. Presence counting (not frequency, not TF-IDF) is
//! deliberate: it is cheap, deterministic, and explainable, and a
//! downstream generation step does the actual semantic reasoning over
//! the selected chunks.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ConfigError;
use crate::types::{Chunk, RelevantChunk};
use crate::DEFAULT_TOP_K;

lazy_static! {
    /// Word tokens are lowercase alphanumeric runs.
    static ref WORD_TOKEN: Regex = Regex::new(r"[a-z0-9]+").unwrap();
}

/// Extract the set of unique word tokens from `text`.
fn tokenize(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    WORD_TOKEN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Rank `chunks` by lexical relevance to `query` and return the top `top_k`.
///
/// Each chunk scores one point per distinct query term present in its
/// content. Results are ordered by score descending, ties broken by
/// ascending `chunk_index` so equally relevant chunks keep document
/// order and repeated calls return identical output.
///
/// Only chunks with a positive score are ranked; the result holds at
/// most `min(top_k, positively scored chunks)` entries. When *no* chunk
/// shares a term with the query (a fully paraphrased question, or a
/// query with no extractable tokens), the first `top_k` chunks in
/// document order are returned instead — a deliberate degradation so
/// the caller is never left without context to ground generation.
///
/// `top_k` of zero is a caller configuration error. An empty chunk
/// list yields an empty result. Pure function; runtime is
/// O(chunks × average chunk tokens).
pub fn find_relevant_chunks(
    chunks: &[Chunk],
    query: &str,
    top_k: usize,
) -> Result<Vec<RelevantChunk>, ConfigError> {
    if top_k == 0 {
        return Err(ConfigError::ZeroTopK);
    }
    if chunks.is_empty() {
        return Ok(Vec::new());
    }

    let query_terms = tokenize(query);

    let mut scored: Vec<RelevantChunk> = chunks
        .iter()
        .map(|c| {
            let chunk_terms = tokenize(&c.content);
            let score = query_terms
                .iter()
                .filter(|term| chunk_terms.contains(*term))
                .count();
            RelevantChunk {
                chunk: c.clone(),
                score,
            }
        })
        .collect();

    if scored.iter().all(|rc| rc.score == 0) {
        // Fallback: no lexical overlap at all, keep document order.
        scored.truncate(top_k);
        return Ok(scored);
    }

    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(a.chunk.chunk_index.cmp(&b.chunk.chunk_index))
    });
    scored.retain(|rc| rc.score > 0);
    scored.truncate(top_k);

    Ok(scored)
}

/// Rank with the service default `top_k` (3).
pub fn find_relevant_chunks_default(
    chunks: &[Chunk],
    query: &str,
) -> Result<Vec<RelevantChunk>, ConfigError> {
    find_relevant_chunks(chunks, query, DEFAULT_TOP_K)
}
