//! Word-window chunker for extracted document text.
//!
//! Splits a flat text into an ordered sequence of fixed-size,
//! overlapping chunks. The splitting unit is whitespace-delimited
//! words, never raw characters, so chunks stay human-readable and no
//! word is ever cut in half. The overlap repeats the tail of each
//! chunk at the head of the next, preserving context across chunk
//! boundaries for retrieval.

use crate::error::ConfigError;
use crate::types::Chunk;
use crate::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};

/// Split `text` into overlapping word chunks.
///
/// Takes `chunk_size` consecutive words per chunk (joined by single
/// spaces) and advances the window by `chunk_size - overlap` words
/// until the text is exhausted. The final chunk may be shorter.
/// `chunk_index` is assigned in scan order starting at 0.
///
/// Empty or whitespace-only text produces zero chunks. `chunk_size`
/// of zero or `overlap >= chunk_size` is a caller configuration error
/// and fails immediately; a non-advancing window would otherwise loop
/// forever.
///
/// Pure function: no side effects, safe to call concurrently.
pub fn chunk(text: &str, chunk_size: usize, overlap: usize) -> Result<Vec<Chunk>, ConfigError> {
    validate(chunk_size, overlap)?;

    let words: Vec<&str> = text.split_whitespace().collect();
    Ok(chunk_words(&words, |_| 0, chunk_size, overlap))
}

/// Split `text` with the service defaults (500 words, 50 overlap).
pub fn chunk_with_defaults(text: &str) -> Result<Vec<Chunk>, ConfigError> {
    chunk(text, DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP)
}

/// Split per-page text spans into overlapping word chunks.
///
/// The chunk window runs across page boundaries exactly as in [`chunk`];
/// each chunk is attributed the 1-based page of its first word. Used
/// when the upstream extractor can supply page spans; otherwise the
/// flat [`chunk`] entry point applies and pages default to 0.
pub fn chunk_pages<S: AsRef<str>>(
    pages: &[S],
    chunk_size: usize,
    overlap: usize,
) -> Result<Vec<Chunk>, ConfigError> {
    validate(chunk_size, overlap)?;

    let mut words = Vec::new();
    let mut page_of_word = Vec::new();
    for (page_idx, page) in pages.iter().enumerate() {
        for word in page.as_ref().split_whitespace() {
            words.push(word);
            page_of_word.push(page_idx + 1);
        }
    }

    Ok(chunk_words(
        &words,
        |word_idx| page_of_word[word_idx],
        chunk_size,
        overlap,
    ))
}

/// Core sliding-window loop over a tokenized word sequence.
fn chunk_words(
    words: &[&str],
    page_of: impl Fn(usize) -> usize,
    chunk_size: usize,
    overlap: usize,
) -> Vec<Chunk> {
    if words.is_empty() {
        return Vec::new();
    }

    // Validated by the callers: chunk_size > overlap, so step > 0.
    let step = chunk_size - overlap;

    let mut chunks = Vec::new();
    let mut start = 0;
    let mut chunk_index = 0;

    while start < words.len() {
        let end = (start + chunk_size).min(words.len());
        let content = words[start..end].join(" ");

        chunks.push(Chunk::new(content, page_of(start), chunk_index));
        chunk_index += 1;

        if end >= words.len() {
            break;
        }
        start += step;
    }

    chunks
}

fn validate(chunk_size: usize, overlap: usize) -> Result<(), ConfigError> {
    if chunk_size == 0 {
        return Err(ConfigError::ZeroChunkSize);
    }
    if overlap >= chunk_size {
        return Err(ConfigError::OverlapTooLarge {
            overlap,
            chunk_size,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_text_produces_no_chunks() {
        assert_eq!(chunk("", 500, 50).unwrap(), vec![]);
        assert_eq!(chunk("   \n\t  ", 500, 50).unwrap(), vec![]);
    }

    #[test]
    fn short_text_produces_single_chunk() {
        let chunks = chunk("one two three", 500, 50).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "one two three");
        assert_eq!(chunks[0].chunk_index, 0);
        assert_eq!(chunks[0].page_number, 0);
    }

    #[test]
    fn overlap_equal_to_size_fails() {
        assert_eq!(
            chunk("some text", 100, 100),
            Err(ConfigError::OverlapTooLarge {
                overlap: 100,
                chunk_size: 100
            })
        );
    }

    #[test]
    fn overlap_greater_than_size_fails() {
        assert_eq!(
            chunk("some text", 100, 150),
            Err(ConfigError::OverlapTooLarge {
                overlap: 150,
                chunk_size: 100
            })
        );
    }

    #[test]
    fn zero_chunk_size_fails() {
        assert_eq!(chunk("some text", 0, 0), Err(ConfigError::ZeroChunkSize));
    }

    #[test]
    fn windows_advance_by_size_minus_overlap() {
        // 12 words, size 5, overlap 1: windows start at 0, 4, 8.
        let text = "The cat sat on the mat. The dog ran in the park.";
        let chunks = chunk(text, 5, 1).unwrap();

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].content, "The cat sat on the");
        assert_eq!(chunks[1].content, "the mat. The dog ran");
        assert_eq!(chunks[2].content, "ran in the park.");
    }

    #[test]
    fn indices_are_contiguous_from_zero() {
        let text = "a b c d e f g h i j k l m n o p q r s t";
        let chunks = chunk(text, 4, 2).unwrap();

        for (position, c) in chunks.iter().enumerate() {
            assert_eq!(c.chunk_index, position);
        }
    }

    #[test]
    fn chunks_cover_every_word_exactly_once_outside_overlap() {
        let words: Vec<String> = (0..137).map(|i| format!("w{}", i)).collect();
        let text = words.join(" ");
        let (size, overlap) = (20, 5);
        let chunks = chunk(&text, size, overlap).unwrap();

        // Reconstruct: whole first chunk, then each subsequent chunk
        // minus its leading overlap words.
        let mut rebuilt: Vec<&str> = Vec::new();
        for (i, c) in chunks.iter().enumerate() {
            let chunk_words: Vec<&str> = c.content.split_whitespace().collect();
            let skip = if i == 0 { 0 } else { overlap };
            rebuilt.extend(&chunk_words[skip..]);
        }

        let original: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn no_spurious_tail_chunk_when_text_fits_one_window() {
        let text = "a b c d e";
        let chunks = chunk(text, 5, 2).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "a b c d e");
    }

    #[test]
    fn final_chunk_may_be_short() {
        let text = "a b c d e f g";
        let chunks = chunk(text, 5, 0).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].content, "f g");
    }

    #[test]
    fn chunking_is_deterministic() {
        let text = "repeat me again and again and again until done";
        let first = chunk(text, 3, 1).unwrap();
        let second = chunk(text, 3, 1).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn defaults_match_service_constants() {
        let words: Vec<String> = (0..600).map(|i| format!("w{}", i)).collect();
        let text = words.join(" ");
        let chunks = chunk_with_defaults(&text).unwrap();

        // 600 words, size 500, step 450: windows at 0 and 450.
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].word_count(), 500);
        assert_eq!(chunks[1].word_count(), 150);
    }

    #[test]
    fn page_chunking_attributes_first_word_page() {
        let pages = vec!["one two three", "four five", "six seven eight"];
        let chunks = chunk_pages(&pages, 4, 1).unwrap();

        // Words: 8 total, windows start at 0, 3, 6.
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].content, "one two three four");
        assert_eq!(chunks[0].page_number, 1);
        assert_eq!(chunks[1].content, "four five six seven");
        assert_eq!(chunks[1].page_number, 2);
        assert_eq!(chunks[2].content, "seven eight");
        assert_eq!(chunks[2].page_number, 3);
    }

    #[test]
    fn page_chunking_skips_empty_pages() {
        let pages = vec!["", "alpha beta", ""];
        let chunks = chunk_pages(&pages, 10, 2).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "alpha beta");
        assert_eq!(chunks[0].page_number, 2);
    }

    #[test]
    fn page_chunking_validates_config() {
        let pages = vec!["alpha beta"];
        assert!(chunk_pages(&pages, 2, 2).is_err());
    }
}
