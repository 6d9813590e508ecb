//! Prompt builders for the generation service.
//!
//! Pure string construction: retrieved chunks (or the full extracted
//! text, truncated) are formatted into instruction prompts. Character
//! limits keep the prompt inside the generation service's input budget.

use crate::types::RelevantChunk;

/// Character budget for flashcard and quiz source text.
const CARD_TEXT_LIMIT: usize = 15_000;

/// Character budget for summary source text.
const SUMMARY_TEXT_LIMIT: usize = 30_000;

/// Character budget for concept-explanation context.
const EXPLAIN_CONTEXT_LIMIT: usize = 10_000;

/// Truncate to at most `max` characters without splitting a char.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Format retrieved chunks as a tagged context block.
fn format_context(chunks: &[RelevantChunk]) -> String {
    chunks
        .iter()
        .enumerate()
        .map(|(i, c)| format!("[Chunk {}]\n{}", i + 1, c.content()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Build the prompt for answering a question against retrieved chunks.
pub fn build_answer_prompt(question: &str, chunks: &[RelevantChunk]) -> String {
    format!(
        "Based on the following context from a document, analyze the context and answer the user's question.\n\
         \n\
         IMPORTANT INSTRUCTIONS:\n\
         1. Structure your answer in a clear, point-by-point format using Markdown bullet points (*).\n\
         2. Use bold text (**) for key terms and headings within each point.\n\
         3. Ensure there is a newline between each point for readability.\n\
         4. If the answer is not in the context, say so clearly.\n\
         \n\
         Context:\n\
         {}\n\
         \n\
         Question:\n\
         {}\n\
         \n\
         Answer: ",
        format_context(chunks),
        question
    )
}

/// Build the prompt for explaining a concept from retrieved context.
pub fn build_explain_prompt(concept: &str, context: &str) -> String {
    format!(
        "Explain the concept of \"{}\" based on the following context.\n\
         \n\
         IMPORTANT:\n\
         1. Structure your explanation in a clear, point-by-point format using Markdown bullet points (*).\n\
         2. Use bold text (**) for key terms and headings.\n\
         3. Ensure there is a newline between each point.\n\
         4. Provide a clear, educational explanation that's easy to understand.\n\
         5. Include examples if relevant.\n\
         \n\
         Context:\n\
         {}",
        concept,
        truncate_chars(context, EXPLAIN_CONTEXT_LIMIT)
    )
}

/// Build the prompt for summarizing a document.
pub fn build_summary_prompt(text: &str) -> String {
    format!(
        "Provide a concise summary of the following text, highlighting the key concepts, main ideas and important points.\n\
         \n\
         IMPORTANT:\n\
         1. Structure the summary in a clear, point-by-point format using Markdown bullet points (*).\n\
         2. Use bold text (**) for key terms and headings.\n\
         3. Ensure there is a newline between each point.\n\
         4. Keep the summary clear and structured.\n\
         \n\
         Text:\n\
         {}",
        truncate_chars(text, SUMMARY_TEXT_LIMIT)
    )
}

/// Build the prompt for generating `count` flashcards from a document.
pub fn build_flashcard_prompt(text: &str, count: usize) -> String {
    format!(
        "Generate exactly {} educational flashcards from the following text.\n\
         Format each flashcard as:\n\
         Q: [Clear, specific question]\n\
         A: [Concise, accurate answer]\n\
         D: [Difficulty level: Easy, Medium, or Hard]\n\
         \n\
         Separate each flashcard with \"---\"\n\
         \n\
         Text:\n\
         {}",
        count,
        truncate_chars(text, CARD_TEXT_LIMIT)
    )
}

/// Build the prompt for generating `count` multiple-choice questions.
pub fn build_quiz_prompt(text: &str, count: usize) -> String {
    format!(
        "Generate exactly {} multiple choice questions from the following text.\n\
         Format each question as:\n\
         Q: [Question]\n\
         O1: [Option 1]\n\
         O2: [Option 2]\n\
         O3: [Option 3]\n\
         O4: [Option 4]\n\
         C: [Correct Option - exactly as written above]\n\
         E: [Brief Explanation]\n\
         D: [Difficulty: Easy, Medium, or Hard]\n\
         Separate each question with \"---\"\n\
         \n\
         Text:\n\
         {}",
        count,
        truncate_chars(text, CARD_TEXT_LIMIT)
    )
}
