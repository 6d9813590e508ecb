//! Parsers for generated flashcard and quiz text.
//!
//! The generation service is asked for a line-tagged format (`Q:`,
//! `A:`, `O1:`..`O4:`, `C:`, `E:`, `D:`) with `---` between items.
//! Models drift from the format, so parsing is defensive: malformed
//! blocks are skipped, missing difficulty defaults to medium, and the
//! result is capped at the requested count.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Matches answer-option lines such as `O1:` .. `O4:`.
    static ref OPTION_LINE: Regex = Regex::new(r"^O\d:").unwrap();
}

/// Difficulty grade attached to generated study material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Parse a difficulty label, defaulting to `Medium` for anything
    /// unrecognized.
    fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }
}

/// A generated question/answer flashcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    /// The prompt side of the card
    pub question: String,

    /// The answer side of the card
    pub answer: String,

    /// Difficulty grade
    pub difficulty: Difficulty,
}

/// A generated multiple-choice quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// The question text
    pub question: String,

    /// Answer options in presentation order
    pub options: Vec<String>,

    /// The correct option, verbatim
    pub correct_answer: String,

    /// Short explanation of the correct answer
    pub explanation: String,

    /// Difficulty grade
    pub difficulty: Difficulty,
}

/// Parse generated flashcard text into at most `count` cards.
///
/// Blocks missing a question or answer are dropped.
pub fn parse_flashcards(generated: &str, count: usize) -> Vec<Flashcard> {
    let mut cards = Vec::new();

    for block in generated.split("---") {
        let mut question = String::new();
        let mut answer = String::new();
        let mut difficulty = Difficulty::Medium;

        for line in block.lines() {
            let line = line.trim();
            if let Some(rest) = line.strip_prefix("Q:") {
                question = rest.trim().to_string();
            } else if let Some(rest) = line.strip_prefix("A:") {
                answer = rest.trim().to_string();
            } else if let Some(rest) = line.strip_prefix("D:") {
                difficulty = Difficulty::parse(rest);
            }
        }

        if !question.is_empty() && !answer.is_empty() {
            cards.push(Flashcard {
                question,
                answer,
                difficulty,
            });
        }
    }

    cards.truncate(count);
    cards
}

/// Parse generated quiz text into at most `count` questions.
///
/// A block must carry a question, at least two options, and a correct
/// answer to be kept.
pub fn parse_quiz(generated: &str, count: usize) -> Vec<QuizQuestion> {
    let mut questions = Vec::new();

    for block in generated.split("---") {
        let mut question = String::new();
        let mut options = Vec::new();
        let mut correct_answer = String::new();
        let mut explanation = String::new();
        let mut difficulty = Difficulty::Medium;

        for line in block.lines() {
            let line = line.trim();
            if let Some(rest) = line.strip_prefix("Q:") {
                question = rest.trim().to_string();
            } else if OPTION_LINE.is_match(line) {
                options.push(line[3..].trim().to_string());
            } else if let Some(rest) = line.strip_prefix("C:") {
                correct_answer = rest.trim().to_string();
            } else if let Some(rest) = line.strip_prefix("E:") {
                explanation = rest.trim().to_string();
            } else if let Some(rest) = line.strip_prefix("D:") {
                difficulty = Difficulty::parse(rest);
            }
        }

        if !question.is_empty() && options.len() >= 2 && !correct_answer.is_empty() {
            questions.push(QuizQuestion {
                question,
                options,
                correct_answer,
                explanation,
                difficulty,
            });
        }
    }

    questions.truncate(count);
    questions
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_well_formed_flashcards() {
        let generated = "\
Q: What is the powerhouse of the cell?
A: The mitochondrion.
D: Easy
---
Q: What does DNA stand for?
A: Deoxyribonucleic acid.
D: Hard";

        let cards = parse_flashcards(generated, 10);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].question, "What is the powerhouse of the cell?");
        assert_eq!(cards[0].answer, "The mitochondrion.");
        assert_eq!(cards[0].difficulty, Difficulty::Easy);
        assert_eq!(cards[1].difficulty, Difficulty::Hard);
    }

    #[test]
    fn skips_blocks_missing_question_or_answer() {
        let generated = "\
Q: Orphan question with no answer
D: Easy
---
Q: Complete card?
A: Yes.";

        let cards = parse_flashcards(generated, 10);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].question, "Complete card?");
    }

    #[test]
    fn unknown_difficulty_defaults_to_medium() {
        let generated = "Q: Something?\nA: Something.\nD: brutal";
        let cards = parse_flashcards(generated, 5);
        assert_eq!(cards[0].difficulty, Difficulty::Medium);
    }

    #[test]
    fn result_is_capped_at_requested_count() {
        let generated = (0..5)
            .map(|i| format!("Q: Question {}?\nA: Answer {}.", i, i))
            .collect::<Vec<_>>()
            .join("\n---\n");
        let cards = parse_flashcards(&generated, 3);
        assert_eq!(cards.len(), 3);
    }

    #[test]
    fn parses_well_formed_quiz() {
        let generated = "\
Q: Which organelle performs photosynthesis?
O1: Mitochondrion
O2: Chloroplast
O3: Ribosome
O4: Nucleus
C: Chloroplast
E: Chloroplasts contain chlorophyll.
D: Medium";

        let questions = parse_quiz(generated, 5);
        assert_eq!(questions.len(), 1);
        let q = &questions[0];
        assert_eq!(q.options.len(), 4);
        assert_eq!(q.correct_answer, "Chloroplast");
        assert_eq!(q.explanation, "Chloroplasts contain chlorophyll.");
        assert_eq!(q.difficulty, Difficulty::Medium);
    }

    #[test]
    fn quiz_requires_two_options_and_correct_answer() {
        let generated = "\
Q: Underspecified question?
O1: Only option
C: Only option
---
Q: No correct answer?
O1: A
O2: B";

        assert!(parse_quiz(generated, 5).is_empty());
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let generated = "  Q:  Padded question?  \n  A:  Padded answer.  ";
        let cards = parse_flashcards(generated, 1);
        assert_eq!(cards[0].question, "Padded question?");
        assert_eq!(cards[0].answer, "Padded answer.");
    }
}
