//! Heuristic summary quality score.

pub use crate::config::QUALITY_THRESHOLD;

const BASE_SCORE: f64 = 0.5;
const LENGTH_BONUS: f64 = 0.2;
const STRUCTURE_BONUS: f64 = 0.1;
const LEXICON_WEIGHT: f64 = 0.2;
const MIN_CHARS: usize = 500;
const MAX_CHARS: usize = 2000;
const MIN_PARAGRAPH_BREAKS: usize = 3;
const LEXICON: [&str; 5] = ["summary", "overview", "key", "main", "insights"];

/// Score a narrative in `[0, 1]`. Pure and deterministic.
///
/// Length is counted in characters; lexicon terms match case-insensitively
/// anywhere in the text.
pub fn score_summary(text: &str) -> f64 {
    let mut score = BASE_SCORE;

    let chars = text.chars().count();
    if (MIN_CHARS..=MAX_CHARS).contains(&chars) {
        score += LENGTH_BONUS;
    }

    if text.matches("\n\n").count() >= MIN_PARAGRAPH_BREAKS {
        score += STRUCTURE_BONUS;
    }

    let lower = text.to_lowercase();
    let found = LEXICON.iter().filter(|term| lower.contains(*term)).count();
    score += LEXICON_WEIGHT * found as f64 / LEXICON.len() as f64;

    score.min(1.0)
}

/// True when a draft with this score should be refined.
pub fn needs_refinement(score: f64) -> bool {
    score < QUALITY_THRESHOLD
}
