//! crates/study_core/src/spelling.rs
//!
//! Light spelling correction for free-text subject names.

use strsim::levenshtein;

/// Words the corrector knows. Anything else is left as typed.
const VOCABULARY: &[&str] = &[
    "accounting", "algebra", "anatomy", "art", "astronomy", "biology", "business", "calculus",
    "chemistry", "civics", "computer", "data", "design", "economics", "electronics",
    "engineering", "english", "finance", "french", "geography", "geometry", "german", "grammar",
    "history", "law", "learning", "linear", "literature", "machine", "management", "marketing",
    "mathematics", "math", "mechanics", "music", "networks", "organic", "philosophy", "physics",
    "programming", "psychology", "science", "sociology", "spanish", "statistics", "structures",
    "systems", "trigonometry", "writing",
];

const MAX_DISTANCE: usize = 2;
/// Shorter words are too ambiguous to correct.
const MIN_CORRECTABLE_LEN: usize = 4;

/// Corrects each whitespace-separated word against the subject vocabulary.
///
/// A leading capital on the typed word is kept on the replacement.
pub fn correct_spelling(text: &str) -> String {
    text.split_whitespace()
        .map(correct_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn correct_word(word: &str) -> String {
    let lower = word.to_lowercase();
    if lower.chars().count() < MIN_CORRECTABLE_LEN
        || !lower.chars().all(char::is_alphabetic)
        || VOCABULARY.contains(&lower.as_str())
    {
        return word.to_string();
    }

    let best = VOCABULARY
        .iter()
        .map(|candidate| (levenshtein(&lower, candidate), *candidate))
        .filter(|(distance, _)| *distance <= MAX_DISTANCE)
        .min_by_key(|(distance, _)| *distance);

    match best {
        Some((_, candidate)) if word.starts_with(char::is_uppercase) => capitalize(candidate),
        Some((_, candidate)) => candidate.to_string(),
        None => word.to_string(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
