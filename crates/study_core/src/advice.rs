//! crates/study_core/src/advice.rs
//!
//! Canned study guidance: a bucketed recommendation keyed on daily hours and a
//! threshold advisory used by the performance-input preview.

/// Recommendations indexed by daily hours, one bucket per hour from 1 to 10.
const RECOMMENDATIONS: [&str; 10] = [
    "Light review and one practice quiz",
    "Topic-focused revision with two practice problems",
    "Revise weak points and take daily quizzes",
    "One practice test plus concept videos",
    "Timed study sessions followed by a notes review",
    "A mock test and a doubt-clearing session",
    "Mixed problem solving with flashcards",
    "Intensive revision and one mock exam",
    "Full syllabus review with a test simulation",
    "Daily mock tests and active recall",
];

/// Returns the suggestion for studying `hours` per day.
///
/// Values above ten share the last bucket. Zero is outside the documented
/// domain and is treated like one hour.
pub fn recommend(hours: u32) -> &'static str {
    let bucket = hours.clamp(1, RECOMMENDATIONS.len() as u32) as usize - 1;
    RECOMMENDATIONS[bucket]
}

/// Rule-based advice for a subject studied `hours` per day.
pub fn advise(subject: &str, hours: i64) -> String {
    match hours {
        h if h < 1 => format!(
            "Try to dedicate at least 1 hour daily to {subject} for consistency."
        ),
        1 => format!("{subject} is important. Consider increasing your study time gradually."),
        h if h >= 4 => format!(
            "You're investing a lot in {subject}. Make sure to include breaks to avoid burnout!"
        ),
        h => format!("A solid {h} hours daily for {subject} sounds like a good balance."),
    }
}
