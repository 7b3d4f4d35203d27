//! crates/study_core/src/tips.rs

/// Tips shown on the motivational-tips page. One is drawn at random per request.
pub const MOTIVATIONAL_TIPS: &[&str] = &[
    "Small steps every day add up to big results.",
    "Study in focused 25 minute blocks, then take a short break.",
    "Teach what you just learned to someone else, even an imaginary audience.",
    "Start with the hardest topic while your mind is fresh.",
    "Sleep is part of studying. Memories consolidate overnight.",
    "Put your phone in another room before you sit down.",
    "Review your notes from yesterday for five minutes before starting anything new.",
    "Progress, not perfection.",
    "Write down one question you want answered by the end of the session.",
    "Celebrate finishing a chapter. Motivation follows momentum.",
];
