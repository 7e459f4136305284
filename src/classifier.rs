//! Keyword classifier for role-change and direct-answer attempts
//!
//! A student message is flagged when it contains any of ten fixed phrases
//! as a case-insensitive substring. Matching is substring-exact after
//! case-folding; no whitespace normalization.

/// Phrases that try to flip the interviewee into an interviewer.
pub const ROLE_CHANGE_PHRASES: &[&str] = &[
    "you are the manager",
    "ask me questions",
    "take on another role",
    "change your role",
    "become the interviewer",
];

/// Phrases that ask the interviewee to hand over the answer outright.
pub const DIRECT_ANSWER_PHRASES: &[&str] = &[
    "tell me directly",
    "just give me the answer",
    "explain the solution",
    "give me the data",
    "provide the dashboard",
];

/// Check whether an utterance attempts a role change or requests a direct
/// answer. Pure and deterministic.
pub fn is_role_change_or_direct_answer(utterance: &str) -> bool {
    let lowered = utterance.to_lowercase();
    ROLE_CHANGE_PHRASES
        .iter()
        .chain(DIRECT_ANSWER_PHRASES)
        .any(|phrase| lowered.contains(phrase))
}
