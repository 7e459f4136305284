//! Rule-based feedback on the student's questioning
//!
//! Scans the user side of the transcript with two keyword checks and
//! assembles a fixed-order markdown report. Deterministic: identical
//! transcripts produce byte-identical output.

use crate::classifier::is_role_change_or_direct_answer;
use crate::session::{ChatMessage, Role};

const HEADER: &str = "## Feedback on Your Information Gathering Process:\n\n";

const RELEVANCE_PASS: &str = "- ✅ You asked relevant questions about the manufacturing process. Great job staying focused on the topic.\n";
const RELEVANCE_WARN: &str = "- ⚠️ Try to focus your questions more specifically on the manufacturing process and related challenges.\n";

const DIRECTNESS_PASS: &str = "- ✅ Excellent job avoiding direct-answer requests! This shows strong information-gathering skills.\n";
const DIRECTNESS_WARN: &str = "- ⚠️ Avoid asking for direct answers; instead, try to frame your questions to gather specific insights.\n";

const SUGGESTION: &str = "- 💡 Consider exploring different aspects, such as consistency issues or key indicators to monitor, to ensure a thorough understanding of the manufacturing process.\n";

const CLOSING: &str = "\n**Keep practicing your questioning skills to improve your information-gathering abilities!**";

/// Generate the end-of-session feedback report from a transcript.
///
/// Pure function: reads the user-role entries in order, never mutates.
/// Assistant entries (including any fail-soft error messages that landed in
/// the transcript) are ignored by both checks.
pub fn generate_feedback(messages: &[ChatMessage]) -> String {
    let asked_questions: Vec<&str> = messages
        .iter()
        .filter(|m| m.role == Role::User)
        .map(|m| m.content.as_str())
        .collect();

    let mut feedback = String::from(HEADER);

    let relevant = asked_questions.iter().any(|q| {
        let lowered = q.to_lowercase();
        lowered.contains("manufacturing") || lowered.contains("process")
    });
    feedback.push_str(if relevant {
        RELEVANCE_PASS
    } else {
        RELEVANCE_WARN
    });

    let direct = asked_questions
        .iter()
        .any(|q| is_role_change_or_direct_answer(q));
    feedback.push_str(if direct {
        DIRECTNESS_WARN
    } else {
        DIRECTNESS_PASS
    });

    feedback.push_str(SUGGESTION);
    feedback.push_str(CLOSING);
    feedback
}
