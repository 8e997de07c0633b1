//! Answer evaluation.

use crate::text::normalize;

/// True iff the normalized input exactly equals one of the normalized
/// accepted answers. Exact set membership only, no fuzzy matching.
///
/// Input that normalizes to the empty string is never correct, even if an
/// accepted answer were itself empty.
pub fn is_correct(raw_input: &str, accepted_answers: &[String]) -> bool {
    let input = normalize(raw_input);
    if input.is_empty() {
        return false;
    }
    accepted_answers.iter().any(|answer| normalize(answer) == input)
}
