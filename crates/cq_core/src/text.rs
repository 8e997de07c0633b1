//! Answer text canonicalization.
//!
//! Free-text answers are compared after normalization so that "BOGOTÁ",
//! "bogota" and "  Bogotá  " all resolve to the same string.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalize free text for answer comparison.
///
/// Steps, in order: trim surrounding whitespace, decompose to NFD, drop
/// combining marks, lowercase. Always returns a string (possibly empty).
pub fn normalize(text: &str) -> String {
    text.trim().nfd().filter(|c| !is_combining_mark(*c)).collect::<String>().to_lowercase()
}
