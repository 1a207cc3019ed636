//! Best-effort extraction of the overall 0–10 rating from an assessment.
//!
//! The model replies in free text, so this only recognises the common
//! shapes ("Overall literacy rating: 8/10", "Rating - 7", "**Overall
//! Rating:** 9 out of 10", "Overall Literacy Rating (0 to 10): 8"). The
//! assessment text itself is never altered.

use std::sync::LazyLock;

use regex::Regex;

// A "(0 to 10)" / "(0-10)" right after "rating" is the scale, not the score.
// Group 2 catches a number that only opens a range ("0 to 10", "7-8"); such
// matches are dropped.
static RATING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)rating(?:\s*\(\s*0\s*(?:-|–|to)\s*10\s*\))?",
        r"\W{0,6}(?:of\s+|is\s+)?(\d{1,2})",
        r"(\s*(?:-|–|to)\s*\d{1,2})?",
        r"(?:\s*(?:/|out\s+of)\s*10)?\b",
    ))
    .expect("rating pattern is valid")
});

/// Return the last rating in `text` that falls within 0–10.
///
/// The last match wins because models tend to restate the score in a
/// closing summary after mentioning the rubric bands.
pub fn extract_rating(text: &str) -> Option<u8> {
    RATING_RE
        .captures_iter(text)
        .filter(|c| c.get(2).is_none())
        .filter_map(|c| c.get(1)?.as_str().parse::<u8>().ok())
        .filter(|n| *n <= 10)
        .last()
}
