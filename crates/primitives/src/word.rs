use std::sync::LazyLock;

use regex::Regex;

static MARKUP_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid markup regex"));

/// Normalizes a word for counting and cache lookups.
///
/// Strips embedded markup fragments, trims surrounding whitespace, and
/// lower-cases. The result may be empty.
pub fn normalize_word(raw: &str) -> String {
	MARKUP_FRAGMENT.replace_all(raw, "").trim().to_lowercase()
}
