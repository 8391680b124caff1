//! Splits surface markup into a flat token stream.

use std::sync::LazyLock;

use haze_primitives::{CARET_MARKER_ID, Token};
use regex::Regex;

/// Separator classes in precedence order: line breaks, other tags, whitespace runs.
static SEPARATOR: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)(<br\s*/?>)|(<[^>]+>)|(\s+)").expect("valid separator regex"));

static MARKER_ATTR: LazyLock<String> = LazyLock::new(|| format!("id=\"{CARET_MARKER_ID}\""));

/// Tokenizes `markup`.
///
/// The stream alternates between the text found between separators (a
/// [`Token::Word`], or [`Token::Empty`] when that text is empty) and the
/// separators themselves, so it always starts and ends with a text slot.
/// Concatenating every [`Token::raw`] gives back `markup`.
pub fn tokenize(markup: &str) -> Vec<Token> {
	let mut tokens = Vec::new();
	let mut last = 0;
	for caps in SEPARATOR.captures_iter(markup) {
		let Some(whole) = caps.get(0) else {
			continue;
		};
		tokens.push(text_slot(&markup[last..whole.start()]));
		let raw = whole.as_str().to_string();
		let token = if caps.get(1).is_some() {
			Token::LineBreak(raw)
		} else if caps.get(2).is_some() {
			if raw.contains(MARKER_ATTR.as_str()) {
				Token::CaretMarker(raw)
			} else {
				Token::Tag(raw)
			}
		} else {
			Token::Whitespace(raw)
		};
		tokens.push(token);
		last = whole.end();
	}
	tokens.push(text_slot(&markup[last..]));
	tokens
}

fn text_slot(text: &str) -> Token {
	if text.is_empty() { Token::Empty } else { Token::word(text) }
}
