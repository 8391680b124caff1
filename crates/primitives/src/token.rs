//! Token stream produced by the tokenizer and consumed by the renderer.

use crate::word::normalize_word;

/// Element id carried by the caret placeholder while a render cycle is in flight.
pub const CARET_MARKER_ID: &str = "haze-caret";

/// Class attribute stamped on every rendered word wrapper.
pub const WORD_CLASS: &str = "haze-word";

/// One unit of tokenized content, in reading order.
///
/// Every variant keeps its raw source text, so concatenating
/// [`Token::raw`] over a token stream reproduces the original markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
	/// Any markup tag other than a line break or the caret marker.
	Tag(String),
	/// A run of whitespace, kept verbatim.
	Whitespace(String),
	/// A `<br>` tag in any of its spellings.
	LineBreak(String),
	Word(Word),
	/// The opening tag of the caret placeholder.
	CaretMarker(String),
	/// Zero-length artifact between two adjacent separators.
	Empty,
}

impl Token {
	/// Builds a word token, deriving its normalized key.
	pub fn word(text: impl Into<String>) -> Self {
		Self::Word(Word::new(text))
	}

	/// Raw source text of this token.
	pub fn raw(&self) -> &str {
		match self {
			Self::Tag(raw) | Self::Whitespace(raw) | Self::LineBreak(raw) | Self::CaretMarker(raw) => raw,
			Self::Word(word) => &word.text,
			Self::Empty => "",
		}
	}

	pub fn as_word(&self) -> Option<&Word> {
		match self {
			Self::Word(word) => Some(word),
			_ => None,
		}
	}
}

/// A word token: display text as it appeared plus its normalized key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
	pub text: String,
	/// Lower-cased, trimmed, markup-free form. May be empty.
	pub key: String,
}

impl Word {
	pub fn new(text: impl Into<String>) -> Self {
		let text = text.into();
		let key = normalize_word(&text);
		Self { text, key }
	}

	/// Returns true if this word contributes to counting.
	pub fn is_countable(&self) -> bool {
		!self.key.is_empty()
	}
}
