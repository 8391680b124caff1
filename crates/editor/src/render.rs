//! Token stream -> fresh content tree.
//!
//! Every render is a full rebuild. Structure tags are re-parsed into real
//! elements, each word gets its own blur wrapper, and the caret marker is
//! recreated as a fresh element rather than injected as text.

use haze_primitives::{Intensity, Token, WORD_CLASS, Word};

use crate::caret::marker_fragment;
use crate::dom::markup::decode_entities;
use crate::dom::{Element, Fragment, TagToken, TreeBuilder, parse_tag};
use crate::intensity::IntensityTable;

/// Builds the replacement content for one snapshot.
pub fn render(tokens: &[Token], intensities: &IntensityTable) -> Vec<Fragment> {
	let mut builder = TreeBuilder::new();
	for token in tokens {
		match token {
			Token::Tag(raw) => match parse_tag(raw) {
				// A wrapper from an earlier render; its word gets re-wrapped.
				TagToken::Open { element, self_closing } if !self_closing && element.has_class(WORD_CLASS) => {
					builder.open_transparent(&element.tag);
				}
				TagToken::Open { element, self_closing } => builder.open(element, self_closing),
				TagToken::Close(name) => {
					builder.close(&name);
				}
				TagToken::Other => {}
			},
			Token::CaretMarker(raw) => {
				builder.push(marker_fragment());
				if let TagToken::Open { element, self_closing: false } = parse_tag(raw)
					&& !element.is_void()
				{
					builder.open_transparent(&element.tag);
				}
			}
			Token::LineBreak(_) => builder.push(Fragment::empty(Element::new("br"))),
			Token::Whitespace(raw) => builder.text(raw.as_str()),
			Token::Word(word) => builder.push(word_fragment(word, intensities.intensity(&word.key))),
			Token::Empty => builder.text(""),
		}
	}
	builder.finish()
}

fn word_fragment(word: &Word, intensity: Intensity) -> Fragment {
	let wrapper = Element::new("span")
		.with_attr("class", WORD_CLASS)
		.with_attr("style", format!("filter: blur({intensity});"));
	Fragment::Element {
		element: wrapper,
		children: vec![Fragment::text(decode_entities(&word.text))],
	}
}
