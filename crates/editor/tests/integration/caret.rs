use haze_editor::dom::NodeKind;
use haze_editor::{Document, HazeConfig, Position};
use haze_synonyms::testing::ScriptedLookup;
use pretty_assertions::assert_eq;

use crate::common::{Harness, harness_with, wrap};

fn harness_at_text_offset(markup: &str, offset: usize) -> Harness {
	let mut doc = Document::from_markup(markup);
	let text = doc.children(doc.root())[0];
	assert!(matches!(doc.kind(text), Some(NodeKind::Text(_))));
	doc.set_selection(Some(Position::new(text, offset)));
	harness_with(doc, ScriptedLookup::new(), &HazeConfig::default())
}

#[tokio::test]
async fn caret_stays_after_each_typed_character() {
	let h = harness_at_text_offset("hello world", 0);

	h.type_text("X");
	assert!(h.editor.handle_input().await.is_rendered());
	assert_eq!(h.caret_offset(), Some(1));

	h.type_text("Y");
	assert!(h.editor.handle_input().await.is_rendered());
	assert_eq!(h.text(), "XYhello world");
	assert_eq!(h.caret_offset(), Some(2));
	assert_eq!(
		h.markup(),
		format!("{}{} {}", wrap("XY", "0"), wrap("hello", "0"), wrap("world", "0"))
	);
}

#[tokio::test]
async fn caret_in_the_middle_of_a_word_survives() {
	let h = harness_at_text_offset("alpha beta", 8);
	assert!(h.editor.handle_input().await.is_rendered());
	assert_eq!(h.caret_offset(), Some(8));

	h.type_text("!");
	assert!(h.editor.handle_input().await.is_rendered());
	assert_eq!(h.text(), "alpha be!ta");
	assert_eq!(h.caret_offset(), Some(9));
}

#[tokio::test]
async fn no_marker_is_left_behind() {
	let h = harness_at_text_offset("one two", 3);
	for _ in 0..3 {
		assert!(h.editor.handle_input().await.is_rendered());
	}
	assert!(!h.markup().contains("haze-caret"));
	assert_eq!(h.caret_offset(), Some(3));
}

#[tokio::test]
async fn typed_line_break_keeps_caret_on_the_new_line() {
	let h = harness_at_text_offset("top", 3);
	h.editor.handle_key(haze_primitives::Key::Enter);
	h.type_text("next");
	assert!(h.editor.handle_input().await.is_rendered());
	assert_eq!(h.text(), "topnext");
	assert_eq!(h.caret_offset(), Some(7));
	assert!(h.markup().contains("<br>"));
}
