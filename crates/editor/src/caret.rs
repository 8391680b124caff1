//! Caret preservation across destructive rebuilds.
//!
//! The caret is serialized as a sentinel element: [`save`] drops an empty
//! `<span id="haze-caret">` at the caret so it rides through tokenization,
//! the renderer rebuilds it as a fresh element, and [`restore`] turns it
//! back into a live caret. Losing the marker is not an error; the caret is
//! simply left wherever the rebuild put it.

use haze_primitives::CARET_MARKER_ID;

use crate::dom::{Element, Fragment};
use crate::surface::EditableSurface;

/// A fresh, empty caret marker element.
pub fn marker_fragment() -> Fragment {
	Fragment::empty(Element::new("span").with_attr("id", CARET_MARKER_ID))
}

/// Inserts the caret marker at the current caret.
///
/// Returns `None` (and changes nothing) when the surface has no selection.
pub fn save<S: EditableSurface>(surface: &mut S) -> Option<S::Node> {
	let Some(caret) = surface.caret() else {
		tracing::debug!("caret.save.no_selection");
		return None;
	};
	let marker = surface.insert_node(caret, marker_fragment());
	tracing::trace!(?caret, ?marker, "caret.save");
	Some(marker)
}

/// Removes a marker placed by [`save`] once the snapshot has been read.
pub fn discard<S: EditableSurface>(surface: &mut S, marker: S::Node) {
	surface.remove_node(marker);
}

/// Moves the caret to just after the marker and removes the marker.
///
/// Returns false if no marker was found; the caret is then left as-is.
pub fn restore<S: EditableSurface>(surface: &mut S) -> bool {
	let Some(marker) = surface.find_element_by_id(CARET_MARKER_ID) else {
		tracing::debug!("caret.restore.marker_missing");
		return false;
	};
	surface.set_caret_after(marker);
	surface.remove_node(marker);
	true
}

/// Inserts a `<br>` at the caret and places the caret after it.
///
/// Used for Enter, whose host default is suppressed. Returns false without
/// a selection.
pub fn insert_line_break<S: EditableSurface>(surface: &mut S) -> bool {
	let Some(caret) = surface.caret() else {
		return false;
	};
	let br = surface.insert_node(caret, Fragment::empty(Element::new("br")));
	surface.set_caret_after(br);
	true
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::dom::{Document, NodeKind, Position};

	fn doc_with_caret(markup: &str, text_offset: usize) -> Document {
		let mut doc = Document::from_markup(markup);
		let text = doc.children(doc.root())[0];
		assert!(matches!(doc.kind(text), Some(NodeKind::Text(_))));
		doc.set_selection(Some(Position::new(text, text_offset)));
		doc
	}

	#[test]
	fn save_inserts_marker_inline() {
		let mut doc = doc_with_caret("hello world", 6);
		let marker = save(&mut doc).unwrap();
		assert_eq!(doc.markup(), "hello <span id=\"haze-caret\"></span>world");

		discard(&mut doc, marker);
		assert_eq!(doc.markup(), "hello world");
		assert_eq!(doc.caret_text_offset(), Some(6));
	}

	#[test]
	fn save_without_selection_is_noop() {
		let mut doc = Document::from_markup("hello");
		assert!(save(&mut doc).is_none());
		assert_eq!(doc.markup(), "hello");
	}

	#[test]
	fn restore_places_caret_after_marker() {
		let mut doc = Document::from_markup("ab<span id=\"haze-caret\"></span>cd");
		doc.set_caret_at_end();
		assert!(restore(&mut doc));
		assert_eq!(doc.markup(), "abcd");
		assert_eq!(doc.caret_text_offset(), Some(2));
	}

	#[test]
	fn restore_without_marker_leaves_caret() {
		let mut doc = Document::from_markup("abcd");
		doc.set_caret_at_end();
		assert!(!restore(&mut doc));
		assert_eq!(doc.caret_text_offset(), Some(4));
	}

	#[test]
	fn line_break_moves_caret_past_break() {
		let mut doc = doc_with_caret("onetwo", 3);
		assert!(insert_line_break(&mut doc));
		assert_eq!(doc.markup(), "one<br>two");
		assert!(doc.insert_text("!"));
		assert_eq!(doc.markup(), "one<br>!two");
	}
}
