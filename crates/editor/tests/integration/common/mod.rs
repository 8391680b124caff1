//! Common utilities for editor integration tests.

use std::sync::Arc;

use haze_editor::{BlurEditor, Document, HazeConfig};
use haze_synonyms::testing::ScriptedLookup;
use haze_synonyms::{SynonymResolver, SynonymStore, store_for_capacity};

/// An editor over an in-memory document plus handles to its collaborators.
pub struct Harness {
	pub editor: Arc<BlurEditor<Document>>,
	pub lookup: Arc<ScriptedLookup>,
	pub store: Arc<dyn SynonymStore>,
}

/// Builds an editor over `doc`, answering lookups from `lookup`.
pub fn harness_with(doc: Document, lookup: ScriptedLookup, config: &HazeConfig) -> Harness {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
	let lookup = Arc::new(lookup);
	let store = store_for_capacity(config.synonyms.cache_capacity);
	let resolver = SynonymResolver::new(store.clone(), lookup.clone());
	Harness {
		editor: Arc::new(BlurEditor::new(doc, resolver, config)),
		lookup,
		store,
	}
}

/// Document with `markup` and the caret at its end, default config.
pub fn harness(markup: &str, lookup: ScriptedLookup) -> Harness {
	let mut doc = Document::from_markup(markup);
	doc.set_caret_at_end();
	harness_with(doc, lookup, &HazeConfig::default())
}

impl Harness {
	pub fn markup(&self) -> String {
		self.editor.surface().lock().markup()
	}

	pub fn text(&self) -> String {
		self.editor.surface().lock().text_content()
	}

	/// Types at the caret; panics if the document has no selection.
	pub fn type_text(&self, text: &str) {
		assert!(self.editor.surface().lock().insert_text(text), "no selection to type into");
	}

	pub fn caret_offset(&self) -> Option<usize> {
		self.editor.surface().lock().caret_text_offset()
	}
}

/// A rendered word wrapper with `px` blur.
pub fn wrap(text: &str, px: &str) -> String {
	format!("<span class=\"haze-word\" style=\"filter: blur({px}px);\">{text}</span>")
}
