use haze_editor::{Document, HazeConfig, RenderOutcome};
use haze_primitives::{Key, KeyOutcome};
use haze_synonyms::testing::ScriptedLookup;
use pretty_assertions::assert_eq;

use crate::common::{harness, harness_with, wrap};

#[tokio::test]
async fn repeated_words_blur_and_single_words_stay_sharp() {
	let h = harness("cat dog cat", ScriptedLookup::new());
	let outcome = h.editor.handle_input().await;
	match outcome {
		RenderOutcome::Rendered {
			generation,
			words,
			lookups,
			caret_restored,
		} => {
			assert_eq!(generation, 1);
			assert_eq!(words, 2);
			assert_eq!(lookups.fetched, 2);
			assert!(caret_restored);
		}
		other => panic!("expected a render, got {other:?}"),
	}
	assert_eq!(h.markup(), format!("{} {} {}", wrap("cat", "1.5"), wrap("dog", "0"), wrap("cat", "1.5")));
}

#[tokio::test]
async fn synonyms_share_their_counts() {
	let lookup = ScriptedLookup::new()
		.related("big", &["Large", "huge"])
		.related("large", &["big"]);
	let h = harness("big large cat", lookup);
	assert!(h.editor.handle_input().await.is_rendered());
	assert_eq!(
		h.markup(),
		format!("{} {} {}", wrap("big", "1.5"), wrap("large", "1.5"), wrap("cat", "0"))
	);
	assert_eq!(h.store.get("big").as_deref(), Some(&["large".to_string(), "huge".to_string()][..]));
}

#[tokio::test]
async fn cached_words_are_never_looked_up_again() {
	let h = harness("cat", ScriptedLookup::new());
	assert!(h.editor.handle_input().await.is_rendered());
	h.type_text(" dog cat");
	match h.editor.handle_input().await {
		RenderOutcome::Rendered { lookups, .. } => {
			assert_eq!(lookups.cached, 1);
			assert_eq!(lookups.fetched, 1);
		}
		other => panic!("expected a render, got {other:?}"),
	}
	assert_eq!(h.lookup.calls_for("cat"), 1);
	assert_eq!(h.lookup.calls_for("dog"), 1);
	assert_eq!(h.text(), "cat dog cat");
}

#[tokio::test]
async fn keystrokes_extend_the_word_before_the_caret() {
	let h = harness("", ScriptedLookup::new());
	for key in ["c", "a", "t", " ", "c", "a", "t"] {
		h.type_text(key);
		assert!(h.editor.handle_input().await.is_rendered());
	}
	assert_eq!(h.text(), "cat cat");
	assert_eq!(h.markup(), format!("{} {}", wrap("cat", "1.5"), wrap("cat", "1.5")));
	assert_eq!(h.lookup.calls(), vec!["c".to_string(), "ca".to_string(), "cat".to_string()]);
	assert_eq!(h.caret_offset(), Some(7));
}

#[tokio::test]
async fn failed_lookup_renders_and_is_not_retried() {
	let h = harness("cat cat", ScriptedLookup::new().failing("cat", 503));
	match h.editor.handle_input().await {
		RenderOutcome::Rendered { lookups, .. } => assert_eq!(lookups.failed, 1),
		other => panic!("expected a render, got {other:?}"),
	}
	assert_eq!(h.store.get("cat").map(|s| s.len()), Some(0));
	assert_eq!(h.markup(), format!("{} {}", wrap("cat", "1.5"), wrap("cat", "1.5")));

	assert!(h.editor.handle_input().await.is_rendered());
	assert_eq!(h.lookup.calls_for("cat"), 1);
}

#[tokio::test]
async fn panicking_lookup_does_not_break_the_cycle() {
	let h = harness("boom", ScriptedLookup::new().panicking("boom"));
	assert!(h.editor.handle_input().await.is_rendered());
	assert_eq!(h.markup(), wrap("boom", "0"));
}

#[tokio::test]
async fn whitespace_survives_a_render() {
	let h = harness("a  b   c", ScriptedLookup::new());
	assert!(h.editor.handle_input().await.is_rendered());
	assert_eq!(h.text(), "a  b   c");
	assert_eq!(h.markup(), format!("{}  {}   {}", wrap("a", "0"), wrap("b", "0"), wrap("c", "0")));
}

#[tokio::test]
async fn rendering_twice_changes_nothing() {
	let h = harness("<p>one two</p>two <b>one</b><br>three", ScriptedLookup::new());
	assert!(h.editor.handle_input().await.is_rendered());
	let first = h.markup();
	match h.editor.handle_input().await {
		RenderOutcome::Rendered { lookups, .. } => assert_eq!(lookups.fetched, 0),
		other => panic!("expected a render, got {other:?}"),
	}
	assert_eq!(h.markup(), first);
	assert_eq!(h.text(), "one twotwo onethree");
}

#[tokio::test]
async fn no_selection_leaves_the_document_alone() {
	let h = harness_with(Document::from_markup("cat cat"), ScriptedLookup::new(), &HazeConfig::default());
	assert_eq!(h.editor.handle_input().await, RenderOutcome::NoSelection);
	assert_eq!(h.markup(), "cat cat");
	assert_eq!(h.editor.latest_generation(), 0);
	assert!(h.lookup.calls().is_empty());
}

#[tokio::test]
async fn configured_scale_drives_intensity() {
	let config = HazeConfig::from_toml_str("[blur]\nscale = 2.0\n").unwrap();
	let mut doc = Document::from_markup("cat cat cat");
	doc.set_caret_at_end();
	let h = harness_with(doc, ScriptedLookup::new(), &config);
	assert!(h.editor.handle_input().await.is_rendered());
	let blurred = wrap("cat", "4");
	assert_eq!(h.markup(), format!("{blurred} {blurred} {blurred}"));
}

#[tokio::test]
async fn bounded_cache_still_renders() {
	let config = HazeConfig::from_toml_str("[synonyms]\ncache_capacity = 1\n").unwrap();
	let mut doc = Document::from_markup("red blue red");
	doc.set_caret_at_end();
	let h = harness_with(doc, ScriptedLookup::new(), &config);
	assert!(h.editor.handle_input().await.is_rendered());
	assert_eq!(h.store.len(), 1);
	assert_eq!(h.markup(), format!("{} {} {}", wrap("red", "1.5"), wrap("blue", "0"), wrap("red", "1.5")));
}

#[tokio::test]
async fn enter_inserts_a_line_break_without_rendering() {
	let h = harness("ab", ScriptedLookup::new());
	assert_eq!(h.editor.handle_key(Key::Enter), KeyOutcome::Handled);
	assert_eq!(h.editor.handle_key(Key::Char('x')), KeyOutcome::Ignored);
	assert_eq!(h.markup(), "ab<br>");
	assert_eq!(h.editor.latest_generation(), 0);

	h.type_text("cd");
	assert_eq!(h.markup(), "ab<br>cd");
	assert!(h.editor.handle_input().await.is_rendered());
	assert_eq!(h.markup(), format!("{}<br>{}", wrap("ab", "0"), wrap("cd", "0")));
}
