use std::sync::Arc;

use haze_editor::{Document, HazeConfig, RenderOutcome};
use haze_synonyms::testing::ScriptedLookup;
use pretty_assertions::assert_eq;
use tokio::sync::Semaphore;

use crate::common::{Harness, harness_with, wrap};

/// Starts a cycle over "slow" that blocks on its lookup, swaps the content
/// to "quick" (already cached), and renders that while the first waits.
async fn overlapping_cycles(config: &HazeConfig) -> (Harness, Arc<Semaphore>, RenderOutcome, RenderOutcome) {
	let gate = Arc::new(Semaphore::new(0));
	let mut doc = Document::from_markup("slow");
	doc.set_caret_at_end();
	let h = harness_with(doc, ScriptedLookup::new().gated(gate.clone()), config);
	h.store.set("quick".into(), Vec::new());

	let first = h.editor.spawn_input();
	while h.editor.resolver().inflight() == 0 {
		tokio::task::yield_now().await;
	}

	{
		let mut doc = h.editor.surface().lock();
		doc.set_markup("quick");
		doc.set_caret_at_end();
	}
	let second = h.editor.handle_input().await;

	gate.add_permits(1);
	let first = first.await.unwrap();
	(h, gate, first, second)
}

#[tokio::test]
async fn stale_cycle_does_not_overwrite_newer_render() {
	let (h, _gate, first, second) = overlapping_cycles(&HazeConfig::default()).await;

	assert!(matches!(second, RenderOutcome::Rendered { generation: 2, .. }), "{second:?}");
	assert_eq!(first, RenderOutcome::Superseded { generation: 1, latest: 2 });
	assert_eq!(h.markup(), wrap("quick", "0"));
	assert_eq!(h.lookup.calls(), vec!["slow".to_string()]);
	assert!(h.store.has("slow"));
}

#[tokio::test]
async fn last_writer_wins_when_supersession_is_off() {
	let config = HazeConfig::from_toml_str("[render]\nsupersede_stale = false\n").unwrap();
	let (h, _gate, first, second) = overlapping_cycles(&config).await;

	assert!(matches!(second, RenderOutcome::Rendered { generation: 2, .. }), "{second:?}");
	assert!(matches!(first, RenderOutcome::Rendered { generation: 1, .. }), "{first:?}");
	assert_eq!(h.markup(), wrap("slow", "0"));
}

#[tokio::test]
async fn overlapping_cycles_share_one_lookup() {
	let gate = Arc::new(Semaphore::new(0));
	let mut doc = Document::from_markup("word");
	doc.set_caret_at_end();
	let h = harness_with(doc, ScriptedLookup::new().gated(gate.clone()), &HazeConfig::default());

	let first = h.editor.spawn_input();
	while h.editor.resolver().inflight() == 0 {
		tokio::task::yield_now().await;
	}
	let second = h.editor.spawn_input();
	while h.editor.latest_generation() < 2 {
		tokio::task::yield_now().await;
	}

	gate.add_permits(1);
	let first = first.await.unwrap();
	let second = second.await.unwrap();

	assert_eq!(first, RenderOutcome::Superseded { generation: 1, latest: 2 });
	match second {
		RenderOutcome::Rendered { lookups, .. } => {
			assert_eq!(lookups.joined, 1);
			assert_eq!(lookups.fetched, 0);
		}
		other => panic!("expected a render, got {other:?}"),
	}
	assert_eq!(h.lookup.calls_for("word"), 1);
	assert_eq!(h.markup(), wrap("word", "0"));
}
