//! The render cycle: snapshot, resolve, render, restore.
//!
//! One cycle runs per input event:
//!
//! 1. drop a caret marker, read the markup, lift the marker back out
//! 2. tokenize and count words
//! 3. resolve synonyms for words the cache has not seen (the only await)
//! 4. compute intensities and render a fresh tree
//! 5. replace the surface content and restore the caret from the marker
//!
//! Cycles may overlap. Each takes a generation from a monotonic clock and
//! cancels the previous cycle's token; a cancelled cycle drops its render
//! unless [`RenderConfig::supersede_stale`] is off.
//!
//! [`RenderConfig::supersede_stale`]: crate::config::RenderConfig::supersede_stale

use std::sync::Arc;

use haze_primitives::{BlurScale, Key, KeyOutcome, Token};
use haze_synonyms::{ResolveReport, SynonymResolver};
use haze_worker::{GenerationClock, GenerationToken, JoinHandle, TaskClass};
use parking_lot::Mutex;

use crate::caret;
use crate::config::HazeConfig;
use crate::frequency::FrequencyMap;
use crate::intensity::IntensityTable;
use crate::render::render;
use crate::surface::EditableSurface;
use crate::tokenize::tokenize;

/// Result of one [`BlurEditor::handle_input`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
	/// The surface was rebuilt from this cycle's snapshot.
	Rendered {
		generation: u64,
		/// Distinct words in the snapshot.
		words: usize,
		lookups: ResolveReport,
		/// False when the marker did not survive the rebuild.
		caret_restored: bool,
	},
	/// A newer cycle started while this one waited on lookups.
	Superseded { generation: u64, latest: u64 },
	/// The surface had no selection; nothing was touched.
	NoSelection,
}

impl RenderOutcome {
	pub fn is_rendered(&self) -> bool {
		matches!(self, Self::Rendered { .. })
	}
}

struct Cycle {
	token: GenerationToken,
	tokens: Vec<Token>,
	freq: FrequencyMap,
}

/// Blurs repeated words in an editable surface as the user types.
pub struct BlurEditor<S: EditableSurface> {
	surface: Arc<Mutex<S>>,
	resolver: SynonymResolver,
	scale: BlurScale,
	supersede_stale: bool,
	clock: GenerationClock,
	current: Mutex<Option<GenerationToken>>,
}

impl<S: EditableSurface> BlurEditor<S> {
	pub fn new(surface: S, resolver: SynonymResolver, config: &HazeConfig) -> Self {
		Self::with_shared(Arc::new(Mutex::new(surface)), resolver, config)
	}

	/// Wraps a surface the host keeps its own handle to.
	pub fn with_shared(surface: Arc<Mutex<S>>, resolver: SynonymResolver, config: &HazeConfig) -> Self {
		Self {
			surface,
			resolver,
			scale: config.blur.scale,
			supersede_stale: config.render.supersede_stale,
			clock: GenerationClock::new(),
			current: Mutex::new(None),
		}
	}

	pub fn surface(&self) -> &Arc<Mutex<S>> {
		&self.surface
	}

	pub fn resolver(&self) -> &SynonymResolver {
		&self.resolver
	}

	/// Most recently started generation, 0 before the first cycle.
	pub fn latest_generation(&self) -> u64 {
		self.clock.latest()
	}

	/// Key-down hook. Enter inserts a line break itself and suppresses the
	/// host default; it does not start a render cycle.
	pub fn handle_key(&self, key: Key) -> KeyOutcome {
		match key {
			Key::Enter => {
				let inserted = caret::insert_line_break(&mut *self.surface.lock());
				tracing::trace!(inserted, "pipeline.enter");
				KeyOutcome::Handled
			}
			_ => KeyOutcome::Ignored,
		}
	}

	/// Input hook: runs one full render cycle.
	pub async fn handle_input(&self) -> RenderOutcome {
		let Some(cycle) = self.begin_cycle() else {
			return RenderOutcome::NoSelection;
		};
		let generation = cycle.token.generation();

		let pending = cycle.freq.pending(self.resolver.store().as_ref());
		let lookups = self.resolver.resolve(pending).await;

		let intensities = IntensityTable::compute(&cycle.freq, self.resolver.store().as_ref(), self.scale);
		let content = render(&cycle.tokens, &intensities);

		let caret_restored = {
			let mut surface = self.surface.lock();
			if self.supersede_stale && cycle.token.is_cancelled() {
				let latest = self.clock.latest();
				tracing::debug!(generation, latest, "pipeline.superseded");
				return RenderOutcome::Superseded { generation, latest };
			}
			surface.replace_content(content);
			caret::restore(&mut *surface)
		};

		let mut current = self.current.lock();
		if current.as_ref().is_some_and(|t| t.generation() == generation) {
			*current = None;
		}
		drop(current);

		tracing::debug!(
			generation,
			words = cycle.freq.len(),
			fetched = lookups.fetched,
			caret_restored,
			"pipeline.render"
		);
		RenderOutcome::Rendered {
			generation,
			words: cycle.freq.len(),
			lookups,
			caret_restored,
		}
	}

	/// Takes the snapshot and claims a generation, all under the surface lock.
	fn begin_cycle(&self) -> Option<Cycle> {
		let mut surface = self.surface.lock();
		let marker = caret::save(&mut *surface)?;
		let markup = surface.markup();
		caret::discard(&mut *surface, marker);

		let token = GenerationToken::new(self.clock.next());
		if let Some(previous) = self.current.lock().replace(token.clone()) {
			previous.cancel();
		}
		drop(surface);

		let tokens = tokenize(&markup);
		let freq = FrequencyMap::count(&tokens);
		tracing::trace!(generation = token.generation(), tokens = tokens.len(), "pipeline.snapshot");
		Some(Cycle { token, tokens, freq })
	}
}

impl<S: EditableSurface + 'static> BlurEditor<S> {
	/// Fire-and-forget input hook for hosts whose event callbacks cannot
	/// await. Cycles started this way overlap freely.
	pub fn spawn_input(self: &Arc<Self>) -> JoinHandle<RenderOutcome> {
		let editor = Arc::clone(self);
		haze_worker::spawn(TaskClass::Interactive, async move { editor.handle_input().await })
	}
}
