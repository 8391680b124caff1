//! Scripted lookup service for tests.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tokio::sync::Semaphore;

use crate::error::{LookupError, LookupResult};
use crate::lookup::SynonymLookup;

#[derive(Debug, Clone)]
enum Scripted {
	Related(Vec<String>),
	Status(u16),
	Panic,
}

/// [`SynonymLookup`] answering from a fixed script and recording every call.
///
/// Unscripted words resolve to an empty list. With [`Self::gated`], each
/// lookup waits for a permit before answering.
#[derive(Debug, Default)]
pub struct ScriptedLookup {
	script: FxHashMap<String, Scripted>,
	calls: Mutex<Vec<String>>,
	gate: Option<Arc<Semaphore>>,
}

impl ScriptedLookup {
	pub fn new() -> Self {
		Self::default()
	}

	/// Answers `word` with `related`.
	pub fn related(mut self, word: &str, related: &[&str]) -> Self {
		let related = related.iter().map(|w| (*w).to_string()).collect();
		self.script.insert(word.to_string(), Scripted::Related(related));
		self
	}

	/// Fails `word` with an HTTP status error.
	pub fn failing(mut self, word: &str, status: u16) -> Self {
		self.script.insert(word.to_string(), Scripted::Status(status));
		self
	}

	/// Panics while looking up `word`.
	pub fn panicking(mut self, word: &str) -> Self {
		self.script.insert(word.to_string(), Scripted::Panic);
		self
	}

	/// Holds every lookup until `gate` hands out a permit.
	pub fn gated(mut self, gate: Arc<Semaphore>) -> Self {
		self.gate = Some(gate);
		self
	}

	/// Every word looked up so far, in call order.
	pub fn calls(&self) -> Vec<String> {
		self.calls.lock().clone()
	}

	/// Number of lookups issued for `word`.
	pub fn calls_for(&self, word: &str) -> usize {
		self.calls.lock().iter().filter(|w| *w == word).count()
	}
}

#[async_trait]
impl SynonymLookup for ScriptedLookup {
	async fn lookup(&self, word: &str) -> LookupResult<Vec<String>> {
		self.calls.lock().push(word.to_string());
		if let Some(gate) = &self.gate {
			let _permit = gate
				.acquire()
				.await
				.map_err(|_| LookupError::Unavailable("gate closed".into()))?;
		}
		match self.script.get(word).cloned() {
			Some(Scripted::Related(related)) => Ok(related),
			Some(Scripted::Status(status)) => Err(LookupError::Status { status }),
			Some(Scripted::Panic) => panic!("scripted lookup panic for {word}"),
			None => Ok(Vec::new()),
		}
	}
}
