//! Synonym storage keyed by normalized word.
//!
//! The default [`SynonymCache`] grows for the lifetime of the process and is
//! never invalidated. [`BoundedSynonymCache`] trades that for an LRU bound;
//! evicted words are simply looked up again when they reappear.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;

/// Shared synonym list. Cheap to clone out of a store.
pub type Synonyms = Arc<[String]>;

/// Injectable synonym store.
///
/// Reads never wait on I/O. Writes for the same key are idempotent: the
/// last write wins.
pub trait SynonymStore: Send + Sync {
	fn get(&self, word: &str) -> Option<Synonyms>;

	fn set(&self, word: String, synonyms: Vec<String>);

	/// Returns true if `word` has been resolved, even to an empty list.
	fn has(&self, word: &str) -> bool;

	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Unbounded, append-only synonym cache.
#[derive(Debug, Default)]
pub struct SynonymCache {
	entries: RwLock<FxHashMap<String, Synonyms>>,
}

impl SynonymCache {
	pub fn new() -> Self {
		Self::default()
	}
}

impl SynonymStore for SynonymCache {
	fn get(&self, word: &str) -> Option<Synonyms> {
		self.entries.read().get(word).cloned()
	}

	fn set(&self, word: String, synonyms: Vec<String>) {
		self.entries.write().insert(word, synonyms.into());
	}

	fn has(&self, word: &str) -> bool {
		self.entries.read().contains_key(word)
	}

	fn len(&self) -> usize {
		self.entries.read().len()
	}
}

/// Synonym cache holding at most `capacity` words, least recently read first out.
#[derive(Debug)]
pub struct BoundedSynonymCache {
	entries: Mutex<LruCache<String, Synonyms>>,
}

impl BoundedSynonymCache {
	pub fn new(capacity: NonZeroUsize) -> Self {
		Self {
			entries: Mutex::new(LruCache::new(capacity)),
		}
	}
}

impl SynonymStore for BoundedSynonymCache {
	fn get(&self, word: &str) -> Option<Synonyms> {
		self.entries.lock().get(word).cloned()
	}

	fn set(&self, word: String, synonyms: Vec<String>) {
		self.entries.lock().put(word, synonyms.into());
	}

	fn has(&self, word: &str) -> bool {
		self.entries.lock().contains(word)
	}

	fn len(&self) -> usize {
		self.entries.lock().len()
	}
}

/// Builds the store selected by `capacity`: `None` or zero means unbounded.
pub fn store_for_capacity(capacity: Option<usize>) -> Arc<dyn SynonymStore> {
	match capacity.and_then(NonZeroUsize::new) {
		Some(capacity) => Arc::new(BoundedSynonymCache::new(capacity)),
		None => Arc::new(SynonymCache::new()),
	}
}
