//! Per-snapshot word counts.

use haze_primitives::Token;
use haze_synonyms::SynonymStore;
use rustc_hash::FxHashMap;

/// Normalized word -> occurrences in one content snapshot.
///
/// Rebuilt from scratch every render cycle; never carried over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyMap {
	counts: FxHashMap<String, u32>,
}

impl FrequencyMap {
	/// Counts every countable word token in one forward pass.
	pub fn count<'a>(tokens: impl IntoIterator<Item = &'a Token>) -> Self {
		let mut counts = FxHashMap::default();
		for word in tokens.into_iter().filter_map(Token::as_word) {
			if word.is_countable() {
				*counts.entry(word.key.clone()).or_insert(0) += 1;
			}
		}
		Self { counts }
	}

	/// Occurrences of `key`, 0 if absent.
	pub fn get(&self, key: &str) -> u32 {
		self.counts.get(key).copied().unwrap_or(0)
	}

	/// Distinct words.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
		self.counts.iter().map(|(k, &v)| (k.as_str(), v))
	}

	/// Words in this snapshot the store has not resolved yet, sorted.
	pub fn pending(&self, store: &dyn SynonymStore) -> Vec<String> {
		let mut pending: Vec<String> = self.counts.keys().filter(|key| !store.has(key)).cloned().collect();
		pending.sort_unstable();
		pending
	}
}
