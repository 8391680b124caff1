//! Frequency-weighted blur intensities.

use haze_primitives::{BlurScale, Intensity};
use haze_synonyms::SynonymStore;
use rustc_hash::FxHashMap;

use crate::frequency::FrequencyMap;

/// Own count plus the counts of every cached synonym present in `freq`.
///
/// Synonyms are summed as stored, so a synonym listed twice counts twice.
pub fn total_count(key: &str, freq: &FrequencyMap, synonyms: &[String]) -> u32 {
	synonyms.iter().fold(freq.get(key), |total, synonym| total + freq.get(synonym))
}

/// Intensity for every word in one snapshot.
#[derive(Debug, Clone, Default)]
pub struct IntensityTable {
	entries: FxHashMap<String, (u32, Intensity)>,
}

impl IntensityTable {
	/// Computes totals and intensities for every word in `freq`.
	///
	/// Words missing from `store` are treated as having no synonyms.
	pub fn compute(freq: &FrequencyMap, store: &dyn SynonymStore, scale: BlurScale) -> Self {
		let entries = freq
			.iter()
			.map(|(key, _)| {
				let total = match store.get(key) {
					Some(synonyms) => total_count(key, freq, &synonyms),
					None => freq.get(key),
				};
				(key.to_string(), (total, Intensity::from_total(total, scale)))
			})
			.collect();
		Self { entries }
	}

	/// Intensity for `key`; zero for unknown or empty keys.
	pub fn intensity(&self, key: &str) -> Intensity {
		self.entries.get(key).map_or(Intensity::ZERO, |&(_, intensity)| intensity)
	}

	/// Aggregate count for `key`; zero if unknown.
	pub fn total(&self, key: &str) -> u32 {
		self.entries.get(key).map_or(0, |&(total, _)| total)
	}
}
