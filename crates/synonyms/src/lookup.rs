//! Word-relations lookup seam.

use async_trait::async_trait;

use crate::error::LookupResult;

/// Remote service returning words related to a normalized word.
#[async_trait]
pub trait SynonymLookup: Send + Sync {
	/// Returns related words in service order. Casing is not guaranteed.
	async fn lookup(&self, word: &str) -> LookupResult<Vec<String>>;
}

/// Lookup that never reaches a service: every word has no synonyms.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineLookup;

#[async_trait]
impl SynonymLookup for OfflineLookup {
	async fn lookup(&self, _word: &str) -> LookupResult<Vec<String>> {
		Ok(Vec::new())
	}
}
