//! Concurrent synonym resolution in front of a [`SynonymStore`].

use std::collections::BTreeSet;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::Shared;
use haze_primitives::BoxFutureStatic;
use haze_worker::{TaskClass, WorkerJoinSet};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::lookup::SynonymLookup;
use crate::store::SynonymStore;

/// Settled result of one lookup, as seen by every batch waiting on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LookupOutcome {
	Found,
	Failed,
}

type InflightLookup = Shared<BoxFutureStatic<LookupOutcome>>;

/// Counters for one [`SynonymResolver::resolve`] batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveReport {
	/// Distinct words in the batch.
	pub requested: usize,
	/// Words already in the store; no lookup issued.
	pub cached: usize,
	/// Lookups started by this batch.
	pub fetched: usize,
	/// Words already in flight from an overlapping batch, awaited instead of re-requested.
	pub joined: usize,
	/// Lookups awaited by this batch that failed and were stored as empty.
	pub failed: usize,
}

struct ResolverInner {
	store: Arc<dyn SynonymStore>,
	lookup: Arc<dyn SynonymLookup>,
	inflight: Mutex<FxHashMap<String, InflightLookup>>,
}

/// Fills a [`SynonymStore`] for words it has not seen yet.
///
/// Each uncached word is looked up exactly once, no matter how many batches
/// ask for it while the request is pending. Failures are stored as empty
/// lists so the word is never retried.
#[derive(Clone)]
pub struct SynonymResolver {
	inner: Arc<ResolverInner>,
}

impl SynonymResolver {
	pub fn new(store: Arc<dyn SynonymStore>, lookup: Arc<dyn SynonymLookup>) -> Self {
		Self {
			inner: Arc::new(ResolverInner {
				store,
				lookup,
				inflight: Mutex::new(FxHashMap::default()),
			}),
		}
	}

	/// The store this resolver writes into.
	pub fn store(&self) -> &Arc<dyn SynonymStore> {
		&self.inner.store
	}

	/// Number of lookups currently pending.
	pub fn inflight(&self) -> usize {
		self.inner.inflight.lock().len()
	}

	/// Resolves every word not yet in the store.
	///
	/// Returns once all lookups this batch depends on have settled. Never
	/// fails: lookup errors are logged and absorbed.
	pub async fn resolve<I>(&self, words: I) -> ResolveReport
	where
		I: IntoIterator<Item = String>,
	{
		let words: BTreeSet<String> = words.into_iter().filter(|w| !w.is_empty()).collect();
		let mut report = ResolveReport {
			requested: words.len(),
			..ResolveReport::default()
		};

		let mut set = WorkerJoinSet::new(TaskClass::Lookup);
		for word in words {
			if self.inner.store.has(&word) {
				report.cached += 1;
				continue;
			}
			let (fut, started) = self.inflight_lookup(word);
			if started {
				report.fetched += 1;
			} else {
				report.joined += 1;
			}
			set.spawn(fut);
		}

		if set.is_empty() {
			return report;
		}

		tracing::debug!(fetched = report.fetched, joined = report.joined, cached = report.cached, "synonyms.resolve.start");
		let settled = set.len();
		let outcomes = set.join_all().await;
		report.failed = outcomes.iter().filter(|o| **o == LookupOutcome::Failed).count() + (settled - outcomes.len());
		tracing::debug!(
			requested = report.requested,
			fetched = report.fetched,
			failed = report.failed,
			stored = self.inner.store.len(),
			"synonyms.resolve.done"
		);
		report
	}

	/// Returns the pending lookup for `word`, starting one if none is in flight.
	fn inflight_lookup(&self, word: String) -> (InflightLookup, bool) {
		let mut inflight = self.inner.inflight.lock();
		if let Some(existing) = inflight.get(&word) {
			return (existing.clone(), false);
		}

		let inner = Arc::clone(&self.inner);
		let key = word.clone();
		let fut: BoxFutureStatic<LookupOutcome> = Box::pin(async move {
			let result = AssertUnwindSafe(inner.lookup.lookup(&key)).catch_unwind().await;
			let outcome = match result {
				Ok(Ok(related)) => {
					let synonyms: Vec<String> = related.into_iter().map(|w| w.to_lowercase()).collect();
					tracing::trace!(word = %key, count = synonyms.len(), "synonyms.lookup.ok");
					inner.store.set(key.clone(), synonyms);
					LookupOutcome::Found
				}
				Ok(Err(error)) => {
					tracing::warn!(word = %key, %error, "synonyms.lookup.failed");
					inner.store.set(key.clone(), Vec::new());
					LookupOutcome::Failed
				}
				Err(_) => {
					tracing::error!(word = %key, "synonyms.lookup.panicked");
					inner.store.set(key.clone(), Vec::new());
					LookupOutcome::Failed
				}
			};
			inner.inflight.lock().remove(&key);
			outcome
		});

		let shared = fut.shared();
		inflight.insert(word, shared.clone());
		(shared, true)
	}
}
