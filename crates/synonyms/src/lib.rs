//! Synonym lookup, caching, and batch resolution.
//!
//! # Main Types
//!
//! - [`SynonymStore`] - injectable normalized-word -> synonyms map
//! - [`SynonymLookup`] - async seam to the word-relations service
//! - [`DatamuseClient`] - HTTP implementation of the lookup seam
//! - [`SynonymResolver`] - concurrent, deduplicating cache filler

pub mod datamuse;
pub mod error;
pub mod lookup;
pub mod resolver;
pub mod store;

pub use datamuse::{DatamuseClient, SynonymsConfig};
pub use error::{LookupError, LookupResult};
pub use lookup::{OfflineLookup, SynonymLookup};
pub use resolver::{ResolveReport, SynonymResolver};
pub use store::{BoundedSynonymCache, SynonymCache, SynonymStore, Synonyms, store_for_capacity};
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
