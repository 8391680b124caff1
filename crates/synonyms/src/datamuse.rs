//! HTTP client for the Datamuse "means like" endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{LookupError, LookupResult};
use crate::lookup::SynonymLookup;

/// Public Datamuse words endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.datamuse.com/words";

/// Settings for the lookup service and the cache in front of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SynonymsConfig {
	/// Base URL queried as `{endpoint}?ml={word}`.
	pub endpoint: String,
	/// Upper bound on related words per lookup (`max` query parameter).
	pub max_results: Option<u32>,
	/// Per-request timeout. Unset means lookups may hang indefinitely.
	pub timeout_ms: Option<u64>,
	/// Maximum cached words. Unset or zero keeps every word for the session.
	pub cache_capacity: Option<usize>,
}

impl Default for SynonymsConfig {
	fn default() -> Self {
		Self {
			endpoint: DEFAULT_ENDPOINT.to_string(),
			max_results: None,
			timeout_ms: None,
			cache_capacity: None,
		}
	}
}

#[derive(Deserialize)]
struct RelatedWord {
	word: String,
}

/// [`SynonymLookup`] backed by the Datamuse API.
#[derive(Debug, Clone)]
pub struct DatamuseClient {
	client: Client,
	endpoint: String,
	max_results: Option<u32>,
}

impl DatamuseClient {
	pub fn new(config: &SynonymsConfig) -> LookupResult<Self> {
		let mut builder = Client::builder();
		if let Some(ms) = config.timeout_ms {
			builder = builder.timeout(Duration::from_millis(ms));
		}
		let client = builder.build().map_err(LookupError::Client)?;
		Ok(Self {
			client,
			endpoint: config.endpoint.trim_end_matches('?').to_string(),
			max_results: config.max_results,
		})
	}

	/// Full request URL for `word`.
	pub fn request_url(&self, word: &str) -> String {
		let mut url = format!("{}?ml={}", self.endpoint, urlencoding::encode(word));
		if let Some(max) = self.max_results {
			url.push_str(&format!("&max={max}"));
		}
		url
	}
}

/// Decodes a Datamuse response body into its word list.
pub fn parse_related(body: &str) -> LookupResult<Vec<String>> {
	let items: Vec<RelatedWord> = serde_json::from_str(body)?;
	Ok(items.into_iter().map(|item| item.word).collect())
}

#[async_trait]
impl SynonymLookup for DatamuseClient {
	async fn lookup(&self, word: &str) -> LookupResult<Vec<String>> {
		let url = self.request_url(word);
		tracing::debug!(%word, %url, "synonyms.datamuse.request");

		let response = self.client.get(&url).send().await.map_err(LookupError::Transport)?;
		let status = response.status();
		if !status.is_success() {
			return Err(LookupError::Status { status: status.as_u16() });
		}

		let body = response.text().await.map_err(LookupError::Transport)?;
		parse_related(&body)
	}
}
