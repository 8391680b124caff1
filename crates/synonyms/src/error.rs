//! Lookup error types.

use thiserror::Error;

/// Failure of a single word-relations lookup.
///
/// These never reach the render path: the resolver absorbs them into an
/// empty synonym list and logs them.
#[derive(Debug, Error)]
pub enum LookupError {
	/// The HTTP client could not be built.
	#[error("failed to build lookup client: {0}")]
	Client(#[source] reqwest::Error),

	/// The request never produced a response (DNS, TLS, connection reset, ...).
	#[error("lookup transport error: {0}")]
	Transport(#[source] reqwest::Error),

	/// The service answered with a non-success status.
	#[error("lookup service returned status {status}")]
	Status {
		/// HTTP status code.
		status: u16,
	},

	/// The response body was not the expected JSON shape.
	#[error("invalid lookup response: {0}")]
	Decode(#[from] serde_json::Error),

	/// The lookup service is not reachable in this configuration.
	#[error("lookup unavailable: {0}")]
	Unavailable(String),
}

/// Result type for lookup operations.
pub type LookupResult<T> = std::result::Result<T, LookupError>;
