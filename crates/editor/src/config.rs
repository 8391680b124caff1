//! Runtime configuration loaded from TOML.

use std::path::{Path, PathBuf};

use haze_primitives::BlurScale;
use haze_synonyms::SynonymsConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Malformed TOML, an unknown key, or an out-of-range value.
	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Top-level configuration. Every field has a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HazeConfig {
	pub blur: BlurConfig,
	pub synonyms: SynonymsConfig,
	pub render: RenderConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlurConfig {
	/// Blur px per extra occurrence.
	pub scale: BlurScale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
	/// Drop a cycle's render when a newer cycle has started.
	///
	/// When false, overlapping cycles all render and the last one to finish
	/// wins, even if it worked from an older snapshot.
	pub supersede_stale: bool,
}

impl Default for RenderConfig {
	fn default() -> Self {
		Self { supersede_stale: true }
	}
}

impl HazeConfig {
	pub fn from_toml_str(content: &str) -> Result<Self> {
		Ok(toml::from_str(content)?)
	}

	/// Reads and parses the file at `path`.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		Self::from_toml_str(&content)
	}
}
