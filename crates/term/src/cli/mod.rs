//! CLI schema and input-line parsing for the haze binary.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "haze")]
#[command(about = "Blurs words as they repeat while you type")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// TOML configuration file
	#[arg(long, short = 'c', value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Verbose logging
	#[arg(long, short = 'v')]
	pub verbose: bool,

	/// Never query the synonym service; every word has no synonyms
	#[arg(long)]
	pub offline: bool,

	/// Initial document markup (caret placed at its end)
	#[arg(long, value_name = "MARKUP", default_value = "")]
	pub initial: String,
}

/// One line read from stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLine {
	/// `:enter` presses Enter.
	Enter,
	/// Anything else is typed at the caret. A leading `\:` escapes a colon.
	Type(String),
}

impl InputLine {
	pub fn parse(line: &str) -> Self {
		let line = line.trim_end_matches(['\r', '\n']);
		if line == ":enter" {
			return Self::Enter;
		}
		match line.strip_prefix('\\') {
			Some(rest) if rest.starts_with(':') => Self::Type(rest.to_string()),
			_ => Self::Type(line.to_string()),
		}
	}
}
