//! Haze terminal host.
//!
//! Reads lines from stdin, types each one into an in-memory document, runs
//! a render cycle, and prints the resulting markup.

mod cli;
mod session;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use haze_editor::{BlurEditor, Document, HazeConfig};
use haze_synonyms::{DatamuseClient, OfflineLookup, SynonymLookup, SynonymResolver, store_for_capacity};
use tokio::io::BufReader;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	setup_tracing(cli.verbose);

	let config = match &cli.config {
		Some(path) => HazeConfig::load(path).with_context(|| format!("failed to load config {}", path.display()))?,
		None => HazeConfig::default(),
	};

	let lookup: Arc<dyn SynonymLookup> = if cli.offline {
		Arc::new(OfflineLookup)
	} else {
		Arc::new(DatamuseClient::new(&config.synonyms).context("failed to build synonym client")?)
	};
	let store = store_for_capacity(config.synonyms.cache_capacity);

	let mut doc = Document::from_markup(&cli.initial);
	doc.set_caret_at_end();
	let editor = BlurEditor::new(doc, SynonymResolver::new(store, lookup), &config);

	info!(
		offline = cli.offline,
		scale = config.blur.scale.get(),
		supersede_stale = config.render.supersede_stale,
		"haze.start"
	);
	session::run(&editor, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}

/// Logs go to stderr; stdout carries the rendered markup.
fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("HAZE_LOG").unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("haze=trace,debug")
		} else {
			EnvFilter::new("info")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}
