//! Stdin line loop driving a [`BlurEditor`] over an in-memory document.

use anyhow::Context;
use haze_editor::{BlurEditor, Document, RenderOutcome};
use haze_primitives::Key;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::cli::InputLine;

/// Feeds every input line to `editor` and writes the markup after each.
///
/// Typed lines go in at the caret followed by one input event; `:enter`
/// presses Enter. Returns at end of input.
pub async fn run<R, W>(editor: &BlurEditor<Document>, input: R, mut output: W) -> anyhow::Result<()>
where
	R: AsyncBufRead + Unpin,
	W: AsyncWrite + Unpin,
{
	let mut lines = input.lines();
	while let Some(line) = lines.next_line().await.context("failed to read input")? {
		match InputLine::parse(&line) {
			InputLine::Enter => {
				editor.handle_key(Key::Enter);
			}
			InputLine::Type(text) => {
				let typed = editor.surface().lock().insert_text(&text);
				if !typed {
					tracing::warn!("term.no_selection");
				}
				match editor.handle_input().await {
					RenderOutcome::Rendered { generation, words, .. } => {
						tracing::debug!(generation, words, "term.rendered");
					}
					RenderOutcome::Superseded { generation, latest } => {
						tracing::debug!(generation, latest, "term.superseded");
					}
					RenderOutcome::NoSelection => {}
				}
			}
		}

		let markup = editor.surface().lock().markup();
		output.write_all(markup.as_bytes()).await?;
		output.write_all(b"\n").await?;
		output.flush().await?;
	}
	Ok(())
}
