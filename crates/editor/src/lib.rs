#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Live blur-by-repetition editing engine.
//!
//! Every input event re-renders the editable region so each word is
//! blurred in proportion to how often it, or a synonym of it, appears.
//!
//! # Main Types
//!
//! - [`BlurEditor`] - Input/key hooks driving the render cycle
//! - [`EditableSurface`] - The host content region the editor rewrites
//! - [`Document`] - In-memory surface with a DOM-like selection
//! - [`HazeConfig`] - TOML configuration
//!
//! # Architecture
//!
//! ```text
//! BlurEditor
//! ├── surface: Arc<Mutex<S: EditableSurface>>   // content + caret
//! ├── resolver: SynonymResolver                 // shared cache + lookups
//! └── clock: GenerationClock                    // supersedes stale cycles
//! ```
//!
//! A cycle goes caret marker -> markup snapshot -> [`tokenize`] ->
//! [`FrequencyMap`] -> synonym resolve -> [`IntensityTable`] -> [`render`]
//! -> content replacement -> caret restore.

/// Caret marker save/restore and line-break insertion.
pub mod caret;
/// TOML configuration.
pub mod config;
/// In-memory document surface.
pub mod dom;
pub mod frequency;
pub mod intensity;
/// The input -> render cycle.
pub mod pipeline;
pub mod render;
/// Host surface seam.
pub mod surface;
/// Markup tokenizer.
pub mod tokenize;

pub use config::{BlurConfig, ConfigError, HazeConfig, RenderConfig};
pub use dom::{Document, Fragment, NodeId, Position};
pub use frequency::FrequencyMap;
pub use intensity::{IntensityTable, total_count};
pub use pipeline::{BlurEditor, RenderOutcome};
pub use render::render;
pub use surface::EditableSurface;
pub use tokenize::tokenize;
