//! Core value types shared across haze crates.

/// Boxed future alias.
pub mod future;
/// Blur scale and per-word intensity.
pub mod intensity;
/// Key events.
pub mod key;
/// Token stream types.
pub mod token;
/// Word normalization.
pub mod word;

pub use future::BoxFutureStatic;
pub use intensity::{BlurScale, Intensity};
pub use key::{Key, KeyOutcome};
pub use token::{CARET_MARKER_ID, Token, WORD_CLASS, Word};
pub use word::normalize_word;
