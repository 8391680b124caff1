use std::fmt;

use serde::{Deserialize, Serialize};

/// Multiplier turning an aggregate count into a blur radius.
///
/// Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct BlurScale(f32);

impl BlurScale {
	pub const DEFAULT: Self = Self(1.5);

	/// Returns `None` unless `value` is finite and greater than zero.
	pub fn new(value: f32) -> Option<Self> {
		(value.is_finite() && value > 0.0).then_some(Self(value))
	}

	pub const fn get(self) -> f32 {
		self.0
	}
}

impl Default for BlurScale {
	fn default() -> Self {
		Self::DEFAULT
	}
}

impl TryFrom<f32> for BlurScale {
	type Error = String;

	fn try_from(value: f32) -> Result<Self, Self::Error> {
		Self::new(value).ok_or_else(|| format!("blur scale must be finite and positive, got {value}"))
	}
}

impl From<BlurScale> for f32 {
	fn from(scale: BlurScale) -> Self {
		scale.0
	}
}

/// Blur radius of a rendered word, in px. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Intensity(f32);

impl Intensity {
	pub const ZERO: Self = Self(0.0);

	/// `(total - 1) * scale`, clamped at zero.
	pub fn from_total(total: u32, scale: BlurScale) -> Self {
		let raw = (total as f32 - 1.0) * scale.get();
		Self(raw.max(0.0))
	}

	pub const fn px(self) -> f32 {
		self.0
	}
}

impl fmt::Display for Intensity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}px", self.0)
	}
}
