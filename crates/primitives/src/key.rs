//! Key events delivered by the host surface.

/// A key press as seen by the editor. Only Enter has behavior attached;
/// every other key falls through to the host default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
	Enter,
	Char(char),
	Other,
}

/// What the host should do with a key after the editor saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
	/// The editor handled the key; the host must suppress its default.
	Handled,
	/// Let the host apply its default behavior.
	Ignored,
}
