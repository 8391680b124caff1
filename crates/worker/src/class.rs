/// Execution classes used to tag spawned work in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskClass {
	/// Work on the input path: snapshotting, rendering, caret restore.
	Interactive,
	/// Remote word-relation lookups. May stay pending indefinitely.
	Lookup,
}

impl TaskClass {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Interactive => "interactive",
			Self::Lookup => "lookup",
		}
	}
}
