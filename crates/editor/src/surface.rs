//! Host surface seam.
//!
//! The pipeline only ever talks to the editable region through
//! [`EditableSurface`]: read its markup, replace its content once per
//! render, and drive the caret through marker nodes.

use crate::dom::{Document, Fragment, NodeId, Position};

/// An editable content region with a collapsed caret.
pub trait EditableSurface: Send {
	/// Handle to a live node.
	type Node: Copy + std::fmt::Debug;
	/// Collapsed selection boundary point.
	type Position: Copy + std::fmt::Debug;

	/// Current content as markup, including any live marker nodes.
	fn markup(&self) -> String;

	/// Destructively replaces the content.
	fn replace_content(&mut self, content: Vec<Fragment>);

	/// The collapsed caret, if the surface has a selection.
	fn caret(&self) -> Option<Self::Position>;

	/// Inserts `node` at `at`, splitting text if needed.
	fn insert_node(&mut self, at: Self::Position, node: Fragment) -> Self::Node;

	fn find_element_by_id(&self, id: &str) -> Option<Self::Node>;

	/// Collapses the selection immediately after `node`.
	fn set_caret_after(&mut self, node: Self::Node);

	fn remove_node(&mut self, node: Self::Node);
}

impl EditableSurface for Document {
	type Node = NodeId;
	type Position = Position;

	fn markup(&self) -> String {
		Document::markup(self)
	}

	fn replace_content(&mut self, content: Vec<Fragment>) {
		Document::replace_content(self, content);
	}

	fn caret(&self) -> Option<Position> {
		self.selection()
	}

	fn insert_node(&mut self, at: Position, node: Fragment) -> NodeId {
		self.insert_fragment(at, node)
	}

	fn find_element_by_id(&self, id: &str) -> Option<NodeId> {
		Document::find_element_by_id(self, id)
	}

	fn set_caret_after(&mut self, node: NodeId) {
		Document::set_caret_after(self, node);
	}

	fn remove_node(&mut self, node: NodeId) {
		self.remove(node);
	}
}
