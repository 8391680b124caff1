//! In-memory editable surface: an arena-backed node tree with a DOM-like
//! collapsed selection.
//!
//! Positions follow DOM boundary-point rules: inside a text node the offset
//! counts chars, inside an element it counts children. Inserting or removing
//! nodes keeps the live selection pointing at the same logical place.

pub mod markup;

use slab::Slab;

pub use self::markup::{Element, Fragment, TagToken, TreeBuilder, fragments_to_markup, parse_fragments, parse_tag};

/// Handle to a node in a [`Document`]. Stale after the node is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
	Element(Element),
	Text(String),
}

/// A collapsed selection boundary point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
	pub container: NodeId,
	pub offset: usize,
}

impl Position {
	pub const fn new(container: NodeId, offset: usize) -> Self {
		Self { container, offset }
	}
}

#[derive(Debug)]
struct NodeData {
	kind: NodeKind,
	parent: Option<NodeId>,
	children: Vec<NodeId>,
}

enum TypingTarget {
	/// Extend this text node.
	Append(NodeId),
	/// New text node under `.0` at child index `.1`.
	Insert(NodeId, usize),
}

/// The editable region: a root element whose children are the content.
#[derive(Debug)]
pub struct Document {
	nodes: Slab<NodeData>,
	root: NodeId,
	selection: Option<Position>,
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

impl Document {
	/// Creates an empty document with no selection.
	pub fn new() -> Self {
		let mut nodes = Slab::new();
		let root = NodeId(nodes.insert(NodeData {
			kind: NodeKind::Element(Element::new("div").with_attr("contenteditable", "true")),
			parent: None,
			children: Vec::new(),
		}));
		Self {
			nodes,
			root,
			selection: None,
		}
	}

	pub fn from_markup(markup: &str) -> Self {
		let mut doc = Self::new();
		doc.set_markup(markup);
		doc
	}

	pub const fn root(&self) -> NodeId {
		self.root
	}

	pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
		self.nodes.get(id.0).map(|n| &n.kind)
	}

	pub fn parent(&self, id: NodeId) -> Option<NodeId> {
		self.nodes.get(id.0).and_then(|n| n.parent)
	}

	pub fn children(&self, id: NodeId) -> &[NodeId] {
		self.nodes.get(id.0).map(|n| n.children.as_slice()).unwrap_or_default()
	}

	/// Number of live nodes, root included.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Serialized content of the root (its inner markup).
	pub fn markup(&self) -> String {
		let mut out = String::new();
		for &child in self.children(self.root) {
			self.write_node(child, &mut out);
		}
		out
	}

	fn write_node(&self, id: NodeId, out: &mut String) {
		match &self.nodes[id.0].kind {
			NodeKind::Text(text) => markup::escape_text(text, out),
			NodeKind::Element(element) => {
				markup::write_open_tag(element, out);
				if element.is_void() {
					return;
				}
				for &child in &self.nodes[id.0].children {
					self.write_node(child, out);
				}
				markup::write_close_tag(element, out);
			}
		}
	}

	/// Replaces the content with parsed `markup`.
	pub fn set_markup(&mut self, markup: &str) {
		self.replace_content(parse_fragments(markup));
	}

	/// Drops every child of the root and builds `content` in its place.
	///
	/// A live selection collapses to the start of the root.
	pub fn replace_content(&mut self, content: Vec<Fragment>) {
		let old = std::mem::take(&mut self.nodes[self.root.0].children);
		for child in old {
			self.free(child);
		}
		for fragment in content {
			let id = self.build(fragment, self.root);
			self.nodes[self.root.0].children.push(id);
		}
		if self.selection.is_some() {
			self.selection = Some(Position::new(self.root, 0));
		}
	}

	fn build(&mut self, fragment: Fragment, parent: NodeId) -> NodeId {
		match fragment {
			Fragment::Text(text) => NodeId(self.nodes.insert(NodeData {
				kind: NodeKind::Text(text),
				parent: Some(parent),
				children: Vec::new(),
			})),
			Fragment::Element { element, children } => {
				let id = NodeId(self.nodes.insert(NodeData {
					kind: NodeKind::Element(element),
					parent: Some(parent),
					children: Vec::with_capacity(children.len()),
				}));
				for child in children {
					let child = self.build(child, id);
					self.nodes[id.0].children.push(child);
				}
				id
			}
		}
	}

	fn free(&mut self, id: NodeId) {
		if let Some(data) = self.nodes.try_remove(id.0) {
			for child in data.children {
				self.free(child);
			}
		}
	}

	pub fn selection(&self) -> Option<Position> {
		self.selection
	}

	pub fn set_selection(&mut self, selection: Option<Position>) {
		self.selection = selection.filter(|pos| self.nodes.contains(pos.container.0));
	}

	/// Collapses the selection at the very end of the content.
	pub fn set_caret_at_end(&mut self) {
		let end = self.children(self.root).len();
		self.selection = Some(Position::new(self.root, end));
	}

	/// Returns `(parent, index)` for a non-root node.
	pub fn index_in_parent(&self, id: NodeId) -> Option<(NodeId, usize)> {
		let parent = self.parent(id)?;
		let index = self.nodes[parent.0].children.iter().position(|&c| c == id)?;
		Some((parent, index))
	}

	fn is_inclusive_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> bool {
		loop {
			if node == ancestor {
				return true;
			}
			match self.parent(node) {
				Some(parent) => node = parent,
				None => return false,
			}
		}
	}

	/// Inserts `child` under `parent` at `index`, shifting the selection like a live range.
	fn attach(&mut self, parent: NodeId, index: usize, child: NodeId) {
		let children = &mut self.nodes[parent.0].children;
		let index = index.min(children.len());
		children.insert(index, child);
		self.nodes[child.0].parent = Some(parent);
		if let Some(sel) = &mut self.selection
			&& sel.container == parent
			&& sel.offset > index
		{
			sel.offset += 1;
		}
	}

	/// Inserts `fragment` at `at`, splitting a text node if `at` falls inside one.
	pub fn insert_fragment(&mut self, at: Position, fragment: Fragment) -> NodeId {
		let (parent, index) = self.insertion_point(at);
		let id = self.build(fragment, parent);
		self.attach(parent, index, id);
		id
	}

	fn insertion_point(&mut self, at: Position) -> (NodeId, usize) {
		let Some(node) = self.nodes.get(at.container.0) else {
			return (self.root, self.children(self.root).len());
		};
		match &node.kind {
			NodeKind::Element(_) => (at.container, at.offset.min(node.children.len())),
			NodeKind::Text(text) => {
				let len = text.chars().count();
				let Some((parent, index)) = self.index_in_parent(at.container) else {
					return (self.root, self.children(self.root).len());
				};
				if at.offset == 0 {
					return (parent, index);
				}
				if at.offset >= len {
					return (parent, index + 1);
				}
				let suffix = self.split_text(at.container, at.offset);
				self.attach(parent, index + 1, suffix);
				if let Some(sel) = &mut self.selection
					&& sel.container == at.container
					&& sel.offset > at.offset
				{
					*sel = Position::new(suffix, sel.offset - at.offset);
				}
				(parent, index + 1)
			}
		}
	}

	/// Truncates text node `id` at char `offset`; returns a detached node holding the rest.
	fn split_text(&mut self, id: NodeId, offset: usize) -> NodeId {
		let suffix = match &mut self.nodes[id.0].kind {
			NodeKind::Text(text) => {
				let byte = char_to_byte(text, offset);
				text.split_off(byte)
			}
			NodeKind::Element(_) => String::new(),
		};
		NodeId(self.nodes.insert(NodeData {
			kind: NodeKind::Text(suffix),
			parent: None,
			children: Vec::new(),
		}))
	}

	/// Detaches and frees `id` and its subtree. The root cannot be removed.
	pub fn remove(&mut self, id: NodeId) {
		let Some((parent, index)) = self.index_in_parent(id) else {
			return;
		};
		if let Some(sel) = self.selection {
			if self.is_inclusive_ancestor(id, sel.container) {
				self.selection = Some(Position::new(parent, index));
			} else if sel.container == parent && sel.offset > index {
				self.selection = Some(Position::new(parent, sel.offset - 1));
			}
		}
		self.nodes[parent.0].children.remove(index);
		self.free(id);
	}

	/// First element in document order with the given `id` attribute.
	pub fn find_element_by_id(&self, id: &str) -> Option<NodeId> {
		self.preorder(self.root)
			.into_iter()
			.find(|&node| matches!(&self.nodes[node.0].kind, NodeKind::Element(el) if el.id() == Some(id)))
	}

	/// Collapses the selection immediately after `node`.
	pub fn set_caret_after(&mut self, node: NodeId) {
		if let Some((parent, index)) = self.index_in_parent(node) {
			self.selection = Some(Position::new(parent, index + 1));
		}
	}

	/// Types `text` at the caret and advances it. Returns false without a selection.
	pub fn insert_text(&mut self, text: &str) -> bool {
		let Some(pos) = self.selection else {
			return false;
		};
		let typed = text.chars().count();
		match self.nodes.get(pos.container.0).map(|n| &n.kind) {
			Some(NodeKind::Text(_)) => {
				if let NodeKind::Text(existing) = &mut self.nodes[pos.container.0].kind {
					let byte = char_to_byte(existing, pos.offset);
					existing.insert_str(byte, text);
				}
				self.selection = Some(Position::new(pos.container, pos.offset + typed));
			}
			Some(NodeKind::Element(_)) => {
				let index = pos.offset.min(self.children(pos.container).len());
				match self.typing_target(pos.container, index) {
					TypingTarget::Append(node) => {
						if let NodeKind::Text(existing) = &mut self.nodes[node.0].kind {
							existing.push_str(text);
							let end = existing.chars().count();
							self.selection = Some(Position::new(node, end));
						}
					}
					TypingTarget::Insert(parent, index) => {
						let id = self.build(Fragment::text(text), parent);
						self.attach(parent, index, id);
						self.selection = Some(Position::new(id, typed));
					}
				}
			}
			None => return false,
		}
		true
	}

	/// Where text typed at child `index` of `container` lands.
	///
	/// Like a browser caret, typing right after an inline element extends
	/// the element's last text descendant. A void element (`<br>`) ends the
	/// descent and the text goes in a new node right after it.
	fn typing_target(&self, container: NodeId, index: usize) -> TypingTarget {
		let (mut parent, mut index) = (container, index);
		let Some(mut node) = index.checked_sub(1).map(|i| self.children(parent)[i]) else {
			return TypingTarget::Insert(parent, index);
		};
		loop {
			match &self.nodes[node.0].kind {
				NodeKind::Text(_) => return TypingTarget::Append(node),
				NodeKind::Element(element) if element.is_void() => return TypingTarget::Insert(parent, index),
				NodeKind::Element(_) => {
					let children = self.children(node);
					(parent, index) = (node, children.len());
					match children.last() {
						Some(&last) => node = last,
						None => return TypingTarget::Insert(parent, index),
					}
				}
			}
		}
	}

	/// Concatenated text of every text node, in document order.
	pub fn text_content(&self) -> String {
		self.preorder(self.root)
			.into_iter()
			.filter_map(|id| match &self.nodes[id.0].kind {
				NodeKind::Text(text) => Some(text.as_str()),
				NodeKind::Element(_) => None,
			})
			.collect()
	}

	/// Caret position measured in chars of [`Self::text_content`].
	pub fn caret_text_offset(&self) -> Option<usize> {
		let pos = self.selection?;
		let node = self.nodes.get(pos.container.0)?;
		match &node.kind {
			NodeKind::Text(_) => Some(self.text_before(pos.container) + pos.offset),
			NodeKind::Element(_) => match node.children.get(pos.offset) {
				Some(&child) => Some(self.text_before(child)),
				None => {
					let subtree: usize = self
						.preorder(pos.container)
						.into_iter()
						.map(|id| self.text_len(id))
						.sum();
					Some(self.text_before(pos.container) + subtree)
				}
			},
		}
	}

	fn text_len(&self, id: NodeId) -> usize {
		match &self.nodes[id.0].kind {
			NodeKind::Text(text) => text.chars().count(),
			NodeKind::Element(_) => 0,
		}
	}

	fn text_before(&self, target: NodeId) -> usize {
		self.preorder(self.root)
			.into_iter()
			.take_while(|&id| id != target)
			.map(|id| self.text_len(id))
			.sum()
	}

	fn preorder(&self, from: NodeId) -> Vec<NodeId> {
		let mut out = Vec::new();
		let mut stack = vec![from];
		while let Some(id) = stack.pop() {
			out.push(id);
			stack.extend(self.nodes[id.0].children.iter().rev().copied());
		}
		out
	}
}

fn char_to_byte(text: &str, offset: usize) -> usize {
	text.char_indices().nth(offset).map_or(text.len(), |(byte, _)| byte)
}
