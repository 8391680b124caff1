//! Markup parsing and serialization for the in-memory surface.
//!
//! The parser is deliberately lenient: unmatched closing tags are dropped,
//! unclosed elements are closed at the end of input, and comments or
//! doctypes are skipped. It never fails.

use std::sync::LazyLock;

use regex::Regex;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source", "track", "wbr",
];

/// An element's name and attributes, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
	/// Lower-cased tag name.
	pub tag: String,
	pub attrs: Vec<(String, String)>,
}

impl Element {
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into().to_ascii_lowercase(),
			attrs: Vec::new(),
		}
	}

	pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	pub fn attr(&self, name: &str) -> Option<&str> {
		self.attrs.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
	}

	pub fn id(&self) -> Option<&str> {
		self.attr("id")
	}

	pub fn has_class(&self, class: &str) -> bool {
		self.attr("class").is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
	}

	/// Returns true for elements that never have children (`<br>`, `<img>`, ...).
	pub fn is_void(&self) -> bool {
		VOID_ELEMENTS.contains(&self.tag.as_str())
	}
}

/// Detached content to be inserted into a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
	Element { element: Element, children: Vec<Fragment> },
	Text(String),
}

impl Fragment {
	pub fn text(text: impl Into<String>) -> Self {
		Self::Text(text.into())
	}

	/// An element with no children.
	pub fn empty(element: Element) -> Self {
		Self::Element {
			element,
			children: Vec::new(),
		}
	}

	pub fn write_markup(&self, out: &mut String) {
		match self {
			Self::Text(text) => escape_text(text, out),
			Self::Element { element, children } => {
				write_open_tag(element, out);
				if element.is_void() {
					return;
				}
				for child in children {
					child.write_markup(out);
				}
				write_close_tag(element, out);
			}
		}
	}
}

/// Serializes a fragment list in order.
pub fn fragments_to_markup(fragments: &[Fragment]) -> String {
	let mut out = String::new();
	for fragment in fragments {
		fragment.write_markup(&mut out);
	}
	out
}

pub(crate) fn write_open_tag(element: &Element, out: &mut String) {
	out.push('<');
	out.push_str(&element.tag);
	for (name, value) in &element.attrs {
		out.push(' ');
		out.push_str(name);
		out.push_str("=\"");
		escape_attr(value, out);
		out.push('"');
	}
	out.push('>');
}

pub(crate) fn write_close_tag(element: &Element, out: &mut String) {
	out.push_str("</");
	out.push_str(&element.tag);
	out.push('>');
}

pub(crate) fn escape_text(text: &str, out: &mut String) {
	for c in text.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'\u{a0}' => out.push_str("&nbsp;"),
			c => out.push(c),
		}
	}
}

fn escape_attr(value: &str, out: &mut String) {
	for c in value.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'"' => out.push_str("&quot;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			c => out.push(c),
		}
	}
}

/// Decodes the handful of character references the serializer and common
/// hosts emit. Unknown references are kept verbatim.
pub fn decode_entities(text: &str) -> String {
	if !text.contains('&') {
		return text.to_string();
	}

	let mut out = String::with_capacity(text.len());
	let mut rest = text;
	while let Some(amp) = rest.find('&') {
		out.push_str(&rest[..amp]);
		rest = &rest[amp..];
		let decoded = rest.find(';').filter(|&end| end <= 10).and_then(|end| {
			let c = match &rest[1..end] {
				"amp" => '&',
				"lt" => '<',
				"gt" => '>',
				"quot" => '"',
				"apos" | "#39" => '\'',
				"nbsp" => '\u{a0}',
				other => {
					let code = if let Some(hex) = other.strip_prefix("#x").or_else(|| other.strip_prefix("#X")) {
						u32::from_str_radix(hex, 16).ok()?
					} else {
						other.strip_prefix('#')?.parse().ok()?
					};
					char::from_u32(code)?
				}
			};
			Some((c, end))
		});
		match decoded {
			Some((c, end)) => {
				out.push(c);
				rest = &rest[end + 1..];
			}
			None => {
				out.push('&');
				rest = &rest[1..];
			}
		}
	}
	out.push_str(rest);
	out
}

/// A single tag, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagToken {
	Open { element: Element, self_closing: bool },
	/// Closing tag; carries the lower-cased name.
	Close(String),
	/// Comment, doctype, processing instruction, or unparseable.
	Other,
}

/// Parses one raw `<...>` tag.
pub fn parse_tag(raw: &str) -> TagToken {
	let Some(inner) = raw.strip_prefix('<').and_then(|r| r.strip_suffix('>')) else {
		return TagToken::Other;
	};
	let inner = inner.trim();
	if inner.starts_with('!') || inner.starts_with('?') {
		return TagToken::Other;
	}
	if let Some(name) = inner.strip_prefix('/') {
		let name = name.trim();
		if name.is_empty() {
			return TagToken::Other;
		}
		return TagToken::Close(name.to_ascii_lowercase());
	}

	let (inner, self_closing) = match inner.strip_suffix('/') {
		Some(stripped) => (stripped.trim_end(), true),
		None => (inner, false),
	};
	let name_end = inner.find(char::is_whitespace).unwrap_or(inner.len());
	let name = &inner[..name_end];
	if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
		return TagToken::Other;
	}

	TagToken::Open {
		element: Element {
			tag: name.to_ascii_lowercase(),
			attrs: parse_attrs(&inner[name_end..]),
		},
		self_closing,
	}
}

fn parse_attrs(mut s: &str) -> Vec<(String, String)> {
	let mut attrs = Vec::new();
	loop {
		s = s.trim_start();
		if s.is_empty() {
			break;
		}
		let name_end = s.find(|c: char| c.is_whitespace() || c == '=').unwrap_or(s.len());
		let name = s[..name_end].to_ascii_lowercase();
		s = s[name_end..].trim_start();

		let value = match s.strip_prefix('=') {
			Some(rest) => {
				let rest = rest.trim_start();
				match rest.chars().next() {
					Some(quote @ ('"' | '\'')) => {
						let body = &rest[1..];
						let end = body.find(quote).unwrap_or(body.len());
						s = body.get(end + 1..).unwrap_or("");
						decode_entities(&body[..end])
					}
					_ => {
						let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
						s = &rest[end..];
						decode_entities(&rest[..end])
					}
				}
			}
			None => String::new(),
		};

		if !name.is_empty() {
			attrs.push((name, value));
		}
	}
	attrs
}

enum Frame {
	Element { element: Element, children: Vec<Fragment> },
	/// Swallows its own closing tag; content goes to the enclosing element.
	Transparent { tag: String },
}

impl Frame {
	fn tag(&self) -> &str {
		match self {
			Self::Element { element, .. } => &element.tag,
			Self::Transparent { tag } => tag,
		}
	}
}

/// Incremental fragment tree builder driven by a flat tag/text stream.
#[derive(Default)]
pub struct TreeBuilder {
	root: Vec<Fragment>,
	stack: Vec<Frame>,
}

impl TreeBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends `fragment` to the innermost open element.
	pub fn push(&mut self, fragment: Fragment) {
		let target = self.stack.iter_mut().rev().find_map(|frame| match frame {
			Frame::Element { children, .. } => Some(children),
			Frame::Transparent { .. } => None,
		});
		match target {
			Some(children) => children.push(fragment),
			None => self.root.push(fragment),
		}
	}

	pub fn text(&mut self, text: impl Into<String>) {
		self.push(Fragment::Text(text.into()));
	}

	/// Opens `element`; void and self-closing elements are appended immediately.
	pub fn open(&mut self, element: Element, self_closing: bool) {
		if self_closing || element.is_void() {
			self.push(Fragment::empty(element));
		} else {
			self.stack.push(Frame::Element {
				element,
				children: Vec::new(),
			});
		}
	}

	/// Opens a frame that only exists to consume a later `</tag>`.
	pub fn open_transparent(&mut self, tag: &str) {
		self.stack.push(Frame::Transparent {
			tag: tag.to_ascii_lowercase(),
		});
	}

	/// Closes the innermost frame named `tag` and everything opened after it.
	///
	/// Returns false (and changes nothing) if no such frame is open.
	pub fn close(&mut self, tag: &str) -> bool {
		let Some(index) = self.stack.iter().rposition(|frame| frame.tag().eq_ignore_ascii_case(tag)) else {
			return false;
		};
		while self.stack.len() > index {
			self.pop_frame();
		}
		true
	}

	/// Feeds one raw tag through [`parse_tag`].
	pub fn tag(&mut self, raw: &str) {
		match parse_tag(raw) {
			TagToken::Open { element, self_closing } => self.open(element, self_closing),
			TagToken::Close(name) => {
				self.close(&name);
			}
			TagToken::Other => {}
		}
	}

	fn pop_frame(&mut self) {
		if let Some(Frame::Element { element, children }) = self.stack.pop() {
			self.push(Fragment::Element { element, children });
		}
	}

	/// Closes every open frame and returns the top-level fragments.
	pub fn finish(mut self) -> Vec<Fragment> {
		while !self.stack.is_empty() {
			self.pop_frame();
		}
		self.root
	}
}

/// Parses a markup string into top-level fragments.
pub fn parse_fragments(markup: &str) -> Vec<Fragment> {
	let mut builder = TreeBuilder::new();
	let mut last = 0;
	for tag in TAG.find_iter(markup) {
		if tag.start() > last {
			builder.text(decode_entities(&markup[last..tag.start()]));
		}
		builder.tag(tag.as_str());
		last = tag.end();
	}
	if last < markup.len() {
		builder.text(decode_entities(&markup[last..]));
	}
	builder.finish()
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn parses_nested_structure() {
		let fragments = parse_fragments("a<b class=\"x\">bold <i>it</i></b>c");
		assert_eq!(
			fragments,
			vec![
				Fragment::text("a"),
				Fragment::Element {
					element: Element::new("b").with_attr("class", "x"),
					children: vec![
						Fragment::text("bold "),
						Fragment::Element {
							element: Element::new("i"),
							children: vec![Fragment::text("it")],
						},
					],
				},
				Fragment::text("c"),
			]
		);
	}

	#[test]
	fn serialization_round_trips() {
		let markup = "one<br>two <span class=\"haze-word\" style=\"filter: blur(1.5px);\">three</span>  four";
		assert_eq!(fragments_to_markup(&parse_fragments(markup)), markup);
	}

	#[test]
	fn drops_unmatched_close_and_closes_dangling_open() {
		assert_eq!(fragments_to_markup(&parse_fragments("a</p>b<em>c")), "ab<em>c</em>");
	}

	#[test]
	fn escapes_and_decodes_text() {
		let fragments = parse_fragments("AT&amp;T &lt;3 &#x41;&#66; &bogus; & done");
		assert_eq!(fragments, vec![Fragment::text("AT&T <3 AB &bogus; & done")]);
		assert_eq!(fragments_to_markup(&fragments), "AT&amp;T &lt;3 AB &amp;bogus; &amp; done");
	}

	#[test]
	fn classifies_tags() {
		assert_eq!(
			parse_tag("<BR/>"),
			TagToken::Open {
				element: Element::new("br"),
				self_closing: true
			}
		);
		assert_eq!(parse_tag("</DIV >"), TagToken::Close("div".into()));
		assert_eq!(parse_tag("<!-- note -->"), TagToken::Other);
		assert_eq!(parse_tag("<>"), TagToken::Other);
		match parse_tag("<span id='haze-caret' data-x=1 hidden>") {
			TagToken::Open { element, self_closing } => {
				assert!(!self_closing);
				assert_eq!(element.id(), Some("haze-caret"));
				assert_eq!(element.attr("data-x"), Some("1"));
				assert_eq!(element.attr("hidden"), Some(""));
			}
			other => panic!("unexpected {other:?}"),
		}
	}

	#[test]
	fn transparent_frame_forwards_content() {
		let mut builder = TreeBuilder::new();
		builder.open(Element::new("p"), false);
		builder.open_transparent("span");
		builder.text("x");
		assert!(builder.close("span"));
		builder.text("y");
		assert!(!builder.close("table"));
		let out = builder.finish();
		assert_eq!(fragments_to_markup(&out), "<p>xy</p>");
	}
}
