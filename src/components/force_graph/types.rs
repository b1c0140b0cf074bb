//! Graph data structures fed to the force graph component.

use crate::journal::{Inspiration, Mood};

/// Labels longer than this many characters are cut for display.
pub const LABEL_MAX_CHARS: usize = 8;

/// What backs a node.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
	/// A stored inspiration. `inspiration_id` is a lookup key into the store.
	Permanent { inspiration_id: String, mood: Mood },
	/// A suggested concept that has not been captured yet.
	Ephemeral,
}

/// A node in the graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Unique within one graph snapshot. Used to reference nodes in links.
	pub id: String,
	/// Full label text. Promotion captures exactly this string.
	pub label: String,
	pub kind: NodeKind,
}

impl GraphNode {
	pub fn permanent(inspiration: &Inspiration) -> Self {
		Self {
			id: inspiration.id.clone(),
			label: inspiration.content.clone(),
			kind: NodeKind::Permanent {
				inspiration_id: inspiration.id.clone(),
				mood: inspiration.mood,
			},
		}
	}

	pub fn ephemeral(id: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
			kind: NodeKind::Ephemeral,
		}
	}

	pub fn is_ephemeral(&self) -> bool {
		matches!(self.kind, NodeKind::Ephemeral)
	}

	/// Label cut to [`LABEL_MAX_CHARS`] characters with a trailing `...`.
	pub fn display_label(&self) -> String {
		truncate_label(&self.label)
	}
}

pub fn truncate_label(label: &str) -> String {
	if label.chars().count() > LABEL_MAX_CHARS {
		let head: String = label.chars().take(LABEL_MAX_CHARS).collect();
		format!("{head}...")
	} else {
		label.to_string()
	}
}

/// Rendering variant of a link, taken from its target node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkKind {
	Permanent,
	Ephemeral,
}

/// A directed edge between two nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
	pub kind: LinkKind,
}

impl GraphLink {
	pub fn new(source: impl Into<String>, target: impl Into<String>, kind: LinkKind) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			kind,
		}
	}

	pub fn touches(&self, id: &str) -> bool {
		self.source == id || self.target == id
	}
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl GraphData {
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|node| node.id == id)
	}
}
