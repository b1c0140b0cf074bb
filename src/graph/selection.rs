//! Which node, if any, has its detail panel open.

use crate::components::force_graph::GraphNode;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Selection {
	#[default]
	Idle,
	NodeSelected(GraphNode),
}

impl Selection {
	/// Select `node`, replacing any previous selection.
	pub fn select(&mut self, node: GraphNode) {
		*self = Selection::NodeSelected(node);
	}

	pub fn clear(&mut self) {
		*self = Selection::Idle;
	}

	pub fn node(&self) -> Option<&GraphNode> {
		match self {
			Selection::Idle => None,
			Selection::NodeSelected(node) => Some(node),
		}
	}
}
