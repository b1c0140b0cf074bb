//! Suggested concepts waiting to be captured.
//!
//! These nodes only ever live in the connection view. They are never added
//! to the store; promotion goes back through the capture pipeline instead.

use log::debug;
use rand::Rng;

use crate::components::force_graph::{GraphLink, GraphNode, LinkKind};

/// The current set of ephemeral nodes and their links.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EphemeralGraph {
	nodes: Vec<GraphNode>,
	links: Vec<GraphLink>,
}

impl EphemeralGraph {
	/// One node per candidate, each linked from a uniformly random permanent
	/// node. Targets may repeat. With no permanent nodes the candidates stay
	/// unlinked.
	pub fn from_candidates<R: Rng + ?Sized>(
		generation: u64,
		candidates: &[String],
		permanent_ids: &[String],
		rng: &mut R,
	) -> Self {
		let nodes: Vec<GraphNode> = candidates
			.iter()
			.enumerate()
			.map(|(i, label)| GraphNode::ephemeral(format!("generated-{generation}-{i}"), label))
			.collect();

		if permanent_ids.is_empty() {
			debug!("ephemeral: no permanent nodes to link {} candidates to", nodes.len());
			return Self {
				nodes,
				links: Vec::new(),
			};
		}

		let links = nodes
			.iter()
			.map(|node| {
				let source = &permanent_ids[rng.gen_range(0..permanent_ids.len())];
				GraphLink::new(source, &node.id, LinkKind::Ephemeral)
			})
			.collect();

		Self { nodes, links }
	}

	pub fn from_parts(nodes: Vec<GraphNode>, links: Vec<GraphLink>) -> Self {
		Self { nodes, links }
	}

	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	pub fn links(&self) -> &[GraphLink] {
		&self.links
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn contains(&self, id: &str) -> bool {
		self.nodes.iter().any(|node| node.id == id)
	}

	/// Drop one node and every link that references it.
	pub fn remove(&mut self, id: &str) -> Option<GraphNode> {
		let pos = self.nodes.iter().position(|node| node.id == id)?;
		let node = self.nodes.remove(pos);
		self.links.retain(|link| !link.touches(id));
		Some(node)
	}

	pub fn clear(&mut self) {
		self.nodes.clear();
		self.links.clear();
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	fn ids(values: &[&str]) -> Vec<String> {
		values.iter().map(|v| v.to_string()).collect()
	}

	#[test]
	fn every_candidate_gets_one_link_from_a_permanent_node() {
		let mut rng = SmallRng::seed_from_u64(7);
		let permanent = ids(&["1", "2"]);
		let candidates = ids(&["雨落无声", "光影斑驳", "随风而逝的记忆"]);
		let graph = EphemeralGraph::from_candidates(4, &candidates, &permanent, &mut rng);

		assert_eq!(graph.len(), 3);
		assert_eq!(graph.links().len(), 3);
		for (node, link) in graph.nodes().iter().zip(graph.links()) {
			assert!(node.is_ephemeral());
			assert_eq!(link.target, node.id);
			assert!(permanent.contains(&link.source));
			assert_eq!(link.kind, LinkKind::Ephemeral);
		}
		assert_eq!(graph.nodes()[0].id, "generated-4-0");
	}

	#[test]
	fn no_permanent_nodes_means_no_links() {
		let mut rng = SmallRng::seed_from_u64(1);
		let graph = EphemeralGraph::from_candidates(1, &ids(&["一"]), &[], &mut rng);
		assert_eq!(graph.len(), 1);
		assert!(graph.links().is_empty());
	}

	#[test]
	fn remove_takes_node_and_its_links() {
		let mut rng = SmallRng::seed_from_u64(3);
		let mut graph =
			EphemeralGraph::from_candidates(2, &ids(&["a", "b"]), &ids(&["1"]), &mut rng);
		let removed = graph.remove("generated-2-0").unwrap();
		assert_eq!(removed.label, "a");
		assert_eq!(graph.len(), 1);
		assert_eq!(graph.links().len(), 1);
		assert!(graph.links().iter().all(|l| !l.touches("generated-2-0")));
		assert!(graph.remove("generated-2-0").is_none());
	}
}
