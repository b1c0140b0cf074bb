//! Turns the store plus pending suggestions into one graph snapshot.

use std::collections::HashSet;

use super::ephemeral::EphemeralGraph;
use crate::components::force_graph::{GraphData, GraphLink, GraphNode, LinkKind};
use crate::journal::Inspiration;

/// Build nodes and links for one layout pass.
///
/// One permanent node per inspiration, followed by the ephemeral nodes.
/// Connection lists become links only when their target still exists, so
/// deleted notes leave no dangling edges. Parallel links are kept as-is.
pub fn build_graph(inspirations: &[Inspiration], ephemeral: &EphemeralGraph) -> GraphData {
	let stored: HashSet<&str> = inspirations.iter().map(|i| i.id.as_str()).collect();

	let mut nodes: Vec<GraphNode> = inspirations.iter().map(GraphNode::permanent).collect();
	nodes.extend(ephemeral.nodes().iter().cloned());

	let mut links = Vec::new();
	for source in inspirations {
		for target in &source.connections {
			if stored.contains(target.as_str()) {
				links.push(GraphLink::new(&source.id, target, LinkKind::Permanent));
			}
		}
	}

	let present: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
	let extra: Vec<GraphLink> = ephemeral
		.links()
		.iter()
		.filter(|link| present.contains(link.source.as_str()) && present.contains(link.target.as_str()))
		.cloned()
		.collect();
	links.extend(extra);

	GraphData { nodes, links }
}

#[cfg(test)]
mod tests {
	use chrono::NaiveDate;

	use super::*;
	use crate::journal::Mood;
	use crate::journal::seed::seed_inspirations;

	fn note(id: &str, connections: &[&str]) -> Inspiration {
		Inspiration {
			id: id.into(),
			content: format!("content {id}"),
			date: NaiveDate::from_ymd_opt(2023, 10, 1).unwrap(),
			tags: vec![],
			mood: Mood::Neutral,
			imagery: vec![],
			image_url: None,
			connections: connections.iter().map(|c| c.to_string()).collect(),
			challenge_id: None,
		}
	}

	fn pairs(data: &GraphData) -> Vec<(&str, &str)> {
		data.links
			.iter()
			.map(|l| (l.source.as_str(), l.target.as_str()))
			.collect()
	}

	#[test]
	fn mutual_connections_yield_two_links() {
		let notes = vec![note("1", &["2"]), note("2", &["1"])];
		let data = build_graph(&notes, &EphemeralGraph::default());
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(pairs(&data), vec![("1", "2"), ("2", "1")]);
	}

	#[test]
	fn dangling_connections_are_dropped() {
		let notes = vec![note("1", &["2", "404"])];
		let data = build_graph(&notes, &EphemeralGraph::default());
		assert_eq!(data.nodes.len(), 1);
		assert!(data.links.is_empty());
	}

	#[test]
	fn duplicate_connections_are_kept() {
		let notes = vec![note("1", &["2", "2"]), note("2", &[])];
		let data = build_graph(&notes, &EphemeralGraph::default());
		assert_eq!(pairs(&data), vec![("1", "2"), ("1", "2")]);
	}

	#[test]
	fn seed_links_never_dangle() {
		let notes = seed_inspirations();
		let data = build_graph(&notes, &EphemeralGraph::default());
		let ids: HashSet<_> = data.nodes.iter().map(|n| n.id.as_str()).collect();
		assert!(!data.links.is_empty());
		for link in &data.links {
			assert!(ids.contains(link.source.as_str()));
			assert!(ids.contains(link.target.as_str()));
		}
	}

	#[test]
	fn rebuild_is_idempotent() {
		let notes = seed_inspirations();
		let ephemeral = EphemeralGraph::from_parts(
			vec![GraphNode::ephemeral("generated-1-0", "雨落无声")],
			vec![GraphLink::new("3", "generated-1-0", LinkKind::Ephemeral)],
		);
		assert_eq!(build_graph(&notes, &ephemeral), build_graph(&notes, &ephemeral));
	}

	#[test]
	fn ephemeral_links_to_missing_sources_are_filtered() {
		let notes = vec![note("1", &[])];
		let ephemeral = EphemeralGraph::from_parts(
			vec![GraphNode::ephemeral("generated-1-0", "光影斑驳")],
			vec![GraphLink::new("gone", "generated-1-0", LinkKind::Ephemeral)],
		);
		let data = build_graph(&notes, &ephemeral);
		assert_eq!(data.nodes.len(), 2);
		assert!(data.links.is_empty());
	}
}
