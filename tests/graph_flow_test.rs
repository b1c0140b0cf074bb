//! End-to-end flows through the store, graph session and offline analyst.

#![allow(unused_crate_dependencies)]

use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use xinjian::analysis::{Analyst, GeminiClient, MOCK_CONCEPTS};
use xinjian::components::force_graph::{GraphNode, LinkKind};
use xinjian::graph::{GraphSession, Selection, build_graph};
use xinjian::journal::seed::seed_inspirations;
use xinjian::journal::{Inspiration, InspirationStore, Mood, analyze_capture};

fn note(id: &str, content: &str, connections: &[&str]) -> Inspiration {
	Inspiration {
		id: id.to_string(),
		content: content.to_string(),
		date: NaiveDate::from_ymd_opt(2023, 10, 24).unwrap(),
		tags: vec!["思考".to_string()],
		mood: Mood::Peaceful,
		imagery: Vec::new(),
		image_url: None,
		connections: connections.iter().map(|c| c.to_string()).collect(),
		challenge_id: None,
	}
}

fn pair() -> InspirationStore {
	InspirationStore::new(vec![note("1", "寒山寺外", &["2"]), note("2", "夜半钟声", &["1"])])
}

fn offline() -> Analyst<GeminiClient> {
	Analyst::offline()
}

#[test]
fn mutual_connections_render_both_ways_and_vanish_with_their_target() {
	let mut store = pair();
	let session = GraphSession::new(store.len());

	let graph = session.build(&store);
	assert_eq!(graph.nodes.len(), 2);
	assert_eq!(graph.links.len(), 2);
	assert!(graph.links.iter().all(|l| l.kind == LinkKind::Permanent));

	store.remove("2");
	let graph = session.build(&store);
	assert_eq!(graph.nodes.len(), 1);
	assert!(graph.links.is_empty());
}

#[tokio::test]
async fn offline_brainstorm_adds_three_linked_suggestions() {
	let store = pair();
	let mut session = GraphSession::new(store.len());
	let mut rng = SmallRng::seed_from_u64(2023);

	let ticket = session.begin_brainstorm().unwrap();
	assert!(session.begin_brainstorm().is_none());

	let candidates = offline().brainstorm(&store.contents()).await;
	assert_eq!(candidates, MOCK_CONCEPTS.map(String::from).to_vec());

	let added = session.finish_brainstorm(ticket, candidates, &store.ids(), &mut rng);
	assert_eq!(added, Some(3));
	assert!(!session.is_brainstorming());

	let graph = session.build(&store);
	assert_eq!(graph.nodes.len(), 5);
	let suggested: Vec<_> = graph.links.iter().filter(|l| l.kind == LinkKind::Ephemeral).collect();
	assert_eq!(suggested.len(), 3);
	for link in suggested {
		assert!(link.source == "1" || link.source == "2");
		assert!(graph.node(&link.target).is_some_and(GraphNode::is_ephemeral));
	}
}

#[tokio::test]
async fn promoting_a_suggestion_captures_exactly_its_label() {
	let mut store = pair();
	let mut session = GraphSession::new(store.len());
	let mut rng = SmallRng::seed_from_u64(7);
	let ticket = session.begin_brainstorm().unwrap();
	let candidates = vec!["雨落无声".to_string(), "光影斑驳".to_string()];
	session.finish_brainstorm(ticket, candidates, &store.ids(), &mut rng);

	let node = session.ephemeral().nodes()[0].clone();
	session.select(node.clone());
	let request = session.promote_selected().unwrap();
	assert_eq!(session.selection(), &Selection::Idle);

	let analyzed = analyze_capture(&offline(), request).await.unwrap();
	let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
	let id = analyzed.commit(&mut store, 1_700_000_000_000, today);

	assert_eq!(store.len(), 3);
	let created = &store.items()[0];
	assert_eq!(created.id, id);
	assert_eq!(created.content, node.label);
	assert_eq!(created.mood, Mood::Peaceful);
	assert!(created.connections.is_empty());

	session.sync_store(&store);
	assert!(session.ephemeral().is_empty());
	assert_eq!(session.build(&store).nodes.len(), 3);
}

#[test]
fn building_twice_gives_the_same_graph() {
	let store = pair();
	let mut session = GraphSession::new(store.len());
	let mut rng = SmallRng::seed_from_u64(1);
	let ticket = session.begin_brainstorm().unwrap();
	session.finish_brainstorm(ticket, vec!["回响".to_string()], &store.ids(), &mut rng);

	assert_eq!(session.build(&store), session.build(&store));
}

#[test]
fn suggestions_without_saved_notes_stay_unlinked() {
	let store = InspirationStore::default();
	let mut session = GraphSession::new(0);
	let mut rng = SmallRng::seed_from_u64(3);
	let ticket = session.begin_brainstorm().unwrap();
	session.finish_brainstorm(ticket, vec!["孤念".to_string()], &store.ids(), &mut rng);

	let graph = session.build(&store);
	assert_eq!(graph.nodes.len(), 1);
	assert!(graph.links.is_empty());
}

#[test]
fn page_data_with_a_repeated_id_still_renders_unique_nodes() {
	let mut items = seed_inspirations();
	let mut copy = items[1].clone();
	copy.content = "重复的笺".to_string();
	items.push(copy);

	let store = InspirationStore::new(items);
	let session = GraphSession::new(store.len());
	let graph = session.build(&store);
	let unique: std::collections::HashSet<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
	assert_eq!(graph.nodes.len(), unique.len());
	assert_eq!(graph.nodes.len(), 13);
	assert_eq!(build_graph(store.items(), session.ephemeral()), graph);
}
