//! View-local state of the connection graph: suggestions, brainstorm
//! lifecycle, and selection.

use log::{debug, info};
use rand::Rng;

use super::brainstorm::{Brainstorm, BrainstormTicket};
use super::builder::build_graph;
use super::ephemeral::EphemeralGraph;
use super::selection::Selection;
use crate::components::force_graph::{GraphData, GraphNode, NodeKind};
use crate::journal::{CaptureRequest, InspirationStore};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphSession {
	ephemeral: EphemeralGraph,
	brainstorm: Brainstorm,
	selection: Selection,
	store_len: usize,
}

impl GraphSession {
	/// Fresh session for a store currently holding `store_len` notes.
	pub fn new(store_len: usize) -> Self {
		Self {
			store_len,
			..Self::default()
		}
	}

	pub fn ephemeral(&self) -> &EphemeralGraph {
		&self.ephemeral
	}

	pub fn selection(&self) -> &Selection {
		&self.selection
	}

	pub fn is_brainstorming(&self) -> bool {
		self.brainstorm.in_flight()
	}

	/// Graph snapshot for the current store and suggestions.
	pub fn build(&self, store: &InspirationStore) -> GraphData {
		build_graph(store.items(), &self.ephemeral)
	}

	/// Ask to start a brainstorm. Ignored while one is outstanding.
	pub fn begin_brainstorm(&mut self) -> Option<BrainstormTicket> {
		let ticket = self.brainstorm.begin();
		match ticket {
			Some(t) => info!("graph: brainstorm #{} started", t.generation()),
			None => debug!("graph: brainstorm already in flight, ignoring"),
		}
		ticket
	}

	/// Apply brainstorm results, replacing every previous suggestion.
	/// Returns the number of new ephemeral nodes, or `None` for a stale ticket.
	pub fn finish_brainstorm<R: Rng + ?Sized>(
		&mut self,
		ticket: BrainstormTicket,
		candidates: Vec<String>,
		permanent_ids: &[String],
		rng: &mut R,
	) -> Option<usize> {
		if !self.brainstorm.complete(ticket, candidates) {
			debug!("graph: dropping results for stale brainstorm #{}", ticket.generation());
			return None;
		}
		let (ticket, candidates) = self.brainstorm.take_results()?;
		self.ephemeral =
			EphemeralGraph::from_candidates(ticket.generation(), &candidates, permanent_ids, rng);
		if self.selection.node().is_some_and(GraphNode::is_ephemeral) {
			self.selection.clear();
		}
		info!("graph: brainstorm #{} produced {} suggestions", ticket.generation(), self.ephemeral.len());
		Some(self.ephemeral.len())
	}

	pub fn select(&mut self, node: GraphNode) {
		self.selection.select(node);
	}

	pub fn clear_selection(&mut self) {
		self.selection.clear();
	}

	/// Take the selected suggestion out of the graph and return the capture
	/// request that makes it permanent. Only ephemeral selections promote.
	pub fn promote_selected(&mut self) -> Option<CaptureRequest> {
		let node = self.selection.node().filter(|node| node.is_ephemeral())?.clone();
		self.ephemeral.remove(&node.id);
		self.selection.clear();
		info!("graph: promoting suggestion {:?}", node.label);
		Some(CaptureRequest::text(node.label))
	}

	/// React to store changes. A size change discards all suggestions, and a
	/// selection whose backing node vanished is closed.
	pub fn sync_store(&mut self, store: &InspirationStore) {
		if store.len() != self.store_len {
			if !self.ephemeral.is_empty() {
				debug!("graph: store changed size, discarding {} suggestions", self.ephemeral.len());
			}
			self.ephemeral.clear();
			self.store_len = store.len();
		}
		let stale = match self.selection.node().map(|node| &node.kind) {
			Some(NodeKind::Permanent { inspiration_id, .. }) => !store.contains(inspiration_id),
			Some(NodeKind::Ephemeral) => self
				.selection
				.node()
				.is_some_and(|node| !self.ephemeral.contains(&node.id)),
			None => false,
		};
		if stale {
			self.selection.clear();
		}
	}
}
