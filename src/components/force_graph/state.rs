//! Graph simulation state and interaction tracking.
//!
//! Wraps the layout [`Simulation`] with per-node display metadata, the
//! pan/zoom transform, the drag and pan gestures, and hover highlighting
//! with smooth intensity transitions.

use std::collections::{HashMap, HashSet};

use super::scale::{ScaleConfig, ScaledValues};
use super::simulation::{LayoutConfig, Simulation};
use super::theme::{Color, Theme};
use super::types::{GraphData, LinkKind, NodeKind};

/// Pointer travel (screen px) below which a press-release counts as a click.
pub const CLICK_SLOP: f64 = 3.0;

/// Per-node display metadata, indexed by simulation slot.
#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub id: String,
	/// Already truncated for display.
	pub label: String,
	pub ephemeral: bool,
	pub color: Color,
	/// Radius multiplier: 1.0 for saved notes, 1.6 for suggestions.
	pub size: f64,
}

/// An edge between two simulation slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeInfo {
	pub source: usize,
	pub target: usize,
	pub kind: LinkKind,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Tracks an in-progress node drag.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
	pub moved: bool,
}

/// Tracks an in-progress canvas pan.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
	pub moved: bool,
}

/// What a released pointer gesture amounted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
	/// Press and release on a node without moving it.
	ClickedNode(usize),
	/// Press and release on empty canvas without panning.
	ClickedBackground,
	/// A drag or pan; not a click.
	Moved,
	/// Nothing was pressed.
	None,
}

/// Smooth per-node highlight intensities for hover effects.
///
/// Each node eases toward 1.0 while it is hovered or next to the hovered
/// node, and back to 0.0 afterwards. A short hold time keeps the highlight
/// from flickering when the pointer grazes a node's edge.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	pub hovered_node: Option<usize>,
	target_set: HashSet<usize>,
	node_intensity: HashMap<usize, f64>,
	hover_ring_intensity: HashMap<usize, f64>,
	hold_timer: HashMap<usize, f64>,
	cached_max: f64,
}

/// Minimum time (seconds) a highlight is held before it can fade out.
const MIN_HOLD_TIME: f64 = 0.12;

impl HighlightState {
	/// Update the hovered node and recompute the target highlight set.
	pub fn set_hover(&mut self, node: Option<usize>, edges: &[EdgeInfo]) {
		if self.hovered_node == node {
			return;
		}

		self.hovered_node = node;
		self.target_set.clear();

		if let Some(idx) = node {
			self.target_set.insert(idx);
			for edge in edges {
				if edge.source == idx {
					self.target_set.insert(edge.target);
				} else if edge.target == idx {
					self.target_set.insert(edge.source);
				}
			}
			for &idx in &self.target_set {
				self.hold_timer.insert(idx, MIN_HOLD_TIME);
			}
		}
	}

	/// Ease every intensity toward its target with exponential smoothing.
	pub fn tick(&mut self, dt: f64) {
		const FADE_IN_SPEED: f64 = 6.0;
		const FADE_OUT_SPEED: f64 = 4.0;

		let fade_in = 1.0 - (-FADE_IN_SPEED * dt).exp();
		let fade_out = (-FADE_OUT_SPEED * dt).exp();

		for &idx in &self.target_set {
			let intensity = self.node_intensity.entry(idx).or_insert(0.0);
			*intensity += (1.0 - *intensity) * fade_in;
		}
		if let Some(idx) = self.hovered_node {
			let intensity = self.hover_ring_intensity.entry(idx).or_insert(0.0);
			*intensity += (1.0 - *intensity) * fade_in;
		}

		let target_set = &self.target_set;
		self.hold_timer.retain(|idx, timer| {
			if target_set.contains(idx) {
				true
			} else {
				*timer -= dt;
				*timer > 0.0
			}
		});

		let hold = &self.hold_timer;
		let held = |idx: &usize| hold.get(idx).copied().unwrap_or(0.0) > 0.0;
		let mut new_max: f64 = 0.0;
		self.node_intensity.retain(|idx, intensity| {
			if !target_set.contains(idx) && !held(idx) {
				*intensity *= fade_out;
			}
			new_max = new_max.max(*intensity);
			target_set.contains(idx) || *intensity > 0.005
		});

		let hovered = self.hovered_node;
		self.hover_ring_intensity.retain(|idx, intensity| {
			if hovered == Some(*idx) {
				return true;
			}
			if !held(idx) {
				*intensity *= fade_out;
			}
			*intensity > 0.005
		});

		self.cached_max = new_max;
	}

	pub fn node_intensity(&self, idx: usize) -> f64 {
		self.node_intensity.get(&idx).copied().unwrap_or(0.0)
	}

	pub fn hover_ring_intensity(&self, idx: usize) -> f64 {
		self.hover_ring_intensity.get(&idx).copied().unwrap_or(0.0)
	}

	/// Geometric mean of the endpoint intensities.
	pub fn edge_intensity(&self, a: usize, b: usize) -> f64 {
		(self.node_intensity(a) * self.node_intensity(b)).sqrt()
	}

	pub fn max_intensity(&self) -> f64 {
		self.cached_max
	}
}

/// Everything the canvas needs for one graph snapshot.
///
/// Rebuilt from scratch whenever the node or link set changes; positions
/// restart from the simulation's initial placement.
pub struct ForceGraphState {
	pub simulation: Simulation,
	pub nodes: Vec<NodeInfo>,
	pub edges: Vec<EdgeInfo>,
	slots: HashMap<String, usize>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub highlight: HighlightState,
	pub selected: Option<usize>,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64, theme: &Theme, layout: &LayoutConfig) -> Self {
		let slots: HashMap<String, usize> = data
			.nodes
			.iter()
			.enumerate()
			.map(|(slot, node)| (node.id.clone(), slot))
			.collect();

		let edges: Vec<EdgeInfo> = data
			.links
			.iter()
			.filter_map(|link| {
				Some(EdgeInfo {
					source: *slots.get(&link.source)?,
					target: *slots.get(&link.target)?,
					kind: link.kind,
				})
			})
			.collect();

		let nodes = data
			.nodes
			.iter()
			.map(|node| {
				let (color, size, ephemeral) = match &node.kind {
					NodeKind::Permanent { mood, .. } => {
						(theme.moods.color(*mood), 1.0, false)
					}
					NodeKind::Ephemeral => (theme.node.ephemeral_color, 1.6, true),
				};
				NodeInfo {
					id: node.id.clone(),
					label: node.display_label(),
					ephemeral,
					color,
					size,
				}
			})
			.collect();

		let pairs: Vec<(usize, usize)> = edges.iter().map(|e| (e.source, e.target)).collect();
		let simulation = Simulation::new(data.nodes.len(), &pairs, layout.clone());

		Self {
			simulation,
			nodes,
			edges,
			slots,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			highlight: HighlightState::default(),
			selected: None,
			width,
			height,
			flow_time: 0.0,
		}
	}

	pub fn slot_of(&self, id: &str) -> Option<usize> {
		self.slots.get(id).copied()
	}

	pub fn node_id(&self, slot: usize) -> Option<&str> {
		self.nodes.get(slot).map(|n| n.id.as_str())
	}

	pub fn position(&self, slot: usize) -> (f64, f64) {
		self.simulation.position(slot).unwrap_or_default()
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// The nearest node whose hit circle contains the screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64, config: &ScaleConfig) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		self.nodes
			.iter()
			.enumerate()
			.filter_map(|(slot, info)| {
				let (x, y) = self.position(slot);
				let dist = ((x - gx).powi(2) + (y - gy).powi(2)).sqrt();
				(dist < scale.hit_radius * info.size).then_some((slot, dist))
			})
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(slot, _)| slot)
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		self.highlight.set_hover(node, &self.edges);
	}

	/// Mark the node with `id` as selected, or clear with `None`.
	pub fn set_selected(&mut self, id: Option<&str>) {
		self.selected = id.and_then(|id| self.slot_of(id));
	}

	/// Pointer pressed at a screen point: drag a node or start panning.
	pub fn press(&mut self, sx: f64, sy: f64, config: &ScaleConfig) {
		match self.node_at_position(sx, sy, config) {
			Some(slot) => {
				let (nx, ny) = self.position(slot);
				self.drag = DragState {
					node: Some(slot),
					start_x: sx,
					start_y: sy,
					node_start_x: nx,
					node_start_y: ny,
					moved: false,
				};
				self.simulation.start_drag(slot);
			}
			None => {
				self.pan = PanState {
					active: true,
					start_x: sx,
					start_y: sy,
					transform_start_x: self.transform.x,
					transform_start_y: self.transform.y,
					moved: false,
				};
			}
		}
	}

	/// Pointer moved: update hover, the dragged node's pin, or the pan.
	pub fn pointer_move(&mut self, sx: f64, sy: f64, config: &ScaleConfig) {
		if let Some(slot) = self.drag.node {
			let (dx, dy) = (sx - self.drag.start_x, sy - self.drag.start_y);
			if dx.hypot(dy) > CLICK_SLOP {
				self.drag.moved = true;
			}
			if self.drag.moved {
				let k = self.transform.k;
				self.simulation.pin(
					slot,
					self.drag.node_start_x + dx / k,
					self.drag.node_start_y + dy / k,
				);
			}
			return;
		}

		let hovered = self.node_at_position(sx, sy, config);
		self.set_hover(hovered);

		if self.pan.active {
			let (dx, dy) = (sx - self.pan.start_x, sy - self.pan.start_y);
			if dx.hypot(dy) > CLICK_SLOP {
				self.pan.moved = true;
			}
			self.transform.x = self.pan.transform_start_x + dx;
			self.transform.y = self.pan.transform_start_y + dy;
		}
	}

	/// Pointer released: unpin and classify the gesture.
	pub fn release(&mut self) -> Release {
		let outcome = if let Some(slot) = self.drag.node {
			self.simulation.end_drag(slot);
			if self.drag.moved {
				Release::Moved
			} else {
				Release::ClickedNode(slot)
			}
		} else if self.pan.active {
			if self.pan.moved {
				Release::Moved
			} else {
				Release::ClickedBackground
			}
		} else {
			Release::None
		};
		self.drag = DragState::default();
		self.pan = PanState::default();
		outcome
	}

	/// Pointer left the canvas: abandon gestures without clicking.
	pub fn cancel_gestures(&mut self) {
		if let Some(slot) = self.drag.node {
			self.simulation.end_drag(slot);
		}
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.set_hover(None);
	}

	/// Zoom around a screen point. Positive `delta_y` zooms out.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Advance one animation frame.
	pub fn tick(&mut self, dt: f64) {
		self.simulation.tick();
		self.flow_time += dt;
		self.highlight.tick(dt);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphLink, GraphNode};

	fn sample() -> GraphData {
		GraphData {
			nodes: vec![
				GraphNode::ephemeral("a", "甲"),
				GraphNode::ephemeral("b", "乙"),
				GraphNode::ephemeral("c", "一二三四五六七八九"),
			],
			links: vec![
				GraphLink::new("a", "b", LinkKind::Ephemeral),
				GraphLink::new("a", "missing", LinkKind::Ephemeral),
			],
		}
	}

	fn state() -> ForceGraphState {
		ForceGraphState::new(&sample(), 800.0, 600.0, &Theme::default(), &LayoutConfig::default())
	}

	fn screen_of(state: &ForceGraphState, slot: usize) -> (f64, f64) {
		let (x, y) = state.position(slot);
		(
			x * state.transform.k + state.transform.x,
			y * state.transform.k + state.transform.y,
		)
	}

	#[test]
	fn edges_to_unknown_ids_are_skipped() {
		let state = state();
		assert_eq!(state.edges.len(), 1);
		assert_eq!(state.nodes[2].label, "一二三四五六七八...");
		assert_eq!(state.slot_of("b"), Some(1));
	}

	#[test]
	fn press_and_release_on_node_is_a_click() {
		let mut state = state();
		let config = ScaleConfig::default();
		let (sx, sy) = screen_of(&state, 1);
		state.press(sx, sy, &config);
		state.pointer_move(sx + 1.0, sy, &config);
		assert_eq!(state.release(), Release::ClickedNode(1));
		assert!(state.simulation.bodies()[1].pinned.is_none());
	}

	#[test]
	fn dragging_pins_then_releases() {
		let mut state = state();
		let config = ScaleConfig::default();
		let (sx, sy) = screen_of(&state, 0);
		state.press(sx, sy, &config);
		state.pointer_move(sx + 50.0, sy + 20.0, &config);
		assert!(state.simulation.bodies()[0].pinned.is_some());
		assert_eq!(state.release(), Release::Moved);
		assert!(state.simulation.bodies()[0].pinned.is_none());
	}

	#[test]
	fn background_click_and_pan_are_told_apart() {
		let mut state = state();
		let config = ScaleConfig::default();
		state.press(5.0, 5.0, &config);
		assert_eq!(state.release(), Release::ClickedBackground);

		state.press(5.0, 5.0, &config);
		state.pointer_move(60.0, 5.0, &config);
		assert_eq!(state.release(), Release::Moved);
		assert_eq!(state.transform.x, 400.0 + 55.0);
	}

	#[test]
	fn hover_highlights_neighbours() {
		let mut state = state();
		state.set_hover(Some(0));
		for _ in 0..60 {
			state.highlight.tick(1.0 / 60.0);
		}
		assert!(state.highlight.node_intensity(1) > 0.9);
		assert_eq!(state.highlight.node_intensity(2), 0.0);

		state.set_hover(None);
		for _ in 0..240 {
			state.highlight.tick(1.0 / 60.0);
		}
		assert_eq!(state.highlight.node_intensity(0), 0.0);
	}

	#[test]
	fn zoom_is_clamped() {
		let mut state = state();
		for _ in 0..100 {
			state.zoom_at(400.0, 300.0, -1.0);
		}
		assert_eq!(state.transform.k, 10.0);
	}
}
