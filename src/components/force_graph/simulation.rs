//! Force-directed layout engine.
//!
//! A velocity-integration simulation in the style of d3-force. Each tick combines
//! five forces:
//! - link springs pulling connected nodes toward `link_distance`
//! - many-body repulsion between every pair of nodes
//! - centering, which shifts the whole system so its mean sits at the origin
//! - collision, keeping node circles from overlapping
//! - radial containment, pulling nodes toward a ring of `radial_radius`
//!
//! Energy (`alpha`) cools geometrically toward `alpha_target`. Once it drops
//! below `alpha_min` with no target set, the simulation is settled and stops
//! integrating. Dragging raises the target so neighbours react, and pinned
//! nodes are excluded from integration.
//!
//! Positions are in graph space with the layout centered on the origin.

use std::f64::consts::PI;

use serde::Deserialize;

/// Tunable force constants.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	/// Rest length of link springs.
	pub link_distance: f64,
	/// Many-body strength. Negative values repel.
	pub charge_strength: f64,
	/// Fraction of the centroid offset removed each tick.
	pub center_strength: f64,
	/// Exclusion radius of every node.
	pub collide_radius: f64,
	/// Radius of the containment ring.
	pub radial_radius: f64,
	pub radial_strength: f64,
	/// Fraction of velocity lost each tick.
	pub velocity_decay: f64,
	pub alpha_min: f64,
	/// Energy the simulation is held at while a node is dragged.
	pub drag_alpha_target: f64,
	/// Ticks from full energy to `alpha_min` when left alone.
	pub cooling_ticks: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			link_distance: 120.0,
			charge_strength: -200.0,
			center_strength: 1.0,
			collide_radius: 40.0,
			radial_radius: 150.0,
			radial_strength: 0.08,
			velocity_decay: 0.4,
			alpha_min: 0.001,
			drag_alpha_target: 0.3,
			cooling_ticks: 300.0,
		}
	}
}

impl LayoutConfig {
	pub fn alpha_decay(&self) -> f64 {
		1.0 - self.alpha_min.powf(1.0 / self.cooling_ticks.max(1.0))
	}
}

/// Position, velocity and optional pin of one node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Body {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub pinned: Option<(f64, f64)>,
}

#[derive(Clone, Debug)]
struct Spring {
	source: usize,
	target: usize,
	strength: f64,
	bias: f64,
}

/// The running layout. Node slots are indices into `bodies`.
#[derive(Clone, Debug)]
pub struct Simulation {
	bodies: Vec<Body>,
	springs: Vec<Spring>,
	config: LayoutConfig,
	alpha: f64,
	alpha_target: f64,
	alpha_decay: f64,
}

/// Deterministic stand-in for d3's random jiggle, used when two points
/// coincide exactly.
fn jiggle(seed: usize) -> f64 {
	((seed % 7) as f64 + 1.0) * 1e-6
}

impl Simulation {
	/// Lay `node_count` nodes on a phyllotaxis spiral and wire `links`
	/// (slot pairs). Links naming out-of-range slots are skipped.
	pub fn new(node_count: usize, links: &[(usize, usize)], config: LayoutConfig) -> Self {
		let golden = PI * (3.0 - 5f64.sqrt());
		let bodies = (0..node_count)
			.map(|i| {
				let radius = 10.0 * (0.5 + i as f64).sqrt();
				let angle = i as f64 * golden;
				Body {
					x: radius * angle.cos(),
					y: radius * angle.sin(),
					..Body::default()
				}
			})
			.collect();

		let mut degree = vec![0usize; node_count];
		let valid: Vec<(usize, usize)> = links
			.iter()
			.copied()
			.filter(|&(s, t)| s < node_count && t < node_count)
			.collect();
		for &(s, t) in &valid {
			degree[s] += 1;
			degree[t] += 1;
		}
		let springs = valid
			.into_iter()
			.map(|(source, target)| {
				let (ds, dt) = (degree[source] as f64, degree[target] as f64);
				Spring {
					source,
					target,
					strength: 1.0 / ds.min(dt),
					bias: ds / (ds + dt),
				}
			})
			.collect();

		let alpha_decay = config.alpha_decay();
		Self {
			bodies,
			springs,
			config,
			alpha: 1.0,
			alpha_target: 0.0,
			alpha_decay,
		}
	}

	pub fn len(&self) -> usize {
		self.bodies.len()
	}

	pub fn is_empty(&self) -> bool {
		self.bodies.is_empty()
	}

	pub fn bodies(&self) -> &[Body] {
		&self.bodies
	}

	pub fn position(&self, slot: usize) -> Option<(f64, f64)> {
		self.bodies.get(slot).map(|b| (b.x, b.y))
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// True once energy has decayed and nothing is holding it up.
	pub fn is_settled(&self) -> bool {
		self.alpha < self.config.alpha_min && self.alpha_target <= 0.0
	}

	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target.max(0.0);
	}

	/// Fix a node at `(x, y)`. It keeps that position until unpinned.
	pub fn pin(&mut self, slot: usize, x: f64, y: f64) {
		if let Some(body) = self.bodies.get_mut(slot) {
			body.pinned = Some((x, y));
			body.x = x;
			body.y = y;
			body.vx = 0.0;
			body.vy = 0.0;
		}
	}

	pub fn unpin(&mut self, slot: usize) {
		if let Some(body) = self.bodies.get_mut(slot) {
			body.pinned = None;
		}
	}

	/// Begin a drag: pin the node and hold the simulation warm.
	pub fn start_drag(&mut self, slot: usize) {
		if let Some((x, y)) = self.position(slot) {
			self.pin(slot, x, y);
			self.set_alpha_target(self.config.drag_alpha_target);
			if self.alpha < self.config.drag_alpha_target {
				self.alpha = self.config.drag_alpha_target;
			}
		}
	}

	/// End a drag: release the pin and let energy decay back to rest.
	pub fn end_drag(&mut self, slot: usize) {
		self.unpin(slot);
		self.set_alpha_target(0.0);
	}

	/// Advance one step. Returns false when already settled.
	pub fn tick(&mut self) -> bool {
		if self.is_settled() {
			return false;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;

		self.apply_links();
		self.apply_charge();
		self.apply_center();
		self.apply_collide();
		self.apply_radial();

		let keep = 1.0 - self.config.velocity_decay;
		for body in &mut self.bodies {
			match body.pinned {
				Some((px, py)) => {
					body.x = px;
					body.y = py;
					body.vx = 0.0;
					body.vy = 0.0;
				}
				None => {
					body.vx *= keep;
					body.vy *= keep;
					body.x += body.vx;
					body.y += body.vy;
				}
			}
		}
		true
	}

	fn apply_links(&mut self) {
		let alpha = self.alpha;
		let distance = self.config.link_distance;
		for (i, spring) in self.springs.iter().enumerate() {
			if spring.source == spring.target {
				continue;
			}
			let (s, t) = (&self.bodies[spring.source], &self.bodies[spring.target]);
			let mut dx = t.x + t.vx - s.x - s.vx;
			let mut dy = t.y + t.vy - s.y - s.vy;
			if dx == 0.0 {
				dx = jiggle(i);
			}
			if dy == 0.0 {
				dy = jiggle(i + 1);
			}
			let len = (dx * dx + dy * dy).sqrt();
			let k = (len - distance) / len * alpha * spring.strength;
			dx *= k;
			dy *= k;

			let target = &mut self.bodies[spring.target];
			target.vx -= dx * spring.bias;
			target.vy -= dy * spring.bias;
			let source = &mut self.bodies[spring.source];
			source.vx += dx * (1.0 - spring.bias);
			source.vy += dy * (1.0 - spring.bias);
		}
	}

	fn apply_charge(&mut self) {
		let strength = self.config.charge_strength * self.alpha;
		let n = self.bodies.len();
		let mut dv = vec![(0.0, 0.0); n];
		for i in 0..n {
			for j in 0..n {
				if i == j {
					continue;
				}
				let (a, b) = (&self.bodies[i], &self.bodies[j]);
				let mut dx = b.x - a.x;
				let mut dy = b.y - a.y;
				if dx == 0.0 {
					dx = jiggle(i + j);
				}
				if dy == 0.0 {
					dy = jiggle(i + j + 1);
				}
				let l2 = (dx * dx + dy * dy).max(1.0);
				let w = strength / l2;
				dv[i].0 += dx * w;
				dv[i].1 += dy * w;
			}
		}
		for (body, (ax, ay)) in self.bodies.iter_mut().zip(dv) {
			body.vx += ax;
			body.vy += ay;
		}
	}

	fn apply_center(&mut self) {
		let n = self.bodies.len();
		if n == 0 {
			return;
		}
		let (sx, sy) = self
			.bodies
			.iter()
			.fold((0.0, 0.0), |(sx, sy), b| (sx + b.x, sy + b.y));
		let shift_x = sx / n as f64 * self.config.center_strength;
		let shift_y = sy / n as f64 * self.config.center_strength;
		for body in &mut self.bodies {
			body.x -= shift_x;
			body.y -= shift_y;
		}
	}

	fn apply_collide(&mut self) {
		let r = self.config.collide_radius;
		if r <= 0.0 {
			return;
		}
		let reach = r + r;
		let n = self.bodies.len();
		for i in 0..n {
			for j in (i + 1)..n {
				let (a, b) = (&self.bodies[i], &self.bodies[j]);
				let mut dx = (a.x + a.vx) - (b.x + b.vx);
				let mut dy = (a.y + a.vy) - (b.y + b.vy);
				let mut l2 = dx * dx + dy * dy;
				if l2 >= reach * reach {
					continue;
				}
				if dx == 0.0 {
					dx = jiggle(i + j);
					l2 += dx * dx;
				}
				if dy == 0.0 {
					dy = jiggle(i + j + 1);
					l2 += dy * dy;
				}
				let len = l2.sqrt();
				// Equal radii split the correction evenly.
				let k = (reach - len) / len * 0.5;
				dx *= k;
				dy *= k;
				self.bodies[i].vx += dx;
				self.bodies[i].vy += dy;
				self.bodies[j].vx -= dx;
				self.bodies[j].vy -= dy;
			}
		}
	}

	fn apply_radial(&mut self) {
		let (radius, strength, alpha) = (
			self.config.radial_radius,
			self.config.radial_strength,
			self.alpha,
		);
		for (i, body) in self.bodies.iter_mut().enumerate() {
			let mut dx = body.x;
			let dy = body.y;
			if dx == 0.0 {
				dx = jiggle(i);
			}
			let r = (dx * dx + dy * dy).sqrt();
			let k = (radius - r) * strength * alpha / r;
			body.vx += dx * k;
			body.vy += dy * k;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn distance(sim: &Simulation, a: usize, b: usize) -> f64 {
		let (ax, ay) = sim.position(a).unwrap();
		let (bx, by) = sim.position(b).unwrap();
		((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
	}

	fn run_until_settled(sim: &mut Simulation) -> usize {
		let mut ticks = 0;
		while sim.tick() {
			ticks += 1;
			assert!(ticks < 10_000, "simulation never settled");
		}
		ticks
	}

	#[test]
	fn default_decay_settles_in_about_three_hundred_ticks() {
		let mut sim = Simulation::new(3, &[(0, 1), (1, 2)], LayoutConfig::default());
		let ticks = run_until_settled(&mut sim);
		assert!((295..=305).contains(&ticks), "took {ticks} ticks");
		assert!(sim.is_settled());
		assert!(!sim.tick());
	}

	#[test]
	fn nodes_never_end_up_overlapping() {
		let links: Vec<_> = (1..12).map(|i| (0, i)).collect();
		let mut sim = Simulation::new(12, &links, LayoutConfig::default());
		run_until_settled(&mut sim);
		for a in 0..12 {
			for b in (a + 1)..12 {
				assert!(distance(&sim, a, b) > 79.5, "{a} and {b} overlap");
			}
		}
	}

	fn mean_radius(sim: &Simulation) -> f64 {
		let total: f64 = sim.bodies().iter().map(|b| (b.x * b.x + b.y * b.y).sqrt()).sum();
		total / sim.len() as f64
	}

	#[test]
	fn star_settles_inside_the_containment_band() {
		let links: Vec<_> = (1..12).map(|i| (0, i)).collect();
		let mut sim = Simulation::new(12, &links, LayoutConfig::default());
		run_until_settled(&mut sim);
		let r = mean_radius(&sim);
		assert!((105.0..180.0).contains(&r), "mean radius {r}");
	}

	#[test]
	fn radial_force_alone_gathers_nodes_on_the_ring() {
		let config = LayoutConfig {
			charge_strength: 0.0,
			collide_radius: 0.0,
			..LayoutConfig::default()
		};
		let mut sim = Simulation::new(8, &[], config);
		run_until_settled(&mut sim);
		for body in sim.bodies() {
			let r = (body.x * body.x + body.y * body.y).sqrt();
			assert!((r - 150.0).abs() < 10.0, "radius {r}");
		}
	}

	#[test]
	fn lone_spring_settles_at_link_distance() {
		let config = LayoutConfig {
			charge_strength: 0.0,
			radial_strength: 0.0,
			..LayoutConfig::default()
		};
		let mut sim = Simulation::new(2, &[(0, 1)], config);
		run_until_settled(&mut sim);
		let d = distance(&sim, 0, 1);
		assert!((d - 120.0).abs() < 1.5, "link length {d}");
	}

	#[test]
	fn layout_stays_centered() {
		let mut sim = Simulation::new(6, &[(0, 1), (2, 3), (4, 5)], LayoutConfig::default());
		run_until_settled(&mut sim);
		let (sx, sy) = sim
			.bodies()
			.iter()
			.fold((0.0, 0.0), |(x, y), b| (x + b.x, y + b.y));
		assert!((sx / 6.0).abs() < 1.0);
		assert!((sy / 6.0).abs() < 1.0);
	}

	#[test]
	fn pinned_node_holds_position_and_keeps_sim_warm() {
		let mut sim = Simulation::new(4, &[(0, 1), (1, 2), (2, 3)], LayoutConfig::default());
		run_until_settled(&mut sim);

		sim.start_drag(2);
		sim.pin(2, 400.0, -250.0);
		for _ in 0..500 {
			assert!(sim.tick());
		}
		let (x, y) = sim.position(2).unwrap();
		// Centering may shift the pinned node for one tick, but the pin restores it.
		assert_eq!((x, y), (400.0, -250.0));
		assert!(sim.alpha() > 0.2);

		sim.end_drag(2);
		run_until_settled(&mut sim);
		assert!(sim.bodies()[2].pinned.is_none());
	}

	#[test]
	fn out_of_range_links_are_ignored() {
		let sim = Simulation::new(2, &[(0, 5), (0, 1)], LayoutConfig::default());
		assert_eq!(sim.springs.len(), 1);
	}

	#[test]
	fn empty_simulation_is_harmless() {
		let mut sim = Simulation::new(0, &[], LayoutConfig::default());
		assert!(sim.is_empty());
		run_until_settled(&mut sim);
	}
}
