//! Zoom-dependent sizing for graph visuals.
//!
//! Drawing happens in graph space after the view transform is applied, so a
//! value that should look the same at every zoom level has to be divided by
//! the zoom factor `k`. [`ScaleBehavior`] names the three ways a size can
//! react to zoom; [`ScaledValues`] resolves all of them once per frame.

/// How a visual property reacts to the zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant graph-space size. Grows on screen when zoomed in.
	World,
	/// Constant screen size in pixels.
	Screen,
	/// Graph-space size, but never smaller or larger than the given
	/// on-screen bounds.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// Graph-space value for `base` at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Radius of a permanent node; suggestions use their size multiplier.
	pub node_radius: f64,
	pub node_behavior: ScaleBehavior,
	pub hit_radius: f64,
	pub hit_behavior: ScaleBehavior,
	/// Label font size in screen pixels.
	pub label_size: f64,
	/// Below this zoom labels stop shrinking.
	pub label_min_k: f64,
	/// Horizontal label offset from the node center, graph units.
	pub label_offset: f64,
	/// Permanent link width, screen pixels.
	pub line_width: f64,
	/// Suggestion link dash pattern (dash, gap) in graph units.
	pub dash_pattern: (f64, f64),
	/// Dash travel speed, graph units per second.
	pub flow_speed: f64,
	/// Selection and hover ring stroke, screen pixels.
	pub ring_width: f64,
	pub ring_offset: f64,
	/// Hover glow radius multiplier.
	pub glow_radius: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node_radius: 5.0,
			node_behavior: ScaleBehavior::Clamped {
				min_screen: 3.0,
				max_screen: f64::INFINITY,
			},
			hit_radius: 10.0,
			hit_behavior: ScaleBehavior::Clamped {
				min_screen: 6.0,
				max_screen: f64::INFINITY,
			},
			label_size: 10.0,
			label_min_k: 0.5,
			label_offset: 12.0,
			line_width: 1.0,
			dash_pattern: (4.0, 4.0),
			flow_speed: 10.0,
			ring_width: 1.5,
			ring_offset: 3.0,
			glow_radius: 3.0,
		}
	}
}

/// Scale values resolved for one zoom level, all in graph space.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub node_radius: f64,
	pub hit_radius: f64,
	/// Canvas font size in graph units.
	pub label_size: f64,
	pub label_offset: f64,
	pub line_width: f64,
	pub dash_pattern: (f64, f64),
	pub ring_width: f64,
	pub ring_offset: f64,
	pub glow_radius: f64,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		Self {
			node_radius: config.node_behavior.apply(config.node_radius, k),
			hit_radius: config.hit_behavior.apply(config.hit_radius, k),
			label_size: config.label_size / k.max(config.label_min_k),
			label_offset: config.label_offset,
			line_width: ScaleBehavior::Screen.apply(config.line_width, k),
			dash_pattern: config.dash_pattern,
			ring_width: ScaleBehavior::Screen.apply(config.ring_width, k),
			ring_offset: ScaleBehavior::Screen.apply(config.ring_offset, k),
			glow_radius: ScaleBehavior::World.apply(config.glow_radius, k),
		}
	}

	pub fn label_font(&self, family: &str) -> String {
		format!("{}px {}", self.label_size, family)
	}

	/// Dash offset for the flow animation; dashes travel source → target.
	pub fn dash_offset(flow_time: f64, flow_speed: f64) -> f64 {
		-flow_time * flow_speed
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn screen_values_shrink_in_graph_space_when_zoomed_in() {
		let values = ScaledValues::new(&ScaleConfig::default(), 2.0);
		assert_eq!(values.line_width, 0.5);
		assert_eq!(values.node_radius, 5.0);
	}

	#[test]
	fn clamped_radius_keeps_a_minimum_screen_size() {
		let values = ScaledValues::new(&ScaleConfig::default(), 0.2);
		assert!((values.node_radius * 0.2 - 3.0).abs() < 1e-9);
		assert_eq!(values.label_size, 20.0);
	}
}
