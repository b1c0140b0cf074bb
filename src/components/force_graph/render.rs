//! Canvas rendering for the connection graph.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background wash (screen space)
//! 2. Permanent links, then dashed suggestion links (graph space)
//! 3. Suggestion halos, dimmed nodes, highlighted nodes on top
//! 4. Selection ring and labels

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::{EdgeInfo, ForceGraphState};
use super::theme::{Color, Theme};
use super::types::LinkKind;

fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Draws one frame.
pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, config: &ScaleConfig, theme: &Theme) {
	let scale = ScaledValues::new(config, state.transform.k);

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, config, &scale, theme);
	draw_nodes(state, ctx, &scale, theme);
	draw_selection(state, ctx, &scale, theme);
	draw_labels(state, ctx, &scale, theme);

	ctx.restore();

	if theme.background.vignette > 0.0 {
		draw_vignette(state, ctx, theme);
	}
}

fn draw_background(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (cx, cy) = (state.width / 2.0, state.height / 2.0);
	let gradient = theme
		.background
		.use_gradient
		.then(|| ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, state.width.max(state.height) * 0.8).ok())
		.flatten();

	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &theme.background.color.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.background.color_secondary.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&theme.background.color.to_css()),
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_vignette(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (cx, cy) = (state.width / 2.0, state.height / 2.0);
	let Ok(gradient) = ctx.create_radial_gradient(
		cx,
		cy,
		state.width.min(state.height) * 0.3,
		cx,
		cy,
		state.width.max(state.height) * 0.7,
	) else {
		return;
	};

	let _ = gradient.add_color_stop(0.0, "rgba(0, 0, 0, 0)");
	let _ = gradient.add_color_stop(1.0, &format!("rgba(0, 0, 0, {})", theme.background.vignette));

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_edges(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let max_t = smooth_step(state.highlight.max_intensity());

	let _ = ctx.set_line_dash(&js_sys::Array::new());
	for edge in state.edges.iter().filter(|e| e.kind == LinkKind::Permanent) {
		draw_edge(state, ctx, scale, edge, theme.edge.color, scale.line_width, max_t);
	}

	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(scale.dash_pattern.0),
		&JsValue::from_f64(scale.dash_pattern.1),
	));
	ctx.set_line_dash_offset(ScaledValues::dash_offset(state.flow_time, config.flow_speed));
	let width = scale.line_width * theme.edge.ephemeral_width;
	for edge in state.edges.iter().filter(|e| e.kind == LinkKind::Ephemeral) {
		draw_edge(state, ctx, scale, edge, theme.edge.ephemeral_color, width, max_t);
	}

	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_edge(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	edge: &EdgeInfo,
	color: Color,
	width: f64,
	max_t: f64,
) {
	let (x1, y1) = state.position(edge.source);
	let (x2, y2) = state.position(edge.target);
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = dx.hypot(dy);
	if dist < 0.001 {
		return;
	}

	let edge_t = smooth_step(state.highlight.edge_intensity(edge.source, edge.target));
	let (alpha, width) = if edge_t > 0.01 {
		(1.0 + 1.5 * edge_t, width * (1.0 + 0.5 * edge_t))
	} else if max_t > 0.01 {
		(1.0 - 0.6 * max_t, width)
	} else {
		(1.0, width)
	};

	let r1 = scale.node_radius * state.nodes[edge.source].size;
	let r2 = scale.node_radius * state.nodes[edge.target].size;
	let (ux, uy) = (dx / dist, dy / dist);

	ctx.set_stroke_style_str(&color.with_alpha((color.a * alpha).min(1.0)).to_css());
	ctx.set_line_width(width);
	ctx.begin_path();
	ctx.move_to(x1 + ux * r1, y1 + uy * r1);
	ctx.line_to(x2 - ux * r2, y2 - uy * r2);
	ctx.stroke();
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, scale: &ScaledValues, theme: &Theme) {
	let max_t = smooth_step(state.highlight.max_intensity());
	let has_highlight = max_t > 0.01;
	let breath = (state.flow_time * theme.node.pulse_speed).sin() * theme.node.pulse_intensity;

	// Pass 1: suggestion halos
	for (slot, info) in state.nodes.iter().enumerate().filter(|(_, n)| n.ephemeral) {
		let (x, y) = state.position(slot);
		let radius = scale.node_radius * info.size;
		draw_halo(ctx, x, y, radius, theme.node.ephemeral_glow * (1.0 + breath), info.color);
	}

	// Pass 2: nodes outside the hover neighbourhood
	for slot in 0..state.nodes.len() {
		if state.highlight.node_intensity(slot) > 0.001 {
			continue;
		}
		let (alpha, radius_mult) = if has_highlight {
			(1.0 - 0.6 * max_t, 1.0 - 0.15 * max_t)
		} else {
			(1.0, 1.0)
		};
		draw_node(state, ctx, scale, theme, slot, alpha, radius_mult);
	}

	// Pass 3: hovered node and its neighbours on top
	for slot in 0..state.nodes.len() {
		let node_t = state.highlight.node_intensity(slot);
		if node_t <= 0.001 {
			continue;
		}
		let eased_t = smooth_step(node_t);
		let hover_t = smooth_step(state.highlight.hover_ring_intensity(slot));
		let radius_mult = 1.0 + (0.25 + 0.15 * hover_t) * eased_t;
		draw_node(state, ctx, scale, theme, slot, 1.0, radius_mult);

		if hover_t > 0.01 {
			let info = &state.nodes[slot];
			let (x, y) = state.position(slot);
			let radius = scale.node_radius * info.size * radius_mult;
			draw_halo(ctx, x, y, radius, scale.glow_radius * radius * hover_t, info.color);

			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + scale.ring_offset, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&info.color.with_alpha(0.6 * hover_t).to_css());
			ctx.set_line_width(scale.ring_width);
			ctx.stroke();
		}
	}
}

fn draw_node(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	slot: usize,
	alpha: f64,
	radius_mult: f64,
) {
	let info = &state.nodes[slot];
	let (x, y) = state.position(slot);
	let radius = scale.node_radius * info.size * radius_mult;
	let fill_alpha = if info.ephemeral {
		theme.node.ephemeral_fill_alpha
	} else {
		theme.node.fill_alpha
	};

	ctx.set_global_alpha(alpha);

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	let gradient = theme
		.node
		.use_gradient
		.then(|| ctx.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius).ok())
		.flatten();
	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &info.color.lighten(0.4).with_alpha(fill_alpha).to_css());
			let _ = gradient.add_color_stop(0.7, &info.color.with_alpha(fill_alpha).to_css());
			let _ = gradient.add_color_stop(1.0, &info.color.darken(0.2).with_alpha(fill_alpha).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&info.color.with_alpha(fill_alpha).to_css()),
	}
	ctx.fill();

	if theme.node.border_width > 0.0 {
		ctx.set_stroke_style_str(&theme.node.border_color.to_css());
		ctx.set_line_width(theme.node.border_width / state.transform.k);
		ctx.stroke();
	}

	ctx.set_global_alpha(1.0);
}

/// Soft blurred disc behind a node.
fn draw_halo(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64, blur: f64, color: Color) {
	if blur < 0.5 {
		return;
	}
	ctx.save();
	ctx.set_shadow_blur(blur);
	ctx.set_shadow_color(&color.to_css_rgb());
	ctx.set_fill_style_str(&color.with_alpha(0.35).to_css());
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.fill();
	ctx.restore();
}

fn draw_selection(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, scale: &ScaledValues, theme: &Theme) {
	let Some(slot) = state.selected else {
		return;
	};
	let Some(info) = state.nodes.get(slot) else {
		return;
	};
	let (x, y) = state.position(slot);
	let radius = scale.node_radius * info.size + scale.ring_offset;

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_stroke_style_str(&theme.node.selection_color.to_css());
	ctx.set_line_width(scale.ring_width);
	ctx.stroke();
}

fn draw_labels(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, scale: &ScaledValues, theme: &Theme) {
	let max_t = smooth_step(state.highlight.max_intensity());
	ctx.set_font(&scale.label_font(theme.label.font_family));

	for (slot, info) in state.nodes.iter().enumerate() {
		let (x, y) = state.position(slot);
		let node_t = smooth_step(state.highlight.node_intensity(slot));
		let alpha = if node_t > 0.01 {
			0.8 + 0.2 * node_t
		} else {
			0.8 - 0.5 * max_t
		};
		let color = if info.ephemeral {
			theme.label.ephemeral_color
		} else {
			theme.label.color
		};
		ctx.set_fill_style_str(&color.with_alpha(alpha).to_css());
		let _ = ctx.fill_text(&info.label, x + scale.label_offset, y + scale.label_size * 0.4);
	}
}
