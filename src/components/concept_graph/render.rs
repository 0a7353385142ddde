//! Canvas rendering for the concept graph.
//!
//! Drawing passes, back to front: background, prerequisite edges with
//! arrowheads, nodes colored by readiness band, expanded-marker rings,
//! labels. Positions are read live from the simulation every frame.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::{ConceptGraphState, NodeInfo};
use super::theme::{Color, Theme};

/// Renders the complete graph to the canvas.
pub fn render(
	state: &ConceptGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.transform.k);

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, &scale, theme);
	draw_nodes(state, ctx, &scale, theme);

	ctx.restore();
}

fn draw_background(state: &ConceptGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	if theme.background.use_gradient {
		let gradient = ctx
			.create_radial_gradient(
				state.width / 2.0,
				state.height / 2.0,
				0.0,
				state.width / 2.0,
				state.height / 2.0,
				(state.width.max(state.height)) * 0.8,
			)
			.unwrap();

		gradient
			.add_color_stop(0.0, &theme.background.color_secondary.to_css())
			.unwrap();
		gradient
			.add_color_stop(1.0, &theme.background.color.to_css())
			.unwrap();

		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
	} else {
		ctx.set_fill_style_str(&theme.background.color.to_css());
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

/// Snapshot of node positions for edge drawing, collected once per frame.
fn positions(state: &ConceptGraphState) -> HashMap<DefaultNodeIdx, (f64, f64)> {
	let mut map = HashMap::new();
	state.graph.visit_nodes(|node| {
		map.insert(node.index(), (node.x() as f64, node.y() as f64));
	});
	map
}

fn draw_edges(
	state: &ConceptGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let pos = positions(state);
	let color = &theme.edge.color;

	for &(src, tgt, weight) in state.weighted_edges() {
		let (Some(&(x1, y1)), Some(&(x2, y2))) = (pos.get(&src), pos.get(&tgt)) else {
			continue;
		};
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);

		// Heavier prerequisite weight reads as a thicker, more opaque line.
		let emphasis = 0.5 + weight.clamp(0.0, 1.0) * theme.edge.weight_emphasis;
		let alpha = color.a * (0.5 + 0.5 * weight.clamp(0.0, 1.0));
		ctx.set_stroke_style_str(
			&Color::rgba(color.r, color.g, color.b, alpha).to_css(),
		);
		ctx.set_line_width(scale.edge_line_width * emphasis);

		ctx.begin_path();
		ctx.move_to(x1 + ux * scale.node_radius, y1 + uy * scale.node_radius);
		ctx.line_to(
			x2 - ux * (scale.node_radius + scale.arrow_size),
			y2 - uy * (scale.node_radius + scale.arrow_size),
		);
		ctx.stroke();

		if !scale.cull_arrows {
			draw_arrowhead(ctx, scale, color, alpha, x2, y2, ux, uy);
		}
	}
}

#[allow(clippy::too_many_arguments)]
fn draw_arrowhead(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	color: &Color,
	alpha: f64,
	x2: f64,
	y2: f64,
	ux: f64,
	uy: f64,
) {
	ctx.set_fill_style_str(&Color::rgba(color.r, color.g, color.b, alpha).to_css());

	let (tip_x, tip_y) = (x2 - ux * scale.node_radius, y2 - uy * scale.node_radius);
	let (back_x, back_y) = (tip_x - ux * scale.arrow_size, tip_y - uy * scale.arrow_size);
	let (px, py) = (-uy * scale.arrow_size * 0.5, ux * scale.arrow_size * 0.5);

	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_nodes(
	state: &ConceptGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let hovered = state.hovered;

	state.graph.visit_nodes(|node| {
		let is_hovered = hovered == Some(node.index());
		draw_node(ctx, &node.data.user_data, node.x() as f64, node.y() as f64, scale, theme, is_hovered);
	});
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	info: &NodeInfo,
	x: f64,
	y: f64,
	scale: &ScaledValues,
	theme: &Theme,
	is_hovered: bool,
) {
	let radius = scale.node_radius * if is_hovered { 1.3 } else { 1.0 };

	if theme.node.use_gradient {
		let base = parse_color(&info.color);
		let gradient = ctx
			.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
			.unwrap();
		gradient
			.add_color_stop(0.0, &base.lighten(0.4).to_css())
			.unwrap();
		gradient.add_color_stop(0.7, &base.to_css()).unwrap();
		gradient
			.add_color_stop(1.0, &base.darken(0.2).to_css())
			.unwrap();

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
		ctx.fill();
	} else {
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();
	}

	if theme.node.border_width > 0.0 {
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(&theme.node.border_color.to_css());
		ctx.set_line_width(theme.node.border_width / scale.k);
		ctx.stroke();
	}

	if info.expanded {
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius + scale.ring_offset, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(&theme.node.expanded_ring_color.to_css());
		ctx.set_line_width(scale.ring_width);
		ctx.stroke();
	}

	if is_hovered || scale.k > 0.6 {
		ctx.set_fill_style_str(&theme.label_color.to_css());
		ctx.set_font(&scale.label_font);
		let _ = ctx.fill_text(&info.label, x + radius + 4.0, y + 3.0);
	}
}

/// Parses a CSS color string into a [`Color`].
/// Supports hex (`#RRGGBB`) and `rgb()`/`rgba()` functional notation.
fn parse_color(color_str: &str) -> Color {
	if color_str.starts_with('#') && color_str.len() == 7 {
		let r = u8::from_str_radix(&color_str[1..3], 16).unwrap_or(128);
		let g = u8::from_str_radix(&color_str[3..5], 16).unwrap_or(128);
		let b = u8::from_str_radix(&color_str[5..7], 16).unwrap_or(128);
		Color::rgb(r, g, b)
	} else if color_str.starts_with("rgb") {
		let nums: Vec<&str> = color_str
			.trim_start_matches("rgba(")
			.trim_start_matches("rgb(")
			.trim_end_matches(')')
			.split(',')
			.collect();
		let r = nums
			.first()
			.and_then(|s| s.trim().parse().ok())
			.unwrap_or(128);
		let g = nums
			.get(1)
			.and_then(|s| s.trim().parse().ok())
			.unwrap_or(128);
		let b = nums
			.get(2)
			.and_then(|s| s.trim().parse().ok())
			.unwrap_or(128);
		let a = nums
			.get(3)
			.and_then(|s| s.trim().parse().ok())
			.unwrap_or(1.0);
		Color::rgba(r, g, b, a)
	} else {
		Color::rgb(128, 128, 128)
	}
}
