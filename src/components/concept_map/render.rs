use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{ConceptMapState, NODE_HEIGHT, NODE_WIDTH};
use crate::types::ConceptNode;

const BACKGROUND: &str = "#171730";
const GRID_STEP: f64 = 100.0;
const GRID_EXTENT: f64 = 3000.0;

// Connector anchors relative to a card's top-left, matching the card art.
const ANCHOR_DY: f64 = 30.0;
const SOURCE_DX: f64 = 100.0;

// Card gradient per depth, cycled.
const PALETTE: &[(&str, &str)] = &[
	("#6366f1", "#8b5cf6"),
	("#10b981", "#14b8a6"),
	("#f59e0b", "#ef4444"),
	("#ec4899", "#f43f5e"),
	("#3b82f6", "#06b6d4"),
];

/// Paints the whole map from the current state. Called synchronously
/// after every interaction; there is no animation loop.
pub fn render(state: &ConceptMapState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let _ = ctx.translate(state.viewport.pan_x, state.viewport.pan_y);
	let _ = ctx.scale(state.viewport.zoom, state.viewport.zoom);
	draw_grid(ctx);
	draw_edges(state, ctx);
	draw_node(state, ctx, state.tree(), 0);
	ctx.restore();
}

fn draw_grid(ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.15)");
	let mut y = 0.0;
	while y <= GRID_EXTENT {
		let mut x = 0.0;
		while x <= GRID_EXTENT {
			ctx.begin_path();
			let _ = ctx.arc(x, y, 1.5, 0.0, 2.0 * PI);
			ctx.fill();
			x += GRID_STEP;
		}
		y += GRID_STEP;
	}
}

fn draw_edges(state: &ConceptMapState, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str("rgba(139, 92, 246, 0.6)");
	ctx.set_line_width(3.0);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(5.0),
		&JsValue::from_f64(5.0),
	));

	for edge in state.edges() {
		let (x1, y1) = (edge.from.x + SOURCE_DX, edge.from.y + ANCHOR_DY);
		let (x2, y2) = (edge.to.x, edge.to.y + ANCHOR_DY);
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.bezier_curve_to(x1 + 50.0, y1, x2 - 50.0, y2, x2, y2);
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_node(state: &ConceptMapState, ctx: &CanvasRenderingContext2d, node: &ConceptNode, depth: usize) {
	let Some(pos) = state.positions().get(&node.id) else {
		return;
	};
	let (x, y) = (pos.x, pos.y);
	let (from, to) = PALETTE[depth % PALETTE.len()];

	let gradient = ctx.create_linear_gradient(x, y, x + NODE_WIDTH, y + NODE_HEIGHT);
	gradient.add_color_stop(0.0, from).unwrap();
	gradient.add_color_stop(1.0, to).unwrap();
	rounded_rect(ctx, x, y, NODE_WIDTH, NODE_HEIGHT, 16.0);
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill();
	ctx.set_stroke_style_str("rgba(255, 255, 255, 0.3)");
	ctx.set_line_width(2.0);
	ctx.stroke();

	ctx.set_fill_style_str("white");
	ctx.set_font("bold 14px sans-serif");
	let _ = ctx.fill_text_with_max_width(&node.label, x + 16.0, y + 28.0, NODE_WIDTH - 48.0);

	if !node.is_leaf() {
		let n = node.children.len();
		ctx.set_font("11px sans-serif");
		ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
		let unit = if n == 1 { "child" } else { "children" };
		let _ = ctx.fill_text(&format!("{n} {unit}"), x + 16.0, y + 50.0);

		let open = state.expansion.is_open(&node.id);
		ctx.set_font("14px sans-serif");
		let _ = ctx.fill_text(if open { "▾" } else { "▸" }, x + NODE_WIDTH - 26.0, y + 40.0);

		if open {
			for child in &node.children {
				draw_node(state, ctx, child, depth + 1);
			}
		}
	}
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}
