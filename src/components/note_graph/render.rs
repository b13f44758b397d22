//! Draws one frame: graph pass under the camera transform, then the
//! screen-space overlay. Reads model and interaction state, never mutates.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::model::EdgeKind;
use super::state::NoteGraphState;
use super::text;

const BACKGROUND: &str = "#1a1a2e";

const NODE_FILL: &str = "#4a90d9";
const NODE_FILL_HOVERED: &str = "#6fb1ff";
const NODE_FILL_SELECTED: &str = "#ffb347";
const NODE_STROKE: &str = "#e8e8f0";
const HOVER_RADIUS_BOOST: f64 = 2.0;
const SELECTED_RADIUS_BOOST: f64 = 4.0;

const EDGE_DIRECT: &str = "rgba(100, 180, 255, 0.55)";
const EDGE_SHARED: &str = "rgba(100, 180, 255, 0.22)";
const EDGE_HIGHLIGHT: &str = "rgba(160, 210, 255, 0.95)";

const LABEL_COLOR: &str = "rgba(255, 255, 255, 0.85)";
const LABEL_PLATE: &str = "rgba(26, 26, 46, 0.72)";

const PANEL_WIDTH: f64 = 260.0;
const PANEL_MARGIN: f64 = 14.0;
const PANEL_PADDING: f64 = 12.0;
const PANEL_PREVIEW_LINES: usize = 4;

pub fn render(state: &NoteGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	if state.model.nodes.is_empty() {
		draw_empty_state(state, ctx);
		return;
	}

	ctx.save();
	let _ = ctx.translate(state.camera.x, state.camera.y);
	let _ = ctx.scale(state.camera.zoom, state.camera.zoom);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();

	draw_overlay(state, ctx);
}

fn draw_empty_state(state: &NoteGraphState, ctx: &CanvasRenderingContext2d) {
	let (cx, cy) = (state.width / 2.0, state.height / 2.0);
	ctx.set_text_align("center");
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
	ctx.set_font("16px sans-serif");
	let _ = ctx.fill_text("No notes to graph yet", cx, cy - 10.0);
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.45)");
	ctx.set_font("13px sans-serif");
	let _ = ctx.fill_text("Create a few linked notes to grow the graph", cx, cy + 14.0);
	ctx.set_text_align("left");
}

fn is_highlighted(state: &NoteGraphState, idx: usize) -> bool {
	state.interaction.hovered == Some(idx) || state.interaction.selected == Some(idx)
}

fn draw_edges(state: &NoteGraphState, ctx: &CanvasRenderingContext2d) {
	for edge in &state.model.edges {
		let (Some(a), Some(b)) = (
			state.model.nodes.get(edge.source),
			state.model.nodes.get(edge.target),
		) else {
			// Stale endpoint, skip rather than fail the frame.
			continue;
		};
		let highlighted = is_highlighted(state, edge.source) || is_highlighted(state, edge.target);

		let (color, width) = match (edge.kind, highlighted) {
			(_, true) => (EDGE_HIGHLIGHT, 2.5),
			(EdgeKind::DirectLink, false) => (EDGE_DIRECT, 1.5),
			(EdgeKind::SharedTag, false) => (EDGE_SHARED, 1.0),
		};
		ctx.set_stroke_style_str(color);
		ctx.set_line_width(width);
		if edge.kind == EdgeKind::SharedTag {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(6.0),
				&JsValue::from_f64(4.0),
			));
		}

		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();

		if edge.kind == EdgeKind::SharedTag {
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}
	}
}

fn draw_nodes(state: &NoteGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_font("11px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("top");
	let measure = |s: &str| ctx.measure_text(s).map(|m| m.width()).unwrap_or(0.0);

	for (idx, node) in state.model.nodes.iter().enumerate() {
		let selected = state.interaction.selected == Some(idx);
		let hovered = state.interaction.hovered == Some(idx);

		let (radius, fill) = if selected {
			(node.radius + SELECTED_RADIUS_BOOST, NODE_FILL_SELECTED)
		} else if hovered {
			(node.radius + HOVER_RADIUS_BOOST, NODE_FILL_HOVERED)
		} else {
			(node.radius, NODE_FILL)
		};

		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(fill);
		ctx.fill();
		ctx.set_stroke_style_str(NODE_STROKE);
		ctx.set_line_width(2.0);
		ctx.stroke();

		let label = text::truncate_to_width(&node.title, radius * 6.0 + 40.0, measure);
		if label.is_empty() {
			continue;
		}
		let label_y = node.y + radius + 4.0;
		if !selected {
			let label_width = measure(&label);
			ctx.set_fill_style_str(LABEL_PLATE);
			ctx.fill_rect(
				node.x - label_width / 2.0 - 3.0,
				label_y - 2.0,
				label_width + 6.0,
				15.0,
			);
		}
		ctx.set_fill_style_str(LABEL_COLOR);
		let _ = ctx.fill_text(&label, node.x, label_y);
	}

	ctx.set_text_baseline("alphabetic");
	ctx.set_text_align("left");
}

fn draw_overlay(state: &NoteGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_font("12px sans-serif");
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.6)");
	let _ = ctx.fill_text(&format!("{} notes", state.model.nodes.len()), 14.0, 24.0);
	let _ = ctx.fill_text(&format!("{} links", state.model.edges.len()), 14.0, 42.0);
	let _ = ctx.fill_text(
		&format!("{:.0}% zoom", state.camera.zoom * 100.0),
		14.0,
		60.0,
	);

	if let Some(idx) = state.interaction.selected {
		if let Some(node) = state.model.nodes.get(idx) {
			draw_detail_panel(state, ctx, node);
		}
	}
}

/// Info box for the selected note, anchored to the top-right corner and
/// drawn last so it sits above the graph.
fn draw_detail_panel(
	state: &NoteGraphState,
	ctx: &CanvasRenderingContext2d,
	node: &super::model::GraphNode,
) {
	let measure = |s: &str| ctx.measure_text(s).map(|m| m.width()).unwrap_or(0.0);
	let inner = PANEL_WIDTH - 2.0 * PANEL_PADDING;
	let x0 = state.width - PANEL_WIDTH - PANEL_MARGIN;
	let y0 = PANEL_MARGIN;

	ctx.set_font("12px sans-serif");
	let preview: String = node.content.chars().take(200).collect();
	let mut lines = text::wrap_text(&preview, inner, measure);
	lines.truncate(PANEL_PREVIEW_LINES);

	let tags: Vec<String> = node.tags.iter().take(3).map(|t| format!("#{t}")).collect();
	let mut panel_h = PANEL_PADDING + 20.0 + lines.len() as f64 * 16.0 + PANEL_PADDING;
	if !tags.is_empty() {
		panel_h += 18.0;
	}

	ctx.set_fill_style_str("#16182e");
	ctx.fill_rect(x0, y0, PANEL_WIDTH, panel_h);
	ctx.set_stroke_style_str("rgba(255, 255, 255, 0.25)");
	ctx.set_line_width(1.0);
	ctx.stroke_rect(x0, y0, PANEL_WIDTH, panel_h);

	let mut y = y0 + PANEL_PADDING + 10.0;
	ctx.set_font("600 13px sans-serif");
	ctx.set_fill_style_str("#ffffff");
	let title = text::truncate_to_width(&node.title, inner, measure);
	let _ = ctx.fill_text(&title, x0 + PANEL_PADDING, y);
	y += 20.0;

	ctx.set_font("12px sans-serif");
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.7)");
	for line in &lines {
		let _ = ctx.fill_text(line, x0 + PANEL_PADDING, y);
		y += 16.0;
	}

	if !tags.is_empty() {
		ctx.set_font("11px sans-serif");
		ctx.set_fill_style_str("#8ab4f8");
		let _ = ctx.fill_text(&tags.join(" "), x0 + PANEL_PADDING, y + 4.0);
	}
}
