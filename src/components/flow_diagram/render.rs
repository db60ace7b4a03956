use std::collections::HashMap;

use force_graph::DefaultNodeIdx;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scale;
use super::state::{FlowDiagramState, NODE_WIDTH};

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// Blank the canvas; used when there is no graph worth drawing.
pub fn clear(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
	ctx.clear_rect(0.0, 0.0, width, height);
}

pub fn render(state: &FlowDiagramState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

/// Centre of every bar, keyed by node.
fn anchors(state: &FlowDiagramState) -> HashMap<DefaultNodeIdx, (f64, f64)> {
	let mut out = HashMap::new();
	state.graph.visit_nodes(|node| {
		out.insert(node.index(), (node.x() as f64, node.y() as f64));
	});
	out
}

fn draw_links(state: &FlowDiagramState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (dash, gap) = (10.0 / k, 6.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = ease_out_cubic(state.hover.highlight_t);
	let positions = anchors(state);
	let half = NODE_WIDTH / 2.0;

	for link in state.links() {
		let (Some(&(x1, y1)), Some(&(x2, y2))) =
			(positions.get(&link.source), positions.get(&link.target))
		else {
			continue;
		};
		let (x1, x2) = (x1 + half, x2 - half);

		let is_highlighted =
			state.is_highlighted(link.source) && state.is_highlighted(link.target);
		// t=0: every link at 0.45; t=1: highlighted at 0.85, the rest at 0.1
		let alpha = if is_highlighted {
			0.45 + 0.4 * t
		} else {
			0.45 - 0.35 * t
		};

		ctx.set_stroke_style_str(&scale::with_alpha(link.color, alpha));
		ctx.set_line_width(scale::link_width(link.weight));
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(dash_offset);

		let mid = (x1 + x2) / 2.0;
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.bezier_curve_to(mid, y1, mid, y2, x2, y2);
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(state: &FlowDiagramState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);
	let mid_x = state.width / 2.0;

	ctx.set_font(&format!("{}px sans-serif", 12.0 / k.max(0.5)));
	ctx.set_text_baseline("middle");

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let dimmed = has_highlight && !state.is_highlighted(idx);
		let alpha = if dimmed { 1.0 - 0.7 * t } else { 1.0 };
		let (left, top) = (x - NODE_WIDTH / 2.0, y - info.height / 2.0);

		ctx.set_global_alpha(alpha);
		ctx.set_fill_style_str(scale::category_color(info.category));
		ctx.fill_rect(left, top, NODE_WIDTH, info.height);

		if state.is_hovered(idx) && t > 0.01 {
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
			ctx.set_line_width(1.5 / k);
			let pad = 2.0 / k;
			ctx.stroke_rect(
				left - pad,
				top - pad,
				NODE_WIDTH + 2.0 * pad,
				info.height + 2.0 * pad,
			);
		}

		ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", alpha * 0.85));
		if x <= mid_x {
			ctx.set_text_align("start");
			let _ = ctx.fill_text(&info.label, x + NODE_WIDTH / 2.0 + 6.0, y);
		} else {
			ctx.set_text_align("end");
			let _ = ctx.fill_text(&info.label, x - NODE_WIDTH / 2.0 - 6.0, y);
		}
		ctx.set_global_alpha(1.0);
	});
}
