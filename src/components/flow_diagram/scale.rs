//! Visual encodings: colour per category, width per weight.

use crate::flow::NodeCategory;

const LINK_WIDTH_PER_WEIGHT: f64 = 1.2;
const NODE_HEIGHT_PER_WEIGHT: f64 = 2.5;
const NODE_MIN_HEIGHT: f64 = 10.0;
const NODE_MAX_HEIGHT: f64 = 160.0;

pub fn category_color(category: NodeCategory) -> &'static str {
	match category {
		NodeCategory::Robot => "#ff7f0e",
		NodeCategory::Module => "#1f77b4",
		NodeCategory::Supplier => "#2ca02c",
	}
}

/// Stroke width of a link, in world units.
pub fn link_width(weight: f64) -> f64 {
	(weight * LINK_WIDTH_PER_WEIGHT).max(1.0)
}

/// Bar height of a node carrying `throughput`.
pub fn node_height(throughput: f64) -> f64 {
	(throughput * NODE_HEIGHT_PER_WEIGHT).clamp(NODE_MIN_HEIGHT, NODE_MAX_HEIGHT)
}

/// `#rrggbb` to `rgba(r, g, b, alpha)`; anything else is returned unchanged.
pub fn with_alpha(color: &str, alpha: f64) -> String {
	let channel = |range: std::ops::Range<usize>| {
		color
			.get(range)
			.and_then(|hex| u8::from_str_radix(hex, 16).ok())
	};
	match (color.len(), channel(1..3), channel(3..5), channel(5..7)) {
		(7, Some(r), Some(g), Some(b)) if color.starts_with('#') => {
			format!("rgba({r}, {g}, {b}, {alpha})")
		}
		_ => color.to_string(),
	}
}
