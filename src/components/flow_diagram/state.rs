use std::collections::{HashMap, HashSet};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::scale;
use crate::flow::{FlowGraph, NodeCategory};

pub const NODE_WIDTH: f64 = 12.0;
pub const HIT_PADDING: f64 = 4.0;
pub const MARGIN: f64 = 24.0;

/// Horizontal position of each tier, as a fraction of the canvas width.
const COLUMNS: [f64; 3] = [0.12, 0.5, 0.88];

pub fn column_x(category: NodeCategory, width: f64) -> f64 {
	COLUMNS[category.tier()] * width
}

#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub label: String,
	pub category: NodeCategory,
	pub height: f64,
}

#[derive(Clone, Debug)]
pub struct LinkInfo {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub weight: f64,
	pub color: &'static str,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_y: f64,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

/// Simulation and interaction state for one flow graph.
///
/// Layout is delegated to the force simulation; every node is pinned to the
/// column of its tier after each step, so only vertical spacing is simulated.
pub struct FlowDiagramState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	links: Vec<LinkInfo>,
	columns: HashMap<DefaultNodeIdx, f64>,
}

impl FlowDiagramState {
	pub fn new(data: &FlowGraph, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 120.0,
			force_spring: 0.04,
			force_max: 80.0,
			node_speed: 2000.0,
			damping_factor: 0.85,
		});
		let mut idx_of = vec![None; data.nodes.len()];
		let mut columns = HashMap::new();

		for category in NodeCategory::ALL {
			let members: Vec<usize> = data.nodes_in(category).collect();
			let x = column_x(category, width);
			for (slot, &i) in members.iter().enumerate() {
				let y = height * (slot + 1) as f64 / (members.len() + 1) as f64;
				let idx = graph.add_node(NodeData {
					x: x as f32,
					y: y as f32,
					mass: 10.0,
					is_anchor: category == NodeCategory::Robot,
					user_data: NodeInfo {
						label: data.nodes[i].name.clone(),
						category,
						height: scale::node_height(data.throughput(i)),
					},
				});
				idx_of[i] = Some(idx);
				columns.insert(idx, x);
			}
		}

		let mut links = Vec::with_capacity(data.edges.len());
		for edge in &data.edges {
			if let (Some(src), Some(tgt)) = (idx_of[edge.source], idx_of[edge.target]) {
				graph.add_edge(src, tgt, EdgeData::default());
				links.push(LinkInfo {
					source: src,
					target: tgt,
					weight: edge.weight,
					color: scale::category_color(data.nodes[edge.source].category),
				});
			}
		}

		Self {
			graph,
			links,
			columns,
			transform: ViewTransform {
				x: 0.0,
				y: 0.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
		}
	}

	pub fn links(&self) -> &[LinkInfo] {
		&self.links
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = ((node.x() as f64 - gx).abs(), (node.y() as f64 - gy).abs());
			if dx <= NODE_WIDTH / 2.0 + HIT_PADDING
				&& dy <= node.data.user_data.height / 2.0 + HIT_PADDING
			{
				found = Some(node.index());
			}
		});
		found
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// keep the old highlight around while it fades out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for link in &self.links {
				if link.source == idx {
					self.hover.neighbors.insert(link.target);
				} else if link.target == idx {
					self.hover.neighbors.insert(link.source);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	/// Move a node vertically; its column never changes.
	pub fn drag_node_to(&mut self, idx: DefaultNodeIdx, y: f32) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.y = y;
				node.data.is_anchor = true;
			}
		});
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.pin_to_columns();
		self.flow_time += dt as f64;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	fn pin_to_columns(&mut self) {
		let (columns, height) = (&self.columns, self.height);
		self.graph.visit_nodes_mut(|node| {
			if let Some(&x) = columns.get(&node.index()) {
				node.data.x = x as f32;
			}
			let half = node.data.user_data.height / 2.0;
			let (lo, hi) = (MARGIN + half, (height - MARGIN - half).max(MARGIN + half));
			node.data.y = (node.data.y as f64).clamp(lo, hi) as f32;
		});
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		let ratio = width / self.width;
		for x in self.columns.values_mut() {
			*x *= ratio;
		}
		self.width = width;
		self.height = height;
		self.pin_to_columns();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dataset::RobotStore;
	use crate::flow::build_flow_graph;

	fn spot_graph() -> FlowGraph {
		let store = RobotStore::from_json(
			r#"{"last_updated": "x", "robots": {"spot": {"name": "Spot", "modules": {
				"Locomotion": {"suppliers": ["Acme", "Bolt"]},
				"Vision": {"suppliers": ["Acme"]}
			}}}}"#,
		)
		.unwrap();
		build_flow_graph(store.get("spot").unwrap())
	}

	fn positions(state: &FlowDiagramState) -> Vec<(String, NodeCategory, f64, f64)> {
		let mut out = Vec::new();
		state.graph.visit_nodes(|node| {
			out.push((
				node.data.user_data.label.clone(),
				node.data.user_data.category,
				node.x() as f64,
				node.y() as f64,
			));
		});
		out
	}

	#[test]
	fn nodes_start_in_their_tier_column() {
		let state = FlowDiagramState::new(&spot_graph(), 800.0, 400.0);
		let placed = positions(&state);
		assert_eq!(placed.len(), 5);
		assert_eq!(state.links().len(), 5);
		for (_, category, x, _) in placed {
			assert!((x - column_x(category, 800.0)).abs() < 1e-3);
		}
	}

	#[test]
	fn columns_survive_simulation_steps() {
		let mut state = FlowDiagramState::new(&spot_graph(), 800.0, 400.0);
		for _ in 0..120 {
			state.tick(0.016);
		}
		for (label, category, x, y) in positions(&state) {
			assert!((x - column_x(category, 800.0)).abs() < 1e-3, "{label} left its column");
			assert!(y.is_finite() && y >= MARGIN && y <= 400.0 - MARGIN, "{label} at y={y}");
		}
	}

	#[test]
	fn hover_highlights_direct_neighbors() {
		let mut state = FlowDiagramState::new(&spot_graph(), 800.0, 400.0);
		let mut locomotion = None;
		let mut vision = None;
		state.graph.visit_nodes(|node| match node.data.user_data.label.as_str() {
			"Locomotion" => locomotion = Some(node.index()),
			"Vision" => vision = Some(node.index()),
			_ => {}
		});
		let (locomotion, vision) = (locomotion.unwrap(), vision.unwrap());

		state.set_hover(Some(locomotion));
		assert_eq!(state.hover.neighbors.len(), 3);
		assert!(state.is_hovered(locomotion));
		assert!(!state.is_highlighted(vision));

		state.set_hover(None);
		assert!(state.has_active_highlight());
		assert_eq!(state.hover.prev_node, Some(locomotion));
	}

	#[test]
	fn robot_bar_is_found_by_hit_test() {
		let state = FlowDiagramState::new(&spot_graph(), 800.0, 400.0);
		let hit = state.node_at_position(column_x(NodeCategory::Robot, 800.0), 200.0);
		let mut robot = None;
		state.graph.visit_nodes(|node| {
			if node.data.user_data.category == NodeCategory::Robot {
				robot = Some(node.index());
			}
		});
		assert_eq!(hit, robot);
		assert_eq!(state.node_at_position(400.0, 5.0), None);
	}
}
