//! Layered robot → module → supplier flow graph.
//!
//! Nodes are identified by their `(category, name)` pair, so a supplier that
//! happens to share a module's name stays a separate node, while a supplier
//! shared by several modules is added once and receives one edge per module.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::dataset::RobotRecord;

/// Weight of every robot → module edge.
pub const ROBOT_MODULE_WEIGHT: f64 = 10.0;
/// Weight of every module → supplier edge.
pub const MODULE_SUPPLIER_WEIGHT: f64 = 2.0;

/// Tier a node belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeCategory {
	/// The robot itself, always node 0.
	Robot,
	/// A functional subsystem.
	Module,
	/// An external vendor.
	Supplier,
}

impl NodeCategory {
	/// All tiers, left to right.
	pub const ALL: [Self; 3] = [Self::Robot, Self::Module, Self::Supplier];

	/// Column of this tier in a layered drawing.
	pub fn tier(self) -> usize {
		match self {
			Self::Robot => 0,
			Self::Module => 1,
			Self::Supplier => 2,
		}
	}
}

impl fmt::Display for NodeCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Robot => "robot",
			Self::Module => "module",
			Self::Supplier => "supplier",
		})
	}
}

/// A named node in one flow graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GraphNode {
	/// Display name.
	pub name: String,
	/// Tier.
	pub category: NodeCategory,
}

/// A directed, weighted edge between two node indices.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphEdge {
	/// Index of the upstream node.
	pub source: usize,
	/// Index of the downstream node.
	pub target: usize,
	/// Flow weight.
	pub weight: f64,
}

/// Nodes and edges handed to the diagram renderer.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FlowGraph {
	/// Nodes in insertion order: robot, modules, then suppliers.
	pub nodes: Vec<GraphNode>,
	/// Robot → module edges first, then module → supplier edges per module.
	pub edges: Vec<GraphEdge>,
}

impl FlowGraph {
	/// A graph without edges has nothing to draw.
	pub fn is_empty(&self) -> bool {
		self.edges.is_empty()
	}

	/// Indices of the nodes in `category`, in insertion order.
	pub fn nodes_in(&self, category: NodeCategory) -> impl Iterator<Item = usize> + '_ {
		self.nodes
			.iter()
			.enumerate()
			.filter(move |(_, node)| node.category == category)
			.map(|(idx, _)| idx)
	}

	/// Larger of the incoming and outgoing weight sums of a node.
	pub fn throughput(&self, idx: usize) -> f64 {
		let (incoming, outgoing) = self.edges.iter().fold((0.0, 0.0), |(i, o), edge| {
			(
				i + if edge.target == idx { edge.weight } else { 0.0 },
				o + if edge.source == idx { edge.weight } else { 0.0 },
			)
		});
		f64::max(incoming, outgoing)
	}
}

#[derive(Default)]
struct GraphAssembler<'r> {
	nodes: Vec<GraphNode>,
	index: HashMap<(NodeCategory, &'r str), usize>,
	edges: Vec<GraphEdge>,
}

impl<'r> GraphAssembler<'r> {
	fn add_node(&mut self, name: &'r str, category: NodeCategory) -> usize {
		if let Some(&idx) = self.index.get(&(category, name)) {
			return idx;
		}
		let idx = self.nodes.len();
		self.nodes.push(GraphNode {
			name: name.to_string(),
			category,
		});
		self.index.insert((category, name), idx);
		idx
	}

	fn add_edge(&mut self, source: usize, target: usize, weight: f64) {
		self.edges.push(GraphEdge {
			source,
			target,
			weight,
		});
	}

	fn finish(self) -> FlowGraph {
		FlowGraph {
			nodes: self.nodes,
			edges: self.edges,
		}
	}
}

/// Build the flow graph of one robot.
pub fn build_flow_graph(robot: &RobotRecord) -> FlowGraph {
	let mut graph = GraphAssembler::default();

	let root = graph.add_node(&robot.name, NodeCategory::Robot);
	let modules: Vec<usize> = robot
		.modules
		.keys()
		.map(|name| graph.add_node(name, NodeCategory::Module))
		.collect();
	let suppliers: Vec<Vec<usize>> = robot
		.modules
		.values()
		.map(|info| {
			info.suppliers
				.iter()
				.map(|name| graph.add_node(name, NodeCategory::Supplier))
				.collect()
		})
		.collect();

	for &module in &modules {
		graph.add_edge(root, module, ROBOT_MODULE_WEIGHT);
	}
	for (module, targets) in modules.into_iter().zip(suppliers) {
		for supplier in targets {
			graph.add_edge(module, supplier, MODULE_SUPPLIER_WEIGHT);
		}
	}

	let graph = graph.finish();
	log::debug!(
		"flow graph for {}: {} nodes, {} edges",
		robot.name,
		graph.nodes.len(),
		graph.edges.len()
	);
	graph
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use indexmap::IndexMap;
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::dataset::{ModuleInfo, SpecValue};

	fn robot(name: &str, modules: &[(&str, &[&str])]) -> RobotRecord {
		RobotRecord {
			id: name.to_lowercase(),
			name: name.into(),
			manufacturer: SpecValue::NotApplicable,
			kind: SpecValue::NotApplicable,
			specs: IndexMap::new(),
			modules: modules
				.iter()
				.map(|(module, suppliers)| {
					(
						module.to_string(),
						ModuleInfo {
							components: Vec::new(),
							suppliers: suppliers.iter().map(|s| s.to_string()).collect(),
						},
					)
				})
				.collect(),
		}
	}

	fn names(graph: &FlowGraph) -> Vec<(&str, NodeCategory)> {
		graph
			.nodes
			.iter()
			.map(|n| (n.name.as_str(), n.category))
			.collect()
	}

	fn edges(graph: &FlowGraph) -> Vec<(&str, &str, f64)> {
		graph
			.edges
			.iter()
			.map(|e| {
				(
					graph.nodes[e.source].name.as_str(),
					graph.nodes[e.target].name.as_str(),
					e.weight,
				)
			})
			.collect()
	}

	#[test]
	fn spot_with_shared_supplier() {
		let spot = robot(
			"Spot",
			&[("Locomotion", &["Acme", "Bolt"]), ("Vision", &["Acme"])],
		);
		let graph = build_flow_graph(&spot);

		use NodeCategory::*;
		assert_eq!(
			names(&graph),
			vec![
				("Spot", Robot),
				("Locomotion", Module),
				("Vision", Module),
				("Acme", Supplier),
				("Bolt", Supplier),
			]
		);
		assert_eq!(
			edges(&graph),
			vec![
				("Spot", "Locomotion", 10.0),
				("Spot", "Vision", 10.0),
				("Locomotion", "Acme", 2.0),
				("Locomotion", "Bolt", 2.0),
				("Vision", "Acme", 2.0),
			]
		);
		let into_acme = graph.edges.iter().filter(|e| e.target == 3).count();
		assert_eq!(into_acme, 2);
	}

	#[test]
	fn counts_follow_module_and_supplier_totals() {
		let record = robot(
			"Atlas",
			&[
				("Perception", &["Various", "Intel", "Velodyne"]),
				("Locomotion", &["Various", "Moog"]),
				("Power", &[]),
				("Compute", &["Intel"]),
			],
		);
		let graph = build_flow_graph(&record);

		let n = record.modules.len();
		let m: usize = record.modules.values().map(|i| i.suppliers.len()).sum();
		let unique: HashSet<&String> = record
			.modules
			.values()
			.flat_map(|i| i.suppliers.iter())
			.collect();
		assert_eq!(graph.nodes.len(), 1 + n + unique.len());
		assert_eq!(graph.edges.len(), n + m);
		assert!(
			graph
				.edges
				.iter()
				.all(|e| e.source < graph.nodes.len() && e.target < graph.nodes.len())
		);
	}

	#[test]
	fn edges_only_go_one_tier_down() {
		let record = robot("Digit", &[("Arms", &["Agility"]), ("Legs", &["Agility", "Maxon"])]);
		let graph = build_flow_graph(&record);
		for edge in &graph.edges {
			let from = graph.nodes[edge.source].category.tier();
			let to = graph.nodes[edge.target].category.tier();
			assert_eq!(to, from + 1);
		}
	}

	#[test]
	fn rebuilding_is_deterministic() {
		let record = robot("Spot", &[("Locomotion", &["Acme", "Bolt"]), ("Vision", &["Acme"])]);
		assert_eq!(build_flow_graph(&record), build_flow_graph(&record));
	}

	#[test]
	fn module_without_suppliers_keeps_robot_edge() {
		let graph = build_flow_graph(&robot("Pepper", &[("Speech", &[])]));
		assert_eq!(edges(&graph), vec![("Pepper", "Speech", 10.0)]);
	}

	#[test]
	fn robot_without_modules_is_a_lone_node() {
		let graph = build_flow_graph(&robot("Roomba", &[]));
		assert_eq!(names(&graph), vec![("Roomba", NodeCategory::Robot)]);
		assert!(graph.is_empty());
	}

	#[test]
	fn same_name_in_different_tiers_stays_distinct() {
		let graph = build_flow_graph(&robot("Nao", &[("Aldebaran", &["Aldebaran"])]));
		assert_eq!(graph.nodes.len(), 3);
		assert_eq!(
			edges(&graph),
			vec![("Nao", "Aldebaran", 10.0), ("Aldebaran", "Aldebaran", 2.0)]
		);
		assert_eq!(graph.edges[1].source, 1);
		assert_eq!(graph.edges[1].target, 2);
	}

	#[test]
	fn repeated_supplier_within_a_module_adds_edges_not_nodes() {
		let graph = build_flow_graph(&robot("Spot", &[("Vision", &["Acme", "Acme"])]));
		assert_eq!(graph.nodes.len(), 3);
		assert_eq!(graph.edges.len(), 3);
	}

	#[test]
	fn throughput_and_tier_queries() {
		let graph = build_flow_graph(&robot(
			"Spot",
			&[("Locomotion", &["Acme", "Bolt"]), ("Vision", &["Acme"])],
		));
		assert_eq!(graph.throughput(0), 20.0);
		assert_eq!(graph.throughput(1), 10.0);
		assert_eq!(graph.throughput(3), 4.0);
		assert_eq!(graph.nodes_in(NodeCategory::Supplier).collect::<Vec<_>>(), vec![3, 4]);
	}
}
