//! Query handling behind the search page: turns load results and user input
//! into status messages and the current selection.

use std::fmt;
use std::sync::Arc;

use log::{info, warn};

use crate::dataset::{RobotRecord, RobotStore};
use crate::error::LoadError;
use crate::flow::{FlowGraph, build_flow_graph};
use crate::lookup::{Lookup, lookup};

/// File in the dataset repository listing the robots to collect.
pub const SCRAPE_LIST: &str = "robots_to_scrape.txt";

/// Dataset availability. Queries are only accepted when `Ready`.
#[derive(Clone, Debug, Default)]
pub enum LoadState {
	/// The fetch has not finished yet.
	#[default]
	Loading,
	/// The store is loaded; replaced wholesale on reload.
	Ready(Arc<RobotStore>),
	/// The fetch or decode failed; holds the error text.
	Failed(String),
}

impl LoadState {
	/// Wrap a load result, logging the outcome.
	pub fn from_result(result: Result<RobotStore, LoadError>) -> Self {
		match result {
			Ok(store) => {
				info!(
					"dataset loaded: {} robots, updated {}",
					store.len(),
					store.last_updated()
				);
				LoadState::Ready(Arc::new(store))
			}
			Err(err) => {
				warn!("dataset load failed: {err}");
				LoadState::Failed(err.to_string())
			}
		}
	}

	/// The loaded store, if any.
	pub fn store(&self) -> Option<Arc<RobotStore>> {
		match self {
			LoadState::Ready(store) => Some(Arc::clone(store)),
			_ => None,
		}
	}

	/// Whether the search input accepts queries.
	pub fn accepts_input(&self) -> bool {
		matches!(self, LoadState::Ready(_))
	}

	/// Status line while no query result is shown.
	pub fn status(&self) -> Status {
		match self {
			LoadState::Loading => Status::Loading,
			LoadState::Ready(store) => Status::Loaded {
				last_updated: store.last_updated().to_string(),
				count: store.len(),
				known: known_ids(store),
			},
			LoadState::Failed(reason) => Status::LoadFailed(reason.clone()),
		}
	}
}

/// User-visible status line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
	/// Waiting for the dataset.
	Loading,
	/// Dataset ready.
	Loaded {
		/// Producer timestamp.
		last_updated: String,
		/// Number of robots.
		count: usize,
		/// Identifiers worth trying.
		known: Vec<String>,
	},
	/// Dataset unavailable until the page is reloaded.
	LoadFailed(String),
	/// The query was blank.
	EnterQuery,
	/// No robot matches the query.
	NotFound {
		/// Normalised query.
		query: String,
		/// Every known identifier.
		known: Vec<String>,
	},
	/// A robot is on display; nothing to say.
	Hidden,
}

impl Status {
	/// Whether the status line should be shown at all.
	pub fn is_visible(&self) -> bool {
		!matches!(self, Status::Hidden)
	}

	/// Whether this status reports a failure.
	pub fn is_error(&self) -> bool {
		matches!(self, Status::LoadFailed(_))
	}
}

impl fmt::Display for Status {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Status::Loading => f.write_str("Syncing robot data..."),
			Status::Loaded {
				last_updated,
				count,
				known,
			} => write!(
				f,
				"Data synced, last updated {last_updated}. {count} robots available, try: {}",
				known.join(", ")
			),
			Status::LoadFailed(reason) => write!(f, "Data sync failed: {reason}"),
			Status::EnterQuery => f.write_str("Please enter a robot name."),
			Status::NotFound { query, known } => write!(
				f,
				"No information found for \"{query}\". Known robots: {}. \
				 To add one, list it in '{SCRAPE_LIST}' in the dataset repository.",
				known.join(", ")
			),
			Status::Hidden => Ok(()),
		}
	}
}

/// A robot on display together with its flow graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
	/// The matched record.
	pub robot: RobotRecord,
	/// Its freshly built flow graph.
	pub graph: FlowGraph,
}

/// Result of one submitted query.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryResponse {
	/// What the status line says.
	pub status: Status,
	/// What the results panel shows; `None` clears it.
	pub selection: Option<Selection>,
}

fn known_ids(store: &RobotStore) -> Vec<String> {
	store.identifiers().map(str::to_string).collect()
}

/// Handle one submitted query.
pub fn run_query(store: &RobotStore, raw: &str) -> QueryResponse {
	match lookup(store, raw) {
		Lookup::EmptyQuery => QueryResponse {
			status: Status::EnterQuery,
			selection: None,
		},
		Lookup::NotFound { query } => {
			warn!("no robot named {query:?}");
			QueryResponse {
				status: Status::NotFound {
					query,
					known: known_ids(store),
				},
				selection: None,
			}
		}
		Lookup::Found(robot) => {
			info!("showing {}", robot.id);
			QueryResponse {
				status: Status::Hidden,
				selection: Some(Selection {
					robot: robot.clone(),
					graph: build_flow_graph(robot),
				}),
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn ready() -> LoadState {
		LoadState::from_result(RobotStore::from_json(
			r#"{"last_updated": "2024-05-01", "robots": {
				"spot": {"name": "Spot", "modules": {
					"Locomotion": {"components": [], "suppliers": ["Acme", "Bolt"]},
					"Vision": {"components": [], "suppliers": ["Acme"]}
				}},
				"atlas": {"name": "Atlas"}
			}}"#,
		))
	}

	#[test]
	fn blank_query_prompts_for_input() {
		let store = ready().store().unwrap();
		let response = run_query(&store, "  ");
		assert_eq!(response.status, Status::EnterQuery);
		assert_eq!(response.status.to_string(), "Please enter a robot name.");
		assert!(response.selection.is_none());
	}

	#[test]
	fn unknown_query_lists_known_robots_and_clears_selection() {
		let store = ready().store().unwrap();
		let response = run_query(&store, "nosuchrobot");
		assert_eq!(
			response.status,
			Status::NotFound {
				query: "nosuchrobot".into(),
				known: vec!["spot".into(), "atlas".into()],
			}
		);
		assert!(response.status.to_string().contains("Known robots: spot, atlas."));
		assert!(response.selection.is_none());
	}

	#[test]
	fn known_query_selects_robot_and_graph() {
		let store = ready().store().unwrap();
		let response = run_query(&store, " Spot ");
		assert!(!response.status.is_visible());
		let selection = response.selection.unwrap();
		assert_eq!(selection.robot.name, "Spot");
		assert_eq!(selection.graph.nodes.len(), 5);
		assert_eq!(selection.graph.edges.len(), 5);
	}

	#[test]
	fn load_states_gate_input() {
		assert!(!LoadState::Loading.accepts_input());
		assert!(ready().accepts_input());

		let failed = LoadState::from_result(Err(LoadError::Status(404)));
		assert!(!failed.accepts_input());
		assert!(failed.store().is_none());
		assert!(failed.status().is_error());
		assert_eq!(
			failed.status().to_string(),
			"Data sync failed: network response error: 404"
		);
	}

	#[test]
	fn loaded_status_reports_size_and_stamp() {
		assert_eq!(
			ready().status().to_string(),
			"Data synced, last updated 2024-05-01. 2 robots available, try: spot, atlas"
		);
	}
}
