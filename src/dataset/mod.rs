//! Robot dataset: records, their module breakdown, and the immutable store
//! built from one dataset document.

pub mod loader;

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{LoadError, LoadResult};

/// Sentinel the dataset uses for a missing value.
pub const NOT_APPLICABLE: &str = "N/A";

/// A spec or identity value that may be absent upstream.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SpecValue {
	/// The source had nothing for this label.
	#[default]
	NotApplicable,
	/// Free-form text such as `"75 kg"`.
	Text(String),
}

impl SpecValue {
	/// Whether the value carries real data.
	pub fn is_available(&self) -> bool {
		matches!(self, SpecValue::Text(_))
	}
}

impl From<String> for SpecValue {
	fn from(value: String) -> Self {
		if value.trim() == NOT_APPLICABLE {
			SpecValue::NotApplicable
		} else {
			SpecValue::Text(value)
		}
	}
}

impl From<SpecValue> for String {
	fn from(value: SpecValue) -> Self {
		match value {
			SpecValue::NotApplicable => NOT_APPLICABLE.to_string(),
			SpecValue::Text(text) => text,
		}
	}
}

impl fmt::Display for SpecValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SpecValue::NotApplicable => f.write_str("---"),
			SpecValue::Text(text) => f.write_str(text),
		}
	}
}

/// One functional subsystem of a robot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInfo {
	/// Key components, e.g. `["Cameras", "IMU"]`.
	#[serde(default)]
	pub components: Vec<String>,
	/// Vendors feeding this module. May repeat across modules.
	#[serde(default)]
	pub suppliers: Vec<String>,
}

/// A single robot entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotRecord {
	/// Normalised lookup key, filled in from the enclosing map.
	#[serde(skip)]
	pub id: String,
	/// Display name.
	pub name: String,
	/// Manufacturer, or not applicable.
	#[serde(default)]
	pub manufacturer: SpecValue,
	/// Robot type (`type` in the document).
	#[serde(rename = "type", default)]
	pub kind: SpecValue,
	/// Ordered label → value pairs.
	#[serde(default)]
	pub specs: IndexMap<String, SpecValue>,
	/// Ordered module name → module breakdown.
	#[serde(default)]
	pub modules: IndexMap<String, ModuleInfo>,
}

#[derive(Deserialize)]
struct DatasetDocument {
	last_updated: String,
	robots: IndexMap<String, RobotRecord>,
}

/// Trim and lowercase an identifier or query.
pub fn normalize_id(raw: &str) -> String {
	raw.trim().to_lowercase()
}

/// Read-only robot collection, built once per successful load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RobotStore {
	last_updated: String,
	robots: IndexMap<String, RobotRecord>,
}

impl RobotStore {
	/// Decode a dataset document.
	///
	/// Keys are normalised with [`normalize_id`]; two keys that collapse to the
	/// same identifier reject the whole document.
	pub fn from_json(body: &str) -> LoadResult<Self> {
		let document: DatasetDocument = serde_json::from_str(body)?;
		Self::from_records(document.last_updated, document.robots)
	}

	/// Build a store from already decoded records keyed by raw identifier.
	pub fn from_records(
		last_updated: impl Into<String>,
		records: impl IntoIterator<Item = (String, RobotRecord)>,
	) -> LoadResult<Self> {
		let mut robots = IndexMap::new();
		for (key, mut record) in records {
			let id = normalize_id(&key);
			if robots.contains_key(&id) {
				return Err(LoadError::DuplicateIdentifier(id));
			}
			record.id = id.clone();
			robots.insert(id, record);
		}
		Ok(Self {
			last_updated: last_updated.into(),
			robots,
		})
	}

	/// Timestamp string reported by the dataset producer.
	pub fn last_updated(&self) -> &str {
		&self.last_updated
	}

	/// Number of robots.
	pub fn len(&self) -> usize {
		self.robots.len()
	}

	/// Whether the store holds no robots.
	pub fn is_empty(&self) -> bool {
		self.robots.is_empty()
	}

	/// Known identifiers, in document order.
	pub fn identifiers(&self) -> impl Iterator<Item = &str> {
		self.robots.keys().map(String::as_str)
	}

	/// Exact lookup by an already normalised identifier.
	pub fn get(&self, id: &str) -> Option<&RobotRecord> {
		self.robots.get(id)
	}

	/// All records, in document order.
	pub fn records(&self) -> impl Iterator<Item = &RobotRecord> {
		self.robots.values()
	}
}
