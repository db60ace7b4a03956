//! Case- and whitespace-insensitive robot lookup.

use crate::dataset::{RobotRecord, RobotStore, normalize_id};

/// Outcome of a single query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup<'a> {
	/// Nothing left after trimming.
	EmptyQuery,
	/// The identifier is known.
	Found(&'a RobotRecord),
	/// The normalised identifier is unknown.
	NotFound {
		/// The query after trimming and lowercasing.
		query: String,
	},
}

/// Resolve a raw user query against `store`.
pub fn lookup<'a>(store: &'a RobotStore, raw: &str) -> Lookup<'a> {
	let query = normalize_id(raw);
	if query.is_empty() {
		return Lookup::EmptyQuery;
	}
	match store.get(&query) {
		Some(record) => Lookup::Found(record),
		None => Lookup::NotFound { query },
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn store() -> RobotStore {
		RobotStore::from_json(
			r#"{"last_updated": "today", "robots": {
				"spot": {"name": "Spot"},
				"atlas": {"name": "Atlas"}
			}}"#,
		)
		.unwrap()
	}

	#[test]
	fn ignores_case_and_surrounding_whitespace() {
		let store = store();
		for raw in ["spot", "SPOT", "  Spot\t", "\nsPoT  "] {
			match lookup(&store, raw) {
				Lookup::Found(record) => assert_eq!(record.name, "Spot"),
				other => panic!("{raw:?} resolved to {other:?}"),
			}
		}
	}

	#[test]
	fn every_known_identifier_resolves_to_its_record() {
		let store = store();
		for record in store.records() {
			assert_eq!(lookup(&store, &record.id.to_uppercase()), Lookup::Found(record));
		}
	}

	#[test]
	fn blank_query_is_not_a_miss() {
		let store = store();
		assert_eq!(lookup(&store, ""), Lookup::EmptyQuery);
		assert_eq!(lookup(&store, "   \t "), Lookup::EmptyQuery);
	}

	#[test]
	fn unknown_identifier_reports_normalised_query() {
		let store = store();
		assert_eq!(
			lookup(&store, " NoSuchRobot "),
			Lookup::NotFound {
				query: "nosuchrobot".into()
			}
		);
		// inner whitespace is significant
		assert!(matches!(lookup(&store, "sp ot"), Lookup::NotFound { .. }));
	}
}
