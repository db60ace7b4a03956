//! Page-level settings shared through the component tree.

/// Where the dataset lives and how it is requested.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
	/// Dataset location, relative to the page URL.
	pub dataset_path: String,
	/// Query parameter carrying the cache-defeating timestamp.
	pub cache_bust_param: String,
	/// Identifier suggested in the search placeholder.
	pub example_id: String,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			dataset_path: "data/robots.json".into(),
			cache_bust_param: "cache_bust".into(),
			example_id: "spot".into(),
		}
	}
}

impl AppConfig {
	/// Placeholder shown in the search input once the dataset is ready.
	pub fn ready_placeholder(&self) -> String {
		format!("Enter a robot name (e.g., {})", self.example_id)
	}
}
