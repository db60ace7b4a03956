//! Errors raised while loading the robot dataset.

use thiserror::Error;

/// Result alias for dataset loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Everything that can stop the dataset from becoming queryable.
#[derive(Error, Debug)]
pub enum LoadError {
	/// No browser window (or its location) is reachable.
	#[error("browser window is not available")]
	NoWindow,

	/// The dataset URL could not be resolved against the page location.
	#[error("invalid dataset url: {0}")]
	Url(#[from] url::ParseError),

	/// The request never produced a response.
	#[error("request failed: {0}")]
	Request(#[from] reqwest::Error),

	/// The server answered with a non-success status.
	#[error("network response error: {0}")]
	Status(u16),

	/// The body is not a valid dataset document.
	#[error("malformed dataset: {0}")]
	Parse(#[from] serde_json::Error),

	/// Two robot keys are equal once trimmed and lowercased.
	#[error("duplicate robot identifier \"{0}\"")]
	DuplicateIdentifier(String),
}
