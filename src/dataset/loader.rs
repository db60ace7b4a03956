//! Fetches the dataset document relative to the current page.

use log::debug;
use url::Url;

use super::RobotStore;
use crate::config::AppConfig;
use crate::error::{LoadError, LoadResult};

/// Resolve `path` against `base` and append `param=stamp`, so every load
/// bypasses intermediate caches.
pub fn cache_busted_url(base: &Url, path: &str, param: &str, stamp: u64) -> LoadResult<Url> {
	let mut url = base.join(path)?;
	url.query_pairs_mut().append_pair(param, &stamp.to_string());
	Ok(url)
}

fn page_location() -> LoadResult<Url> {
	let href = web_sys::window()
		.ok_or(LoadError::NoWindow)?
		.location()
		.href()
		.map_err(|_| LoadError::NoWindow)?;
	Ok(Url::parse(&href)?)
}

/// Download and decode the dataset named by `config`.
pub async fn fetch_store(config: &AppConfig) -> LoadResult<RobotStore> {
	let stamp = js_sys::Date::now() as u64;
	let url = cache_busted_url(
		&page_location()?,
		&config.dataset_path,
		&config.cache_bust_param,
		stamp,
	)?;
	debug!("fetching dataset from {url}");

	let response = reqwest::Client::new().get(url).send().await?;
	let status = response.status();
	if !status.is_success() {
		return Err(LoadError::Status(status.as_u16()));
	}
	let body = response.text().await?;
	RobotStore::from_json(&body)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn appends_timestamp_to_relative_path() {
		let base = Url::parse("https://robots.example.org/atlas/index.html").unwrap();
		let url = cache_busted_url(&base, "data/robots.json", "cache_bust", 1_700_000_000_000)
			.unwrap();
		assert_eq!(
			url.as_str(),
			"https://robots.example.org/atlas/data/robots.json?cache_bust=1700000000000"
		);
	}

	#[test]
	fn keeps_existing_query_pairs() {
		let base = Url::parse("http://localhost:8080/").unwrap();
		let url = cache_busted_url(&base, "robots.json?v=2", "t", 7).unwrap();
		assert_eq!(url.as_str(), "http://localhost:8080/robots.json?v=2&t=7");
	}
}
