use std::path::Path;

use anyhow::Context;
use collapse_net::download;
use serde::{Deserialize, Serialize};

/// Configuration for the web layer. Every field has a production default,
/// so an absent or partial config file is fine
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
	/// Base URL of the Atlas catalog service
	pub atlas_host: String,
	/// Base URL of the auth service, used by the statistics proxy
	pub auth_host: String,
	/// Base URL of the api service, used by the statistics poller
	pub api_host: String,
	/// GitHub API URL of the loader repository
	pub releases_api: String,
	/// How often the statistics poller refetches, in seconds
	pub statistics_poll_secs: u64,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			atlas_host: "https://atlas.collapseloader.org".to_string(),
			auth_host: "https://auth.collapseloader.org".to_string(),
			api_host: "https://api.collapseloader.org".to_string(),
			releases_api: "https://api.github.com/repos/dest4590/CollapseLoader".to_string(),
			statistics_poll_secs: 15,
		}
	}
}

impl Config {
	/// Load the configuration from a JSON file, falling back to the defaults
	/// when no path is given
	pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
		let config = match path {
			Some(path) => {
				let contents = std::fs::read_to_string(path).with_context(|| {
					format!("Failed to read config file at {}", path.display())
				})?;
				serde_json::from_str(&contents).context("Failed to parse config file")?
			}
			None => Self::default(),
		};
		config.validate()?;

		Ok(config)
	}

	/// Check that every configured host is a usable URL
	pub fn validate(&self) -> anyhow::Result<()> {
		for url in [
			&self.atlas_host,
			&self.auth_host,
			&self.api_host,
			&self.releases_api,
		] {
			download::validate_url(url).with_context(|| format!("Invalid URL '{url}'"))?;
		}

		Ok(())
	}
}
