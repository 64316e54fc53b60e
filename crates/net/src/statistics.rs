use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::download;

/// Aggregate usage counters for the loader.
/// Missing fields deserialize to zero
#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Statistics {
	/// Total launches of the loader itself
	pub total_loader_launches: u64,
	/// Total launches of clients through the loader
	pub total_client_launches: u64,
	/// Total client downloads
	pub total_client_downloads: u64,
}

/// Get the current statistics from a statistics host.
/// The auth host and the api host both serve this same contract
pub async fn get_statistics(host: &str, client: &Client) -> anyhow::Result<Statistics> {
	download::json(&format!("{host}/api/statistics"), client).await
}
