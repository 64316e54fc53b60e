use std::sync::Arc;
use std::time::Duration;

use collapse_net::statistics::{self, Statistics};
use reqwest::Client;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::config::Config;

/// Shared store for the aggregate usage counters shown on the landing page
#[derive(Default)]
pub struct AnalyticsStore {
	counters: RwLock<Statistics>,
}

impl AnalyticsStore {
	/// Create a store with zeroed counters
	pub fn new() -> Self {
		Self::default()
	}

	/// Get the latest counters
	pub async fn counters(&self) -> Statistics {
		*self.counters.read().await
	}

	/// Fetch the counters once. On failure the previous values stay in
	/// place, so consumers keep showing stale but usable numbers
	pub async fn refetch(&self, http: &Client, host: &str) {
		match statistics::get_statistics(host, http).await {
			Ok(stats) => *self.counters.write().await = stats,
			Err(err) => error!("Failed to fetch statistics: {err:#}"),
		}
	}

	/// Fetch immediately and keep refetching on the configured interval
	/// until the returned handle is stopped or dropped
	pub fn start_polling(self: &Arc<Self>, http: Client, config: &Config) -> PollerHandle {
		let store = self.clone();
		let host = config.api_host.clone();
		let period = Duration::from_secs(config.statistics_poll_secs.max(1));
		let token = CancellationToken::new();
		let task_token = token.clone();

		tokio::spawn(async move {
			let mut interval = tokio::time::interval(period);
			loop {
				tokio::select! {
					_ = task_token.cancelled() => break,
					_ = interval.tick() => store.refetch(&http, &host).await,
				}
			}
		});

		PollerHandle { token }
	}
}

/// Handle to a running statistics poller. Stopping it, or dropping it when
/// the consuming view goes away, cancels the polling task
pub struct PollerHandle {
	token: CancellationToken,
}

impl PollerHandle {
	/// Stop the poller. Safe to call more than once
	pub fn stop(&self) {
		self.token.cancel();
	}
}

impl Drop for PollerHandle {
	fn drop(&mut self) {
		self.token.cancel();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_failed_refetch_keeps_previous_counters() {
		// A port with nothing listening on it
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		drop(listener);

		let store = AnalyticsStore::new();
		*store.counters.write().await = Statistics {
			total_loader_launches: 7,
			..Default::default()
		};

		store.refetch(&Client::new(), &format!("http://{addr}")).await;
		assert_eq!(store.counters().await.total_loader_launches, 7);
	}

	#[tokio::test]
	async fn test_stop_is_idempotent() {
		let store = Arc::new(AnalyticsStore::new());
		let config = Config {
			api_host: "http://127.0.0.1:1".to_string(),
			statistics_poll_secs: 3600,
			..Default::default()
		};

		let handle = store.start_polling(Client::new(), &config);
		handle.stop();
		handle.stop();
		drop(handle);
	}
}
