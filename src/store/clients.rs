use std::sync::atomic::{AtomicBool, Ordering};

use collapse_net::atlas::{self, ApiClient};
use reqwest::Client;
use tokio::sync::RwLock;
use tracing::error;

use crate::config::Config;

/// Shared store for the client catalogs. The first caller to fetch populates
/// it; everyone else observes the same lists for the rest of the session
#[derive(Default)]
pub struct ClientStore {
	all: RwLock<Vec<ApiClient>>,
	vanilla: RwLock<Vec<ApiClient>>,
	fabric: RwLock<Vec<ApiClient>>,
	forge: RwLock<Vec<ApiClient>>,
	in_flight: AtomicBool,
}

impl ClientStore {
	/// Create an empty store
	pub fn new() -> Self {
		Self::default()
	}

	/// Fetch the three catalogs and populate the store. A no-op when the
	/// store is already populated or another fetch is in flight, so racing
	/// callers perform exactly one set of requests. Failures are logged and
	/// populate nothing; a later call will retry
	pub async fn fetch(&self, http: &Client, config: &Config) {
		if !self.all.read().await.is_empty() {
			return;
		}
		if self
			.in_flight
			.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
			.is_err()
		{
			return;
		}

		let host = &config.atlas_host;
		let (all, fabric, forge) = tokio::join!(
			atlas::get_clients(host, http),
			atlas::get_fabric_clients(host, http),
			atlas::get_forge_clients(host, http),
		);

		match (all, fabric, forge) {
			(Ok(all), Ok(fabric), Ok(forge)) => {
				let vanilla = all.iter().filter(|x| x.is_vanilla()).cloned().collect();
				*self.vanilla.write().await = vanilla;
				*self.fabric.write().await = fabric;
				*self.forge.write().await = forge;
				*self.all.write().await = all;
			}
			(all, fabric, forge) => {
				for err in [all.err(), fabric.err(), forge.err()].into_iter().flatten() {
					error!("Failed to fetch client catalog: {err:#}");
				}
			}
		}

		self.in_flight.store(false, Ordering::SeqCst);
	}

	/// Get the full client list
	pub async fn all(&self) -> Vec<ApiClient> {
		self.all.read().await.clone()
	}

	/// Get the vanilla clients, the entries of the full list whose type is
	/// `default`
	pub async fn vanilla(&self) -> Vec<ApiClient> {
		self.vanilla.read().await.clone()
	}

	/// Get the Fabric client list
	pub async fn fabric(&self) -> Vec<ApiClient> {
		self.fabric.read().await.clone()
	}

	/// Get the Forge client list
	pub async fn forge(&self) -> Vec<ApiClient> {
		self.forge.read().await.clone()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use std::sync::atomic::AtomicUsize;
	use std::sync::Arc;

	use axum::routing::{get, MethodRouter};
	use axum::{Json, Router};
	use serde_json::json;

	fn catalog_route(hits: Arc<AtomicUsize>, data: serde_json::Value) -> MethodRouter {
		get(move || {
			hits.fetch_add(1, Ordering::SeqCst);
			let body = json!({"success": true, "data": data});
			async move { Json(body) }
		})
	}

	async fn spawn_atlas(hits: Arc<AtomicUsize>) -> String {
		let app = Router::new()
			.route(
				"/api/v1/clients",
				catalog_route(
					hits.clone(),
					json!([
						{"id": 1, "name": "Vanilla", "client_type": "Default"},
						{"id": 2, "name": "FabricOne", "client_type": "fabric"},
					]),
				),
			)
			.route(
				"/api/v1/fabric-clients",
				catalog_route(hits.clone(), json!([{"id": 2, "client_type": "fabric"}])),
			)
			.route(
				"/api/v1/forge-clients",
				catalog_route(hits.clone(), json!([{"id": 3, "client_type": "forge"}])),
			);

		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		tokio::spawn(async move {
			axum::serve(listener, app).await.unwrap();
		});

		format!("http://{addr}")
	}

	fn config_for(host: String) -> Config {
		Config {
			atlas_host: host,
			..Default::default()
		}
	}

	/// A port with nothing listening on it
	async fn dead_host() -> String {
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		drop(listener);
		format!("http://{addr}")
	}

	#[tokio::test]
	async fn test_fetch_populates_and_derives_vanilla() {
		let hits = Arc::new(AtomicUsize::new(0));
		let config = config_for(spawn_atlas(hits.clone()).await);
		let http = Client::new();

		let store = ClientStore::new();
		store.fetch(&http, &config).await;

		let vanilla = store.vanilla().await;
		assert_eq!(vanilla.len(), 1);
		assert_eq!(vanilla[0].id.to_string(), "1");
		assert_eq!(store.all().await.len(), 2);
		assert_eq!(store.fabric().await.len(), 1);
		assert_eq!(store.forge().await.len(), 1);
		assert_eq!(hits.load(Ordering::SeqCst), 3);
	}

	#[tokio::test]
	async fn test_racing_fetches_request_once() {
		let hits = Arc::new(AtomicUsize::new(0));
		let config = config_for(spawn_atlas(hits.clone()).await);
		let http = Client::new();

		let store = ClientStore::new();
		tokio::join!(store.fetch(&http, &config), store.fetch(&http, &config));
		assert_eq!(hits.load(Ordering::SeqCst), 3);

		// Populated stores don't refetch either
		store.fetch(&http, &config).await;
		assert_eq!(hits.load(Ordering::SeqCst), 3);
	}

	#[tokio::test]
	async fn test_failed_fetch_allows_retry() {
		let http = Client::new();
		let store = ClientStore::new();

		store.fetch(&http, &config_for(dead_host().await)).await;
		assert!(store.all().await.is_empty());

		let hits = Arc::new(AtomicUsize::new(0));
		let config = config_for(spawn_atlas(hits.clone()).await);
		store.fetch(&http, &config).await;
		assert_eq!(store.all().await.len(), 2);
		assert_eq!(hits.load(Ordering::SeqCst), 3);
	}
}
