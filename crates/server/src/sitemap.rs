use axum::extract::State;
use axum::Json;
use collapse_net::atlas::{self, ApiClient};
use collapse_shared::lang::Language;
use itertools::Itertools;
use serde::Serialize;
use tracing::warn;

use crate::AppState;

/// A single sitemap entry
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SitemapUrl {
	/// The location of the page
	pub loc: String,
}

/// Source for the sitemap module: every unique client ID across the three
/// catalogs, as both the unprefixed and the Russian path variants. A catalog
/// that fails to fetch contributes nothing
pub async fn urls(State(state): State<AppState>) -> Json<Vec<SitemapUrl>> {
	let host = &state.config.atlas_host;
	let (all, fabric, forge) = tokio::join!(
		atlas::get_clients(host, &state.http),
		atlas::get_fabric_clients(host, &state.http),
		atlas::get_forge_clients(host, &state.http),
	);

	let mut clients = Vec::new();
	for result in [all, fabric, forge] {
		match result {
			Ok(list) => clients.extend(list),
			Err(err) => warn!("Failed to fetch a catalog for the sitemap: {err:#}"),
		}
	}

	Json(collect_urls(&clients))
}

fn collect_urls(clients: &[ApiClient]) -> Vec<SitemapUrl> {
	clients
		.iter()
		.map(|client| client.id.to_string())
		.filter(|id| !id.is_empty())
		.unique()
		.flat_map(|id| {
			let path = format!("/clients/{id}");
			let localized = Language::Russian.localize_path(&path);
			[SitemapUrl { loc: path }, SitemapUrl { loc: localized }]
		})
		.collect()
}
