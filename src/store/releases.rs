use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use collapse_net::github::{self, GithubRelease, LinuxAssets, WindowsAssets};
use reqwest::Client;
use tokio::sync::RwLock;
use tracing::error;

/// The resolved download links of the loader, for both release channels.
/// Consumers read a snapshot of this and render whatever is filled in
#[derive(Clone, Debug, Default)]
pub struct ReleaseLinks {
	/// First asset of the latest stable release, the generic fallback link
	pub latest_url: String,
	/// Whether the latest-release fetch has settled, success or not
	pub latest_loaded: bool,
	/// Linux links of the latest stable release
	pub latest_linux: LinuxAssets,
	/// Windows links of the latest stable release
	pub latest_windows: WindowsAssets,
	/// First asset of the newest prerelease
	pub prerelease_url: String,
	/// Whether the prerelease fetch has settled, success or not
	pub prerelease_loaded: bool,
	/// Linux links of the newest prerelease
	pub prerelease_linux: LinuxAssets,
	/// Windows links of the newest prerelease
	pub prerelease_windows: WindowsAssets,
	/// Set when either fetch failed. Link fields keep their prior values
	pub error: Option<String>,
}

struct Inner {
	links: RwLock<ReleaseLinks>,
	generation: AtomicU64,
	releases_api: String,
	http: Client,
}

/// Resolves download links from the GitHub releases of the loader repository.
/// Fetch failures never propagate to the caller; they surface through
/// [`ReleaseLinks::error`] and the unresolved link fields
#[derive(Clone)]
pub struct ReleaseResolver {
	inner: Arc<Inner>,
}

impl ReleaseResolver {
	/// Create a resolver for a repository API URL such as
	/// `https://api.github.com/repos/{owner}/{repo}`
	pub fn new(releases_api: impl Into<String>, http: Client) -> Self {
		Self {
			inner: Arc::new(Inner {
				links: RwLock::new(ReleaseLinks::default()),
				generation: AtomicU64::new(0),
				releases_api: releases_api.into(),
				http,
			}),
		}
	}

	/// Get a copy of the current links
	pub async fn snapshot(&self) -> ReleaseLinks {
		self.inner.links.read().await.clone()
	}

	/// Fetch the latest release and the newest prerelease concurrently,
	/// returning once both have settled. Calls may overlap; only the newest
	/// call publishes its results, so a slow stale response cannot overwrite
	/// a fresh one
	pub async fn refetch(&self) {
		let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
		tokio::join!(
			self.fetch_latest(generation),
			self.fetch_prerelease(generation)
		);
	}

	async fn fetch_latest(&self, generation: u64) {
		{
			let mut links = self.inner.links.write().await;
			if self.is_stale(generation) {
				return;
			}
			links.latest_loaded = false;
		}

		let result = github::get_latest_release(&self.inner.releases_api, &self.inner.http).await;

		let mut links = self.inner.links.write().await;
		if self.is_stale(generation) {
			return;
		}
		match result {
			Ok(release) => apply_latest(&mut links, &release),
			Err(err) => {
				links.error = Some("Failed to fetch latest release".to_string());
				error!("Failed to fetch latest release: {err:#}");
			}
		}
		links.latest_loaded = true;
	}

	async fn fetch_prerelease(&self, generation: u64) {
		{
			let mut links = self.inner.links.write().await;
			if self.is_stale(generation) {
				return;
			}
			links.prerelease_loaded = false;
		}

		let result = github::get_releases(&self.inner.releases_api, &self.inner.http).await;

		let mut links = self.inner.links.write().await;
		if self.is_stale(generation) {
			return;
		}
		match result {
			Ok(releases) => apply_prerelease(&mut links, &releases),
			Err(err) => {
				links.error = Some("Failed to fetch latest prerelease".to_string());
				error!("Failed to fetch latest prerelease: {err:#}");
			}
		}
		links.prerelease_loaded = true;
	}

	fn is_stale(&self, generation: u64) -> bool {
		generation != self.inner.generation.load(Ordering::SeqCst)
	}
}

fn apply_latest(links: &mut ReleaseLinks, release: &GithubRelease) {
	links.latest_url = github::first_asset_url(&release.assets);
	links.latest_linux = github::pick_linux_assets(Some(&release.assets));
	links.latest_windows = github::pick_windows_assets(Some(&release.assets));
}

fn apply_prerelease(links: &mut ReleaseLinks, releases: &[GithubRelease]) {
	let prerelease = github::latest_prerelease(releases);
	links.prerelease_url = prerelease
		.map(|release| github::first_asset_url(&release.assets))
		.unwrap_or_default();
	let assets = prerelease.map(|release| release.assets.as_slice());
	links.prerelease_linux = github::pick_linux_assets(assets);
	links.prerelease_windows = github::pick_windows_assets(assets);
}
