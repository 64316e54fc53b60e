use reqwest::Client;
use serde::Deserialize;

use crate::download;

/// A single GitHub release
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct GithubRelease {
	/// The tag the release was created from
	pub tag_name: String,
	/// The display name of the release
	pub name: String,
	/// Whether the release is flagged as not yet stable
	pub prerelease: bool,
	/// The downloadable assets attached to the release
	pub assets: Vec<GithubAsset>,
}

/// An asset for a GitHub release
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct GithubAsset {
	/// The filename of the asset
	pub name: String,
	/// The URL the asset can be downloaded from
	pub browser_download_url: String,
}

/// Get the latest stable release of a GitHub project.
/// `repo_api_url` is the API URL of the repository,
/// such as `https://api.github.com/repos/{owner}/{repo}`
pub async fn get_latest_release(
	repo_api_url: &str,
	client: &Client,
) -> anyhow::Result<GithubRelease> {
	download::json(&format!("{repo_api_url}/releases/latest"), client).await
}

/// Get the list of releases of a GitHub project, in the order the server returns them
pub async fn get_releases(
	repo_api_url: &str,
	client: &Client,
) -> anyhow::Result<Vec<GithubRelease>> {
	download::json(&format!("{repo_api_url}/releases"), client).await
}

/// Find the newest prerelease in a release list. The list order is trusted;
/// the first flagged entry wins
pub fn latest_prerelease(releases: &[GithubRelease]) -> Option<&GithubRelease> {
	releases.iter().find(|release| release.prerelease)
}

/// Get the URL of the first asset of a release, as a generic fallback download link
pub fn first_asset_url(assets: &[GithubAsset]) -> String {
	assets
		.first()
		.map(|asset| asset.browser_download_url.clone())
		.unwrap_or_default()
}

/// Download links for the Linux packages of a release
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinuxAssets {
	/// Link to the AppImage, if one is attached
	pub app_image: String,
	/// Link to the Debian package, if one is attached
	pub deb: String,
}

/// Download links for the Windows packages of a release
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WindowsAssets {
	/// Link to the portable executable, if one is attached
	pub exe: String,
	/// Link to the MSI package, if one is attached
	pub msi: String,
	/// Link to the setup executable, if one is attached
	pub setup: String,
}

/// Pick the Linux download links out of a release's asset list.
/// Each slot keeps the first asset that matches its filename rule
pub fn pick_linux_assets(assets: Option<&[GithubAsset]>) -> LinuxAssets {
	let mut out = LinuxAssets::default();
	let Some(assets) = assets else {
		return out;
	};
	for asset in assets {
		let name = asset.name.to_lowercase();
		if out.app_image.is_empty() && name.ends_with(".appimage") {
			out.app_image = asset.browser_download_url.clone();
		}
		if out.deb.is_empty() && name.ends_with(".deb") {
			out.deb = asset.browser_download_url.clone();
		}
	}

	out
}

/// Pick the Windows download links out of a release's asset list.
/// An `.exe` that contains `setup` is an installer, any other `.exe` is the
/// portable build; a single filename never fills both slots
pub fn pick_windows_assets(assets: Option<&[GithubAsset]>) -> WindowsAssets {
	let mut out = WindowsAssets::default();
	let Some(assets) = assets else {
		return out;
	};
	for asset in assets {
		let name = asset.name.to_lowercase();
		if name.ends_with(".exe") {
			if out.setup.is_empty() && name.contains("setup") {
				out.setup = asset.browser_download_url.clone();
			} else if out.exe.is_empty() && !name.contains("setup") {
				out.exe = asset.browser_download_url.clone();
			}
		}
		if out.msi.is_empty() && name.ends_with(".msi") {
			out.msi = asset.browser_download_url.clone();
		}
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	fn asset(name: &str, url: &str) -> GithubAsset {
		GithubAsset {
			name: name.to_string(),
			browser_download_url: url.to_string(),
		}
	}

	#[test]
	fn test_pick_linux_assets() {
		let assets = vec![
			asset("Loader.x86_64.AppImage", "appimage1"),
			asset("loader_amd64.deb", "deb1"),
			asset("Loader-nightly.AppImage", "appimage2"),
		];

		let picked = pick_linux_assets(Some(&assets));
		assert_eq!(picked.app_image, "appimage1");
		assert_eq!(picked.deb, "deb1");

		assert_eq!(pick_linux_assets(None), LinuxAssets::default());
	}

	#[test]
	fn test_pick_windows_assets() {
		let assets = vec![
			asset("Loader-Setup.exe", "setup1"),
			asset("Loader.exe", "exe1"),
			asset("Loader.msi", "msi1"),
			asset("Loader-Setup-old.exe", "setup2"),
		];

		let picked = pick_windows_assets(Some(&assets));
		assert_eq!(picked.setup, "setup1");
		assert_eq!(picked.exe, "exe1");
		assert_eq!(picked.msi, "msi1");
	}

	#[test]
	fn test_setup_exe_never_fills_both_slots() {
		let assets = vec![asset("App-Setup.exe", "setup")];
		let picked = pick_windows_assets(Some(&assets));
		assert_eq!(picked.setup, "setup");
		assert_eq!(picked.exe, "");

		let assets = vec![asset("App.exe", "plain")];
		let picked = pick_windows_assets(Some(&assets));
		assert_eq!(picked.exe, "plain");
		assert_eq!(picked.setup, "");
	}

	#[test]
	fn test_no_suffix_no_match() {
		let assets = vec![
			asset("checksums.txt", "txt"),
			asset("loader.tar.gz", "tar"),
		];
		assert_eq!(pick_linux_assets(Some(&assets)), LinuxAssets::default());
		assert_eq!(pick_windows_assets(Some(&assets)), WindowsAssets::default());
	}

	#[test]
	fn test_latest_prerelease() {
		let releases = vec![
			GithubRelease {
				tag_name: "v2.0.0".to_string(),
				prerelease: false,
				..Default::default()
			},
			GithubRelease {
				tag_name: "v2.1.0-beta".to_string(),
				prerelease: true,
				assets: vec![asset("x.AppImage", "U")],
				..Default::default()
			},
			GithubRelease {
				tag_name: "v2.0.0-beta".to_string(),
				prerelease: true,
				..Default::default()
			},
		];

		let pre = latest_prerelease(&releases).expect("Prerelease should be found");
		assert_eq!(pre.tag_name, "v2.1.0-beta");
		assert_eq!(first_asset_url(&pre.assets), "U");

		assert!(latest_prerelease(&releases[..1]).is_none());
	}
}
