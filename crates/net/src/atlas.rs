use std::fmt;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::download;

/// The ID of a catalog client. The API is inconsistent and returns
/// either a number or a string depending on the endpoint
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum ClientId {
	/// A numeric ID
	Number(i64),
	/// A string ID
	Text(String),
}

impl Default for ClientId {
	fn default() -> Self {
		Self::Number(0)
	}
}

impl fmt::Display for ClientId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Number(num) => write!(f, "{num}"),
			Self::Text(text) => write!(f, "{text}"),
		}
	}
}

/// A single client in the catalog
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
#[serde(default)]
pub struct ApiClient {
	/// The ID of the client
	pub id: ClientId,
	/// The display name of the client
	pub name: String,
	/// The game version the client targets
	pub version: String,
	/// The category of the client, such as `default` or `fabric`
	pub client_type: String,
	/// How many times the client has been launched
	pub launches: u64,
	/// How many times the client has been downloaded
	pub downloads: Option<u64>,
	/// Whether the client is currently marked as working
	pub working: Option<bool>,
}

impl ApiClient {
	/// Get the normalized category of this client
	pub fn client_type(&self) -> String {
		self.client_type.to_lowercase()
	}

	/// Whether this client is an unmodified (vanilla) client
	pub fn is_vanilla(&self) -> bool {
		self.client_type() == "default"
	}
}

/// Response wrapper used by every catalog endpoint
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct ApiResponse {
	/// Whether the API reported success
	pub success: bool,
	/// The payload of the response
	pub data: CatalogData,
}

/// The payload of a catalog response. Endpoints usually return a flat list,
/// but some deployments nest the lists under per-category keys, and a broken
/// payload can be any other JSON value
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum CatalogData {
	/// The flat list shape
	List(Vec<ApiClient>),
	/// The keyed object shape
	Keyed {
		/// Unmodified clients
		#[serde(default)]
		vanilla_clients: Vec<ApiClient>,
		/// Fabric clients
		#[serde(default)]
		fabric_clients: Vec<ApiClient>,
		/// Forge clients
		#[serde(default)]
		forge_clients: Vec<ApiClient>,
	},
	/// Anything else; treated as an empty catalog
	Other(serde_json::Value),
}

impl Default for CatalogData {
	fn default() -> Self {
		Self::List(Vec::new())
	}
}

impl CatalogData {
	/// Flatten the payload into a single client list.
	/// Malformed payloads flatten to empty
	pub fn into_clients(self) -> Vec<ApiClient> {
		match self {
			Self::List(clients) => clients,
			Self::Keyed {
				vanilla_clients,
				fabric_clients,
				forge_clients,
			} => {
				let mut out = vanilla_clients;
				out.extend(fabric_clients);
				out.extend(forge_clients);
				out
			}
			Self::Other(..) => Vec::new(),
		}
	}
}

/// Get the full client catalog
pub async fn get_clients(atlas_host: &str, client: &Client) -> anyhow::Result<Vec<ApiClient>> {
	get_catalog(&format!("{atlas_host}/api/v1/clients"), client).await
}

/// Get the Fabric client catalog
pub async fn get_fabric_clients(
	atlas_host: &str,
	client: &Client,
) -> anyhow::Result<Vec<ApiClient>> {
	get_catalog(&format!("{atlas_host}/api/v1/fabric-clients"), client).await
}

/// Get the Forge client catalog
pub async fn get_forge_clients(
	atlas_host: &str,
	client: &Client,
) -> anyhow::Result<Vec<ApiClient>> {
	get_catalog(&format!("{atlas_host}/api/v1/forge-clients"), client).await
}

async fn get_catalog(url: &str, client: &Client) -> anyhow::Result<Vec<ApiClient>> {
	let response: ApiResponse = download::json(url, client).await?;
	Ok(response.data.into_clients())
}
