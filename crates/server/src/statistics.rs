use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use collapse_net::statistics::{self, Statistics};
use tracing::warn;

use crate::AppState;

/// Proxy the statistics endpoint of the auth host. Upstream failure is
/// reported as 502 while still returning a zeroed body, so the caller always
/// has counters to show
pub async fn proxy(State(state): State<AppState>) -> (StatusCode, Json<Statistics>) {
	match statistics::get_statistics(&state.config.auth_host, &state.http).await {
		Ok(stats) => (StatusCode::OK, Json(stats)),
		Err(err) => {
			warn!("Statistics upstream failed: {err:#}");
			(StatusCode::BAD_GATEWAY, Json(Statistics::default()))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use std::sync::Arc;

	use collapse_web::Config;

	#[tokio::test]
	async fn test_unreachable_upstream_reports_bad_gateway() {
		// A port with nothing listening on it
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		drop(listener);

		let state = AppState {
			http: reqwest::Client::new(),
			config: Arc::new(Config {
				auth_host: format!("http://{addr}"),
				..Default::default()
			}),
		};

		let (status, Json(body)) = proxy(State(state)).await;
		assert_eq!(status, StatusCode::BAD_GATEWAY);
		assert_eq!(body, Statistics::default());
	}
}
