use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::routing::get;
use axum::Router;
use clap::Parser;
use collapse_web::Config;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod locale;
mod sitemap;
mod statistics;

/// State shared by every route
#[derive(Clone)]
pub struct AppState {
	/// The shared HTTP client
	pub http: reqwest::Client,
	/// The loaded configuration
	pub config: Arc<Config>,
}

#[derive(Parser)]
#[command(
	name = "collapse-server",
	about = "HTTP service for the CollapseLoader site",
	version
)]
struct Cli {
	/// The address to listen on
	#[arg(long, default_value = "127.0.0.1:3000")]
	bind: SocketAddr,
	/// Path to a JSON config file
	#[arg(long)]
	config: Option<PathBuf>,
}

/// Build the service router
pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/", get(locale::root_redirect))
		.route("/telegram", get(locale::telegram_redirect))
		.route("/discord", get(locale::discord_redirect))
		.route("/api/statistics", get(statistics::proxy))
		.route("/api/__sitemap__/urls", get(sitemap::urls))
		.with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.init();

	let cli = Cli::parse();
	let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
	let state = AppState {
		http: reqwest::Client::new(),
		config: Arc::new(config),
	};

	let listener = tokio::net::TcpListener::bind(cli.bind)
		.await
		.with_context(|| format!("Failed to bind to {}", cli.bind))?;
	info!("Listening on {}", cli.bind);

	let cancel_token = CancellationToken::new();
	let signal_token = cancel_token.clone();
	tokio::spawn(async move {
		if tokio::signal::ctrl_c().await.is_ok() {
			signal_token.cancel();
		}
	});

	axum::serve(listener, router(state))
		.with_graceful_shutdown(async move { cancel_token.cancelled().await })
		.await
		.context("Server error")?;

	Ok(())
}
