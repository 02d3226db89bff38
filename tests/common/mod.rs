//! Shared fixtures for integration tests.

#![allow(dead_code)]

// std
use std::{
	path::PathBuf,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
};
// crates.io
use httpmock::MockServer;
// self
use netatmo_dashboard::{
	auth::{CredentialRecord, Identity},
	cache::MemoryCache,
	config::DashboardConfig,
	dashboard::ReqwestDashboard,
	http::ReqwestHttpClient,
	store::{FileStore, MemoryStore},
	url::Url,
};

pub const CLIENT_ID: &str = "client-netatmo";
pub const CLIENT_SECRET: &str = "secret-netatmo";
pub const CONFIG_ID: &str = "a1b2c3d4.0123456789abcdef";

pub fn identity() -> Identity {
	Identity::from_config_id(CONFIG_ID).expect("Config id fixture should yield an identity.")
}

pub fn record(refresh_token: &str) -> CredentialRecord {
	CredentialRecord::new(CLIENT_ID, CLIENT_SECRET, refresh_token)
}

/// Points both endpoints at the mock server.
pub fn test_config(server: &MockServer) -> DashboardConfig {
	DashboardConfig::builder()
		.token_endpoint(
			Url::parse(&server.url("/oauth2/token"))
				.expect("Mock token endpoint should parse successfully."),
		)
		.station_endpoint(
			Url::parse(&server.url("/api/getstationsdata"))
				.expect("Mock station endpoint should parse successfully."),
		)
		.build()
		.expect("Test config should be valid.")
}

/// Builds a reqwest client that honors `config` and accepts the self-signed certificates
/// produced by `httpmock`.
pub fn test_reqwest_http_client(config: &DashboardConfig) -> ReqwestHttpClient {
	let client = ReqwestHttpClient::builder(config)
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

/// Builds a reqwest-backed dashboard with inspectable in-memory store and cache.
pub fn build_reqwest_test_dashboard(
	config: DashboardConfig,
) -> (ReqwestDashboard, Arc<MemoryStore>, Arc<MemoryCache>) {
	let http_client = test_reqwest_http_client(&config);
	let store = Arc::new(MemoryStore::default());
	let cache = Arc::new(MemoryCache::default());
	let dashboard =
		ReqwestDashboard::with_http_client(config, store.clone(), cache.clone(), http_client);

	(dashboard, store, cache)
}

/// Builds a reqwest-backed dashboard persisting to `config.store_path`, the way
/// [`Dashboard::new`](netatmo_dashboard::dashboard::Dashboard::new) does.
pub fn build_file_test_dashboard(
	config: DashboardConfig,
	cache: Arc<MemoryCache>,
) -> ReqwestDashboard {
	let http_client = test_reqwest_http_client(&config);
	let store = Arc::new(FileStore::new(config.store_path.clone()));

	ReqwestDashboard::with_http_client(config, store, cache, http_client)
}

/// Unique credential file path under the system temp directory.
pub fn temp_store_path(label: &str) -> PathBuf {
	static COUNTER: AtomicUsize = AtomicUsize::new(0);

	let n = COUNTER.fetch_add(1, Ordering::Relaxed);

	std::env::temp_dir()
		.join(format!("netatmo-dashboard-{label}-{}-{n}", std::process::id()))
		.join("credentials.json")
}

pub fn token_body(access: &str, refresh: &str) -> String {
	format!(
		"{{\"access_token\":\"{access}\",\"refresh_token\":\"{refresh}\",\"expires_in\":10800,\"expire_in\":10800,\"scope\":[\"read_station\"]}}"
	)
}
