//! Runs one dashboard invocation against a mocked Netatmo API with a file-backed credential
//! store, then prints the emitted message.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use netatmo_dashboard::{
	auth::{CredentialRecord, Identity},
	cache::MemoryCache,
	config::DashboardConfig,
	dashboard::Dashboard,
	http::ReqwestHttpClient,
	store::FileStore,
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token").form_urlencoded_tuple("refresh_token", "demo-refresh");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"refresh_token\":\"demo-refresh-2\",\"expires_in\":10800}",
			);
		})
		.await;
	let station_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/getstationsdata").header("authorization", "Bearer demo-access");
			then.status(200).json_body(json!({
				"status": "ok",
				"body": {
					"devices": [{
						"type": "NAMain",
						"station_name": "Demo",
						"reachable": true,
						"dashboard_data": { "Temperature": 21.5, "temp_trend": "up", "Pressure": 1013 },
						"modules": [{
							"type": "NAModule1",
							"reachable": true,
							"battery_percent": 70,
							"dashboard_data": { "Temperature": 4.2, "Humidity": 80 }
						}]
					}]
				}
			}));
		})
		.await;
	let store_dir =
		std::env::temp_dir().join(format!("netatmo-dashboard-demo-{}", std::process::id()));
	let config = DashboardConfig::builder()
		.token_endpoint(Url::parse(&server.url("/oauth2/token"))?)
		.station_endpoint(Url::parse(&server.url("/api/getstationsdata"))?)
		.store_path(store_dir.join("credentials.json"))
		.build()?;
	// httpmock serves a self-signed certificate; production code uses `Dashboard::new`.
	let http_client = ReqwestHttpClient::with_client(
		ReqwestHttpClient::builder(&config)
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let store = Arc::new(FileStore::new(config.store_path.clone()));
	let dashboard = <Dashboard<ReqwestHttpClient>>::with_http_client(
		config,
		store,
		Arc::new(MemoryCache::default()),
		http_client,
	);
	let identity = Identity::from_config_id("f00dfeed.5d3c2b1a09e8f7d6")?;

	dashboard
		.configure(&identity, CredentialRecord::new("demo-client", "demo-secret", "demo-refresh"))
		.await?;

	let message = dashboard.on_input(&identity, ()).await.map_err(|failure| failure.error)?;

	println!("{}", serde_json::to_string_pretty(&message)?);

	token_mock.assert_async().await;
	station_mock.assert_async().await;

	std::fs::remove_dir_all(store_dir)?;

	Ok(())
}
