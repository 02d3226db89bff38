//! Endpoint, storage, and transport settings for a [`Dashboard`](crate::dashboard::Dashboard).

// std
use std::path::PathBuf;
// self
use crate::{_prelude::*, error::ConfigError};

/// Netatmo OAuth 2.0 token endpoint.
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://api.netatmo.com/oauth2/token";
/// Netatmo station list endpoint.
pub const DEFAULT_STATION_ENDPOINT: &str = "https://api.netatmo.com/api/getstationsdata";
/// Credential file used when no path is configured.
pub const DEFAULT_STORE_PATH: &str = "credentials.json";
/// Upper bound applied to each provider request.
pub const DEFAULT_REQUEST_TIMEOUT: StdDuration = StdDuration::from_secs(30);

/// Validated dashboard settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardConfig {
	/// Endpoint receiving the `refresh_token` grant.
	pub token_endpoint: Url,
	/// Endpoint returning the station list.
	pub station_endpoint: Url,
	/// Location of the JSON credential file.
	pub store_path: PathBuf,
	/// Per-request timeout enforced by the transport.
	pub request_timeout: StdDuration,
	/// `User-Agent` header sent with every provider request.
	pub user_agent: String,
}
impl DashboardConfig {
	/// Returns a builder seeded with the Netatmo defaults.
	pub fn builder() -> DashboardConfigBuilder {
		DashboardConfigBuilder::default()
	}

	fn validate(&self) -> Result<(), ConfigError> {
		validate_endpoint("token", &self.token_endpoint)?;
		validate_endpoint("station", &self.station_endpoint)?;

		if self.request_timeout.is_zero() {
			return Err(ConfigError::ZeroTimeout);
		}

		Ok(())
	}
}
impl Default for DashboardConfig {
	fn default() -> Self {
		Self {
			token_endpoint: default_url(DEFAULT_TOKEN_ENDPOINT),
			station_endpoint: default_url(DEFAULT_STATION_ENDPOINT),
			store_path: PathBuf::from(DEFAULT_STORE_PATH),
			request_timeout: DEFAULT_REQUEST_TIMEOUT,
			user_agent: default_user_agent(),
		}
	}
}

/// Builder for [`DashboardConfig`] values.
#[derive(Debug, Default)]
pub struct DashboardConfigBuilder {
	/// Token endpoint override.
	pub token_endpoint: Option<Url>,
	/// Station endpoint override.
	pub station_endpoint: Option<Url>,
	/// Credential file override.
	pub store_path: Option<PathBuf>,
	/// Request timeout override.
	pub request_timeout: Option<StdDuration>,
	/// User agent override.
	pub user_agent: Option<String>,
}
impl DashboardConfigBuilder {
	/// Sets the token endpoint.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = Some(url);

		self
	}

	/// Sets the station endpoint.
	pub fn station_endpoint(mut self, url: Url) -> Self {
		self.station_endpoint = Some(url);

		self
	}

	/// Sets the credential file location.
	pub fn store_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.store_path = Some(path.into());

		self
	}

	/// Sets the per-request timeout.
	pub fn request_timeout(mut self, timeout: StdDuration) -> Self {
		self.request_timeout = Some(timeout);

		self
	}

	/// Sets the `User-Agent` header.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());

		self
	}

	/// Consumes the builder and validates the resulting config.
	pub fn build(self) -> Result<DashboardConfig, ConfigError> {
		let defaults = DashboardConfig::default();
		let config = DashboardConfig {
			token_endpoint: self.token_endpoint.unwrap_or(defaults.token_endpoint),
			station_endpoint: self.station_endpoint.unwrap_or(defaults.station_endpoint),
			store_path: self.store_path.unwrap_or(defaults.store_path),
			request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
			user_agent: self.user_agent.unwrap_or(defaults.user_agent),
		};

		config.validate()?;

		Ok(config)
	}
}

fn default_url(raw: &'static str) -> Url {
	// Only called with the constants above.
	Url::parse(raw).unwrap_or_else(|e| panic!("Built-in endpoint {raw} is invalid: {e}"))
}

fn default_user_agent() -> String {
	format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ConfigError> {
	match url.scheme() {
		"https" | "http" => Ok(()),
		_ => Err(ConfigError::UnsupportedScheme { endpoint: name, url: url.to_string() }),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn defaults_point_at_netatmo() {
		let config = DashboardConfig::builder().build().expect("Default config should be valid.");

		assert_eq!(config.token_endpoint.as_str(), DEFAULT_TOKEN_ENDPOINT);
		assert_eq!(config.station_endpoint.as_str(), DEFAULT_STATION_ENDPOINT);
		assert_eq!(config.store_path, PathBuf::from(DEFAULT_STORE_PATH));
		assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
		assert!(config.user_agent.starts_with("netatmo-dashboard/"));
		assert_eq!(config, DashboardConfig::default());
	}

	#[test]
	fn rejects_non_http_endpoints_and_zero_timeout() {
		let err = DashboardConfig::builder()
			.station_endpoint(Url::parse("ftp://example.com/data").expect("URL should parse."))
			.build()
			.expect_err("Non-http endpoints must be rejected.");

		assert!(matches!(err, ConfigError::UnsupportedScheme { endpoint: "station", .. }));

		let err = DashboardConfig::builder()
			.request_timeout(StdDuration::ZERO)
			.build()
			.expect_err("Zero timeout must be rejected.");

		assert!(matches!(err, ConfigError::ZeroTimeout));
	}

	#[test]
	fn overrides_are_applied() {
		let config = DashboardConfig::builder()
			.token_endpoint(Url::parse("http://127.0.0.1:8080/token").expect("URL should parse."))
			.store_path("/var/lib/netatmo/credentials.json")
			.request_timeout(StdDuration::from_secs(5))
			.user_agent("custom-agent")
			.build()
			.expect("Overridden config should be valid.");

		assert_eq!(config.token_endpoint.as_str(), "http://127.0.0.1:8080/token");
		assert_eq!(config.store_path, PathBuf::from("/var/lib/netatmo/credentials.json"));
		assert_eq!(config.request_timeout, StdDuration::from_secs(5));
		assert_eq!(config.user_agent, "custom-agent");
	}
}
