//! Transport primitives for the token and station endpoints.
//!
//! [`ApiHttpClient`] is the crate's only dependency on an HTTP stack. The default
//! [`ReqwestHttpClient`] (feature `reqwest`) covers production use; tests and embedders can
//! plug in any transport that can POST a form and GET with a bearer token.

// self
use crate::{_prelude::*, error::TransportError};
#[cfg(feature = "reqwest")]
use crate::{config::DashboardConfig, error::ConfigError};

/// Boxed future returned by [`ApiHttpClient`] calls.
pub type HttpFuture<'a> =
	Pin<Box<dyn Future<Output = Result<ApiResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports used by the refresher and the station fetch.
///
/// Implementations return every HTTP response, whatever its status; only failures that
/// prevent a response from arriving map to [`TransportError`]. Status interpretation stays
/// with the caller.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Sends `form` as an `application/x-www-form-urlencoded` POST body.
	fn post_form<'a>(&'a self, url: &'a Url, form: &'a [(&'a str, &'a str)]) -> HttpFuture<'a>;

	/// Sends a GET carrying `Authorization: Bearer <access_token>`.
	fn get_with_bearer<'a>(&'a self, url: &'a Url, access_token: &'a str) -> HttpFuture<'a>;
}

/// Status and raw body of a provider response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Undecoded response body.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Returns `true` for HTTP 200, the only status the provider uses for success.
	pub fn is_ok(&self) -> bool {
		self.status == 200
	}

	/// Body decoded as UTF-8 for diagnostics; invalid sequences are replaced.
	pub fn body_text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Clients built through [`ReqwestHttpClient::from_config`] do not follow redirects, so a
/// token endpoint cannot bounce credentials to another URI.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client applying the configured timeout and user agent.
	pub fn from_config(config: &DashboardConfig) -> Result<Self, ConfigError> {
		Ok(Self(Self::builder(config).build()?))
	}

	/// Returns a reqwest builder preloaded with the configured timeout, user agent, and
	/// redirect policy, for callers that need extra transport settings (custom roots, proxies).
	pub fn builder(config: &DashboardConfig) -> reqwest::ClientBuilder {
		ReqwestClient::builder()
			.timeout(config.request_timeout)
			.user_agent(config.user_agent.as_str())
			.redirect(reqwest::redirect::Policy::none())
	}

	async fn collect(request: reqwest::RequestBuilder) -> Result<ApiResponse, TransportError> {
		let response = request.send().await?;
		let status = response.status().as_u16();
		let body = response.bytes().await?.to_vec();

		Ok(ApiResponse { status, body })
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	fn post_form<'a>(&'a self, url: &'a Url, form: &'a [(&'a str, &'a str)]) -> HttpFuture<'a> {
		Box::pin(Self::collect(self.0.post(url.clone()).form(form)))
	}

	fn get_with_bearer<'a>(&'a self, url: &'a Url, access_token: &'a str) -> HttpFuture<'a> {
		Box::pin(Self::collect(self.0.get(url.clone()).bearer_auth(access_token)))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn body_text_is_lossy() {
		let response = ApiResponse { status: 400, body: vec![b'o', b'k', 0xff] };

		assert!(!response.is_ok());
		assert_eq!(response.body_text(), "ok\u{fffd}");
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn client_builds_from_default_config() {
		assert!(ReqwestHttpClient::from_config(&DashboardConfig::default()).is_ok());
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn builder_accepts_extra_transport_settings() {
		let client = ReqwestHttpClient::builder(&DashboardConfig::default())
			.danger_accept_invalid_certs(true)
			.build()
			.expect("Customized client should build.");

		let _ = ReqwestHttpClient::with_client(client);
	}
}
