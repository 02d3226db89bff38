//! The OAuth 2.0 `refresh_token` grant against the provider's token endpoint.
//!
//! [`TokenRefresher::refresh`] exchanges a stored refresh token for a fresh access token and a
//! rotated refresh token. It never touches storage; persisting the rotated token is the
//! caller's job, and the old token stops working as soon as the provider answers.

mod metrics;

pub use metrics::{RefreshCounts, RefreshMetrics};

// self
use crate::{
	_prelude::*,
	auth::{CredentialRecord, TokenResponse, TokenSet},
	error::RefreshError,
	http::ApiHttpClient,
};

/// Grant type sent in every refresh request.
pub const REFRESH_GRANT: &str = "refresh_token";

/// Performs single-shot refresh requests; no retry, no caching.
pub struct TokenRefresher<C>
where
	C: ?Sized + ApiHttpClient,
{
	http_client: Arc<C>,
	token_endpoint: Url,
}
impl<C> TokenRefresher<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a refresher posting to `token_endpoint` through `http_client`.
	pub fn new(http_client: impl Into<Arc<C>>, token_endpoint: Url) -> Self {
		Self { http_client: http_client.into(), token_endpoint }
	}

	/// Endpoint receiving the grant.
	pub fn token_endpoint(&self) -> &Url {
		&self.token_endpoint
	}

	/// Exchanges `credentials.refresh_token` for a new [`TokenSet`].
	///
	/// Only HTTP 200 with a JSON body carrying both `access_token` and `refresh_token` counts
	/// as success. Any other status maps to [`RefreshError::Rejected`], an unusable 200 body to
	/// [`RefreshError::Malformed`]; both keep the raw body.
	pub async fn refresh(&self, credentials: &CredentialRecord) -> Result<TokenSet, RefreshError> {
		let form = [
			("grant_type", REFRESH_GRANT),
			("refresh_token", credentials.refresh_token.expose()),
			("client_id", credentials.client_id.as_str()),
			("client_secret", credentials.client_secret.expose()),
		];
		let response = self
			.http_client
			.post_form(&self.token_endpoint, &form)
			.await
			.map_err(RefreshError::Transport)?;
		let issued_at = OffsetDateTime::now_utc();

		if !response.is_ok() {
			return Err(RefreshError::Rejected {
				status: response.status,
				body: response.body_text(),
			});
		}

		let mut de = serde_json::Deserializer::from_slice(&response.body);
		let parsed: TokenResponse = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| RefreshError::Malformed { body: response.body_text(), source })?;

		Ok(parsed.into_token_set(issued_at))
	}
}
impl<C> Clone for TokenRefresher<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self { http_client: self.http_client.clone(), token_endpoint: self.token_endpoint.clone() }
	}
}
impl<C> Debug for TokenRefresher<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenRefresher").field("token_endpoint", &self.token_endpoint).finish()
	}
}
