//! Transient token pair returned by the `refresh_token` grant.

// self
use crate::{_prelude::*, auth::secret::TokenSecret};

/// Access token plus the rotated refresh token.
///
/// The access token is used for one station request and dropped; only the refresh token is
/// folded back into a [`CredentialRecord`](crate::auth::CredentialRecord).
#[derive(Clone, Debug)]
pub struct TokenSet {
	/// Short-lived bearer token for the station request.
	pub access_token: TokenSecret,
	/// Replacement refresh token; the one just exchanged is no longer valid.
	pub refresh_token: TokenSecret,
	/// Instant the token endpoint answered.
	pub issued_at: OffsetDateTime,
	/// Lifetime reported by the provider, if any.
	pub expires_in: Option<Duration>,
}
impl TokenSet {
	/// Expiry instant of the access token, when the provider reported a lifetime.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		self.expires_in.map(|lifetime| self.issued_at + lifetime)
	}
}

/// Wire shape of a successful token endpoint response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
	pub(crate) access_token: String,
	pub(crate) refresh_token: String,
	#[serde(default)]
	pub(crate) expires_in: Option<i64>,
}
impl TokenResponse {
	pub(crate) fn into_token_set(self, issued_at: OffsetDateTime) -> TokenSet {
		TokenSet {
			access_token: TokenSecret::new(self.access_token),
			refresh_token: TokenSecret::new(self.refresh_token),
			issued_at,
			expires_in: self.expires_in.filter(|secs| *secs > 0).map(Duration::seconds),
		}
	}
}
