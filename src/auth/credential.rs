//! Long-lived OAuth client credentials plus the current refresh token.

// self
use crate::{_prelude::*, auth::secret::TokenSecret};

/// Credential triple stored per identity.
///
/// Client id and secret never change after configuration; the refresh token rotates on every
/// successful refresh.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
	/// OAuth client identifier.
	pub client_id: String,
	/// OAuth client secret.
	pub client_secret: TokenSecret,
	/// Refresh token to exchange on the next invocation.
	pub refresh_token: TokenSecret,
}
impl CredentialRecord {
	/// Creates a record from its three parts.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<TokenSecret>,
		refresh_token: impl Into<TokenSecret>,
	) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			refresh_token: refresh_token.into(),
		}
	}

	/// Returns a copy carrying the rotated refresh token.
	pub fn rotated(&self, refresh_token: TokenSecret) -> Self {
		Self {
			client_id: self.client_id.clone(),
			client_secret: self.client_secret.clone(),
			refresh_token,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_uses_snake_case_wire_names() {
		let record = CredentialRecord::new("id-1", "secret-1", "refresh-1");
		let value = serde_json::to_value(&record).expect("Record should serialize.");

		assert_eq!(
			value,
			serde_json::json!({
				"client_id": "id-1",
				"client_secret": "secret-1",
				"refresh_token": "refresh-1",
			})
		);
	}

	#[test]
	fn rotation_only_replaces_refresh_token() {
		let record = CredentialRecord::new("id-1", "secret-1", "refresh-1");
		let rotated = record.rotated(TokenSecret::new("refresh-2"));

		assert_eq!(rotated.client_id, "id-1");
		assert_eq!(rotated.client_secret.expose(), "secret-1");
		assert_eq!(rotated.refresh_token.expose(), "refresh-2");
		assert_eq!(format!("{rotated:?}").matches("<redacted>").count(), 2);
	}
}
