//! Dashboard-level error types shared across the refresher, stores, and station fetch.

// self
use crate::{_prelude::*, auth::Identity};

/// Dashboard-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error surfaced for a failed invocation.
///
/// Every variant is fatal for the invocation that produced it; nothing is retried.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Neither the credential cache nor the store holds a record for the identity.
	#[error("No credentials are configured for identity `{identity}`.")]
	ConfigurationMissing {
		/// Identity that was looked up.
		identity: Identity,
	},
	/// The `refresh_token` grant failed.
	#[error(transparent)]
	TokenRefresh(#[from] RefreshError),
	/// Credential file could not be read, parsed, or written.
	#[error(transparent)]
	Storage(#[from] crate::store::StoreError),
	/// Station data request failed or returned an unusable body.
	#[error(transparent)]
	DataFetch(#[from] FetchError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

/// Configuration and validation failures raised before any request is sent.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Endpoint must be an absolute `http` or `https` URL.
	#[error("The {endpoint} endpoint must use http or https: {url}.")]
	UnsupportedScheme {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Request timeout must be positive.
	#[error("Request timeout must be greater than zero.")]
	ZeroTimeout,
	/// Identity derivation or validation failed.
	#[error(transparent)]
	InvalidIdentity(#[from] crate::auth::IdentifierError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures of the `refresh_token` grant. Each variant keeps what the provider sent so the
/// host can show it.
#[derive(Debug, ThisError)]
pub enum RefreshError {
	/// Token endpoint answered with a non-200 status.
	#[error("Unable to refresh the access token (HTTP {status}): {body}")]
	Rejected {
		/// HTTP status code returned by the token endpoint.
		status: u16,
		/// Raw response body.
		body: String,
	},
	/// Token endpoint answered 200 but the body is not a usable token response.
	#[error("Token endpoint returned a malformed response: {body}")]
	Malformed {
		/// Raw response body.
		body: String,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// The request never produced a response.
	#[error("Transport failure while calling the token endpoint.")]
	Transport(#[source] TransportError),
}

/// Failures of the authenticated station data request.
#[derive(Debug, ThisError)]
pub enum FetchError {
	/// Station endpoint answered with a non-200 status.
	#[error("Station data request failed (HTTP {status}): {body}")]
	Status {
		/// HTTP status code returned by the station endpoint.
		status: u16,
		/// Raw response body.
		body: String,
	},
	/// Station endpoint answered 200 but the body is not a station list.
	#[error("Station endpoint returned a malformed response.")]
	Malformed {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// The request never produced a response.
	#[error("Transport failure while calling the station endpoint.")]
	Transport(#[source] TransportError),
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// A failed invocation paired with the input that triggered it, so the host can report both.
#[derive(Debug, ThisError)]
#[error("{error}")]
pub struct InvocationFailure<T> {
	/// Why the invocation aborted.
	#[source]
	pub error: Error,
	/// The untouched triggering input.
	pub input: T,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::store::StoreError;

	#[test]
	fn store_error_is_reported_once() {
		let store_error = StoreError::Io { message: "disk full".into() };
		let error: Error = store_error.clone().into();

		assert!(matches!(error, Error::Storage(_)));
		assert_eq!(error.to_string(), store_error.to_string());
		assert!(
			StdError::source(&error).is_none(),
			"A transparent store error must not repeat itself in the source chain."
		);
	}

	#[test]
	fn rejected_refresh_keeps_raw_body() {
		let error: Error = RefreshError::Rejected {
			status: 400,
			body: "{\"error\":\"invalid_grant\"}".into(),
		}
		.into();
		let rendered = error.to_string();

		assert!(rendered.contains("400"));
		assert!(rendered.contains("invalid_grant"));
	}
}
