//! Storage contracts and built-in store implementations for credential records.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	auth::{CredentialRecord, Identity},
};

/// Boxed future returned by [`CredentialStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Durable persistence contract for per-identity credential records.
pub trait CredentialStore
where
	Self: Send + Sync,
{
	/// Fetches the record stored for `identity`, if any.
	fn load<'a>(&'a self, identity: &'a Identity) -> StoreFuture<'a, Option<CredentialRecord>>;

	/// Persists or replaces the record stored for `identity`, leaving other identities intact.
	fn save<'a>(&'a self, identity: &'a Identity, record: CredentialRecord)
	-> StoreFuture<'a, ()>;
}

/// Error type produced by [`CredentialStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Backing storage could not be read or written (permissions, disk).
	#[error("Credential storage I/O failure: {message}.")]
	Io {
		/// Human-readable error payload.
		message: String,
	},
	/// Backing storage exists but does not hold a valid credential mapping.
	#[error("Credential storage is corrupt: {message}.")]
	Corrupt {
		/// Human-readable error payload.
		message: String,
	},
}
