//! Runtime credential cache the host exposes to its nodes.
//!
//! The host keeps a process-wide map of credentials keyed by identity that is written at
//! configuration time and again after every successful refresh. [`CredentialCache`] models that
//! map as an injected dependency so embedders can bridge their own registry and tests can
//! inspect it.

// self
use crate::{
	_prelude::*,
	auth::{CredentialRecord, Identity},
};

/// Host-visible credential registry.
pub trait CredentialCache
where
	Self: Send + Sync,
{
	/// Publishes `record` for `identity`, replacing any previous value.
	fn add_credentials(&self, identity: &Identity, record: CredentialRecord);

	/// Returns the record currently published for `identity`.
	fn get_credentials(&self, identity: &Identity) -> Option<CredentialRecord>;
}

/// Thread-safe in-process [`CredentialCache`].
#[derive(Clone, Debug, Default)]
pub struct MemoryCache(Arc<RwLock<HashMap<Identity, CredentialRecord>>>);
impl CredentialCache for MemoryCache {
	fn add_credentials(&self, identity: &Identity, record: CredentialRecord) {
		self.0.write().insert(identity.clone(), record);
	}

	fn get_credentials(&self, identity: &Identity) -> Option<CredentialRecord> {
		self.0.read().get(identity).cloned()
	}
}
