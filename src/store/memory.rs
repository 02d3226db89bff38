//! Thread-safe in-memory [`CredentialStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::{CredentialRecord, Identity},
	store::{CredentialStore, StoreFuture},
};

type StoreMap = Arc<RwLock<HashMap<Identity, CredentialRecord>>>;

/// Storage backend that keeps records in-process for tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	/// Returns the number of stored identities.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` when no identity has been saved.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}
}
impl CredentialStore for MemoryStore {
	fn load<'a>(&'a self, identity: &'a Identity) -> StoreFuture<'a, Option<CredentialRecord>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(map.read().get(identity).cloned()) })
	}

	fn save<'a>(
		&'a self,
		identity: &'a Identity,
		record: CredentialRecord,
	) -> StoreFuture<'a, ()> {
		let map = self.0.clone();

		Box::pin(async move {
			map.write().insert(identity.clone(), record);

			Ok(())
		})
	}
}
