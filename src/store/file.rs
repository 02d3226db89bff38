//! JSON-file [`CredentialStore`] shared with the host's on-disk credential format.
//!
//! The file is a single pretty-printed object mapping identity strings to
//! `{client_id, client_secret, refresh_token}` records. A missing file is an empty mapping.
//! Every save re-reads the file, replaces one entry, and swaps the whole document in through a
//! temporary sibling so a crash never leaves a truncated file behind.

// std
use std::{
	fs::{self, File, OpenOptions},
	io::{ErrorKind, Write},
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	auth::{CredentialRecord, Identity},
	store::{CredentialStore, StoreError, StoreFuture},
};

type Snapshot = BTreeMap<Identity, CredentialRecord>;

/// Persists credential records to a JSON file on every save.
#[derive(Clone, Debug)]
pub struct FileStore {
	path: PathBuf,
	write_guard: Arc<Mutex<()>>,
}
impl FileStore {
	/// Creates a store rooted at `path`. The file is not touched until the first operation.
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into(), write_guard: Default::default() }
	}

	/// Location of the credential file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn read_snapshot(&self) -> Result<Snapshot, StoreError> {
		let bytes = match fs::read(&self.path) {
			Ok(bytes) => bytes,
			Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Snapshot::new()),
			Err(e) => {
				return Err(StoreError::Io {
					message: format!("Failed to read {}: {e}", self.path.display()),
				});
			},
		};
		let mut de = serde_json::Deserializer::from_slice(&bytes);
		let snapshot = serde_path_to_error::deserialize(&mut de).map_err(|e| StoreError::Corrupt {
			message: format!("Failed to parse {}: {e}", self.path.display()),
		})?;

		de.end().map_err(|e| StoreError::Corrupt {
			message: format!("Trailing data in {}: {e}", self.path.display()),
		})?;

		Ok(snapshot)
	}

	fn ensure_parent_exists(&self) -> Result<(), StoreError> {
		if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Io {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}

		Ok(())
	}

	fn persist(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
		self.ensure_parent_exists()?;

		let serialized = serde_json::to_vec_pretty(snapshot).map_err(|e| StoreError::Io {
			message: format!("Failed to serialize credential snapshot: {e}"),
		})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = create_private(&tmp_path).map_err(|e| StoreError::Io {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Io {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Io {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| {
			let _ = fs::remove_file(&tmp_path);

			StoreError::Io { message: format!("Failed to replace {}: {e}", self.path.display()) }
		})
	}
}
impl CredentialStore for FileStore {
	fn load<'a>(&'a self, identity: &'a Identity) -> StoreFuture<'a, Option<CredentialRecord>> {
		Box::pin(async move {
			let mut snapshot = self.read_snapshot()?;

			Ok(snapshot.remove(identity))
		})
	}

	fn save<'a>(
		&'a self,
		identity: &'a Identity,
		record: CredentialRecord,
	) -> StoreFuture<'a, ()> {
		Box::pin(async move {
			// Serializes writers sharing this handle; other processes can still interleave.
			let _guard = self.write_guard.lock();
			let mut snapshot = self.read_snapshot()?;

			snapshot.insert(identity.clone(), record);
			self.persist(&snapshot)?;

			#[cfg(feature = "tracing")]
			tracing::debug!(%identity, path = %self.path.display(), "credential record persisted");

			Ok(())
		})
	}
}

#[cfg(unix)]
fn create_private(path: &Path) -> std::io::Result<File> {
	use std::os::unix::fs::OpenOptionsExt;

	OpenOptions::new().write(true).create(true).truncate(true).mode(0o600).open(path)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> std::io::Result<File> {
	OpenOptions::new().write(true).create(true).truncate(true).open(path)
}
