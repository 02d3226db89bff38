//! Identity keys under which credentials are cached and stored.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

/// Number of trailing characters of a configuration identifier that form the identity.
pub const IDENTITY_SUFFIX_LEN: usize = 16;

const IDENTIFIER_MAX_LEN: usize = 128;

/// Error returned when identity validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("Identity cannot be empty.")]
	Empty,
	/// The identifier contains whitespace characters.
	#[error("Identity contains whitespace.")]
	ContainsWhitespace,
	/// The identifier exceeded the allowed character count.
	#[error("Identity exceeds {max} characters.")]
	TooLong {
		/// Maximum permitted character count.
		max: usize,
	},
}

/// Store and cache key for one credential set.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);
impl Identity {
	/// Creates an identity from an already-derived key after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}

	/// Derives the identity from an opaque host configuration identifier by keeping its
	/// last [`IDENTITY_SUFFIX_LEN`] characters. Shorter identifiers are used whole.
	pub fn from_config_id(config_id: impl AsRef<str>) -> Result<Self, IdentifierError> {
		let config_id = config_id.as_ref();
		let start = config_id
			.char_indices()
			.rev()
			.nth(IDENTITY_SUFFIX_LEN - 1)
			.map_or(0, |(idx, _)| idx);

		Self::new(&config_id[start..])
	}
}
impl Deref for Identity {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for Identity {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<Identity> for String {
	fn from(value: Identity) -> Self {
		value.0
	}
}
impl TryFrom<String> for Identity {
	type Error = IdentifierError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl Borrow<str> for Identity {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl Debug for Identity {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Identity({})", self.0)
	}
}
impl Display for Identity {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for Identity {
	type Err = IdentifierError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

fn validate_view(view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty);
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace);
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn config_id_keeps_trailing_suffix() {
		let identity = Identity::from_config_id("node-config-0123456789abcdef")
			.expect("Long config id should derive an identity.");

		assert_eq!(identity.as_ref(), "0123456789abcdef");

		let short =
			Identity::from_config_id("abc123").expect("Short config id should be used whole.");

		assert_eq!(short.as_ref(), "abc123");
	}

	#[test]
	fn config_id_suffix_respects_char_boundaries() {
		let identity = Identity::from_config_id("ééééé0123456789abcdé")
			.expect("Multi-byte config id should derive an identity.");

		assert_eq!(identity.chars().count(), IDENTITY_SUFFIX_LEN);
		assert_eq!(identity.as_ref(), "é0123456789abcdé");
	}

	#[test]
	fn identities_validate() {
		assert!(Identity::new("").is_err());
		assert!(Identity::new("with space").is_err());
		assert!(Identity::from_config_id("").is_err());
		assert!(Identity::new("a".repeat(IDENTIFIER_MAX_LEN + 1)).is_err());
		assert!(serde_json::from_str::<Identity>("\" padded\"").is_err());
	}

	#[test]
	fn borrow_supports_fast_lookup() {
		let map: HashMap<Identity, u8> = HashMap::from_iter([(
			Identity::new("abc").expect("Identity used for lookup should be valid."),
			7_u8,
		)]);

		assert_eq!(map.get("abc"), Some(&7));
	}
}
