//! Identities, credential records, token sets, and the redacting secret wrapper.

pub mod credential;
pub mod id;
pub mod secret;
pub mod token;

pub use credential::*;
pub use id::*;
pub use secret::*;
pub use token::*;
