//! Credential-lookup contract consumed by the surrounding service.
//!
//! The trust boundary itself never reads credentials (authentication here is
//! signature-based), but the surrounding system uses this contract to establish the
//! identity it passes to [`TokenService::issue`](crate::auth::TokenService::issue). Only
//! the contract is specified; the storage technology behind it is the collaborator's
//! business.

pub mod memory;

pub use memory::MemoryCredentialStore;

// self
use crate::{_prelude::*, auth::Username};

/// Boxed future returned by [`CredentialStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Lookup contract implemented by credential backends.
pub trait CredentialStore
where
	Self: Send + Sync,
{
	/// Fetches the credential stored for the username, if present.
	fn lookup<'a>(&'a self, username: &'a Username) -> StoreFuture<'a, Option<Credential>>;
}

/// Stored credential row: a username and its password digest.
///
/// The digest algorithm is the backend's concern; this crate only requires that lookups
/// behave deterministically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credential {
	/// Username the credential belongs to.
	pub username: Username,
	/// Hash of the user's password.
	pub hashed_password: PasswordDigest,
}

/// Redacted password-digest wrapper keeping hash material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordDigest(String);
impl PasswordDigest {
	/// Wraps a digest string produced by the backend's hashing capability.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner digest value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for PasswordDigest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("PasswordDigest").field(&"<redacted>").finish()
	}
}
impl Display for PasswordDigest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Error type produced by [`CredentialStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::Error;

	#[test]
	fn store_error_converts_into_crate_error_with_source() {
		let store_error = StoreError::Backend { message: "database unreachable".into() };
		let crate_error: Error = store_error.clone().into();

		assert!(matches!(crate_error, Error::Store(_)));
		assert!(crate_error.to_string().contains("database unreachable"));

		let source = StdError::source(&crate_error)
			.expect("Crate error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}

	#[test]
	fn digest_formatters_redact() {
		let digest = PasswordDigest::new("$2a$10$abcdefghijklmnopqrstuv");

		assert_eq!(format!("{digest:?}"), "PasswordDigest(\"<redacted>\")");
		assert_eq!(format!("{digest}"), "<redacted>");
	}
}
