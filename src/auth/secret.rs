//! Process-wide shared signing secret with log redaction.

// std
use std::env;
// self
use crate::{_prelude::*, error::ConfigError};

/// Redacted shared secret used symmetrically to sign and verify tokens.
///
/// The secret is loaded once at startup and stays immutable afterwards; rotating it means
/// constructing fresh [`Signer`](crate::auth::Signer)/[`TokenService`](crate::auth::TokenService)
/// instances, which invalidates every previously issued token. Emptiness is rejected at
/// construction so the signing primitive never has to re-check it per request.
#[derive(Clone, PartialEq, Eq)]
pub struct SharedSecret(String);
impl SharedSecret {
	/// Wraps a new secret value, rejecting empty input.
	pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
		let value = value.into();

		if value.is_empty() {
			return Err(ConfigError::EmptySecret);
		}

		Ok(Self(value))
	}

	/// Loads the secret from the named environment variable at startup.
	///
	/// Absence and emptiness are both fatal configuration errors, never per-request ones.
	pub fn from_env(var: &str) -> Result<Self, ConfigError> {
		env::var(var)
			.map_err(|_| ConfigError::MissingSecret { var: var.to_owned() })
			.and_then(Self::new)
	}

	/// Returns the inner secret value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for SharedSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SharedSecret").field(&"<redacted>").finish()
	}
}
impl Display for SharedSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
