//! Symmetric signing primitive, independent of any identity semantics.

// crates.io
use hmac::{Hmac, Mac};
use sha2::Sha256;
// self
use crate::auth::SharedSecret;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 signer over a validated [`SharedSecret`].
///
/// Both operations are pure functions over their inputs; the only state is the prepared key.
#[derive(Clone)]
pub struct Signer {
	mac: HmacSha256,
}
impl Signer {
	/// Prepares a signer for the provided secret.
	pub fn new(secret: &SharedSecret) -> Self {
		let mac = HmacSha256::new_from_slice(secret.expose().as_bytes())
			.expect("HMAC-SHA256 accepts keys of any length.");

		Self { mac }
	}

	/// Produces a deterministic keyed signature over `payload`.
	pub fn sign(&self, payload: &[u8]) -> Vec<u8> {
		let mut mac = self.mac.clone();

		mac.update(payload);

		mac.finalize().into_bytes().to_vec()
	}

	/// Verifies `signature` against `payload` in constant time.
	///
	/// The comparison goes through the MAC's own output type, which never short-circuits on
	/// the first differing byte.
	pub fn verify(&self, payload: &[u8], signature: &[u8]) -> bool {
		let mut mac = self.mac.clone();

		mac.update(payload);

		mac.verify_slice(signature).is_ok()
	}
}
