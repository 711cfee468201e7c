//! Compact signed bearer token and the service that issues and verifies it.
//!
//! Wire format: `base64url(claims_json) "." base64url(hmac_sha256)`, URL-safe without
//! padding, so a token travels unescaped inside an HTTP header value. Claims carry the
//! subject plus an informational `iat`; verification never reads `iat`, so tokens have no
//! expiry and stay valid until the shared secret rotates. This mirrors the reference
//! behavior on purpose and is the documented trade-off of this design.

// std
use std::ops::Deref;
// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
// self
use crate::{
	_prelude::*,
	auth::{SharedSecret, Signer, Username},
	error::AuthError,
	obs::{self, OpKind, OpOutcome, OpSpan},
};

const SEGMENT_SEPARATOR: char = '.';

/// Opaque, transmissible signed token bound to a username.
///
/// Treated as a bearer credential, so formatters redact it the same way the shared secret
/// is redacted; use [`expose`](Self::expose) where the raw value is genuinely needed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedToken(String);
impl SignedToken {
	/// Returns the wire value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for SignedToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Deref for SignedToken {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl From<SignedToken> for String {
	fn from(value: SignedToken) -> Self {
		value.0
	}
}
impl Debug for SignedToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SignedToken").field(&"<redacted>").finish()
	}
}
impl Display for SignedToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Claims carried inside the token payload segment.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
	/// Token subject.
	sub: String,
	/// Issuance instant in unix seconds; informational only, never checked.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	iat: Option<i64>,
}

/// Internal reason a token failed verification; logged, never surfaced.
#[derive(Debug, ThisError)]
enum VerifyFailure {
	#[error("token is missing the signature separator")]
	MissingSeparator,
	#[error("payload segment is not valid base64url")]
	PayloadEncoding,
	#[error("signature segment is not valid base64url")]
	SignatureEncoding,
	#[error("signature does not match the payload")]
	SignatureMismatch,
	#[error("claims could not be decoded at `{path}`")]
	Claims { path: String },
	#[error("subject claim is missing or invalid")]
	InvalidSubject,
}

/// Stateless identity-to-token mapping under one shared secret.
///
/// Every call is idempotent: verifying the same token with the same secret always yields
/// the same outcome. Rotation is expressed by constructing a fresh service, never by
/// mutating an existing one.
#[derive(Clone)]
pub struct TokenService {
	signer: Signer,
}
impl TokenService {
	/// Builds a token service signing with the provided secret.
	pub fn new(secret: &SharedSecret) -> Self {
		Self { signer: Signer::new(secret) }
	}

	/// Issues a token whose subject is the provided username.
	///
	/// Emptiness of the subject is unrepresentable here; it is rejected where the
	/// [`Username`] is built, surfacing as [`AuthError::InvalidIdentity`] at that boundary.
	pub fn issue(&self, subject: &Username) -> SignedToken {
		let _guard = OpSpan::new(OpKind::IssueToken, "issue").entered();

		obs::record_op_outcome(OpKind::IssueToken, OpOutcome::Attempt);

		let claims = Claims {
			sub: subject.as_ref().to_owned(),
			iat: Some(OffsetDateTime::now_utc().unix_timestamp()),
		};
		let payload =
			serde_json::to_vec(&claims).expect("Claims serialization to JSON is infallible.");
		let signature = self.signer.sign(&payload);
		let token = format!(
			"{}{SEGMENT_SEPARATOR}{}",
			URL_SAFE_NO_PAD.encode(&payload),
			URL_SAFE_NO_PAD.encode(&signature)
		);

		obs::record_op_outcome(OpKind::IssueToken, OpOutcome::Success);

		SignedToken(token)
	}

	/// Verifies a presented token and recovers its subject.
	///
	/// Any failure (malformed encoding, signature mismatch, undecodable claims, missing
	/// subject) collapses into the single [`AuthError::AuthenticationFailed`] so callers
	/// cannot probe which sub-check tripped. The concrete reason is recorded at debug
	/// level for operators.
	pub fn verify(&self, token: &str) -> Result<Username, AuthError> {
		let _guard = OpSpan::new(OpKind::VerifyToken, "verify").entered();

		obs::record_op_outcome(OpKind::VerifyToken, OpOutcome::Attempt);

		match self.verify_inner(token) {
			Ok(subject) => {
				obs::record_op_outcome(OpKind::VerifyToken, OpOutcome::Success);

				Ok(subject)
			},
			Err(reason) => {
				obs::record_op_outcome(OpKind::VerifyToken, OpOutcome::Failure);

				#[cfg(feature = "tracing")]
				tracing::debug!(reason = %reason, "Token verification failed.");
				#[cfg(not(feature = "tracing"))]
				let _ = reason;

				Err(AuthError::AuthenticationFailed)
			},
		}
	}

	fn verify_inner(&self, token: &str) -> Result<Username, VerifyFailure> {
		let (payload_b64, signature_b64) =
			token.rsplit_once(SEGMENT_SEPARATOR).ok_or(VerifyFailure::MissingSeparator)?;
		let payload =
			URL_SAFE_NO_PAD.decode(payload_b64).map_err(|_| VerifyFailure::PayloadEncoding)?;
		let signature =
			URL_SAFE_NO_PAD.decode(signature_b64).map_err(|_| VerifyFailure::SignatureEncoding)?;

		// Signature first, claims second; undecodable claims on a forged payload must not
		// produce a different observable path than a plain mismatch.
		if !self.signer.verify(&payload, &signature) {
			return Err(VerifyFailure::SignatureMismatch);
		}

		let mut deserializer = serde_json::Deserializer::from_slice(&payload);
		let claims: Claims = serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|e| VerifyFailure::Claims { path: e.path().to_string() })?;

		Username::new(&claims.sub).map_err(|_| VerifyFailure::InvalidSubject)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn service(secret: &str) -> TokenService {
		TokenService::new(&SharedSecret::new(secret).expect("Secret fixture should be valid."))
	}

	fn username(value: &str) -> Username {
		Username::new(value).expect("Username fixture should be valid.")
	}

	#[test]
	fn issue_verify_round_trip() {
		let service = service("round-trip-secret");
		let subject = username("alice");
		let token = service.issue(&subject);
		let recovered =
			service.verify(token.expose()).expect("Freshly issued token should verify.");

		assert_eq!(recovered, subject);
	}

	#[test]
	fn verify_is_idempotent() {
		let service = service("idempotent-secret");
		let token = service.issue(&username("bob"));
		let first = service.verify(token.expose()).expect("First verification should succeed.");
		let second = service.verify(token.expose()).expect("Second verification should succeed.");

		assert_eq!(first, second);
	}

	#[test]
	fn rotated_secret_invalidates_previous_tokens() {
		let before = service("secret-before");
		let after = service("secret-after");
		let token = before.issue(&username("carol"));

		assert!(matches!(
			after.verify(token.expose()),
			Err(AuthError::AuthenticationFailed)
		));
	}

	#[test]
	fn any_single_byte_tamper_is_rejected() {
		let service = service("tamper-secret");
		let token = String::from(service.issue(&username("dave")));
		let (payload_b64, signature_b64) =
			token.rsplit_once('.').expect("Token should contain a separator.");
		let mut payload = URL_SAFE_NO_PAD
			.decode(payload_b64)
			.expect("Token payload segment should be base64url.");

		for index in 0..payload.len() {
			payload[index] ^= 0x01;

			let forged =
				format!("{}.{signature_b64}", URL_SAFE_NO_PAD.encode(&payload));

			assert!(
				matches!(service.verify(&forged), Err(AuthError::AuthenticationFailed)),
				"Tampered byte {index} must not verify.",
			);

			payload[index] ^= 0x01;
		}
	}

	#[test]
	fn malformed_tokens_collapse_into_one_error() {
		let service = service("malformed-secret");
		let samples =
			["", "no-separator", "a.b", "!!!.###", "bm90LWpzb24.bm90LWpzb24", "..", "a.b.c"];

		for sample in samples {
			let err = service
				.verify(sample)
				.expect_err("Malformed token sample must fail verification.");

			assert!(matches!(err, AuthError::AuthenticationFailed));
			assert_eq!(err.to_string(), "Token could not be authenticated.");
		}
	}

	#[test]
	fn empty_subject_claim_is_rejected() {
		let service = service("subject-secret");
		let signer =
			Signer::new(&SharedSecret::new("subject-secret").expect("Secret should be valid."));
		let payload = br#"{"sub":""}"#;
		let signature = signer.sign(payload);
		let forged = format!(
			"{}.{}",
			URL_SAFE_NO_PAD.encode(payload),
			URL_SAFE_NO_PAD.encode(&signature)
		);

		assert!(matches!(service.verify(&forged), Err(AuthError::AuthenticationFailed)));
	}

	#[test]
	fn iat_claim_is_informational_only() {
		let service = service("iat-secret");
		let signer =
			Signer::new(&SharedSecret::new("iat-secret").expect("Secret should be valid."));
		// No `iat` at all; verification must not require it.
		let payload = br#"{"sub":"erin"}"#;
		let signature = signer.sign(payload);
		let bare = format!(
			"{}.{}",
			URL_SAFE_NO_PAD.encode(payload),
			URL_SAFE_NO_PAD.encode(&signature)
		);
		let recovered =
			service.verify(&bare).expect("Token without iat should still verify.");

		assert_eq!(recovered.as_ref(), "erin");
	}

	#[test]
	fn token_formatters_redact() {
		let token = service("redact-secret").issue(&username("frank"));

		assert_eq!(format!("{token:?}"), "SignedToken(\"<redacted>\")");
		assert_eq!(format!("{token}"), "<redacted>");
	}
}
