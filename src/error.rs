//! Crate-level error taxonomy shared by the auth, guard, and fetch components.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Credential-store failure reported by the external collaborator.
	#[error("{0}")]
	Store(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem; fatal at startup.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Authentication outcome the request layer maps to an unauthorized response.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Destination rejected before any network connection was opened.
	#[error(transparent)]
	Rejected(#[from] Rejection),
	/// Transport or response failure after a destination was allowed.
	#[error(transparent)]
	Fetch(#[from] FetchError),
}

/// Configuration failures raised while wiring the trust boundary.
///
/// These are startup-time problems; none of them is recoverable per request.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// The shared signing secret was present but empty.
	#[error("Signing secret cannot be empty.")]
	EmptySecret,
	/// The environment variable holding the shared secret is not set.
	#[error("Environment variable `{var}` holding the signing secret is not set.")]
	MissingSecret {
		/// Name of the missing environment variable.
		var: String,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Authentication failures surfaced by the token service.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// The token subject failed identity validation.
	#[error("Token subject is not a valid identity.")]
	InvalidIdentity(#[from] crate::auth::UsernameError),
	/// The presented token could not be authenticated.
	///
	/// Deliberately detail-free: malformed encoding, a signature mismatch, and a missing
	/// subject all collapse into this one variant so the error payload cannot be used as a
	/// verification oracle. The precise cause is logged at debug level instead.
	#[error("Token could not be authenticated.")]
	AuthenticationFailed,
}

/// Reasons a candidate URL is refused before any connection is opened.
///
/// The request layer maps every variant to a client-facing bad-request response; unlike
/// [`AuthError::AuthenticationFailed`] the reason is safe to disclose.
#[derive(Debug, ThisError)]
pub enum Rejection {
	/// The candidate string is not an absolute URL.
	#[error("URL could not be parsed.")]
	MalformedUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// The URL carries a scheme the fetcher never dereferences.
	#[error("Scheme `{scheme}` is not fetchable; only http and https are allowed.")]
	UnsupportedScheme {
		/// Scheme found on the candidate URL.
		scheme: String,
	},
	/// The host did not resolve to any network address.
	#[error("Host `{host}` did not resolve to any address.")]
	UnresolvableHost {
		/// Host component of the candidate URL.
		host: String,
	},
	/// At least one resolved address falls in a private or reserved range.
	#[error("Destination `{addr}` resolves into a private or reserved range.")]
	PrivateDestination {
		/// Offending resolved address.
		addr: IpAddr,
	},
}

/// Transport-level failures raised while fetching an allowed page.
#[derive(Debug, ThisError)]
pub enum FetchError {
	/// Fetch URL could not be parsed (unguarded path only; the guarded path rejects these
	/// earlier as [`Rejection::MalformedUrl`]).
	#[error("Fetch URL could not be parsed.")]
	Url(#[from] url::ParseError),
	/// Underlying HTTP client reported a network failure (DNS, TCP, TLS, timeout).
	#[error("Network error occurred while fetching the page.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The page responded with a non-success status.
	#[error("Page responded with HTTP status {status}.")]
	Status {
		/// HTTP status code returned by the destination.
		status: u16,
	},
}
impl FetchError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for FetchError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
