//! Transport contract for page retrieval, plus the built-in reqwest implementation.

// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::error::{ConfigError, FetchError};

/// Bounded timeout applied to DNS, connect, and transfer for every fetch.
///
/// The reference behavior had none; a bound is an allowed strengthening since the contract
/// only specifies success/failure outcomes, not latency.
pub const DEFAULT_FETCH_TIMEOUT: StdDuration = StdDuration::from_secs(30);

/// Boxed future returned by [`PageTransport::get`].
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<String>> + 'a + Send>>;

/// Resolved fetch target handed from the fetcher to the transport.
#[derive(Clone, Debug)]
pub struct FetchTarget {
	/// URL to request.
	pub url: Url,
	/// Addresses the connection must be pinned to; empty on the unguarded path, where the
	/// transport resolves at connect time.
	pub pinned: Vec<SocketAddr>,
}

/// Abstraction over HTTP stacks capable of retrieving a page body.
///
/// The trait is the crate's only dependency on an HTTP client. Implementations must honor
/// the pinned addresses in [`FetchTarget`]: when they are present, the connection goes to
/// those literal addresses while the original hostname is still presented for TLS and the
/// `Host` header, closing the classify-then-connect DNS window.
pub trait PageTransport
where
	Self: 'static + Send + Sync,
{
	/// Retrieves the page body for the target, surfacing non-success statuses as errors.
	fn get<'a>(&'a self, target: &'a FetchTarget) -> TransportFuture<'a>;
}

/// Reqwest-backed transport with a bounded timeout and redirects disabled.
///
/// Redirects are refused on purpose: a redirect target never went through classification,
/// so following one would reopen the pivot the guard exists to close. A redirect response
/// therefore surfaces as [`FetchError::Status`].
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestPageTransport {
	timeout: StdDuration,
	accept_invalid_certs: bool,
}
#[cfg(feature = "reqwest")]
impl ReqwestPageTransport {
	/// Builds a transport with [`DEFAULT_FETCH_TIMEOUT`].
	pub fn new() -> Self {
		Self { timeout: DEFAULT_FETCH_TIMEOUT, accept_invalid_certs: false }
	}

	/// Overrides the fetch timeout.
	pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Accepts self-signed certificates, e.g. the ones `httpmock` produces during tests.
	pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
		self.accept_invalid_certs = accept;

		self
	}

	// A client is built per request because address pinning is connector state; reqwest
	// only accepts overrides at build time.
	fn client_for(&self, target: &FetchTarget) -> Result<ReqwestClient> {
		let mut builder = ReqwestClient::builder()
			.timeout(self.timeout)
			.redirect(reqwest::redirect::Policy::none());

		if self.accept_invalid_certs {
			builder = builder.danger_accept_invalid_certs(true);
		}
		if let Some(host) = target.url.host_str().filter(|_| !target.pinned.is_empty()) {
			builder = builder.resolve_to_addrs(host, &target.pinned);
		}

		Ok(builder.build().map_err(ConfigError::from)?)
	}
}
#[cfg(feature = "reqwest")]
impl Default for ReqwestPageTransport {
	fn default() -> Self {
		Self::new()
	}
}
#[cfg(feature = "reqwest")]
impl PageTransport for ReqwestPageTransport {
	fn get<'a>(&'a self, target: &'a FetchTarget) -> TransportFuture<'a> {
		Box::pin(async move {
			let client = self.client_for(target)?;
			let response =
				client.get(target.url.clone()).send().await.map_err(FetchError::from)?;
			let status = response.status();

			if !status.is_success() {
				return Err(FetchError::Status { status: status.as_u16() }.into());
			}

			Ok(response.text().await.map_err(FetchError::from)?)
		})
	}
}
