//! Page retrieval and outbound-link harvesting, with and without the destination guard.

pub mod extract;
pub mod transport;

pub use extract::*;
pub use transport::*;

// self
use crate::{
	_prelude::*,
	error::FetchError,
	guard::DestinationGuard,
	obs::{self, OpKind, OpOutcome, OpSpan},
};

/// Selects whether a fetch consults the destination guard first.
///
/// `Unguarded` exists for parity with the legacy behavior and for tests that compare the
/// two paths; `Guarded` is the supported operation and the only one a routing layer
/// should expose to untrusted input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FetchPolicy {
	/// Classify the destination before any connection is made.
	Guarded,
	/// Connect directly with no destination check. Legacy parity only.
	Unguarded,
}
impl FetchPolicy {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FetchPolicy::Guarded => "guarded",
			FetchPolicy::Unguarded => "unguarded",
		}
	}
}
impl Display for FetchPolicy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Ordered sequence of extracted link strings.
///
/// Document order, duplicates preserved; a sequence, never a set. Transient; nothing in
/// the crate persists it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LinkResult(Vec<String>);
impl LinkResult {
	pub(crate) fn new(links: Vec<String>) -> Self {
		Self(links)
	}

	/// Consumes the result and returns the underlying link sequence.
	pub fn into_vec(self) -> Vec<String> {
		self.0
	}
}
impl std::ops::Deref for LinkResult {
	type Target = [String];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl IntoIterator for LinkResult {
	type IntoIter = std::vec::IntoIter<String>;
	type Item = String;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

/// Retrieves remote pages and extracts their outbound anchors.
///
/// The guarded path is a decorator over the shared fetch-and-extract routine: it runs
/// [`DestinationGuard::classify`] first and hands the resolved addresses to the transport
/// so the connection is pinned to what was classified.
pub struct LinkFetcher<T>
where
	T: PageTransport + ?Sized,
{
	transport: Arc<T>,
	guard: DestinationGuard,
}
impl<T> LinkFetcher<T>
where
	T: PageTransport + ?Sized,
{
	/// Builds a fetcher over the provided transport.
	pub fn new(transport: Arc<T>) -> Self {
		Self { transport, guard: DestinationGuard }
	}

	/// Fetches under the requested policy.
	pub async fn fetch(&self, policy: FetchPolicy, candidate: &str) -> Result<LinkResult> {
		match policy {
			FetchPolicy::Guarded => self.fetch_guarded(candidate).await,
			FetchPolicy::Unguarded => self.fetch_unguarded(candidate).await,
		}
	}

	/// Classifies the candidate, then fetches it with the classified addresses pinned.
	///
	/// A forbidden classification propagates as [`Error::Rejected`] without opening any
	/// socket; failures past classification (connect, timeout, non-2xx status, body read)
	/// surface as [`Error::Fetch`].
	pub async fn fetch_guarded(&self, candidate: &str) -> Result<LinkResult> {
		let span = OpSpan::new(OpKind::Fetch, "fetch_guarded");

		obs::record_op_outcome(OpKind::Fetch, OpOutcome::Attempt);

		let result = span
			.instrument(async move {
				let destination = self.guard.classify(candidate)?;
				let target =
					FetchTarget { url: destination.url, pinned: destination.addrs };
				let body = self.transport.get(&target).await?;

				Ok(extract_links(&body))
			})
			.await;

		match &result {
			Ok(_) => obs::record_op_outcome(OpKind::Fetch, OpOutcome::Success),
			Err(_) => obs::record_op_outcome(OpKind::Fetch, OpOutcome::Failure),
		}

		result
	}

	/// Connects directly with no destination check.
	///
	/// Present for parity with the legacy behavior; every failure, including a URL that
	/// does not parse, is [`Error::Fetch`]. Do not expose this to untrusted input.
	pub async fn fetch_unguarded(&self, candidate: &str) -> Result<LinkResult> {
		let span = OpSpan::new(OpKind::Fetch, "fetch_unguarded");

		obs::record_op_outcome(OpKind::Fetch, OpOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = Url::parse(candidate).map_err(FetchError::from)?;
				let target = FetchTarget { url, pinned: Vec::new() };
				let body = self.transport.get(&target).await?;

				Ok(extract_links(&body))
			})
			.await;

		match &result {
			Ok(_) => obs::record_op_outcome(OpKind::Fetch, OpOutcome::Success),
			Err(_) => obs::record_op_outcome(OpKind::Fetch, OpOutcome::Failure),
		}

		result
	}
}
