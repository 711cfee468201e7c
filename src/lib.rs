//! Rust’s guarded link enumerator—mint bearer tokens, vet egress destinations, and harvest
//! outbound anchors in one crate built for production.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod fetch;
pub mod guard;
pub mod obs;
pub mod store;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::fetch::{LinkFetcher, PageTransport, ReqwestPageTransport};

	/// Fetcher type alias used by reqwest-backed integration tests.
	pub type ReqwestTestFetcher = LinkFetcher<ReqwestPageTransport>;

	/// Builds a reqwest page transport that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_transport() -> ReqwestPageTransport {
		ReqwestPageTransport::new().danger_accept_invalid_certs(true)
	}

	/// Constructs a [`LinkFetcher`] backed by the insecure reqwest transport used across
	/// integration tests.
	pub fn build_reqwest_test_fetcher() -> ReqwestTestFetcher {
		LinkFetcher::new(Arc::new(test_reqwest_transport()))
	}

	/// Constructs a [`LinkFetcher`] over any transport fake supplied by a test.
	pub fn build_test_fetcher<T>(transport: Arc<T>) -> LinkFetcher<T>
	where
		T: PageTransport,
	{
		LinkFetcher::new(transport)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		net::{IpAddr, SocketAddr},
		pin::Pin,
		str::FromStr,
		sync::Arc,
		time::Duration as StdDuration,
	};

	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
