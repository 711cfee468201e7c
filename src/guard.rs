//! Egress destination classification, the crate's Server-Side Request Forgery boundary.
//!
//! The guard decides at the resolved-address level, not the literal hostname, so a DNS
//! record pointing a public name at a private address is caught at classification time.
//! DNS can still change between classification and fetch; the fetcher closes that gap by
//! pinning the addresses captured in [`AllowedDestination`] into its connector.

// self
use crate::{
	_prelude::*,
	error::Rejection,
	obs::{self, OpKind, OpOutcome, OpSpan},
};

/// Fetchable destination produced by a successful classification.
#[derive(Clone, Debug)]
pub struct AllowedDestination {
	/// Parsed candidate URL.
	pub url: Url,
	/// Addresses the host resolved to at classification time; the fetch must connect to
	/// these and only these.
	pub addrs: Vec<SocketAddr>,
}

/// Classifies candidate URLs as fetchable or forbidden.
///
/// Stateless; every call resolves afresh, so repeated calls agree whenever the DNS state
/// agrees. No socket is ever opened here; resolution is the only network-adjacent step.
#[derive(Clone, Copy, Debug, Default)]
pub struct DestinationGuard;
impl DestinationGuard {
	/// Runs the full classification pipeline over a raw candidate string.
	///
	/// Order is fixed: syntax, then scheme, then resolution, then address ranges. Every
	/// resolved address must be publicly routable; one private address poisons the whole
	/// candidate.
	pub fn classify(&self, candidate: &str) -> Result<AllowedDestination, Rejection> {
		let _guard = OpSpan::new(OpKind::Classify, "classify").entered();

		obs::record_op_outcome(OpKind::Classify, OpOutcome::Attempt);

		let result = classify_inner(candidate);

		match &result {
			Ok(_) => obs::record_op_outcome(OpKind::Classify, OpOutcome::Success),
			Err(_) => obs::record_op_outcome(OpKind::Classify, OpOutcome::Failure),
		}

		result
	}
}

fn classify_inner(candidate: &str) -> Result<AllowedDestination, Rejection> {
	let url = Url::parse(candidate).map_err(|source| Rejection::MalformedUrl { source })?;

	match url.scheme() {
		"http" | "https" => (),
		other => return Err(Rejection::UnsupportedScheme { scheme: other.to_owned() }),
	}

	let host = url.host_str().unwrap_or_default().to_owned();
	let addrs = url
		.socket_addrs(|| None)
		.map_err(|_| Rejection::UnresolvableHost { host: host.clone() })?;

	if addrs.is_empty() {
		return Err(Rejection::UnresolvableHost { host });
	}
	if let Some(private) = addrs.iter().find(|addr| is_reserved(addr.ip())) {
		return Err(Rejection::PrivateDestination { addr: private.ip() });
	}

	Ok(AllowedDestination { url, addrs })
}

/// Returns whether an address belongs to a private or reserved range.
///
/// Covers loopback (`127.0.0.0/8`, `::1`), link-local (`169.254.0.0/16`, `fe80::/10`),
/// RFC 1918 space (`10.0.0.0/8`, `172.16.0.0/12`, `192.168.0.0/16`), unique-local IPv6
/// (`fc00::/7`), and the unspecified address. IPv4-mapped IPv6 addresses are unmapped and
/// re-checked so `::ffff:10.0.0.5` cannot slip past the IPv4 rules.
pub fn is_reserved(ip: IpAddr) -> bool {
	match ip {
		IpAddr::V4(v4) =>
			v4.is_loopback() || v4.is_link_local() || v4.is_private() || v4.is_unspecified(),
		IpAddr::V6(v6) => {
			if let Some(mapped) = v6.to_ipv4_mapped() {
				return is_reserved(IpAddr::V4(mapped));
			}

			let prefix = v6.segments()[0];

			v6.is_loopback()
				|| v6.is_unspecified()
				// fe80::/10
				|| (prefix & 0xffc0) == 0xfe80
				// fc00::/7
				|| (prefix & 0xfe00) == 0xfc00
		},
	}
}
