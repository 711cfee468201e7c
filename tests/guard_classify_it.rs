// self
use link_sentry::{error::Rejection, guard::DestinationGuard};

fn classify(candidate: &str) -> Result<link_sentry::guard::AllowedDestination, Rejection> {
	DestinationGuard.classify(candidate)
}

#[test]
fn cloud_metadata_and_rfc1918_probes_are_refused() {
	// The classic SSRF pivot targets: cloud metadata, loopback, and internal ranges.
	let probes = [
		"http://169.254.169.254/latest/meta-data/",
		"http://127.0.0.1/admin",
		"http://10.0.0.5/x",
		"http://192.168.0.1/",
		"https://[::1]:8443/health",
	];

	for probe in probes {
		let err = classify(probe).expect_err("Probe should be refused.");

		assert!(
			matches!(err, Rejection::PrivateDestination { .. }),
			"`{probe}` should be refused as a private destination, got `{err}`.",
		);
	}
}

#[test]
fn scheme_allowlist_holds() {
	assert!(matches!(
		classify("ftp://example.com/"),
		Err(Rejection::UnsupportedScheme { .. })
	));
	assert!(matches!(
		classify("file:///etc/passwd"),
		Err(Rejection::UnsupportedScheme { .. })
	));
}

#[test]
fn syntax_failures_are_reported_as_malformed() {
	assert!(matches!(classify("not a url"), Err(Rejection::MalformedUrl { .. })));
	assert!(matches!(classify("example.com/no-scheme"), Err(Rejection::MalformedUrl { .. })));
}

#[test]
fn reserved_tld_never_resolves() {
	// RFC 2606 guarantees `.invalid` cannot resolve, online or offline.
	let err = classify("http://name.invalid/").expect_err("Reserved TLD should not resolve.");

	assert!(matches!(err, Rejection::UnresolvableHost { .. }));
}

#[test]
fn public_literal_addresses_are_allowed_offline() {
	let destination =
		classify("http://93.184.216.34/x").expect("Public literal should be allowed.");

	assert_eq!(destination.addrs.len(), 1);
	assert!(destination.addrs.iter().all(|addr| !link_sentry::guard::is_reserved(addr.ip())));
}

#[test]
#[ignore = "requires live DNS"]
fn public_hostname_is_allowed() {
	let destination =
		classify("http://example.com/").expect("Public, resolvable host should be allowed.");

	assert!(!destination.addrs.is_empty());
}

#[test]
fn rejection_reasons_render_for_the_request_layer() {
	let err = classify("http://192.168.0.1/").expect_err("Private destination should be refused.");

	assert!(err.to_string().contains("private or reserved"));

	let err = classify("gopher://example.com/").expect_err("Scheme should be refused.");

	assert!(err.to_string().contains("gopher"));
}
