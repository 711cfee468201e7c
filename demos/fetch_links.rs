//! Demonstrates link harvesting against a local mock page and the guard refusing to
//! fetch it through the guarded path.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use link_sentry::fetch::{LinkFetcher, ReqwestPageTransport};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/page");
			then.status(200).header("content-type", "text/html").body(
				"<a href='http://example.com/link1'>L1</a>\
				<a href='http://example.com/link2'>L2</a>",
			);
		})
		.await;

	let fetcher = LinkFetcher::new(Arc::new(ReqwestPageTransport::new()));
	let url = server.url("/page");
	let links = fetcher.fetch_unguarded(&url).await?;

	println!("unguarded fetch of {url} found {} links:", links.len());

	for link in &*links {
		println!("  {link}");
	}

	// The same URL through the guarded path: the mock listens on loopback, so the guard
	// refuses it before any connection is made.
	match fetcher.fetch_guarded(&url).await {
		Ok(_) => println!("unexpected: guarded fetch reached loopback"),
		Err(e) => println!("guarded fetch refused: {e}"),
	}

	Ok(())
}
