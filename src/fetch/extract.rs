//! Anchor-href extraction from a fetched HTML document.

// crates.io
use scraper::{Html, Selector};
// self
use crate::fetch::LinkResult;

/// Extracts the `href` attribute of every anchor element, in document order.
///
/// Anchors without an `href` are skipped; values are returned exactly as written, with no
/// normalization and no deduplication. Parsing is lenient: any byte soup yields a
/// document, so extraction itself never fails.
pub fn extract_links(html: &str) -> LinkResult {
	let selector = Selector::parse("a").expect("Anchor selector is a valid CSS selector.");
	let document = Html::parse_document(html);
	let links = document
		.select(&selector)
		.filter_map(|anchor| anchor.value().attr("href").map(str::to_owned))
		.collect();

	LinkResult::new(links)
}
