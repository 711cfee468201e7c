//! Runs a handful of candidate URLs through the destination guard and prints the verdicts.

// crates.io
use color_eyre::Result;
// self
use link_sentry::guard::DestinationGuard;

fn main() -> Result<()> {
	color_eyre::install()?;

	let candidates = [
		"http://93.184.216.34/page",
		"http://127.0.0.1/admin",
		"http://169.254.169.254/latest/meta-data/",
		"http://10.0.0.5/x",
		"ftp://example.com/",
		"not a url",
	];

	for candidate in candidates {
		match DestinationGuard.classify(candidate) {
			Ok(destination) =>
				println!("ALLOW {candidate} -> {:?}", destination.addrs),
			Err(reason) => println!("DENY  {candidate} -> {reason}"),
		}
	}

	Ok(())
}
