//! Demonstrates issuing a bearer token, verifying it, and what secret rotation does to
//! previously issued tokens.

// crates.io
use color_eyre::Result;
// self
use link_sentry::auth::{SharedSecret, TokenService, Username};

fn main() -> Result<()> {
	color_eyre::install()?;

	let secret = SharedSecret::new("demo-signing-secret")?;
	let service = TokenService::new(&secret);
	let subject = Username::new("alice")?;
	let token = service.issue(&subject);

	println!("issued token for {subject}: {}", token.expose());

	let recovered = service.verify(token.expose())?;

	println!("verified subject: {recovered}");

	let rotated = TokenService::new(&SharedSecret::new("demo-signing-secret-v2")?);

	match rotated.verify(token.expose()) {
		Ok(_) => println!("unexpected: old token survived rotation"),
		Err(e) => println!("after rotation: {e}"),
	}

	Ok(())
}
