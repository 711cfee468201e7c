//! Identity validation, the shared signing secret, and the bearer-token service.

pub mod identity;
pub mod secret;
pub mod signer;
pub mod token;

pub use identity::*;
pub use secret::*;
pub use signer::*;
pub use token::*;
