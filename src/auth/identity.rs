//! Strongly typed token subject enforced across the crate.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

const USERNAME_MAX_LEN: usize = 128;

/// Error returned when username validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum UsernameError {
	/// The username was empty.
	#[error("Username cannot be empty.")]
	Empty,
	/// The username contains a control character.
	#[error("Username contains a control character.")]
	ContainsControl,
	/// The username exceeded the allowed character count.
	#[error("Username exceeds {max} characters.")]
	TooLong {
		/// Maximum permitted character count.
		max: usize,
	},
}

/// Validated username used as the bearer-token subject.
///
/// Control characters are refused so a username can be recorded as a structured log field
/// without opening a log-injection channel.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);
impl Username {
	/// Creates a new username after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, UsernameError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}
}
impl Deref for Username {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for Username {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<Username> for String {
	fn from(value: Username) -> Self {
		value.0
	}
}
impl TryFrom<String> for Username {
	type Error = UsernameError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl Borrow<str> for Username {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl Debug for Username {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Username({})", self.0)
	}
}
impl Display for Username {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for Username {
	type Err = UsernameError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

fn validate_view(view: &str) -> Result<(), UsernameError> {
	if view.is_empty() {
		return Err(UsernameError::Empty);
	}
	if view.chars().any(char::is_control) {
		return Err(UsernameError::ContainsControl);
	}
	if view.len() > USERNAME_MAX_LEN {
		return Err(UsernameError::TooLong { max: USERNAME_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn usernames_validate() {
		assert_eq!(Username::new("").unwrap_err(), UsernameError::Empty);
		assert_eq!(Username::new("alice\n").unwrap_err(), UsernameError::ContainsControl);

		let user = Username::new("alice").expect("Plain username should be valid.");

		assert_eq!(user.as_ref(), "alice");
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let user: Username =
			serde_json::from_str("\"bob\"").expect("Username should deserialize successfully.");

		assert_eq!(user.as_ref(), "bob");
		assert!(serde_json::from_str::<Username>("\"\"").is_err());
		assert!(serde_json::from_str::<Username>("\"line\\u0000break\"").is_err());
	}

	#[test]
	fn length_limit_is_enforced() {
		let exact = "a".repeat(USERNAME_MAX_LEN);

		Username::new(&exact).expect("Exact length should succeed.");

		let too_long = "a".repeat(USERNAME_MAX_LEN + 1);

		assert!(matches!(Username::new(&too_long), Err(UsernameError::TooLong { .. })));
	}

	#[test]
	fn borrow_supports_fast_lookup() {
		let map: HashMap<Username, u8> = HashMap::from_iter([(
			Username::new("carol").expect("Username used for lookup should be valid."),
			7_u8,
		)]);

		assert_eq!(map.get("carol"), Some(&7));
	}
}
