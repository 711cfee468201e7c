//! Thread-safe in-memory [`CredentialStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::Username,
	store::{Credential, CredentialStore, StoreFuture},
};

type StoreMap = Arc<RwLock<HashMap<Username, Credential>>>;

/// Thread-safe credential backend that keeps rows in-process for tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryCredentialStore(StoreMap);
impl MemoryCredentialStore {
	/// Inserts or replaces the credential row for its username.
	pub fn insert(&self, credential: Credential) {
		self.0.write().insert(credential.username.clone(), credential);
	}

	fn lookup_now(map: &StoreMap, username: &Username) -> Option<Credential> {
		map.read().get(username).cloned()
	}
}
impl CredentialStore for MemoryCredentialStore {
	fn lookup<'a>(&'a self, username: &'a Username) -> StoreFuture<'a, Option<Credential>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::lookup_now(&map, username)) })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::store::PasswordDigest;

	fn credential(name: &str, digest: &str) -> Credential {
		Credential {
			username: Username::new(name).expect("Username fixture should be valid."),
			hashed_password: PasswordDigest::new(digest),
		}
	}

	#[tokio::test]
	async fn insert_and_lookup_round_trip() {
		let store = MemoryCredentialStore::default();
		let row = credential("alice", "digest-1");

		store.insert(row.clone());

		let fetched = store
			.lookup(&row.username)
			.await
			.expect("Lookup against the memory store should succeed.")
			.expect("Inserted credential should remain present.");

		assert_eq!(fetched, row);
	}

	#[tokio::test]
	async fn lookup_misses_yield_none() {
		let store = MemoryCredentialStore::default();
		let ghost = Username::new("nobody").expect("Username fixture should be valid.");
		let fetched =
			store.lookup(&ghost).await.expect("Lookup against an empty store should succeed.");

		assert!(fetched.is_none());
	}

	#[tokio::test]
	async fn reinsert_replaces_the_row() {
		let store = MemoryCredentialStore::default();

		store.insert(credential("bob", "digest-old"));
		store.insert(credential("bob", "digest-new"));

		let user = Username::new("bob").expect("Username fixture should be valid.");
		let fetched = store
			.lookup(&user)
			.await
			.expect("Lookup should succeed.")
			.expect("Replaced credential should remain present.");

		assert_eq!(fetched.hashed_password.expose(), "digest-new");
	}
}
