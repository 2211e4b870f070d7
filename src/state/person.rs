use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

/// A single registered person.
///
/// The age is carried on the wire under the legacy `hahe` key; `age` is
/// accepted as an alias when decoding. Missing fields fall back to their
/// defaults and unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    pub name: String,
    pub id: String,
    #[serde(rename = "hahe", alias = "age")]
    pub age: i64,
}

/// Internal HashMap type, keyed by `Person::id`.
pub type PersonMap = HashMap<String, Person>;

/// Shared person store handed to every route as state.
///
/// Cloning yields another handle to the same map. The map is private;
/// handlers go through `services::person_service`, which only hands out copies.
#[derive(Clone, Default)]
pub struct PersonStore {
    inner: Arc<Mutex<PersonMap>>,
}

impl PersonStore {
    pub(crate) fn lock(&self) -> MutexGuard<'_, PersonMap> {
        // The map is never left half-updated, so a poisoned lock is still usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Create a new, empty store.
pub fn new_store() -> PersonStore {
    PersonStore::default()
}
