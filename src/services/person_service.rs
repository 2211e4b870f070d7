//! Store operations. Each one holds the lock only for the map access itself;
//! callers serialize and write responses after the guard is dropped.

use rand::seq::IndexedRandom;
use uuid::Uuid;

use crate::state::person::{Person, PersonStore};

/// Generate a fresh person identifier.
fn next_id() -> String {
    Uuid::new_v4().to_string()
}

/// Copy out every stored person, in no particular order.
pub fn snapshot(store: &PersonStore) -> Vec<Person> {
    let map = store.lock();
    map.values().cloned().collect()
}

/// Look up a single person by identifier.
pub fn get(store: &PersonStore, id: &str) -> Option<Person> {
    let map = store.lock();
    map.get(id).cloned()
}

/// Store `person` under a newly generated identifier and return it.
///
/// Any identifier supplied by the caller is overwritten.
pub fn insert(store: &PersonStore, mut person: Person) -> String {
    let id = next_id();
    person.id = id.clone();

    let total = {
        let mut map = store.lock();
        map.insert(id.clone(), person);
        map.len()
    };

    tracing::debug!("Inserted person {} ({} stored)", id, total);
    id
}

/// List all identifiers currently stored.
pub fn keys(store: &PersonStore) -> Vec<String> {
    let map = store.lock();
    map.keys().cloned().collect()
}

/// Pick one identifier uniformly at random, or `None` when the store is empty.
pub fn random_id(store: &PersonStore) -> Option<String> {
    let ids = keys(store);
    ids.choose(&mut rand::rng()).cloned()
}

/// Return number of stored persons.
pub fn count(store: &PersonStore) -> usize {
    let map = store.lock();
    map.len()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::thread;

    use super::*;
    use crate::state::person::new_store;

    fn person(name: &str, age: i64) -> Person {
        Person {
            name: name.to_string(),
            id: String::new(),
            age,
        }
    }

    #[test]
    fn insert_assigns_a_fresh_id() {
        let store = new_store();
        let mut submitted = person("Ada", 36);
        submitted.id = "client-chosen".to_string();

        let id = insert(&store, submitted);

        assert_ne!(id, "client-chosen");
        assert!(get(&store, "client-chosen").is_none());

        let stored = get(&store, &id).unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.name, "Ada");
        assert_eq!(stored.age, 36);
    }

    #[test]
    fn keys_match_record_ids() {
        let store = new_store();
        for i in 0..5 {
            insert(&store, person("p", i));
        }

        let map = store.lock();
        assert!(map.iter().all(|(k, v)| *k == v.id));
    }

    #[test]
    fn snapshot_is_detached_from_store() {
        let store = new_store();
        insert(&store, person("a", 1));

        let before = snapshot(&store);
        insert(&store, person("b", 2));

        assert_eq!(before.len(), 1);
        assert_eq!(snapshot(&store).len(), 2);
        assert_eq!(count(&store), 2);
    }

    #[test]
    fn mutating_returned_copies_leaves_store_untouched() {
        let store = new_store();
        let id = insert(&store, person("Ada", 36));

        let mut copies = snapshot(&store);
        copies[0].name = "Changed".to_string();
        copies.clear();

        let mut fetched = get(&store, &id).unwrap();
        fetched.age = 99;

        let stored = get(&store, &id).unwrap();
        assert_eq!(stored.name, "Ada");
        assert_eq!(stored.age, 36);
        assert_eq!(count(&store), 1);
    }

    #[test]
    fn cloned_handles_share_one_map() {
        let store = new_store();
        let other = store.clone();

        let id = insert(&other, person("Bob", 7));

        assert_eq!(get(&store, &id).unwrap().name, "Bob");
        assert_eq!(count(&store), 1);
    }

    #[test]
    fn random_id_on_empty_store_is_none() {
        let store = new_store();
        assert!(random_id(&store).is_none());
    }

    #[test]
    fn random_id_returns_a_stored_key() {
        let store = new_store();
        let ids: HashSet<String> = (0..10).map(|i| insert(&store, person("p", i))).collect();

        for _ in 0..50 {
            let picked = random_id(&store).unwrap();
            assert!(ids.contains(&picked));
        }
    }

    #[test]
    fn concurrent_inserts_never_collide() {
        let store = new_store();

        let handles: Vec<_> = (0..16)
            .map(|t| {
                let store = store.clone();
                thread::spawn(move || {
                    (0..100)
                        .map(|i| insert(&store, person("worker", t * 100 + i)))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let ids: HashSet<String> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();

        assert_eq!(ids.len(), 1600);
        assert_eq!(count(&store), 1600);
        assert_eq!(keys(&store).len(), 1600);
    }
}
