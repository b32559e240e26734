//! Identity caches and the shared team registry.
//!
//! Both containers follow the client's single-threaded contract: plain
//! `RefCell` interior mutability, no locks. Embedding the client in a
//! multi-threaded context requires external synchronization.

use crate::shared::Record;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::rc::Rc;

/// Identifier-keyed memoization for single-entity lookups.
///
/// Entries are added on first miss and never refreshed or evicted;
/// callers that need fresh data clear the cache explicitly.
#[derive(Debug)]
pub struct IdentityCache<K> {
    kind: &'static str,
    entries: RefCell<HashMap<K, Record>>,
}

impl<K: Eq + Hash + Clone + Display> IdentityCache<K> {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: RefCell::new(HashMap::new()),
        }
    }

    /// Return the cached record for `key`, or run `fetch`, store its
    /// result, and return it. A hit makes no network call and performs
    /// no staleness check.
    pub fn get_or_fetch<E>(
        &self,
        key: K,
        fetch: impl FnOnce() -> Result<Record, E>,
    ) -> Result<Record, E> {
        if let Some(hit) = self.entries.borrow().get(&key) {
            tracing::debug!(kind = self.kind, key = %key, "returning record from the cache");
            return Ok(hit.clone());
        }
        let record = fetch()?;
        self.entries.borrow_mut().insert(key, record.clone());
        Ok(record)
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

/// Registry of already-fetched teams, keyed by id with by-name lookup.
///
/// One registry can back any number of clients: the builder hands each
/// client an [`Rc`] to it, so teams fetched through one client resolve
/// name lookups on every other client sharing the registry.
#[derive(Debug, Default)]
pub struct TeamRegistry {
    teams: HashMap<i64, Record>,
}

impl TeamRegistry {
    /// Store a team record. Records without a numeric `id` are ignored.
    pub fn insert(&mut self, team: Record) {
        if let Some(id) = team.id() {
            self.teams.insert(id, team);
        }
    }

    pub fn by_id(&self, id: i64) -> Option<&Record> {
        self.teams.get(&id)
    }

    pub fn by_name(&self, name: &str) -> Option<&Record> {
        self.teams.values().find(|t| t.name() == Some(name))
    }

    pub fn clear(&mut self) {
        self.teams.clear();
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

/// Handle to a [`TeamRegistry`] shared between clients.
pub type SharedTeamRegistry = Rc<RefCell<TeamRegistry>>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        serde_json::from_value(value).expect("object literal")
    }

    #[test]
    fn test_get_or_fetch_runs_fetch_once() {
        let cache: IdentityCache<i64> = IdentityCache::new("experiment");
        let mut calls = 0;

        for _ in 0..3 {
            let rec = cache
                .get_or_fetch(7, || {
                    calls += 1;
                    Ok::<_, ()>(record(json!({"id": 7, "title": "My Exp"})))
                })
                .unwrap();
            assert_eq!(rec.id(), Some(7));
        }
        assert_eq!(calls, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_fetch_error_is_not_cached() {
        let cache: IdentityCache<i64> = IdentityCache::new("item");
        let err = cache.get_or_fetch(1, || Err::<Record, _>("boom"));
        assert_eq!(err.unwrap_err(), "boom");
        assert!(cache.is_empty());

        let ok = cache.get_or_fetch(1, || Ok::<_, &str>(record(json!({"id": 1}))));
        assert!(ok.is_ok());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_forces_refetch() {
        let cache: IdentityCache<i64> = IdentityCache::new("user");
        let mut calls = 0;
        let mut lookup = |cache: &IdentityCache<i64>| {
            cache
                .get_or_fetch(2, || {
                    calls += 1;
                    Ok::<_, ()>(record(json!({"id": 2})))
                })
                .unwrap()
        };
        lookup(&cache);
        cache.clear();
        lookup(&cache);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_registry_lookup_by_name() {
        let mut registry = TeamRegistry::default();
        registry.insert(record(json!({"id": 1, "name": "alpha"})));
        registry.insert(record(json!({"id": 2, "name": "beta"})));
        registry.insert(record(json!({"name": "no-id"})));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.by_name("beta").and_then(Record::id), Some(2));
        assert!(registry.by_name("gamma").is_none());
        assert_eq!(registry.by_id(1).and_then(Record::name), Some("alpha"));
    }
}
