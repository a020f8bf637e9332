//! Expected stores: values, mocks and mock collections share one key space.

use crate::registry::collection::MockCollection;
use crate::registry::handle::ObjectHandle;
use crate::{BenchError, Result};
use serde_json::Value;
use std::collections::HashMap;

/// One merged expected entry, as handed to the binder.
pub(crate) enum ExpectedEntry<'a> {
    Value(&'a Value),
    Mock(&'a ObjectHandle),
    Collection(&'a MockCollection),
}

#[derive(Debug, Default)]
pub(crate) struct ExpectedStore {
    values: HashMap<String, Value>,
    mocks: HashMap<String, ObjectHandle>,
    collections: HashMap<String, MockCollection>,
}

impl ExpectedStore {
    /// A key may live in at most one of the three expected stores.
    fn check_key_free(&self, key: &str) -> Result<()> {
        if self.values.contains_key(key)
            || self.mocks.contains_key(key)
            || self.collections.contains_key(key)
        {
            return Err(BenchError::ExpectedKeyTaken(key.to_string()).into());
        }
        Ok(())
    }

    pub(crate) fn add_value(&mut self, key: String, value: Value) -> Result<()> {
        self.check_key_free(&key)?;
        self.values.insert(key, value);
        Ok(())
    }

    pub(crate) fn add_mock(&mut self, key: String, handle: ObjectHandle) -> Result<()> {
        self.check_key_free(&key)?;
        self.mocks.insert(key, handle);
        Ok(())
    }

    pub(crate) fn add_collection(&mut self, key: String, collection: MockCollection) -> Result<()> {
        self.check_key_free(&key)?;
        self.collections.insert(key, collection);
        Ok(())
    }

    pub(crate) fn value(&self, key: &str) -> Result<&Value> {
        self.values.get(key).ok_or_else(|| {
            BenchError::KeyNotFound {
                store: "expected value",
                key: key.to_string(),
            }
            .into()
        })
    }

    pub(crate) fn mock(&self, key: &str) -> Result<&ObjectHandle> {
        self.mocks.get(key).ok_or_else(|| {
            BenchError::KeyNotFound {
                store: "expected mock",
                key: key.to_string(),
            }
            .into()
        })
    }

    pub(crate) fn collection(&self, key: &str) -> Result<&MockCollection> {
        self.collections.get(key).ok_or_else(|| {
            BenchError::KeyNotFound {
                store: "expected mocks collection",
                key: key.to_string(),
            }
            .into()
        })
    }

    pub(crate) fn collection_mut(&mut self, key: &str) -> Result<&mut MockCollection> {
        self.collections.get_mut(key).ok_or_else(|| {
            BenchError::KeyNotFound {
                store: "expected mocks collection",
                key: key.to_string(),
            }
            .into()
        })
    }

    /// All expected entries under their keys. Keys are disjoint across the
    /// three stores, so order carries no meaning.
    pub(crate) fn iter_merged(&self) -> impl Iterator<Item = (&str, ExpectedEntry<'_>)> {
        self.values
            .iter()
            .map(|(k, v)| (k.as_str(), ExpectedEntry::Value(v)))
            .chain(
                self.mocks
                    .iter()
                    .map(|(k, m)| (k.as_str(), ExpectedEntry::Mock(m))),
            )
            .chain(
                self.collections
                    .iter()
                    .map(|(k, c)| (k.as_str(), ExpectedEntry::Collection(c))),
            )
    }

    pub(crate) fn clear(&mut self) {
        self.values.clear();
        self.mocks.clear();
        self.collections.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len() + self.mocks.len() + self.collections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Clock;

    #[test]
    fn keys_are_unique_across_the_three_stores() {
        let mut store = ExpectedStore::default();
        store.add_value("shared".to_string(), json!(12)).unwrap();

        assert!(store
            .add_mock("shared".to_string(), ObjectHandle::new(Clock))
            .is_err());
        assert!(store
            .add_collection("shared".to_string(), MockCollection::new())
            .is_err());
        assert!(store.add_value("shared".to_string(), json!(13)).is_err());
    }

    #[test]
    fn missing_keys_fail_per_store() {
        let store = ExpectedStore::default();

        assert!(store.value("absent").is_err());
        assert!(store.mock("absent").is_err());
        assert!(store.collection("absent").is_err());
    }

    #[test]
    fn merged_iteration_covers_every_store() {
        let mut store = ExpectedStore::default();
        store.add_value("limit".to_string(), json!(10)).unwrap();
        store
            .add_mock("clock".to_string(), ObjectHandle::new(Clock))
            .unwrap();
        store
            .add_collection("workers".to_string(), MockCollection::new())
            .unwrap();

        assert_eq!(store.iter_merged().count(), 3);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn clear_empties_every_store() {
        let mut store = ExpectedStore::default();
        store.add_value("limit".to_string(), json!(10)).unwrap();
        store
            .add_mock("clock".to_string(), ObjectHandle::new(Clock))
            .unwrap();

        store.clear();

        assert_eq!(store.len(), 0);
        assert!(store.value("limit").is_err());
        assert!(store.mock("clock").is_err());
    }
}
