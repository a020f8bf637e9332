//! Ordered collections of named mock handles.

use crate::registry::handle::ObjectHandle;
use crate::{BenchError, Result};
use std::any::Any;

/// Insertion-ordered sequence of mocks registered under one key.
///
/// Entries are addressed by an inner name. Point removal keeps the order of
/// the remaining entries.
#[derive(Clone, Debug, Default)]
pub struct MockCollection {
    entries: Vec<(String, ObjectHandle)>,
}

impl MockCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone a prototype mock into a collection of `count` entries, named
    /// `"0"` through `"count - 1"`.
    pub fn repeat<M: Any + Clone>(mock: &M, count: usize) -> Self {
        let entries = (0..count)
            .map(|i| (i.to_string(), ObjectHandle::new(mock.clone())))
            .collect();
        Self { entries }
    }

    /// Append a mock under an inner name. Fails when the name is taken.
    pub fn insert<M: Any>(&mut self, name: impl Into<String>, mock: M) -> Result<&mut Self> {
        self.insert_handle(name, ObjectHandle::new(mock))
    }

    /// Append an already-wrapped handle under an inner name.
    pub fn insert_handle(
        &mut self,
        name: impl Into<String>,
        handle: ObjectHandle,
    ) -> Result<&mut Self> {
        let name = name.into();
        if self.contains(&name) {
            return Err(BenchError::DuplicateKey {
                store: "collection mock",
                key: name,
            }
            .into());
        }
        self.entries.push((name, handle));
        Ok(self)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn get(&self, name: &str) -> Option<&ObjectHandle> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, h)| h)
    }

    /// Remove one entry by inner name and return its handle.
    pub fn remove(&mut self, name: &str) -> Option<ObjectHandle> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ObjectHandle)> {
        self.entries.iter().map(|(n, h)| (n.as_str(), h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct Subscriber {
        id: u32,
    }

    #[test]
    fn preserves_insertion_order() {
        let mut collection = MockCollection::new();
        collection.insert("first", Subscriber { id: 1 }).unwrap();
        collection.insert("second", Subscriber { id: 2 }).unwrap();
        collection.insert("third", Subscriber { id: 3 }).unwrap();

        let names: Vec<&str> = collection.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn rejects_a_duplicate_inner_name() {
        let mut collection = MockCollection::new();
        collection.insert("only", Subscriber { id: 1 }).unwrap();

        assert!(collection.insert("only", Subscriber { id: 2 }).is_err());
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn point_removal_keeps_the_rest_in_order() {
        let mut collection = MockCollection::new();
        collection.insert("first", Subscriber { id: 1 }).unwrap();
        collection.insert("second", Subscriber { id: 2 }).unwrap();
        collection.insert("third", Subscriber { id: 3 }).unwrap();

        let removed = collection.remove("second").unwrap();
        assert_eq!(removed.downcast::<Subscriber>().unwrap().id, 2);

        let names: Vec<&str> = collection.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["first", "third"]);
        assert!(collection.remove("second").is_none());
    }

    #[test]
    fn repeat_clones_the_prototype() {
        let collection = MockCollection::repeat(&Subscriber { id: 7 }, 3);

        assert_eq!(collection.len(), 3);
        for (name, handle) in collection.iter() {
            assert!(name.parse::<usize>().is_ok());
            assert_eq!(handle.downcast::<Subscriber>().unwrap().id, 7);
        }
    }
}
