//! Help stores: free-form mocks, values and resources for one test run.
//!
//! Unlike the expected stores, the three help stores have independent key
//! spaces. Values and resources take an explicit overwrite flag; mocks do
//! not and always reject a duplicate key.

use crate::registry::handle::ObjectHandle;
use crate::{BenchError, Result};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub(crate) struct HelpStore {
    mocks: HashMap<String, ObjectHandle>,
    values: HashMap<String, Value>,
    resources: HashMap<String, ObjectHandle>,
}

impl HelpStore {
    pub(crate) fn add_mock(&mut self, key: String, handle: ObjectHandle) -> Result<()> {
        if self.mocks.contains_key(&key) {
            return Err(BenchError::DuplicateKey {
                store: "help mock",
                key,
            }
            .into());
        }
        self.mocks.insert(key, handle);
        Ok(())
    }

    /// Returns whether an existing entry was replaced.
    pub(crate) fn add_value(&mut self, key: String, value: Value, overwrite: bool) -> Result<bool> {
        if self.values.contains_key(&key) && !overwrite {
            return Err(BenchError::DuplicateKey {
                store: "help value",
                key,
            }
            .into());
        }
        Ok(self.values.insert(key, value).is_some())
    }

    /// Returns whether an existing entry was replaced.
    pub(crate) fn add_resource(
        &mut self,
        key: String,
        handle: ObjectHandle,
        overwrite: bool,
    ) -> Result<bool> {
        if self.resources.contains_key(&key) && !overwrite {
            return Err(BenchError::DuplicateKey {
                store: "help resource",
                key,
            }
            .into());
        }
        Ok(self.resources.insert(key, handle).is_some())
    }

    pub(crate) fn mock(&self, key: &str) -> Result<&ObjectHandle> {
        self.mocks.get(key).ok_or_else(|| {
            BenchError::KeyNotFound {
                store: "help mock",
                key: key.to_string(),
            }
            .into()
        })
    }

    pub(crate) fn value(&self, key: &str) -> Result<&Value> {
        self.values.get(key).ok_or_else(|| {
            BenchError::KeyNotFound {
                store: "help value",
                key: key.to_string(),
            }
            .into()
        })
    }

    pub(crate) fn resource(&self, key: &str) -> Result<&ObjectHandle> {
        self.resources.get(key).ok_or_else(|| {
            BenchError::KeyNotFound {
                store: "help resource",
                key: key.to_string(),
            }
            .into()
        })
    }

    pub(crate) fn clear(&mut self) {
        self.mocks.clear();
        self.values.clear();
        self.resources.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.mocks.len() + self.values.len() + self.resources.len()
    }
}
