//! The fixture registry that backs a single test case.

pub mod collection;
pub(crate) mod expected;
pub mod handle;
pub(crate) mod help;

use crate::binder::{self, BindReport, BindTarget};
use crate::logging;
use crate::memory::{MemoryMeter, MemoryReport};
use crate::registry::collection::MockCollection;
use crate::registry::expected::ExpectedStore;
use crate::registry::handle::ObjectHandle;
use crate::registry::help::HelpStore;
use crate::{BenchError, Result};
use serde_json::Value;
use std::any::{type_name, Any};
use std::rc::Rc;

/// How `tear_down` releases the registry contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TearDownStrategy {
    /// Empty every store field by field, keeping allocations for the next
    /// test.
    #[default]
    Clear,
    /// Replace the stores wholesale, dropping their backing allocations too.
    Release,
}

/// Keyed registry of test fixtures for one test case instance.
///
/// Holds expected values, mocks and mock collections under one shared key
/// space, free-form help mocks/values/resources under independent key
/// spaces, the object under test and the recorded result. Single-threaded:
/// one bench per test case.
#[derive(Default)]
pub struct TestBench {
    expected: ExpectedStore,
    help: HelpStore,
    subject: Option<Box<dyn BindTarget>>,
    subject_type: &'static str,
    actual_result: Option<ObjectHandle>,
    strategy: TearDownStrategy,
    meter: MemoryMeter,
}

impl TestBench {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- expected stores ----

    /// Register a plain expected value. The key must be free across all
    /// three expected stores.
    pub fn add_expected_value(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<&mut Self> {
        let key = key.into();
        self.expected.add_value(key.clone(), value.into())?;
        logging::log_registered("expected value", &key);
        Ok(self)
    }

    /// Register an expected mock. The key must be free across all three
    /// expected stores.
    pub fn add_expected_mock<M: Any>(
        &mut self,
        key: impl Into<String>,
        mock: M,
    ) -> Result<&mut Self> {
        self.add_expected_mock_handle(key, ObjectHandle::new(mock))
    }

    /// Register an expected mock that is already wrapped or shared.
    pub fn add_expected_mock_handle(
        &mut self,
        key: impl Into<String>,
        handle: ObjectHandle,
    ) -> Result<&mut Self> {
        let key = key.into();
        self.expected.add_mock(key.clone(), handle)?;
        logging::log_registered("expected mock", &key);
        Ok(self)
    }

    /// Register an expected mocks collection. The key must be free across
    /// all three expected stores.
    pub fn add_expected_mocks_collection(
        &mut self,
        key: impl Into<String>,
        collection: MockCollection,
    ) -> Result<&mut Self> {
        let key = key.into();
        self.expected.add_collection(key.clone(), collection)?;
        logging::log_registered("expected mocks collection", &key);
        Ok(self)
    }

    pub fn expected_value(&self, key: &str) -> Result<&Value> {
        self.expected.value(key)
    }

    /// Retrieve an expected mock as its concrete type.
    pub fn expected_mock<M: Any>(&self, key: &str) -> Result<Rc<M>> {
        let handle = self.expected.mock(key)?;
        handle.downcast::<M>().ok_or_else(|| {
            BenchError::TypeMismatch {
                store: "expected mock",
                key: key.to_string(),
                stored: handle.type_name(),
                requested: type_name::<M>(),
            }
            .into()
        })
    }

    pub fn expected_mock_handle(&self, key: &str) -> Result<&ObjectHandle> {
        self.expected.mock(key)
    }

    pub fn expected_mocks_collection(&self, key: &str) -> Result<&MockCollection> {
        self.expected.collection(key)
    }

    /// Retrieve one mock out of a collection as its concrete type.
    pub fn mock_from_collection<M: Any>(&self, collection: &str, name: &str) -> Result<Rc<M>> {
        let entries = self.expected.collection(collection)?;
        let handle = entries
            .get(name)
            .ok_or_else(|| BenchError::CollectionEntryNotFound {
                collection: collection.to_string(),
                name: name.to_string(),
            })?;
        handle.downcast::<M>().ok_or_else(|| {
            BenchError::TypeMismatch {
                store: "collection mock",
                key: format!("{collection}.{name}"),
                stored: handle.type_name(),
                requested: type_name::<M>(),
            }
            .into()
        })
    }

    /// Remove one mock from a collection and return its handle. The order
    /// of the remaining entries is preserved.
    pub fn take_mock_from_collection(
        &mut self,
        collection: &str,
        name: &str,
    ) -> Result<ObjectHandle> {
        let entries = self.expected.collection_mut(collection)?;
        entries.remove(name).ok_or_else(|| {
            BenchError::CollectionEntryNotFound {
                collection: collection.to_string(),
                name: name.to_string(),
            }
            .into()
        })
    }

    // ---- help stores ----

    /// Register a help mock. Duplicate keys always fail.
    pub fn add_help_mock<M: Any>(&mut self, key: impl Into<String>, mock: M) -> Result<&mut Self> {
        let key = key.into();
        self.help.add_mock(key.clone(), ObjectHandle::new(mock))?;
        logging::log_registered("help mock", &key);
        Ok(self)
    }

    /// Register a help value. An existing key fails unless `overwrite`.
    pub fn add_help_value(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
        overwrite: bool,
    ) -> Result<&mut Self> {
        let key = key.into();
        let replaced = self.help.add_value(key.clone(), value.into(), overwrite)?;
        if replaced {
            logging::log_overwritten("help value", &key);
        } else {
            logging::log_registered("help value", &key);
        }
        Ok(self)
    }

    /// Register a help resource. An existing key fails unless `overwrite`.
    pub fn add_help_resource<R: Any>(
        &mut self,
        key: impl Into<String>,
        resource: R,
        overwrite: bool,
    ) -> Result<&mut Self> {
        let key = key.into();
        let replaced = self
            .help
            .add_resource(key.clone(), ObjectHandle::new(resource), overwrite)?;
        if replaced {
            logging::log_overwritten("help resource", &key);
        } else {
            logging::log_registered("help resource", &key);
        }
        Ok(self)
    }

    /// Retrieve a help mock as its concrete type.
    pub fn help_mock<M: Any>(&self, key: &str) -> Result<Rc<M>> {
        let handle = self.help.mock(key)?;
        handle.downcast::<M>().ok_or_else(|| {
            BenchError::TypeMismatch {
                store: "help mock",
                key: key.to_string(),
                stored: handle.type_name(),
                requested: type_name::<M>(),
            }
            .into()
        })
    }

    pub fn help_value(&self, key: &str) -> Result<&Value> {
        self.help.value(key)
    }

    /// Retrieve a help resource as its concrete type.
    pub fn help_resource<R: Any>(&self, key: &str) -> Result<Rc<R>> {
        let handle = self.help.resource(key)?;
        handle.downcast::<R>().ok_or_else(|| {
            BenchError::TypeMismatch {
                store: "help resource",
                key: key.to_string(),
                stored: handle.type_name(),
                requested: type_name::<R>(),
            }
            .into()
        })
    }

    // ---- object under test and result ----

    /// Set the object under test.
    pub fn set_subject<S: BindTarget + 'static>(&mut self, subject: S) -> &mut Self {
        self.subject = Some(Box::new(subject));
        self.subject_type = type_name::<S>();
        logging::log_subject_set(self.subject_type);
        self
    }

    pub fn subject(&self) -> Result<&dyn BindTarget> {
        self.subject
            .as_deref()
            .ok_or_else(|| BenchError::SubjectNotSet.into())
    }

    pub fn subject_mut(&mut self) -> Result<&mut dyn BindTarget> {
        self.subject
            .as_deref_mut()
            .ok_or_else(|| BenchError::SubjectNotSet.into())
    }

    /// Borrow the object under test as its concrete type.
    pub fn subject_as<T: Any>(&self) -> Result<&T> {
        let stored = self.subject_type;
        let subject = self.subject()?;
        subject.as_any().downcast_ref::<T>().ok_or_else(|| {
            BenchError::SubjectTypeMismatch {
                stored,
                requested: type_name::<T>(),
            }
            .into()
        })
    }

    /// Mutably borrow the object under test as its concrete type.
    pub fn subject_as_mut<T: Any>(&mut self) -> Result<&mut T> {
        let stored = self.subject_type;
        let subject = self.subject_mut()?;
        subject.as_any_mut().downcast_mut::<T>().ok_or_else(|| {
            BenchError::SubjectTypeMismatch {
                stored,
                requested: type_name::<T>(),
            }
            .into()
        })
    }

    /// Record the result of the test. An existing result fails unless
    /// `overwrite`.
    pub fn set_actual_result<T: Any>(&mut self, result: T, overwrite: bool) -> Result<&mut Self> {
        let replacing = self.actual_result.is_some();
        if replacing && !overwrite {
            return Err(BenchError::ResultAlreadySet.into());
        }
        self.actual_result = Some(ObjectHandle::new(result));
        logging::log_result_recorded(replacing);
        Ok(self)
    }

    /// Retrieve the recorded result as its concrete type.
    pub fn actual_result<T: Any>(&self) -> Result<Rc<T>> {
        let handle = self.actual_result_handle()?;
        handle.downcast::<T>().ok_or_else(|| {
            BenchError::ResultTypeMismatch {
                stored: handle.type_name(),
                requested: type_name::<T>(),
            }
            .into()
        })
    }

    pub fn actual_result_handle(&self) -> Result<&ObjectHandle> {
        self.actual_result
            .as_ref()
            .ok_or_else(|| BenchError::ResultNotSet.into())
    }

    // ---- binder ----

    /// Copy every expected entry onto the object under test. Scalar entries
    /// go through `bind_property`, sequence-shaped entries through
    /// `bind_item` once per element. No rollback on partial failure.
    pub fn bind_expected_to_subject(&mut self) -> Result<BindReport> {
        let mut subject = self.subject.take().ok_or(BenchError::SubjectNotSet)?;
        let outcome = binder::bind_expected(subject.as_mut(), &self.expected);
        self.subject = Some(subject);
        outcome
    }

    // ---- teardown ----

    pub fn set_tear_down_strategy(&mut self, strategy: TearDownStrategy) -> &mut Self {
        self.strategy = strategy;
        self
    }

    pub fn tear_down_strategy(&self) -> TearDownStrategy {
        self.strategy
    }

    /// Release every stored fixture reference so their graphs can be
    /// reclaimed between tests. Memory measurements survive teardown under
    /// both strategies.
    pub fn tear_down(&mut self) {
        let entries = self.expected.len()
            + self.help.len()
            + usize::from(self.subject.is_some())
            + usize::from(self.actual_result.is_some());
        match self.strategy {
            TearDownStrategy::Clear => {
                self.expected.clear();
                self.help.clear();
            }
            TearDownStrategy::Release => {
                self.expected = ExpectedStore::default();
                self.help = HelpStore::default();
            }
        }
        self.subject = None;
        self.subject_type = "";
        self.actual_result = None;
        logging::log_tear_down(self.strategy, entries);
    }

    // ---- memory ----

    /// Sample process memory before teardown. Returns the sample in bytes.
    pub fn measure_memory_before_tear_down(&mut self) -> Result<u64> {
        self.meter.measure_before_tear_down()
    }

    /// Sample process memory after teardown. Returns the sample in bytes.
    pub fn measure_memory_after_tear_down(&mut self) -> Result<u64> {
        self.meter.measure_after_tear_down()
    }

    /// Emit the memory savings report through the logging layer and return
    /// it. Takes the after sample on demand; fails when the before sample
    /// is missing.
    pub fn report_memory_usage(&mut self) -> Result<MemoryReport> {
        let report = self.meter.report()?;
        logging::log_memory_report(&report);
        Ok(report)
    }
}
