//! Copies expected entries onto the object under test.

use crate::logging;
use crate::registry::expected::{ExpectedEntry, ExpectedStore};
use crate::registry::handle::ObjectHandle;
use crate::{BenchError, Result};
use serde_json::Value;
use std::any::Any;

/// One expected entry as handed to the object under test.
#[derive(Debug)]
pub enum Bound<'a> {
    /// A plain expected value, or one element of an expected value array.
    Value(&'a Value),
    /// An expected mock, or one entry of an expected mocks collection.
    Object(&'a ObjectHandle),
}

/// Receiving side of `bind_expected_to_subject`.
///
/// The object under test decides which property names it exposes. A name it
/// does not recognise is reported as not writable and skipped by the binder.
pub trait BindTarget: Any {
    /// Write one named property. Return `false` when the property is not
    /// writable on this object.
    fn bind_property(&mut self, property: &str, value: Bound<'_>) -> bool;

    /// Append one element of a sequence-shaped expected entry.
    ///
    /// The default rejects every property; objects with collection state
    /// override it for the names they accept.
    fn bind_item(&mut self, property: &str, item: Bound<'_>) -> Result<()> {
        let _ = item;
        Err(BenchError::MissingAdder(property.to_string()).into())
    }

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// What a bind pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BindReport {
    /// Properties written through `bind_property`.
    pub properties_set: usize,
    /// Elements appended through `bind_item`.
    pub items_added: usize,
    /// Entries skipped because the subject reported them as not writable.
    pub skipped: usize,
}

/// Single pass over the merged expected stores. Sequence-shaped entries go
/// through `bind_item` once per element, everything else through
/// `bind_property`. A `bind_item` failure propagates immediately; side
/// effects already applied stay applied.
pub(crate) fn bind_expected(
    subject: &mut dyn BindTarget,
    expected: &ExpectedStore,
) -> Result<BindReport> {
    let mut report = BindReport::default();
    for (key, entry) in expected.iter_merged() {
        match entry {
            ExpectedEntry::Value(Value::Array(items)) => {
                for item in items {
                    subject.bind_item(key, Bound::Value(item))?;
                    report.items_added += 1;
                }
            }
            ExpectedEntry::Value(value) => {
                if subject.bind_property(key, Bound::Value(value)) {
                    report.properties_set += 1;
                } else {
                    logging::log_binding_skipped(key);
                    report.skipped += 1;
                }
            }
            ExpectedEntry::Mock(handle) => {
                if subject.bind_property(key, Bound::Object(handle)) {
                    report.properties_set += 1;
                } else {
                    logging::log_binding_skipped(key);
                    report.skipped += 1;
                }
            }
            ExpectedEntry::Collection(collection) => {
                for (_, handle) in collection.iter() {
                    subject.bind_item(key, Bound::Object(handle))?;
                    report.items_added += 1;
                }
            }
        }
    }
    logging::log_bind_complete(report.properties_set, report.items_added, report.skipped);
    Ok(report)
}
