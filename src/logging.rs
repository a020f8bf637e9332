//! Structured logging utilities for the test bench.
//!
//! Small wrappers over the `tracing` crate so registry events carry
//! consistent fields. The library never installs a subscriber; the host
//! test suite decides where the events go.

use crate::memory::{format_bytes, MemoryReport};
use crate::registry::TearDownStrategy;

/// Log a fixture registration.
pub fn log_registered(store: &'static str, key: &str) {
    tracing::debug!(store, key, "Fixture registered");
}

/// Log an overwrite of an existing entry.
pub fn log_overwritten(store: &'static str, key: &str) {
    tracing::debug!(store, key, "Fixture overwritten");
}

/// Log the object under test being set.
pub fn log_subject_set(subject_type: &'static str) {
    tracing::debug!(subject_type, "Object under test set");
}

/// Log the actual result being recorded.
pub fn log_result_recorded(overwritten: bool) {
    tracing::debug!(overwritten, "Actual result recorded");
}

/// Log an expected entry skipped because the subject has no writable
/// property for it.
pub fn log_binding_skipped(property: &str) {
    tracing::debug!(property, "Subject property not writable, entry skipped");
}

/// Log a completed bind pass.
pub fn log_bind_complete(properties_set: usize, items_added: usize, skipped: usize) {
    tracing::debug!(
        properties_set,
        items_added,
        skipped,
        "Expected entries bound to subject"
    );
}

/// Log a completed teardown.
pub fn log_tear_down(strategy: TearDownStrategy, entries: usize) {
    tracing::debug!(?strategy, entries, "Registry torn down");
}

/// Log the memory savings report.
pub fn log_memory_report(report: &MemoryReport) {
    tracing::info!(
        bytes = report.before,
        formatted = %format_bytes(report.before as i64),
        "Memory used before tear down"
    );
    tracing::info!(
        bytes = report.after,
        formatted = %format_bytes(report.after as i64),
        "Memory used after tear down"
    );
    tracing::info!(
        bytes = report.reclaimed(),
        formatted = %format_bytes(report.reclaimed()),
        "Memory saved with tear down"
    );
}
