pub mod binder;
pub mod logging;
pub mod memory;
pub mod registry;

use miette::Diagnostic;

pub use binder::{BindReport, BindTarget, Bound};
pub use memory::{format_bytes, MemoryReport};
pub use registry::collection::MockCollection;
pub use registry::handle::ObjectHandle;
pub use registry::{TearDownStrategy, TestBench};

/// Result type alias for the bench
pub type Result<T> = miette::Result<T>;

/// Error types for the bench
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum BenchError {
    #[error("The expected entry \"{0}\" is already set as a value, mock or mock collection")]
    #[diagnostic(
        code(testbench::expected_key_taken),
        help("Expected keys are shared between values, mocks and mock collections. Pick a key that none of the three stores uses yet.")
    )]
    ExpectedKeyTaken(String),

    #[error("The {store} \"{key}\" is already set")]
    #[diagnostic(
        code(testbench::duplicate_key),
        help("Pass `overwrite = true` to replace the stored entry, or pick a different key.")
    )]
    DuplicateKey { store: &'static str, key: String },

    #[error("The required {store} \"{key}\" doesn't exist")]
    #[diagnostic(
        code(testbench::key_not_found),
        help("Register the entry during set up before reading it back.")
    )]
    KeyNotFound { store: &'static str, key: String },

    #[error("The mock \"{name}\" doesn't exist in collection \"{collection}\"")]
    #[diagnostic(
        code(testbench::collection_entry_not_found),
        help("Check the inner name the mock was inserted under, and whether an earlier call already removed it.")
    )]
    CollectionEntryNotFound { collection: String, name: String },

    #[error("The {store} \"{key}\" holds a {stored}, not a {requested}")]
    #[diagnostic(
        code(testbench::type_mismatch),
        help("Stored objects come back as the concrete type they were registered with.")
    )]
    TypeMismatch {
        store: &'static str,
        key: String,
        stored: &'static str,
        requested: &'static str,
    },

    #[error("No object under test has been set")]
    #[diagnostic(
        code(testbench::subject_not_set),
        help("Call set_subject() during set up before binding or reading the object under test.")
    )]
    SubjectNotSet,

    #[error("The object under test is a {stored}, not a {requested}")]
    #[diagnostic(
        code(testbench::subject_type_mismatch),
        help("subject_as() returns the object under test as the concrete type it was registered with.")
    )]
    SubjectTypeMismatch {
        stored: &'static str,
        requested: &'static str,
    },

    #[error("No result has been recorded")]
    #[diagnostic(
        code(testbench::result_not_set),
        help("Record one with set_actual_result() before reading it back.")
    )]
    ResultNotSet,

    #[error("A result is already recorded")]
    #[diagnostic(
        code(testbench::result_already_set),
        help("Pass `overwrite = true` to replace the recorded result.")
    )]
    ResultAlreadySet,

    #[error("The recorded result is a {stored}, not a {requested}")]
    #[diagnostic(
        code(testbench::result_type_mismatch),
        help("actual_result() returns the result as the concrete type it was recorded with.")
    )]
    ResultTypeMismatch {
        stored: &'static str,
        requested: &'static str,
    },

    #[error("The object under test has no collection adder for \"{0}\"")]
    #[diagnostic(
        code(testbench::missing_adder),
        help("Override bind_item() for this property on the object under test.")
    )]
    MissingAdder(String),

    #[error("Memory usage was not measured before tear down")]
    #[diagnostic(
        code(testbench::memory_not_measured),
        help("Call measure_memory_before_tear_down() before tearing the registry down.")
    )]
    MemoryNotMeasured,

    #[error("Process memory statistics are not available on this platform")]
    #[diagnostic(code(testbench::memory_unavailable))]
    MemoryUnavailable,
}
