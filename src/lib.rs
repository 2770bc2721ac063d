/// Archive abstraction, backends and entry points.
pub mod archive;
/// Archive configuration loading.
pub mod config;
/// Demo record shared by the binary, tests and fuzzing.
pub mod demo;
/// Logging initialization (formats, filters).
pub mod logging;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

/// Archive trait, direction and the serializable capability.
pub use archive::{Archive, BasicType, Mode, Serializable};
/// Backends: file and in-memory.
pub use archive::{FileArchive, MemoryArchive};
/// Entry points.
pub use archive::{
    serialize_from_bytes, serialize_from_file, serialize_from_file_with_config,
    serialize_to_bytes, serialize_to_file, serialize_to_file_with_config,
};
/// config
pub use config::{ArchiveConfig, FailurePolicy};
/// Operation errors and result types.
pub use zarchive_error::{ArchiveError, ArchiveResult, ErrorExt, StatusCode};
