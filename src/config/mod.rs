pub mod settings;

pub use settings::{ArchiveConfig, FailurePolicy};
