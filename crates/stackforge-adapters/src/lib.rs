//! Infrastructure adapters for Stackforge.
//!
//! This crate implements the ports defined in `stackforge_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod process;
pub mod progress;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::{GitCli, NpmInstaller, NpmTestRunner, ProcessError};
pub use progress::{NoopProgress, RecordingProgress};
