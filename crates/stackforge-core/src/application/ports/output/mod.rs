//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stackforge-adapters` crate provides implementations.

use crate::error::StackforgeResult;
use std::path::Path;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stackforge_adapters::filesystem::LocalFilesystem` (production)
/// - `stackforge_adapters::filesystem::MemoryFilesystem` (testing)
///
/// All calls are synchronous; each completes before the next generation step.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories. Idempotent.
    fn create_dir_all(&self, path: &Path) -> StackforgeResult<()>;

    /// Write content to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &str) -> StackforgeResult<()>;

    /// Read a file as UTF-8.
    fn read_file(&self, path: &Path) -> StackforgeResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> StackforgeResult<()>;
}

/// Write-only status channel for long-running work. Advisory only: a sink
/// that drops every message is valid.
#[cfg_attr(test, mockall::automock)]
pub trait ProgressSink: Send + Sync {
    /// A new step started.
    fn status(&self, message: &str);

    /// The whole run finished.
    fn finish(&self, message: &str);
}

/// Installs a sub-project's npm dependencies.
#[cfg_attr(test, mockall::automock)]
pub trait DependencyInstaller: Send + Sync {
    fn install(&self, project_dir: &Path) -> StackforgeResult<()>;
}

/// What the git initializer managed to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitOutcome {
    /// Repository created and an initial commit recorded.
    Committed,
    /// Repository created but the commit failed (e.g. no git identity).
    InitializedOnly { reason: String },
}

/// Initialises a repository, stages everything and commits.
#[cfg_attr(test, mockall::automock)]
pub trait GitInitializer: Send + Sync {
    fn initialize(&self, root: &Path) -> StackforgeResult<GitOutcome>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestOutcome {
    Passed,
    Failed { summary: String },
}

/// Runs a sub-project's test script.
#[cfg_attr(test, mockall::automock)]
pub trait TestRunner: Send + Sync {
    fn run(&self, project_dir: &Path) -> StackforgeResult<TestOutcome>;
}
