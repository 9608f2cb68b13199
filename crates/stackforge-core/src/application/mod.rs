//! Application layer for Stackforge.
//!
//! This layer contains:
//! - **Services**: the generation use case (`ProjectComposer`) and its steps
//! - **Content**: bodies of the generated files
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! Business rules (what goes into a manifest, which env keys exist) live in
//! `crate::domain`; this layer turns them into files and talks to ports.

pub mod content;
pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    BackendGenerator, FrontendGenerator, FrontendOutcome, GenerationReport, PersistedProject,
    PostGenerationService, PostGenerationWarning, ProjectComposer,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    DependencyInstaller, Filesystem, GitInitializer, GitOutcome, ProgressSink, TestOutcome,
    TestRunner,
};

pub use error::ApplicationError;
