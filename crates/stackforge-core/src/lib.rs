//! Stackforge Core - Hexagonal Architecture Implementation
//!
//! This crate is the project generation engine: it maps a fully-resolved
//! `ProjectConfig` to a Node.js backend and an optional frontend, following
//! hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          stackforge-cli (CLI)           │
//! │   (flags, prompts, output, progress)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (ProjectComposer, PostGenerationService)│
//! │   Backend/Frontend generators, content  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Filesystem, ProgressSink, installers)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    stackforge-adapters (Infrastructure) │
//! │  (LocalFilesystem, NpmInstaller, GitCli)│
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (ProjectConfig, registries, resolvers)  │
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stackforge_core::prelude::*;
//!
//! # fn run(filesystem: Box<dyn Filesystem>, progress: Box<dyn ProgressSink>) -> StackforgeResult<()> {
//! let config = ProjectConfig::builder()
//!     .name("demo-api")
//!     .database(DatabaseKind::Postgres)
//!     .feature(Feature::Testing)
//!     .build()?;
//!
//! let composer = ProjectComposer::new(filesystem, progress);
//! let report = composer.compose(&config, "./output")?;
//! println!("{} files written", report.files_written);
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        FrontendOutcome, GenerationReport, PersistedProject, PostGenerationService,
        PostGenerationWarning, ProjectComposer,
        ports::{
            DependencyInstaller, Filesystem, GitInitializer, GitOutcome, ProgressSink,
            TestOutcome, TestRunner,
        },
    };
    pub use crate::domain::{
        Architecture, BackendLang, DatabaseKind, Feature, FrontendCapability, FrontendKind,
        Profile, ProjectConfig, ProjectConfigBuilder,
    };
    pub use crate::error::{StackforgeError, StackforgeResult};
}

pub use error::{StackforgeError, StackforgeResult};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
