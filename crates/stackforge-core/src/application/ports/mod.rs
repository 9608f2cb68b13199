//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stackforge-adapters` implement
//! these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `ProgressSink`: Status messages for the user
//!   - `DependencyInstaller`, `GitInitializer`, `TestRunner`: post-generation tools
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    DependencyInstaller, Filesystem, GitInitializer, GitOutcome, ProgressSink, TestOutcome,
    TestRunner,
};
