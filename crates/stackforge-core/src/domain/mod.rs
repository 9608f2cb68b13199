//! Core domain layer for Stackforge.
//!
//! Pure generation logic: value objects, static registries, entities and
//! resolvers. All I/O is handled via ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: No filesystem, network, or process calls
//! - **No observability**: `tracing` is for the application layer and up
//! - **Immutable inputs**: `ProjectConfig` is read-only once built
//! - **Deterministic**: the same config always resolves to the same output

pub mod entities;
pub mod error;
pub mod registry;
pub mod resolvers;
pub mod validation;
pub mod value_objects;

pub use entities::{
    CiJob, CiJobKind, CiWorkflow, DirectoryPlan, EnvFile, EnvSection, ManifestDescriptor,
    ProjectConfig, ProjectConfigBuilder, ProjectStructure, TestFamily,
    common::RelativePath,
    project_config::{DEFAULT_BACKEND_PORT, DEFAULT_DESCRIPTION},
    project_structure::{DirectoryToCreate, FileToWrite, FsEntry},
};
pub use error::{DomainError, ErrorCategory};
pub use registry::{FrontendCapability, FrontendDef, ProfileDef};
pub use validation::DomainValidator;
pub use value_objects::{Architecture, BackendLang, DatabaseKind, Feature, FrontendKind, Profile};
