pub mod ci_workflow;
pub mod common;
pub mod directory_plan;
pub mod env_file;
pub mod manifest;
pub mod project_config;
pub mod project_structure;

pub use crate::domain::DomainError;
pub use ci_workflow::{CiJob, CiJobKind, CiWorkflow};
pub use directory_plan::DirectoryPlan;
pub use env_file::{EnvEntry, EnvFile, EnvSection};
pub use manifest::ManifestDescriptor;
pub use project_config::{ProjectConfig, ProjectConfigBuilder, TestFamily};
pub use project_structure::ProjectStructure;
