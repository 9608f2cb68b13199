//! Application services - orchestrate use cases.
//!
//! The composer is the generation use case; the two generators and the root
//! file planner are its steps. Post-generation runs the external tools once
//! the tree is on disk.

pub mod backend_generator;
pub mod frontend_generator;
pub mod post_generation;
pub mod project_composer;
pub mod writer;

pub use backend_generator::{BackendGenerator, backend_manifest, plan_backend};
pub use frontend_generator::{FrontendGenerator, FrontendOutcome, plan_frontend};
pub use post_generation::{PostGenerationService, PostGenerationStep, PostGenerationWarning};
pub use project_composer::{
    GenerationReport, PERSISTED_CONFIG_FILE, PersistedProject, ProjectComposer,
};
pub use writer::WriteStats;
