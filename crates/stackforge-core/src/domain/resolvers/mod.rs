//! Pure resolvers, one per manifest concern.
//!
//! Each takes the full `ProjectConfig` and returns a partial structure; the
//! generators merge the partials. Resolvers never touch the filesystem.

pub mod ci;
pub mod dependencies;
pub mod directories;
pub mod env;
pub mod scripts;

pub use ci::resolve_ci_workflow;
pub use dependencies::{resolve_dependencies, resolve_dev_dependencies};
pub use directories::resolve_directory_plan;
pub use env::{database_url, resolve_env};
pub use scripts::resolve_scripts;
