//! Frontend sub-project generation.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        content::frontend,
        ports::Filesystem,
        services::writer::{WriteStats, write_structure},
    },
    domain::{
        FrontendCapability, FrontendKind, ManifestDescriptor, ProjectConfig, ProjectStructure,
        registry::{self, FrontendDef, Package},
    },
    error::StackforgeResult,
};

pub const FRONTEND_DIR: &str = "frontend";

/// What the frontend generator produced. Callers must surface `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontendOutcome {
    /// A complete, runnable frontend.
    Generated,
    /// Manifest and README only; the framework still has to be scaffolded.
    Pending { kind: FrontendKind },
    /// No frontend was requested.
    Skipped,
}

fn to_map(pairs: &[Package]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(name, version)| (name.to_string(), version.to_string()))
        .collect()
}

/// `package.json` of the frontend, from the registry entry.
pub fn frontend_manifest(config: &ProjectConfig, def: &FrontendDef) -> ManifestDescriptor {
    let mut manifest = ManifestDescriptor::new(
        format!("{}-frontend", config.name()),
        format!("{} frontend for {}", def.display_name, config.name()),
    )
    .with_main(def.entry)
    .with_keywords(["frontend", def.kind.as_str()])
    .with_private();
    manifest.merge_scripts(to_map(def.scripts));
    manifest.merge_dependencies(to_map(def.dependencies));
    manifest.merge_dev_dependencies(to_map(def.dev_dependencies));
    manifest
}

/// Files of the frontend, rooted at `<project_root>/frontend`. `None`
/// without a frontend.
pub fn plan_frontend(
    config: &ProjectConfig,
    project_root: &Path,
) -> StackforgeResult<Option<(ProjectStructure, FrontendOutcome)>> {
    let Some(def) = registry::find_frontend(config.frontend()) else {
        return Ok(None);
    };

    let mut structure = ProjectStructure::new(project_root.join(FRONTEND_DIR));
    structure.add_file("package.json", frontend_manifest(config, def).to_json()?)?;

    let outcome = match def.capability {
        FrontendCapability::Supported => {
            for (path, body) in frontend::vanilla_files(config) {
                structure.add_file(&path, body)?;
            }
            FrontendOutcome::Generated
        }
        FrontendCapability::Stub => {
            structure.add_file("README.md", frontend::stub_readme(config))?;
            FrontendOutcome::Pending { kind: def.kind }
        }
    };

    Ok(Some((structure, outcome)))
}

/// Writes the frontend sub-project, if any.
pub struct FrontendGenerator<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> FrontendGenerator<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    #[instrument(skip_all, fields(frontend = %config.frontend()))]
    pub fn generate(
        &self,
        config: &ProjectConfig,
        project_root: &Path,
    ) -> StackforgeResult<(FrontendOutcome, WriteStats)> {
        let Some((structure, outcome)) = plan_frontend(config, project_root)? else {
            info!("No frontend requested");
            return Ok((FrontendOutcome::Skipped, WriteStats::default()));
        };

        let stats = write_structure(self.filesystem, &structure)?;
        match outcome {
            FrontendOutcome::Pending { kind } => {
                warn!(%kind, "Frontend generation is incomplete for this framework")
            }
            _ => info!(files = stats.files, "Frontend generated"),
        }
        Ok((outcome, stats))
    }
}
