//! Project Composer - the generation use case.
//!
//! Runs the whole pipeline for one `ProjectConfig`:
//! 1. Validate (no writes on failure)
//! 2. Refuse an existing target directory
//! 3. Backend, then frontend
//! 4. Root README, `.gitignore`, CI workflow
//! 5. Persist `stackforge.json`
//!
//! Any failure after the root was created is caught here, once, and the root
//! is removed on a best-effort basis.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        content::{ci, readme},
        ports::{Filesystem, ProgressSink},
        services::{
            backend_generator::BackendGenerator,
            frontend_generator::{FrontendGenerator, FrontendOutcome},
            writer::{WriteStats, write_structure},
        },
    },
    domain::{ProjectConfig, ProjectStructure, resolvers},
    error::{StackforgeError, StackforgeResult},
};

/// Name of the persisted configuration inside a generated root.
pub const PERSISTED_CONFIG_FILE: &str = "stackforge.json";

pub const CI_WORKFLOW_PATH: &str = ".github/workflows/ci.yml";

/// `stackforge.json`: the config plus provenance of the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedProject {
    pub generator_version: String,
    pub generation_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub config: ProjectConfig,
}

impl PersistedProject {
    pub fn new(config: ProjectConfig) -> Self {
        Self {
            generator_version: crate::VERSION.to_string(),
            generation_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            config,
        }
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub root: PathBuf,
    pub frontend: FrontendOutcome,
    pub files_written: usize,
    pub directories_created: usize,
}

impl GenerationReport {
    /// True when some part of the tree still needs manual scaffolding.
    pub fn is_incomplete(&self) -> bool {
        matches!(self.frontend, FrontendOutcome::Pending { .. })
    }
}

/// Root-level files: README, `.gitignore` and, when enabled, the CI workflow.
pub fn plan_root_files(config: &ProjectConfig, root: &Path) -> StackforgeResult<ProjectStructure> {
    let mut structure = ProjectStructure::new(root)
        .with_file("README.md", readme::root_readme(config))?
        .with_file(".gitignore", readme::root_gitignore())?;

    if let Some(workflow) = resolvers::resolve_ci_workflow(config) {
        structure.add_file(CI_WORKFLOW_PATH, ci::workflow_yaml(&workflow, config)?)?;
    }
    Ok(structure)
}

/// Orchestrates the generators for one project.
pub struct ProjectComposer {
    filesystem: Box<dyn Filesystem>,
    progress: Box<dyn ProgressSink>,
}

impl ProjectComposer {
    pub fn new(filesystem: Box<dyn Filesystem>, progress: Box<dyn ProgressSink>) -> Self {
        Self {
            filesystem,
            progress,
        }
    }

    /// Generate the project `<parent>/<config.name>`.
    #[instrument(
        skip_all,
        fields(project = %config.name(), parent = %parent.as_ref().display())
    )]
    pub fn compose(
        &self,
        config: &ProjectConfig,
        parent: impl AsRef<Path>,
    ) -> StackforgeResult<GenerationReport> {
        config.validate()?;

        let root = parent.as_ref().join(config.name());
        if self.filesystem.exists(&root) {
            return Err(ApplicationError::ProjectExists { path: root }.into());
        }

        info!(root = %root.display(), "Generating project");
        self.filesystem.create_dir_all(&root)?;

        match self.generate_into(config, &root) {
            Ok(report) => {
                self.progress.finish(&format!("Created {}", root.display()));
                info!(
                    files = report.files_written,
                    directories = report.directories_created,
                    "Project generated"
                );
                Ok(report)
            }
            Err(e) => {
                warn!(error = %e, "Generation failed, attempting rollback");
                self.progress.finish("Generation failed");
                self.rollback(&root);
                Err(e)
            }
        }
    }

    fn generate_into(&self, config: &ProjectConfig, root: &Path) -> StackforgeResult<GenerationReport> {
        let mut stats = WriteStats::default();

        self.progress.status("Generating backend");
        stats.add(BackendGenerator::new(&*self.filesystem).generate(config, root)?);

        if config.has_frontend() {
            self.progress
                .status(&format!("Generating {} frontend", config.frontend()));
        }
        let (frontend, frontend_stats) =
            FrontendGenerator::new(&*self.filesystem).generate(config, root)?;
        stats.add(frontend_stats);

        self.progress.status("Writing documentation");
        let root_files = plan_root_files(config, root)?;
        stats.add(write_structure(&*self.filesystem, &root_files)?);

        self.progress.status("Saving project configuration");
        self.persist(config, root)?;
        stats.files += 1;

        Ok(GenerationReport {
            root: root.to_path_buf(),
            frontend,
            files_written: stats.files,
            directories_created: stats.directories,
        })
    }

    fn persist(&self, config: &ProjectConfig, root: &Path) -> StackforgeResult<()> {
        let persisted = PersistedProject::new(config.clone());
        let json = serde_json::to_string_pretty(&persisted).map_err(|e| StackforgeError::Internal {
            message: format!("serializing {PERSISTED_CONFIG_FILE}: {e}"),
        })?;
        self.filesystem
            .write_file(&root.join(PERSISTED_CONFIG_FILE), &(json + "\n"))
    }

    /// Read back `stackforge.json` from a generated root and re-validate it.
    pub fn load_persisted(&self, root: impl AsRef<Path>) -> StackforgeResult<PersistedProject> {
        let path = root.as_ref().join(PERSISTED_CONFIG_FILE);
        if !self.filesystem.exists(&path) {
            return Err(ApplicationError::PersistedConfigMissing { path }.into());
        }

        let text = self.filesystem.read_file(&path)?;
        let persisted: PersistedProject =
            serde_json::from_str(&text).map_err(|e| ApplicationError::PersistedConfigInvalid {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        persisted.config.validate()?;
        Ok(persisted)
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, root: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(
                error = %e,
                path = %root.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::output::{MockFilesystem, MockProgressSink};
    use crate::domain::{DatabaseKind, Feature, FrontendKind};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    fn quiet_progress() -> Box<MockProgressSink> {
        let mut progress = MockProgressSink::new();
        progress.expect_status().returning(|_| ());
        progress.expect_finish().returning(|_| ());
        Box::new(progress)
    }

    /// Mock filesystem backed by a shared map, so tests can inspect writes.
    fn recording_fs(files: Arc<Mutex<HashMap<PathBuf, String>>>) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        let reads = Arc::clone(&files);
        let exists = Arc::clone(&files);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(move |path, content| {
            files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        });
        fs.expect_read_file().returning(move |path| {
            reads
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| {
                    ApplicationError::FilesystemError {
                        path: path.to_path_buf(),
                        reason: "missing".into(),
                    }
                    .into()
                })
        });
        fs.expect_exists()
            .returning(move |path| exists.lock().unwrap().contains_key(path));
        fs
    }

    #[test]
    fn existing_root_is_rejected_before_any_write() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();

        let composer = ProjectComposer::new(Box::new(fs), quiet_progress());
        let config = ProjectConfig::builder().name("taken").build().unwrap();
        let err = composer.compose(&config, "/work").unwrap_err();
        assert!(matches!(
            err,
            StackforgeError::Application(ApplicationError::ProjectExists { .. })
        ));
    }

    #[test]
    fn failed_write_rolls_back_root() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|path, _| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "disk full".into(),
            }
            .into())
        });
        fs.expect_remove_dir_all()
            .withf(|path| path == Path::new("/work/doomed"))
            .times(1)
            .returning(|_| Ok(()));

        let composer = ProjectComposer::new(Box::new(fs), quiet_progress());
        let config = ProjectConfig::builder().name("doomed").build().unwrap();
        assert!(composer.compose(&config, "/work").is_err());
    }

    #[test]
    fn rollback_failure_keeps_original_error() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|path, _| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "read-only".into(),
            }
            .into())
        });
        fs.expect_remove_dir_all().returning(|path| {
            Err(ApplicationError::RollbackFailed {
                path: path.to_path_buf(),
                reason: "busy".into(),
            }
            .into())
        });

        let composer = ProjectComposer::new(Box::new(fs), quiet_progress());
        let config = ProjectConfig::builder().name("stuck").build().unwrap();
        let err = composer.compose(&config, "/work").unwrap_err();
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn compose_writes_tree_and_round_trips_config() {
        let files = Arc::new(Mutex::new(HashMap::new()));
        let composer = ProjectComposer::new(
            Box::new(recording_fs(Arc::clone(&files))),
            quiet_progress(),
        );
        let config = ProjectConfig::builder()
            .name("demo-web")
            .frontend(FrontendKind::Vanilla)
            .database(DatabaseKind::Sqlite)
            .features([Feature::Testing, Feature::Logging])
            .ci(true)
            .port(4000)
            .build()
            .unwrap();

        let report = composer.compose(&config, "/work").unwrap();
        assert_eq!(report.root, PathBuf::from("/work/demo-web"));
        assert_eq!(report.frontend, FrontendOutcome::Generated);
        assert!(!report.is_incomplete());

        {
            let written = files.lock().unwrap();
            assert_eq!(report.files_written, written.len());
            for path in [
                "backend/package.json",
                "frontend/app.js",
                "README.md",
                ".gitignore",
                CI_WORKFLOW_PATH,
                PERSISTED_CONFIG_FILE,
            ] {
                assert!(
                    written.contains_key(&PathBuf::from("/work/demo-web").join(path)),
                    "{path}"
                );
            }
        }

        let persisted = composer.load_persisted("/work/demo-web").unwrap();
        assert_eq!(persisted.config, config);
        assert_eq!(persisted.generator_version, crate::VERSION);
    }

    #[test]
    fn backend_only_project_has_no_frontend_dir() {
        let files = Arc::new(Mutex::new(HashMap::new()));
        let composer = ProjectComposer::new(
            Box::new(recording_fs(Arc::clone(&files))),
            quiet_progress(),
        );
        let config = ProjectConfig::builder().name("demo-api").build().unwrap();

        let report = composer.compose(&config, "/work").unwrap();
        assert_eq!(report.frontend, FrontendOutcome::Skipped);
        let written = files.lock().unwrap();
        assert!(
            written
                .keys()
                .all(|p| !p.starts_with("/work/demo-api/frontend"))
        );
        assert!(!written.contains_key(&PathBuf::from("/work/demo-api").join(CI_WORKFLOW_PATH)));
    }

    #[test]
    fn missing_project_file_is_not_found() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        let composer = ProjectComposer::new(Box::new(fs), quiet_progress());
        let err = composer.load_persisted("/nowhere").unwrap_err();
        assert!(matches!(
            err,
            StackforgeError::Application(ApplicationError::PersistedConfigMissing { .. })
        ));
    }
}
