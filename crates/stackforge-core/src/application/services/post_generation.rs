//! Optional steps run after a successful generation: dependency install,
//! git, tests. None of them can fail the run; problems come back as
//! warnings.

use std::fmt;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ports::{DependencyInstaller, GitInitializer, GitOutcome, ProgressSink, TestOutcome, TestRunner},
        services::{
            backend_generator::BACKEND_DIR,
            frontend_generator::FRONTEND_DIR,
            project_composer::GenerationReport,
        },
    },
    domain::ProjectConfig,
};

/// Which post-generation step produced a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostGenerationStep {
    Install,
    Git,
    Tests,
}

impl fmt::Display for PostGenerationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Install => "dependency install",
            Self::Git => "git",
            Self::Tests => "tests",
        })
    }
}

/// A non-fatal problem in a post-generation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostGenerationWarning {
    pub step: PostGenerationStep,
    pub message: String,
}

impl fmt::Display for PostGenerationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.step, self.message)
    }
}

/// Runs the collaborators enabled by the config.
pub struct PostGenerationService {
    installer: Box<dyn DependencyInstaller>,
    git: Box<dyn GitInitializer>,
    tests: Box<dyn TestRunner>,
    progress: Box<dyn ProgressSink>,
}

impl PostGenerationService {
    pub fn new(
        installer: Box<dyn DependencyInstaller>,
        git: Box<dyn GitInitializer>,
        tests: Box<dyn TestRunner>,
        progress: Box<dyn ProgressSink>,
    ) -> Self {
        Self {
            installer,
            git,
            tests,
            progress,
        }
    }

    /// Install, run tests (only if install succeeded and a test runner is
    /// configured), then initialise git so the first commit includes the
    /// lock files.
    #[instrument(skip_all, fields(root = %report.root.display()))]
    pub fn run(&self, config: &ProjectConfig, report: &GenerationReport) -> Vec<PostGenerationWarning> {
        let mut warnings = Vec::new();
        let root = report.root.as_path();

        if config.install_deps() {
            let installed = self.install_all(config, root, &mut warnings);
            if installed && config.test_family().is_some() {
                self.run_tests(&root.join(BACKEND_DIR), &mut warnings);
            }
        }

        if config.git_init() {
            self.progress.status("Initializing git repository");
            match self.git.initialize(root) {
                Ok(GitOutcome::Committed) => info!("Git repository initialized"),
                Ok(GitOutcome::InitializedOnly { reason }) => warnings.push(PostGenerationWarning {
                    step: PostGenerationStep::Git,
                    message: format!("repository created but initial commit failed: {reason}"),
                }),
                Err(e) => warnings.push(PostGenerationWarning {
                    step: PostGenerationStep::Git,
                    message: e.to_string(),
                }),
            }
        }

        for warning in &warnings {
            warn!(step = %warning.step, "{}", warning.message);
        }
        warnings
    }

    fn install_all(
        &self,
        config: &ProjectConfig,
        root: &Path,
        warnings: &mut Vec<PostGenerationWarning>,
    ) -> bool {
        let mut dirs = vec![BACKEND_DIR];
        if config.has_frontend() {
            dirs.push(FRONTEND_DIR);
        }

        let mut backend_ok = true;
        for dir in dirs {
            self.progress.status(&format!("Installing {dir} dependencies"));
            if let Err(e) = self.installer.install(&root.join(dir)) {
                if dir == BACKEND_DIR {
                    backend_ok = false;
                }
                warnings.push(PostGenerationWarning {
                    step: PostGenerationStep::Install,
                    message: format!("{dir}: {e}"),
                });
            }
        }
        backend_ok
    }

    fn run_tests(&self, backend: &Path, warnings: &mut Vec<PostGenerationWarning>) {
        self.progress.status("Running backend tests");
        let message = match self.tests.run(backend) {
            Ok(TestOutcome::Passed) => {
                info!("Generated tests pass");
                return;
            }
            Ok(TestOutcome::Failed { summary }) => format!("generated tests failed: {summary}"),
            Err(e) => e.to_string(),
        };
        warnings.push(PostGenerationWarning {
            step: PostGenerationStep::Tests,
            message,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        ApplicationError,
        ports::output::{MockDependencyInstaller, MockGitInitializer, MockProgressSink, MockTestRunner},
        services::frontend_generator::FrontendOutcome,
    };
    use crate::domain::{Feature, FrontendKind};
    use std::path::PathBuf;

    fn report() -> GenerationReport {
        GenerationReport {
            root: PathBuf::from("/work/app"),
            frontend: FrontendOutcome::Generated,
            files_written: 10,
            directories_created: 5,
        }
    }

    fn progress() -> Box<MockProgressSink> {
        let mut progress = MockProgressSink::new();
        progress.expect_status().returning(|_| ());
        Box::new(progress)
    }

    fn config(install: bool, git: bool) -> ProjectConfig {
        ProjectConfig::builder()
            .name("app")
            .frontend(FrontendKind::Vanilla)
            .feature(Feature::Testing)
            .install_deps(install)
            .git_init(git)
            .build()
            .unwrap()
    }

    #[test]
    fn disabled_steps_call_nothing() {
        let mut installer = MockDependencyInstaller::new();
        installer.expect_install().never();
        let mut git = MockGitInitializer::new();
        git.expect_initialize().never();
        let mut tests = MockTestRunner::new();
        tests.expect_run().never();

        let service =
            PostGenerationService::new(Box::new(installer), Box::new(git), Box::new(tests), progress());
        assert!(service.run(&config(false, false), &report()).is_empty());
    }

    #[test]
    fn failures_become_warnings() {
        let mut installer = MockDependencyInstaller::new();
        installer.expect_install().times(2).returning(|path| {
            if path.ends_with("frontend") {
                Err(ApplicationError::CollaboratorFailed {
                    tool: "npm",
                    reason: "offline".into(),
                }
                .into())
            } else {
                Ok(())
            }
        });
        let mut git = MockGitInitializer::new();
        git.expect_initialize().returning(|_| {
            Ok(GitOutcome::InitializedOnly {
                reason: "no user.email".into(),
            })
        });
        let mut tests = MockTestRunner::new();
        tests
            .expect_run()
            .withf(|path| path == std::path::Path::new("/work/app/backend"))
            .returning(|_| {
                Ok(TestOutcome::Failed {
                    summary: "1 failed".into(),
                })
            });

        let service =
            PostGenerationService::new(Box::new(installer), Box::new(git), Box::new(tests), progress());
        let warnings = service.run(&config(true, true), &report());
        let steps: Vec<_> = warnings.iter().map(|w| w.step).collect();
        assert_eq!(
            steps,
            [
                PostGenerationStep::Install,
                PostGenerationStep::Tests,
                PostGenerationStep::Git
            ]
        );
    }

    #[test]
    fn failed_backend_install_skips_tests() {
        let mut installer = MockDependencyInstaller::new();
        installer.expect_install().returning(|path| {
            Err(ApplicationError::CollaboratorFailed {
                tool: "npm",
                reason: format!("cannot install in {}", path.display()),
            }
            .into())
        });
        let git = MockGitInitializer::new();
        let mut tests = MockTestRunner::new();
        tests.expect_run().never();

        let service =
            PostGenerationService::new(Box::new(installer), Box::new(git), Box::new(tests), progress());
        let warnings = service.run(&config(true, false), &report());
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.step == PostGenerationStep::Install));
    }
}
