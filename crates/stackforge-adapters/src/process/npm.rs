use std::path::Path;

use stackforge_core::{
    StackforgeResult,
    application::ports::{DependencyInstaller, TestOutcome, TestRunner},
};
use tracing::{info, instrument};

use super::{run, run_unchecked, tail};

const NPM: &str = "npm";

/// `npm install` in a sub-project.
#[derive(Debug, Clone, Copy, Default)]
pub struct NpmInstaller;

impl DependencyInstaller for NpmInstaller {
    #[instrument(skip_all, fields(dir = %project_dir.display()))]
    fn install(&self, project_dir: &Path) -> StackforgeResult<()> {
        run(NPM, &["install", "--no-audit", "--no-fund"], project_dir)?;
        info!("Dependencies installed");
        Ok(())
    }
}

/// `npm test` in a sub-project. A failing suite is an outcome, not an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct NpmTestRunner;

impl TestRunner for NpmTestRunner {
    #[instrument(skip_all, fields(dir = %project_dir.display()))]
    fn run(&self, project_dir: &Path) -> StackforgeResult<TestOutcome> {
        let output = run_unchecked(NPM, &["test"], project_dir)?;
        if output.status.success() {
            return Ok(TestOutcome::Passed);
        }
        let mut summary = tail(&output.stderr, 5);
        if summary.is_empty() {
            summary = tail(&output.stdout, 5);
        }
        Ok(TestOutcome::Failed { summary })
    }
}
