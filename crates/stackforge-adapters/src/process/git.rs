use std::path::Path;

use stackforge_core::{
    StackforgeResult,
    application::ports::{GitInitializer, GitOutcome},
};
use tracing::{info, instrument, warn};

use super::run;

const GIT: &str = "git";

pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit from stackforge";

/// `git init`, `git add -A`, `git commit`. A failed commit (typically no
/// configured identity) still leaves a usable repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

impl GitInitializer for GitCli {
    #[instrument(skip_all, fields(root = %root.display()))]
    fn initialize(&self, root: &Path) -> StackforgeResult<GitOutcome> {
        run(GIT, &["init", "--quiet"], root)?;
        run(GIT, &["add", "-A"], root)?;

        match run(GIT, &["commit", "--quiet", "-m", INITIAL_COMMIT_MESSAGE], root) {
            Ok(_) => {
                info!("Initial commit created");
                Ok(GitOutcome::Committed)
            }
            Err(e) => {
                warn!(error = %e, "Initial commit failed");
                Ok(GitOutcome::InitializedOnly {
                    reason: e.to_string(),
                })
            }
        }
    }
}
