//! Post-generation collaborators backed by `std::process::Command`.

mod git;
mod npm;

pub use git::GitCli;
pub use npm::{NpmInstaller, NpmTestRunner};

use std::path::Path;
use std::process::{Command, Output};

use stackforge_core::{StackforgeError, application::ApplicationError};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("could not start {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} {args} exited with {code}: {stderr}")]
    Failed {
        program: &'static str,
        args: String,
        code: String,
        stderr: String,
    },
}

impl ProcessError {
    fn program(&self) -> &'static str {
        match self {
            Self::Spawn { program, .. } | Self::Failed { program, .. } => *program,
        }
    }
}

impl From<ProcessError> for StackforgeError {
    fn from(e: ProcessError) -> Self {
        ApplicationError::CollaboratorFailed {
            tool: e.program(),
            reason: e.to_string(),
        }
        .into()
    }
}

/// Last `n` non-empty lines of process output.
pub(crate) fn tail(bytes: &[u8], n: usize) -> String {
    let text = String::from_utf8_lossy(bytes);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    lines[lines.len().saturating_sub(n)..].join("\n")
}

/// Run `program args` in `dir`, capturing output. Non-zero exit is an error.
pub(crate) fn run(program: &'static str, args: &[&str], dir: &Path) -> Result<Output, ProcessError> {
    let output = run_unchecked(program, args, dir)?;
    if output.status.success() {
        return Ok(output);
    }
    Err(ProcessError::Failed {
        program,
        args: args.join(" "),
        code: output
            .status
            .code()
            .map_or_else(|| "signal".to_string(), |c| c.to_string()),
        stderr: tail(&output.stderr, 5),
    })
}

/// Like [`run`] but returns the output whatever the exit status.
pub(crate) fn run_unchecked(
    program: &'static str,
    args: &[&str],
    dir: &Path,
) -> Result<Output, ProcessError> {
    debug!(program, ?args, dir = %dir.display(), "Running command");
    Command::new(executable(program))
        .args(args)
        .current_dir(dir)
        .env("CI", "true")
        .output()
        .map_err(|source| ProcessError::Spawn { program, source })
}

/// npm ships as a `.cmd` shim on Windows.
fn executable(program: &str) -> String {
    if cfg!(windows) && program == "npm" {
        "npm.cmd".to_string()
    } else {
        program.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_keeps_last_non_empty_lines() {
        let out = b"one\n\ntwo\nthree\n\n";
        assert_eq!(tail(out, 2), "two\nthree");
        assert_eq!(tail(out, 10), "one\ntwo\nthree");
        assert_eq!(tail(b"", 3), "");
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run("stackforge-no-such-binary", &[], dir.path()).unwrap_err();
        assert!(matches!(err, ProcessError::Spawn { .. }));
        let err: StackforgeError = err.into();
        assert!(err.to_string().contains("stackforge-no-such-binary"));
    }
}
