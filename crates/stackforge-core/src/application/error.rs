//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed. Raised mid-generation, it triggers the
    /// composer's rollback.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// Rollback failed (best-effort cleanup failed).
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },

    /// No `stackforge.json` where one was expected.
    #[error("No generated project found at {path}")]
    PersistedConfigMissing { path: PathBuf },

    /// `stackforge.json` exists but cannot be read back.
    #[error("Invalid project file {path}: {reason}")]
    PersistedConfigInvalid { path: PathBuf, reason: String },

    /// An external tool (npm, git) failed after generation.
    #[error("{tool} failed: {reason}")]
    CollaboratorFailed { tool: &'static str, reason: String },

    /// Validation failed (application-level, not domain).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
                "Or remove the existing directory first".into(),
            ],
            Self::RollbackFailed { path, .. } => vec![
                format!("Partial output may remain at {}", path.display()),
                "Remove it manually before retrying".into(),
            ],
            Self::PersistedConfigMissing { .. } => vec![
                "Run this inside a directory created by 'stackforge new'".into(),
                "Or pass the project path explicitly".into(),
            ],
            Self::PersistedConfigInvalid { .. } => vec![
                "The project file was edited by hand or is from another version".into(),
                "Regenerate the project or fix the JSON".into(),
            ],
            Self::CollaboratorFailed { tool, .. } => vec![
                format!("Check that {} is installed and on your PATH", tool),
                "The generated files are intact; rerun the step by hand".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::RollbackFailed { .. } => ErrorCategory::Internal,
            Self::ProjectExists { .. } | Self::ValidationFailed(_) => ErrorCategory::Validation,
            Self::PersistedConfigMissing { .. } => ErrorCategory::NotFound,
            Self::PersistedConfigInvalid { .. } => ErrorCategory::Configuration,
            Self::CollaboratorFailed { .. } => ErrorCategory::Internal,
        }
    }
}
