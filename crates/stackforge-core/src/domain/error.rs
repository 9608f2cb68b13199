// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside reports and warnings)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Invalid port '{value}': {reason}")]
    InvalidPort { value: String, reason: String },

    #[error("Unknown {field} '{value}'")]
    UnknownValue { field: &'static str, value: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Duplicate path in project structure: {path}")]
    DuplicatePath { path: String },

    #[error("Invalid project structure: {0}")]
    InvalidStructure(String),

    // ========================================================================
    // Consistency Errors (409-level equivalent)
    // ========================================================================
    #[error("backend port {port} collides with the {frontend} dev server port")]
    PortConflict { port: u16, frontend: String },

    #[error("inconsistent configuration: {reason}")]
    InconsistentConfig { reason: String },

    #[error("manifest '{manifest}' violates exclusivity: {reason}")]
    ManifestConflict { manifest: String, reason: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { name, reason } => vec![
                format!("'{}' is not usable as a package name: {}", name, reason),
                "Use lowercase letters, digits, '-', '_' and '.'".into(),
                "Start with a letter or digit".into(),
                "Examples: demo-api, my_shop, store2".into(),
            ],
            Self::InvalidPort { .. } => vec![
                "Ports must be whole numbers between 1 and 65535".into(),
                "Example: --port 4000".into(),
            ],
            Self::UnknownValue { field, value } => vec![
                format!("'{}' is not a known {}", value, field),
                "Run with --help to see accepted values".into(),
            ],
            Self::PortConflict { port, frontend } => vec![
                format!("The {} dev server already listens on {}", frontend, port),
                "Pick another backend port with --port".into(),
            ],
            Self::ManifestConflict { .. } => vec![
                "This is a generator bug, please report it".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. }
            | Self::InvalidPort { .. }
            | Self::UnknownValue { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::PortConflict { .. } | Self::InconsistentConfig { .. } => {
                ErrorCategory::Compatibility
            }
            _ => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Internal,
}
