//! Domain value objects: BackendLang, FrontendKind, Architecture, DatabaseKind,
//! Feature, Profile.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! They hold NO lookup-table knowledge. Ports, drivers, feature bundles and
//! capabilities live in `registry.rs`. This file's only job is to define the
//! types, their string representations, and their `FromStr` parsers.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. Add a registry entry in `registry.rs` (the integrity test will remind you)

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── BackendLang ──────────────────────────────────────────────────────────────

/// The dialect the backend service is written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendLang {
    #[default]
    TypeScript,
    JavaScript,
}

impl BackendLang {
    pub const ALL: [BackendLang; 2] = [Self::TypeScript, Self::JavaScript];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
        }
    }

    /// Source file extension used throughout the generated backend.
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::TypeScript => "ts",
            Self::JavaScript => "js",
        }
    }

    pub const fn is_typescript(&self) -> bool {
        matches!(self, Self::TypeScript)
    }
}

impl fmt::Display for BackendLang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendLang {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(Self::TypeScript),
            "javascript" | "js" => Ok(Self::JavaScript),
            other => Err(DomainError::UnknownValue {
                field: "backend language",
                value: other.to_string(),
            }),
        }
    }
}

// ── FrontendKind ─────────────────────────────────────────────────────────────

/// The frontend application generated beside the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrontendKind {
    /// Plain HTML/CSS/JS served as static files.
    Vanilla,
    Vue,
    Next,
    Angular,
    React,
    Svelte,
    #[default]
    None,
}

impl FrontendKind {
    pub const ALL: [FrontendKind; 7] = [
        Self::Vanilla,
        Self::Vue,
        Self::Next,
        Self::Angular,
        Self::React,
        Self::Svelte,
        Self::None,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vanilla => "vanilla",
            Self::Vue => "vue",
            Self::Next => "next",
            Self::Angular => "angular",
            Self::React => "react",
            Self::Svelte => "svelte",
            Self::None => "none",
        }
    }

    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for FrontendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrontendKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vanilla" | "static" | "html" => Ok(Self::Vanilla),
            "vue" | "vuejs" => Ok(Self::Vue),
            "next" | "nextjs" => Ok(Self::Next),
            "angular" => Ok(Self::Angular),
            "react" => Ok(Self::React),
            "svelte" | "sveltekit" => Ok(Self::Svelte),
            "none" => Ok(Self::None),
            other => Err(DomainError::UnknownValue {
                field: "frontend",
                value: other.to_string(),
            }),
        }
    }
}

// ── Architecture ─────────────────────────────────────────────────────────────

/// Architectural style of the backend's source tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    #[default]
    Mvc,
    /// Clean / hexagonal (application, domain, infrastructure rings).
    Clean,
    Layered,
    /// Feature-first modules.
    Modular,
    Microservices,
}

impl Architecture {
    pub const ALL: [Architecture; 5] = [
        Self::Mvc,
        Self::Clean,
        Self::Layered,
        Self::Modular,
        Self::Microservices,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mvc => "mvc",
            Self::Clean => "clean",
            Self::Layered => "layered",
            Self::Modular => "modular",
            Self::Microservices => "microservices",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Architecture {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mvc" => Ok(Self::Mvc),
            "clean" | "hexagonal" | "onion" => Ok(Self::Clean),
            "layered" => Ok(Self::Layered),
            "modular" | "feature-modular" => Ok(Self::Modular),
            "microservices" | "microservice" => Ok(Self::Microservices),
            other => Err(DomainError::UnknownValue {
                field: "architecture",
                value: other.to_string(),
            }),
        }
    }
}

// ── DatabaseKind ─────────────────────────────────────────────────────────────

/// The database the backend connects to on startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    #[default]
    None,
    Postgres,
    Mysql,
    Mongodb,
    Sqlite,
}

impl DatabaseKind {
    pub const ALL: [DatabaseKind; 5] = [
        Self::None,
        Self::Postgres,
        Self::Mysql,
        Self::Mongodb,
        Self::Sqlite,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
            Self::Mongodb => "mongodb",
            Self::Sqlite => "sqlite",
        }
    }

    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatabaseKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "mysql" => Ok(Self::Mysql),
            "mongodb" | "mongo" => Ok(Self::Mongodb),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            other => Err(DomainError::UnknownValue {
                field: "database",
                value: other.to_string(),
            }),
        }
    }
}

// ── Feature ──────────────────────────────────────────────────────────────────

/// An optional capability toggled on the backend.
///
/// Ordering is derived so that `BTreeSet<Feature>` iterates (and serialises)
/// deterministically.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    Auth,
    Logging,
    Validation,
    Testing,
    /// Selects the vitest family instead of jest when `Testing` is enabled.
    Vitest,
    Docs,
    RateLimit,
    GracefulShutdown,
}

impl Feature {
    pub const ALL: [Feature; 8] = [
        Self::Auth,
        Self::Logging,
        Self::Validation,
        Self::Testing,
        Self::Vitest,
        Self::Docs,
        Self::RateLimit,
        Self::GracefulShutdown,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Logging => "logging",
            Self::Validation => "validation",
            Self::Testing => "testing",
            Self::Vitest => "vitest",
            Self::Docs => "docs",
            Self::RateLimit => "rate-limit",
            Self::GracefulShutdown => "graceful-shutdown",
        }
    }

    /// Human label for the README feature matrix.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Auth => "JWT authentication",
            Self::Logging => "Structured logging (winston)",
            Self::Validation => "Request validation",
            Self::Testing => "Test suite",
            Self::Vitest => "Vitest runner",
            Self::Docs => "OpenAPI docs",
            Self::RateLimit => "Rate limiting",
            Self::GracefulShutdown => "Graceful shutdown",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "auth" | "jwt" => Ok(Self::Auth),
            "logging" | "logs" => Ok(Self::Logging),
            "validation" => Ok(Self::Validation),
            "testing" | "tests" => Ok(Self::Testing),
            "vitest" => Ok(Self::Vitest),
            "docs" | "swagger" | "openapi" => Ok(Self::Docs),
            "rate-limit" | "ratelimit" => Ok(Self::RateLimit),
            "graceful-shutdown" | "shutdown" => Ok(Self::GracefulShutdown),
            other => Err(DomainError::UnknownValue {
                field: "feature",
                value: other.to_string(),
            }),
        }
    }
}

// ── Profile ──────────────────────────────────────────────────────────────────

/// A named bundle that expands to a feature set and an architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Startup,
    Enterprise,
    Microservice,
}

impl Profile {
    pub const ALL: [Profile; 3] = [Self::Startup, Self::Enterprise, Self::Microservice];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Enterprise => "enterprise",
            Self::Microservice => "microservice",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "startup" => Ok(Self::Startup),
            "enterprise" => Ok(Self::Enterprise),
            "microservice" | "microservices" => Ok(Self::Microservice),
            other => Err(DomainError::UnknownValue {
                field: "profile",
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_lang_accepts_aliases() {
        assert_eq!("ts".parse::<BackendLang>().unwrap(), BackendLang::TypeScript);
        assert_eq!("JS".parse::<BackendLang>().unwrap(), BackendLang::JavaScript);
        assert!("python".parse::<BackendLang>().is_err());
    }

    #[test]
    fn backend_lang_extension() {
        assert_eq!(BackendLang::TypeScript.extension(), "ts");
        assert_eq!(BackendLang::JavaScript.extension(), "js");
    }

    #[test]
    fn frontend_kind_round_trips_through_display() {
        for kind in FrontendKind::ALL {
            assert_eq!(kind.to_string().parse::<FrontendKind>().unwrap(), kind);
        }
    }

    #[test]
    fn frontend_kind_aliases() {
        assert_eq!("nextjs".parse::<FrontendKind>().unwrap(), FrontendKind::Next);
        assert_eq!("static".parse::<FrontendKind>().unwrap(), FrontendKind::Vanilla);
    }

    #[test]
    fn architecture_aliases() {
        assert_eq!("hexagonal".parse::<Architecture>().unwrap(), Architecture::Clean);
        assert_eq!(
            "microservice".parse::<Architecture>().unwrap(),
            Architecture::Microservices
        );
        assert!("monolith".parse::<Architecture>().is_err());
    }

    #[test]
    fn database_aliases() {
        assert_eq!("pg".parse::<DatabaseKind>().unwrap(), DatabaseKind::Postgres);
        assert_eq!("mongo".parse::<DatabaseKind>().unwrap(), DatabaseKind::Mongodb);
        assert!("oracle".parse::<DatabaseKind>().is_err());
    }

    #[test]
    fn feature_accepts_snake_and_kebab() {
        assert_eq!("rate_limit".parse::<Feature>().unwrap(), Feature::RateLimit);
        assert_eq!(
            "graceful-shutdown".parse::<Feature>().unwrap(),
            Feature::GracefulShutdown
        );
    }

    #[test]
    fn feature_serialises_kebab_case() {
        let json = serde_json::to_string(&Feature::GracefulShutdown).unwrap();
        assert_eq!(json, "\"graceful-shutdown\"");
    }

    #[test]
    fn unknown_profile_is_validation_error() {
        let err = "hobby".parse::<Profile>().unwrap_err();
        assert!(matches!(err, DomainError::UnknownValue { field: "profile", .. }));
    }
}
