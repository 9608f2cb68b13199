//! The `ProjectConfig` aggregate root and its typestate builder.
//!
//! A `ProjectConfig` is the fully-resolved description of the project the user
//! wants generated. It is built once (from flags, prompts or a profile),
//! flows read-only through the generation pipeline, and is persisted beside
//! the generated tree.
//!
//! # Typestate builder
//!
//! The builder uses two phantom marker types (`NoName` / `HasName`) so that a
//! config without a name does not compile. Cross-field rules (port conflicts,
//! frontend/connection consistency, profile expansion) are checked by
//! `validate`, which `build()` calls and which deserialised configs must
//! call too.

use std::collections::BTreeSet;
use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    registry,
    validation::DomainValidator,
    value_objects::{Architecture, BackendLang, DatabaseKind, Feature, FrontendKind, Profile},
};

pub const DEFAULT_BACKEND_PORT: u16 = 5000;
pub const DEFAULT_DESCRIPTION: &str = "A full-stack application";

/// Which test runner family a backend uses. Exactly one, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestFamily {
    Vitest,
    Jest,
}

// ── Aggregate root ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    name: String,
    #[serde(default = "default_description")]
    description: String,
    #[serde(default)]
    backend_lang: BackendLang,
    #[serde(default)]
    frontend: FrontendKind,
    #[serde(default)]
    architecture: Architecture,
    #[serde(default)]
    database: DatabaseKind,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default)]
    features: BTreeSet<Feature>,
    #[serde(default)]
    git_init: bool,
    #[serde(default)]
    install_deps: bool,
    #[serde(default)]
    connect_to_backend: bool,
    #[serde(default)]
    docker: bool,
    #[serde(default)]
    ci: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    profile: Option<Profile>,
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

fn default_port() -> u16 {
    DEFAULT_BACKEND_PORT
}

impl ProjectConfig {
    /// Start building a new `ProjectConfig`.
    pub fn builder() -> ProjectConfigBuilder<NoName> {
        ProjectConfigBuilder::new()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub const fn backend_lang(&self) -> BackendLang {
        self.backend_lang
    }
    pub const fn frontend(&self) -> FrontendKind {
        self.frontend
    }
    pub const fn architecture(&self) -> Architecture {
        self.architecture
    }
    pub const fn database(&self) -> DatabaseKind {
        self.database
    }
    pub const fn port(&self) -> u16 {
        self.port
    }
    pub fn features(&self) -> &BTreeSet<Feature> {
        &self.features
    }
    pub fn has(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }
    pub const fn git_init(&self) -> bool {
        self.git_init
    }
    pub const fn install_deps(&self) -> bool {
        self.install_deps
    }
    pub const fn connect_to_backend(&self) -> bool {
        self.connect_to_backend
    }
    pub const fn docker(&self) -> bool {
        self.docker
    }
    pub const fn ci(&self) -> bool {
        self.ci
    }
    pub const fn profile(&self) -> Option<Profile> {
        self.profile
    }

    pub const fn has_frontend(&self) -> bool {
        !self.frontend.is_none()
    }

    pub const fn has_database(&self) -> bool {
        !self.database.is_none()
    }

    /// Resolved port of the frontend dev server; `None` without a frontend.
    pub fn frontend_port(&self) -> Option<u16> {
        registry::frontend_port(self.frontend)
    }

    /// Origin the backend must allow; `None` without a frontend.
    pub fn cors_origin(&self) -> Option<String> {
        registry::frontend_origin(self.frontend)
    }

    /// Base URL the frontend uses to reach the backend API.
    pub fn api_base_url(&self) -> String {
        format!("http://localhost:{}/api", self.port)
    }

    pub fn database_name(&self) -> String {
        format!("{}_db", self.name)
    }

    pub fn test_family(&self) -> Option<TestFamily> {
        if !self.has(Feature::Testing) {
            None
        } else if self.has(Feature::Vitest) {
            Some(TestFamily::Vitest)
        } else {
            Some(TestFamily::Jest)
        }
    }

    /// Validate this config's internal consistency.
    ///
    /// Called automatically by the builder. Must be called again after
    /// deserialization.
    pub fn validate(&self) -> Result<(), DomainError> {
        DomainValidator::validate_project_name(&self.name)?;
        DomainValidator::validate_port(self.port)?;

        if self.frontend.is_none() && self.connect_to_backend {
            return Err(DomainError::InconsistentConfig {
                reason: "connect_to_backend requires a frontend".into(),
            });
        }

        if let Some(frontend_port) = self.frontend_port() {
            if frontend_port == self.port {
                return Err(DomainError::PortConflict {
                    port: self.port,
                    frontend: self.frontend.to_string(),
                });
            }
        }

        if let Some(profile) = self.profile {
            let (features, architecture) = registry::expand_profile(profile);
            if features != self.features || architecture != self.architecture {
                return Err(DomainError::InconsistentConfig {
                    reason: format!(
                        "features and architecture do not match profile '{profile}'"
                    ),
                });
            }
        }

        Ok(())
    }
}

impl fmt::Display for ProjectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {}, db {}",
            self.name, self.backend_lang, self.architecture, self.database
        )?;
        if self.has_frontend() {
            write!(f, ", frontend {}", self.frontend)?;
        }
        f.write_str(")")
    }
}

// ── Typestate markers ─────────────────────────────────────────────────────────

/// Marker: name has not yet been set.
pub struct NoName;
/// Marker: name has been set; the config can now be built.
pub struct HasName;

// ── Builder ───────────────────────────────────────────────────────────────────

/// Typestate builder for [`ProjectConfig`].
pub struct ProjectConfigBuilder<N> {
    name: Option<String>,
    description: Option<String>,
    backend_lang: BackendLang,
    frontend: FrontendKind,
    architecture: Architecture,
    database: DatabaseKind,
    port: u16,
    features: BTreeSet<Feature>,
    git_init: bool,
    install_deps: bool,
    connect_to_backend: Option<bool>,
    docker: bool,
    ci: bool,
    profile: Option<Profile>,
    _marker: PhantomData<N>,
}

impl ProjectConfigBuilder<NoName> {
    pub fn new() -> Self {
        Self {
            name: None,
            description: None,
            backend_lang: BackendLang::default(),
            frontend: FrontendKind::default(),
            architecture: Architecture::default(),
            database: DatabaseKind::default(),
            port: DEFAULT_BACKEND_PORT,
            features: BTreeSet::new(),
            git_init: false,
            install_deps: false,
            connect_to_backend: None,
            docker: false,
            ci: false,
            profile: None,
            _marker: PhantomData,
        }
    }

    /// Set the name. This transitions the builder to `HasName`.
    pub fn name(self, name: impl Into<String>) -> ProjectConfigBuilder<HasName> {
        ProjectConfigBuilder {
            name: Some(name.into()),
            description: self.description,
            backend_lang: self.backend_lang,
            frontend: self.frontend,
            architecture: self.architecture,
            database: self.database,
            port: self.port,
            features: self.features,
            git_init: self.git_init,
            install_deps: self.install_deps,
            connect_to_backend: self.connect_to_backend,
            docker: self.docker,
            ci: self.ci,
            profile: self.profile,
            _marker: PhantomData,
        }
    }
}

impl Default for ProjectConfigBuilder<NoName> {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectConfigBuilder<HasName> {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn backend_lang(mut self, lang: BackendLang) -> Self {
        self.backend_lang = lang;
        self
    }

    pub fn frontend(mut self, frontend: FrontendKind) -> Self {
        self.frontend = frontend;
        self
    }

    pub fn architecture(mut self, architecture: Architecture) -> Self {
        self.architecture = architecture;
        self
    }

    pub fn database(mut self, database: DatabaseKind) -> Self {
        self.database = database;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn feature(mut self, feature: Feature) -> Self {
        self.features.insert(feature);
        self
    }

    pub fn features(mut self, features: impl IntoIterator<Item = Feature>) -> Self {
        self.features.extend(features);
        self
    }

    pub fn git_init(mut self, enabled: bool) -> Self {
        self.git_init = enabled;
        self
    }

    pub fn install_deps(mut self, enabled: bool) -> Self {
        self.install_deps = enabled;
        self
    }

    /// Defaults to `true` whenever a frontend is selected.
    pub fn connect_to_backend(mut self, enabled: bool) -> Self {
        self.connect_to_backend = Some(enabled);
        self
    }

    pub fn docker(mut self, enabled: bool) -> Self {
        self.docker = enabled;
        self
    }

    pub fn ci(mut self, enabled: bool) -> Self {
        self.ci = enabled;
        self
    }

    /// A profile replaces any features and architecture set on the builder.
    pub fn profile(mut self, profile: Option<Profile>) -> Self {
        self.profile = profile;
        self
    }

    /// Consume the builder, normalise, and validate.
    pub fn build(self) -> Result<ProjectConfig, DomainError> {
        let name = self
            .name
            .ok_or(DomainError::MissingRequiredField { field: "name" })?;

        let (features, architecture) = match self.profile {
            Some(profile) => registry::expand_profile(profile),
            None => (self.features, self.architecture),
        };

        let connect_to_backend =
            !self.frontend.is_none() && self.connect_to_backend.unwrap_or(true);

        let config = ProjectConfig {
            name,
            description: self
                .description
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(default_description),
            backend_lang: self.backend_lang,
            frontend: self.frontend,
            architecture,
            database: self.database,
            port: self.port,
            features,
            git_init: self.git_init,
            install_deps: self.install_deps,
            connect_to_backend,
            docker: self.docker,
            ci: self.ci,
            profile: self.profile,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> ProjectConfigBuilder<HasName> {
        ProjectConfig::builder().name("demo-api")
    }

    #[test]
    fn builder_applies_defaults() {
        let config = base().build().unwrap();
        assert_eq!(config.backend_lang(), BackendLang::TypeScript);
        assert_eq!(config.frontend(), FrontendKind::None);
        assert_eq!(config.architecture(), Architecture::Mvc);
        assert_eq!(config.port(), DEFAULT_BACKEND_PORT);
        assert_eq!(config.description(), DEFAULT_DESCRIPTION);
        assert!(!config.connect_to_backend());
    }

    #[test]
    fn no_frontend_forces_disconnected() {
        let config = base().connect_to_backend(true).build().unwrap();
        assert!(!config.connect_to_backend());
        assert_eq!(config.frontend_port(), None);
        assert_eq!(config.cors_origin(), None);
    }

    #[test]
    fn frontend_connects_by_default() {
        let config = base().frontend(FrontendKind::Vanilla).build().unwrap();
        assert!(config.connect_to_backend());
        assert_eq!(config.cors_origin().as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn rejects_backend_port_equal_to_frontend_port() {
        let err = base()
            .frontend(FrontendKind::Vue)
            .port(5173)
            .build()
            .unwrap_err();
        assert!(matches!(err, DomainError::PortConflict { port: 5173, .. }));
    }

    #[test]
    fn rejects_port_zero() {
        assert!(matches!(
            base().port(0).build(),
            Err(DomainError::InvalidPort { .. })
        ));
    }

    #[test]
    fn rejects_invalid_name() {
        assert!(ProjectConfig::builder().name("Bad Name").build().is_err());
    }

    #[test]
    fn profile_overrides_features_and_architecture() {
        let config = base()
            .feature(Feature::Docs)
            .architecture(Architecture::Layered)
            .profile(Some(Profile::Startup))
            .build()
            .unwrap();
        assert_eq!(config.architecture(), Architecture::Mvc);
        assert!(!config.has(Feature::Docs));
        assert!(config.has(Feature::Testing));
    }

    #[test]
    fn test_family_is_exclusive() {
        let none = base().build().unwrap();
        assert_eq!(none.test_family(), None);

        let jest = base().feature(Feature::Testing).build().unwrap();
        assert_eq!(jest.test_family(), Some(TestFamily::Jest));

        let vitest = base()
            .features([Feature::Testing, Feature::Vitest])
            .build()
            .unwrap();
        assert_eq!(vitest.test_family(), Some(TestFamily::Vitest));
    }

    #[test]
    fn vitest_alone_does_not_enable_tests() {
        let config = base().feature(Feature::Vitest).build().unwrap();
        assert_eq!(config.test_family(), None);
    }

    #[test]
    fn serde_round_trip_preserves_config() {
        let config = base()
            .frontend(FrontendKind::Vanilla)
            .database(DatabaseKind::Postgres)
            .features([Feature::Auth, Feature::RateLimit])
            .docker(true)
            .build()
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let back: ProjectConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
        back.validate().unwrap();
    }

    #[test]
    fn validate_rejects_tampered_profile_config() {
        let json = r#"{"name":"demo","profile":"enterprise","features":["auth"]}"#;
        let config: ProjectConfig = serde_json::from_str(json).unwrap();
        assert!(matches!(
            config.validate(),
            Err(DomainError::InconsistentConfig { .. })
        ));
    }

    #[test]
    fn validate_rejects_connection_without_frontend() {
        let json = r#"{"name":"demo","connect_to_backend":true}"#;
        let config: ProjectConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn derived_values() {
        let config = base().port(4000).build().unwrap();
        assert_eq!(config.api_base_url(), "http://localhost:4000/api");
        assert_eq!(config.database_name(), "demo-api_db");
    }
}
