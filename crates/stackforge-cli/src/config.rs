//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `STACKFORGE__DEFAULTS__DATABASE=postgres`
//! 3. `--config <FILE>`, or `.stackforge.toml` in the CWD over the user
//!    config file
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use stackforge_core::domain::{
    Architecture, BackendLang, DEFAULT_BACKEND_PORT, DatabaseKind, FrontendKind,
};

/// File written by `stackforge init --local` and picked up from the CWD.
pub const LOCAL_CONFIG_FILE: &str = ".stackforge.toml";

const ENV_PREFIX: &str = "STACKFORGE";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
}

/// Fallbacks for `stackforge new` options the user did not pass.
///
/// Enum-valued fields are kept as strings and parsed by the core parsers
/// when a project is built, so aliases such as `ts` or `pg` work here too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub backend_lang: String,
    pub frontend: String,
    pub database: String,
    pub architecture: String,
    pub port: u16,
    pub docker: bool,
    pub ci: bool,
    pub git_init: bool,
    pub install_deps: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            backend_lang: BackendLang::default().to_string(),
            frontend: FrontendKind::default().to_string(),
            database: DatabaseKind::default().to_string(),
            architecture: Architecture::default().to_string(),
            port: DEFAULT_BACKEND_PORT,
            docker: false,
            ci: false,
            git_init: false,
            install_deps: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// Show the spinner while generating.
    pub progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            progress: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from files and the environment over the defaults.
    ///
    /// `config_file` is the path passed via `--config`; it must exist.  The
    /// implicit locations are optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder();

        match config_file {
            Some(path) => {
                builder = builder.add_source(config::File::from(path.as_path()).required(true));
            }
            None => {
                builder = builder
                    .add_source(config::File::from(Self::config_path()).required(false))
                    .add_source(config::File::from(Path::new(LOCAL_CONFIG_FILE)).required(false));
            }
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .context("reading configuration sources")?
            .try_deserialize()
            .context("configuration has an unexpected shape")
    }

    /// Path to the user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.stackforge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "stackforge", "stackforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// The file `config path` reports: `--config`, else a local file if one
    /// exists, else the user file.
    pub fn active_path(config_file: Option<&PathBuf>) -> PathBuf {
        if let Some(path) = config_file {
            return path.clone();
        }
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            local
        } else {
            Self::config_path()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_core_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.backend_lang, "typescript");
        assert_eq!(cfg.defaults.frontend, "none");
        assert_eq!(cfg.defaults.database, "none");
        assert_eq!(cfg.defaults.port, DEFAULT_BACKEND_PORT);
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[defaults]\ndatabase = \"pg\"\nport = 4100\ndocker = true").unwrap();

        let cfg = AppConfig::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(cfg.defaults.database, "pg");
        assert_eq!(cfg.defaults.port, 4100);
        assert!(cfg.defaults.docker);
        // Untouched keys keep their defaults.
        assert_eq!(cfg.defaults.frontend, "none");
        assert!(cfg.output.progress);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let missing = PathBuf::from("/definitely/not/here/stackforge.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[defaults]\nport = \"not a number\"").unwrap();
        assert!(AppConfig::load(Some(&file.path().to_path_buf())).is_err());
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn active_path_prefers_explicit_file() {
        let explicit = PathBuf::from("custom.toml");
        assert_eq!(AppConfig::active_path(Some(&explicit)), explicit);
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
