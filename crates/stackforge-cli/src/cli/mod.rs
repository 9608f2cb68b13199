//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use stackforge_core::domain;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stackforge",
    bin_name = "stackforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Full-stack Node.js project generator",
    long_about = "Stackforge generates a Node.js backend (Express, TypeScript or \
                  JavaScript) plus an optional frontend, wired together and ready to run.",
    after_help = "EXAMPLES:\n\
        \x20 stackforge new demo-api --db postgres --feature auth,testing\n\
        \x20 stackforge new demo-web --frontend vanilla --port 4000 --yes\n\
        \x20 stackforge new shop --profile enterprise --docker --ci\n\
        \x20 stackforge completions bash > /usr/share/bash-completion/completions/stackforge",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new project.
    #[command(
        visible_alias = "n",
        about = "Generate a new project",
        after_help = "EXAMPLES:\n\
            \x20 stackforge new demo-api --lang ts --db postgres --feature auth --feature testing\n\
            \x20 stackforge new demo-web --frontend react --arch clean\n\
            \x20 stackforge new svc --profile microservice --docker --dry-run"
    )]
    New(NewArgs),

    /// Show the available profiles and what they expand to.
    #[command(about = "List profiles")]
    Profiles,

    /// Show the available frontends and how far generation goes for each.
    #[command(about = "List frontends")]
    Frontends,

    /// Describe a project generated earlier.
    #[command(
        about = "Inspect a generated project",
        after_help = "EXAMPLES:\n\
            \x20 stackforge inspect            # current directory\n\
            \x20 stackforge inspect ./demo-api"
    )]
    Inspect(InspectArgs),

    /// Initialise a Stackforge configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 stackforge init           # user config directory\n\
            \x20 stackforge init --local   # .stackforge.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stackforge completions bash > ~/.local/share/bash-completion/completions/stackforge\n\
            \x20 stackforge completions zsh  > ~/.zfunc/_stackforge\n\
            \x20 stackforge completions fish > ~/.config/fish/completions/stackforge.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Stackforge configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stackforge config get defaults.database\n\
            \x20 stackforge config list\n\
            \x20 stackforge config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `stackforge new`.
///
/// Every option left unset falls back to the `[defaults]` table of the
/// configuration file, then to the built-in default.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name; also the directory created under the output directory.
    /// Prompted for in interactive mode when omitted.
    #[arg(value_name = "NAME", help = "Project name (lowercase, npm-compatible)")]
    pub name: Option<String>,

    /// Backend dialect.
    #[arg(
        short = 'l',
        long = "lang",
        value_name = "LANG",
        value_enum,
        help = "Backend language"
    )]
    pub lang: Option<BackendLang>,

    /// Frontend generated beside the backend.
    #[arg(
        short = 'f',
        long = "frontend",
        value_name = "FRONTEND",
        value_enum,
        help = "Frontend framework"
    )]
    pub frontend: Option<FrontendKind>,

    /// Backend layout.
    #[arg(
        short = 'a',
        long = "arch",
        value_name = "ARCH",
        value_enum,
        help = "Backend architecture"
    )]
    pub architecture: Option<Architecture>,

    /// Database the backend connects to.
    #[arg(
        short = 'd',
        long = "db",
        value_name = "DATABASE",
        value_enum,
        help = "Database"
    )]
    pub database: Option<DatabaseKind>,

    /// Backend port (1-65535).
    #[arg(short = 'p', long = "port", value_name = "PORT", help = "Backend port")]
    pub port: Option<String>,

    /// Optional backend features. Repeat the flag or separate with commas.
    #[arg(
        long = "feature",
        value_name = "FEATURE",
        value_enum,
        value_delimiter = ',',
        help = "Enable a backend feature (repeatable)"
    )]
    pub features: Vec<Feature>,

    /// Named bundle; replaces `--feature` and `--arch`.
    #[arg(long = "profile", value_name = "PROFILE", value_enum, help = "Apply a profile")]
    pub profile: Option<Profile>,

    #[arg(long = "description", value_name = "TEXT", help = "Project description")]
    pub description: Option<String>,

    /// Generate Dockerfiles and, with a database, a compose file.
    #[arg(long = "docker", help = "Generate Docker files")]
    pub docker: bool,

    /// Generate a GitHub Actions workflow.
    #[arg(long = "ci", help = "Generate a CI workflow")]
    pub ci: bool,

    /// Initialise a git repository and commit the generated tree.
    #[arg(long = "git", help = "Initialise git and commit")]
    pub git: bool,

    /// Run `npm install` in each sub-project after generation.
    #[arg(long = "install", help = "Install npm dependencies")]
    pub install: bool,

    /// Leave the frontend talking to local storage instead of the API.
    #[arg(long = "no-connect", help = "Do not wire the frontend to the backend")]
    pub no_connect: bool,

    /// Directory the project directory is created in.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation and create immediately")]
    pub yes: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    /// Ask for every unset option.
    #[arg(
        short = 'i',
        long = "interactive",
        conflicts_with = "yes",
        help = "Prompt for options"
    )]
    pub interactive: bool,
}

// ── inspect ───────────────────────────────────────────────────────────────────

/// Arguments for `stackforge inspect`.
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Root of a generated project.
    #[arg(value_name = "PATH", default_value = ".", help = "Project directory")]
    pub path: PathBuf,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `stackforge init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.stackforge.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stackforge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `stackforge config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.database`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────
//
// Mirrors of the core enums so that clap can list possible values in help.

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum BackendLang {
    #[value(alias = "ts")]
    TypeScript,
    #[value(alias = "js")]
    JavaScript,
}

impl From<BackendLang> for domain::BackendLang {
    fn from(lang: BackendLang) -> Self {
        match lang {
            BackendLang::TypeScript => Self::TypeScript,
            BackendLang::JavaScript => Self::JavaScript,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FrontendKind {
    Vanilla,
    Vue,
    #[value(alias = "nextjs")]
    Next,
    Angular,
    React,
    Svelte,
    None,
}

impl From<FrontendKind> for domain::FrontendKind {
    fn from(kind: FrontendKind) -> Self {
        match kind {
            FrontendKind::Vanilla => Self::Vanilla,
            FrontendKind::Vue => Self::Vue,
            FrontendKind::Next => Self::Next,
            FrontendKind::Angular => Self::Angular,
            FrontendKind::React => Self::React,
            FrontendKind::Svelte => Self::Svelte,
            FrontendKind::None => Self::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Architecture {
    Mvc,
    #[value(alias = "hexagonal")]
    Clean,
    Layered,
    Modular,
    #[value(alias = "microservice")]
    Microservices,
}

impl From<Architecture> for domain::Architecture {
    fn from(arch: Architecture) -> Self {
        match arch {
            Architecture::Mvc => Self::Mvc,
            Architecture::Clean => Self::Clean,
            Architecture::Layered => Self::Layered,
            Architecture::Modular => Self::Modular,
            Architecture::Microservices => Self::Microservices,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum DatabaseKind {
    None,
    #[value(alias = "postgresql", alias = "pg")]
    Postgres,
    Mysql,
    #[value(alias = "mongo")]
    Mongodb,
    Sqlite,
}

impl From<DatabaseKind> for domain::DatabaseKind {
    fn from(db: DatabaseKind) -> Self {
        match db {
            DatabaseKind::None => Self::None,
            DatabaseKind::Postgres => Self::Postgres,
            DatabaseKind::Mysql => Self::Mysql,
            DatabaseKind::Mongodb => Self::Mongodb,
            DatabaseKind::Sqlite => Self::Sqlite,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum Feature {
    Auth,
    Logging,
    Validation,
    Testing,
    /// Use vitest instead of jest for the test suite.
    Vitest,
    #[value(alias = "swagger")]
    Docs,
    RateLimit,
    GracefulShutdown,
}

impl From<Feature> for domain::Feature {
    fn from(feature: Feature) -> Self {
        match feature {
            Feature::Auth => Self::Auth,
            Feature::Logging => Self::Logging,
            Feature::Validation => Self::Validation,
            Feature::Testing => Self::Testing,
            Feature::Vitest => Self::Vitest,
            Feature::Docs => Self::Docs,
            Feature::RateLimit => Self::RateLimit,
            Feature::GracefulShutdown => Self::GracefulShutdown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Profile {
    Startup,
    Enterprise,
    Microservice,
}

impl From<Profile> for domain::Profile {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::Startup => Self::Startup,
            Profile::Enterprise => Self::Enterprise,
            Profile::Microservice => Self::Microservice,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse_new(args: &[&str]) -> NewArgs {
        let mut argv = vec!["stackforge", "new"];
        argv.extend_from_slice(args);
        match Cli::parse_from(argv).command {
            Commands::New(args) => args,
            other => panic!("expected New command, got {other:?}"),
        }
    }

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn value_names_match_core_parsers() {
        // Every clap spelling must be accepted by the core parser too, since
        // the config file goes through the core parsers.
        for lang in BackendLang::value_variants() {
            let name = lang.to_possible_value().unwrap();
            let parsed: domain::BackendLang = name.get_name().parse().unwrap();
            assert_eq!(parsed, domain::BackendLang::from(*lang));
        }
        for kind in FrontendKind::value_variants() {
            let name = kind.to_possible_value().unwrap();
            let parsed: domain::FrontendKind = name.get_name().parse().unwrap();
            assert_eq!(parsed, domain::FrontendKind::from(*kind));
        }
        for arch in Architecture::value_variants() {
            let name = arch.to_possible_value().unwrap();
            let parsed: domain::Architecture = name.get_name().parse().unwrap();
            assert_eq!(parsed, domain::Architecture::from(*arch));
        }
        for db in DatabaseKind::value_variants() {
            let name = db.to_possible_value().unwrap();
            let parsed: domain::DatabaseKind = name.get_name().parse().unwrap();
            assert_eq!(parsed, domain::DatabaseKind::from(*db));
        }
        for feature in Feature::value_variants() {
            let name = feature.to_possible_value().unwrap();
            let parsed: domain::Feature = name.get_name().parse().unwrap();
            assert_eq!(parsed, domain::Feature::from(*feature));
        }
        for profile in Profile::value_variants() {
            let name = profile.to_possible_value().unwrap();
            let parsed: domain::Profile = name.get_name().parse().unwrap();
            assert_eq!(parsed, domain::Profile::from(*profile));
        }
    }

    #[test]
    fn parse_full_new_command() {
        let args = parse_new(&[
            "demo-api", "--lang", "js", "--db", "pg", "-p", "4000", "--docker", "--ci",
        ]);
        assert_eq!(args.name.as_deref(), Some("demo-api"));
        assert_eq!(args.lang, Some(BackendLang::JavaScript));
        assert_eq!(args.database, Some(DatabaseKind::Postgres));
        assert_eq!(args.port.as_deref(), Some("4000"));
        assert!(args.docker && args.ci);
        assert!(!args.git && !args.install);
    }

    #[test]
    fn features_accept_commas_and_repeats() {
        let args = parse_new(&["x", "--feature", "auth,testing", "--feature", "rate-limit"]);
        assert_eq!(
            args.features,
            [Feature::Auth, Feature::Testing, Feature::RateLimit]
        );
    }

    #[test]
    fn name_is_optional() {
        assert!(parse_new(&["--dry-run"]).name.is_none());
    }

    #[test]
    fn unknown_frontend_is_rejected() {
        let result = Cli::try_parse_from(["stackforge", "new", "x", "--frontend", "ember"]);
        assert!(result.is_err());
    }

    #[test]
    fn interactive_conflicts_with_yes() {
        let result = Cli::try_parse_from(["stackforge", "new", "x", "-i", "-y"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["stackforge", "--quiet", "--verbose", "profiles"]);
        assert!(result.is_err());
    }

    #[test]
    fn inspect_defaults_to_current_directory() {
        let cli = Cli::parse_from(["stackforge", "inspect"]);
        match cli.command {
            Commands::Inspect(args) => assert_eq!(args.path, PathBuf::from(".")),
            other => panic!("expected Inspect command, got {other:?}"),
        }
    }
}
