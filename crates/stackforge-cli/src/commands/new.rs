//! Implementation of the `stackforge new` command.
//!
//! Responsibility: turn flags, config defaults and prompt answers into a
//! `ProjectConfig`, call the core composer and display results. No
//! generation logic lives here.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json::json;
use tracing::{debug, info, instrument};

use stackforge_adapters::{GitCli, LocalFilesystem, NpmInstaller, NpmTestRunner, RecordingProgress};
use stackforge_core::{
    application::{
        FrontendOutcome, GenerationReport, PostGenerationService, PostGenerationWarning,
        ProjectComposer,
        ports::ProgressSink,
        services::{
            PERSISTED_CONFIG_FILE, plan_backend, plan_frontend,
            project_composer::plan_root_files,
        },
    },
    domain::{
        Architecture, BackendLang, DatabaseKind, DomainError, DomainValidator, Feature,
        FrontendKind, Profile, ProjectConfig, ProjectStructure, registry,
    },
};

use crate::{
    cli::{GlobalArgs, NewArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
    progress::{self, SpinnerProgress},
    prompts,
};

/// Every choice for the new project, resolved but not yet validated as a
/// whole.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub name: String,
    pub description: Option<String>,
    pub lang: BackendLang,
    pub frontend: FrontendKind,
    pub architecture: Architecture,
    pub database: DatabaseKind,
    pub port: u16,
    pub features: BTreeSet<Feature>,
    pub profile: Option<Profile>,
    pub connect: bool,
    pub docker: bool,
    pub ci: bool,
    pub git: bool,
    pub install: bool,
}

impl Draft {
    fn into_config(self) -> Result<ProjectConfig, DomainError> {
        let mut builder = ProjectConfig::builder()
            .name(self.name)
            .backend_lang(self.lang)
            .frontend(self.frontend)
            .architecture(self.architecture)
            .database(self.database)
            .port(self.port)
            .features(self.features)
            .profile(self.profile)
            .connect_to_backend(self.connect)
            .docker(self.docker)
            .ci(self.ci)
            .git_init(self.git)
            .install_deps(self.install);
        if let Some(description) = self.description {
            builder = builder.description(description);
        }
        builder.build()
    }
}

/// Execute the `stackforge new` command.
///
/// Dispatch sequence:
/// 1. Resolve choices: flags, then config defaults, then built-ins
/// 2. Fill the gaps interactively with `--interactive`
/// 3. Build and validate the `ProjectConfig`
/// 4. Early-exit with a file listing if `--dry-run`
/// 5. Confirm unless `--yes`, `--quiet` or JSON output
/// 6. Generate through `ProjectComposer`, then run post-generation steps
/// 7. Print warnings and next-steps guidance
#[instrument(skip_all, fields(project = args.name.as_deref().unwrap_or("<prompted>")))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Resolve
    let mut draft = resolve_draft(&args, &config)?;

    // 2. Prompt
    if args.interactive {
        run_wizard(&args, &mut draft)?;
    }
    if draft.name.is_empty() {
        return Err(CliError::MissingArgument { name: "name" });
    }

    if draft.profile.is_some() && (!args.features.is_empty() || args.architecture.is_some()) {
        output.warning("--profile replaces --feature and --arch; those flags are ignored")?;
    }

    // 3. Build
    let project = draft.into_config().with_cli_context(|| "building project config")?;
    debug!(config = %project, "Project config resolved");

    let parent = args.output.clone().unwrap_or_else(|| PathBuf::from("."));
    let root = parent.join(project.name());

    // 4. Dry run: describe but do not write.
    if args.dry_run {
        return dry_run(&project, &root, &output);
    }

    // 5. Confirm
    if !global.quiet && !output.is_json() && !args.yes {
        show_configuration(&project, &root, &output)?;
        if !prompts::confirm("Generate this project?")? {
            return Err(CliError::Cancelled);
        }
    }

    // 6. Generate
    output.header(&format!("Creating '{}'...", project.name()))?;
    info!(project = %project.name(), path = %root.display(), "Generation started");

    let recorder = RecordingProgress::new();
    let sink: Box<dyn ProgressSink> = if output.is_json() {
        Box::new(recorder.clone())
    } else {
        progress::sink_for(&output)
    };
    let composer = ProjectComposer::new(Box::new(LocalFilesystem::new()), sink);
    let report = composer
        .compose(&project, &parent)
        .with_cli_context(|| "generating project")?;

    let warnings = if project.install_deps() || project.git_init() {
        post_generation(&project, &report, &output, &recorder)
    } else {
        Vec::new()
    };

    // 7. Report
    if output.is_json() {
        output.json(&json_report(&project, &report, &warnings, &recorder.messages()))?;
        return Ok(());
    }

    output.success(&format!(
        "Project '{}' created ({} files, {} directories)",
        project.name(),
        report.files_written,
        report.directories_created
    ))?;

    if let FrontendOutcome::Pending { kind } = report.frontend {
        output.warning(&format!(
            "The {kind} frontend is a stub: only package.json and README.md were written. \
             Scaffold it with the official {kind} tooling (see frontend/README.md)."
        ))?;
    }
    for warning in &warnings {
        output.warning(&warning.to_string())?;
    }

    print_next_steps(&project, &root, &output)?;
    Ok(())
}

// ── Resolution ────────────────────────────────────────────────────────────────

/// Flags win over `[defaults]` from the config file, which win over the
/// built-in defaults.  The name may still be empty when it is going to be
/// prompted for.
pub fn resolve_draft(args: &NewArgs, config: &AppConfig) -> CliResult<Draft> {
    let defaults = &config.defaults;

    let name = match &args.name {
        Some(name) => name.clone(),
        None if args.interactive => String::new(),
        None => return Err(CliError::MissingArgument { name: "name" }),
    };

    let port = match &args.port {
        Some(raw) => DomainValidator::parse_port(raw).map_err(|e| CliError::Core(e.into()))?,
        None => {
            DomainValidator::validate_port(defaults.port).map_err(|e| CliError::ConfigError {
                message: format!("defaults.port: {e}"),
                source: Some(Box::new(e)),
            })?;
            defaults.port
        }
    };

    Ok(Draft {
        name,
        description: args.description.clone(),
        lang: pick(args.lang, "defaults.backend_lang", &defaults.backend_lang)?,
        frontend: pick(args.frontend, "defaults.frontend", &defaults.frontend)?,
        architecture: pick(args.architecture, "defaults.architecture", &defaults.architecture)?,
        database: pick(args.database, "defaults.database", &defaults.database)?,
        port,
        features: args.features.iter().copied().map(Feature::from).collect(),
        profile: args.profile.map(Profile::from),
        connect: !args.no_connect,
        docker: args.docker || defaults.docker,
        ci: args.ci || defaults.ci,
        git: args.git || defaults.git_init,
        install: args.install || defaults.install_deps,
    })
}

/// The flag if given, otherwise the config value parsed by the core parser.
fn pick<A, T>(flag: Option<A>, key: &str, fallback: &str) -> CliResult<T>
where
    T: From<A> + FromStr<Err = DomainError>,
{
    match flag {
        Some(value) => Ok(T::from(value)),
        None => fallback.parse().map_err(|e: DomainError| CliError::ConfigError {
            message: format!("{key}: {e}"),
            source: Some(Box::new(e)),
        }),
    }
}

#[cfg(feature = "interactive")]
fn run_wizard(args: &NewArgs, draft: &mut Draft) -> CliResult<()> {
    prompts::run_wizard(args, draft)
}

#[cfg(not(feature = "interactive"))]
fn run_wizard(_args: &NewArgs, _draft: &mut Draft) -> CliResult<()> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

// ── Dry run ───────────────────────────────────────────────────────────────────

/// Every file the composer would write, relative to the project root.
pub fn planned_files(project: &ProjectConfig, root: &Path) -> CliResult<Vec<PathBuf>> {
    let mut structures: Vec<ProjectStructure> = vec![
        plan_backend(project, root).with_cli_context(|| "planning backend")?,
    ];
    if let Some((frontend, _)) =
        plan_frontend(project, root).with_cli_context(|| "planning frontend")?
    {
        structures.push(frontend);
    }
    structures.push(plan_root_files(project, root).with_cli_context(|| "planning root files")?);

    let mut files: Vec<PathBuf> = structures
        .iter()
        .flat_map(|s| {
            s.files().map(move |f| {
                s.root()
                    .strip_prefix(root)
                    .unwrap_or(s.root())
                    .join(f.path.as_path())
            })
        })
        .collect();
    files.push(PathBuf::from(PERSISTED_CONFIG_FILE));
    files.sort();
    Ok(files)
}

fn dry_run(project: &ProjectConfig, root: &Path, output: &OutputManager) -> CliResult<()> {
    let files = planned_files(project, root)?;
    let exists = root.exists();

    if output.is_json() {
        output.json(&json!({
            "status": "dry-run",
            "root": root,
            "exists": exists,
            "config": project,
            "files": files,
        }))?;
        return Ok(());
    }

    output.info(&format!(
        "Dry run: would create '{}' at {}",
        project.name(),
        root.display(),
    ))?;
    show_configuration(project, root, output)?;
    output.header(&format!("Files ({})", files.len()))?;
    for file in &files {
        output.print(&format!("  {}", file.display()))?;
    }
    if exists {
        output.warning(&format!(
            "{} already exists; a real run would stop here",
            root.display()
        ))?;
    }
    Ok(())
}

// ── Post-generation ───────────────────────────────────────────────────────────

fn post_generation(
    project: &ProjectConfig,
    report: &GenerationReport,
    output: &OutputManager,
    recorder: &RecordingProgress,
) -> Vec<PostGenerationWarning> {
    let spinner = output.shows_progress().then(SpinnerProgress::new);
    let sink: Box<dyn ProgressSink> = match &spinner {
        Some(spinner) => Box::new(spinner.clone()),
        None if output.is_json() => Box::new(recorder.clone()),
        None => progress::sink_for(output),
    };

    let service = PostGenerationService::new(
        Box::new(NpmInstaller),
        Box::new(GitCli),
        Box::new(NpmTestRunner),
        sink,
    );
    let warnings = service.run(project, report);
    if let Some(spinner) = spinner {
        spinner.clear();
    }
    warnings
}

// ── Reporting ─────────────────────────────────────────────────────────────────

fn json_report(
    project: &ProjectConfig,
    report: &GenerationReport,
    warnings: &[PostGenerationWarning],
    steps: &[String],
) -> serde_json::Value {
    let frontend = match report.frontend {
        FrontendOutcome::Generated => json!({ "status": "generated" }),
        FrontendOutcome::Pending { kind } => json!({ "status": "pending", "kind": kind }),
        FrontendOutcome::Skipped => json!({ "status": "skipped" }),
    };
    json!({
        "status": "ok",
        "root": report.root,
        "filesWritten": report.files_written,
        "directoriesCreated": report.directories_created,
        "frontend": frontend,
        "config": project,
        "steps": steps,
        "warnings": warnings
            .iter()
            .map(|w| json!({ "step": w.step.to_string(), "message": w.message }))
            .collect::<Vec<_>>(),
    })
}

fn show_configuration(project: &ProjectConfig, root: &Path, out: &OutputManager) -> CliResult<()> {
    out.header("Configuration")?;
    out.field("Project", project.name())?;
    out.field("Backend", &format!("{} (port {})", project.backend_lang(), project.port()))?;
    out.field("Architecture", project.architecture().as_str())?;
    out.field("Database", project.database().as_str())?;
    let frontend = match registry::find_frontend(project.frontend()) {
        Some(def) => format!("{} (port {})", def.display_name, def.port),
        None => "none".into(),
    };
    out.field("Frontend", &frontend)?;
    if let Some(profile) = project.profile() {
        out.field("Profile", profile.as_str())?;
    }
    let features: Vec<&str> = project.features().iter().map(|f| f.as_str()).collect();
    let features = if features.is_empty() {
        "none".to_string()
    } else {
        features.join(", ")
    };
    out.field("Features", &features)?;
    let mut extras = Vec::new();
    for (enabled, label) in [
        (project.docker(), "docker"),
        (project.ci(), "ci"),
        (project.install_deps(), "npm install"),
        (project.git_init(), "git"),
    ] {
        if enabled {
            extras.push(label);
        }
    }
    if !extras.is_empty() {
        out.field("Extras", &extras.join(", "))?;
    }
    out.field("Location", &root.display().to_string())?;
    out.print("")?;
    Ok(())
}

fn print_next_steps(project: &ProjectConfig, root: &Path, out: &OutputManager) -> CliResult<()> {
    if out.is_quiet() {
        return Ok(());
    }
    out.print("")?;
    out.print("Next steps:")?;
    out.print(&format!("  cd {}/backend", root.display()))?;
    if !project.install_deps() {
        out.print("  npm install")?;
    }
    if project.docker() && project.has_database() {
        out.print("  npm run docker:up   # start the database")?;
    }
    out.print("  npm run dev")?;
    if project.has_frontend() {
        out.print("")?;
        out.print(&format!("  cd {}/frontend", root.display()))?;
        out.print("  npm install && npm start")?;
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn args(extra: &[&str]) -> NewArgs {
        let mut argv = vec!["stackforge", "new"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::New(args) => args,
            other => panic!("expected New command, got {other:?}"),
        }
    }

    #[test]
    fn flags_override_config_defaults() {
        let mut config = AppConfig::default();
        config.defaults.database = "mysql".into();
        config.defaults.docker = true;

        let draft = resolve_draft(&args(&["demo", "--db", "pg"]), &config).unwrap();
        assert_eq!(draft.database, DatabaseKind::Postgres);
        assert!(draft.docker);

        let draft = resolve_draft(&args(&["demo"]), &config).unwrap();
        assert_eq!(draft.database, DatabaseKind::Mysql);
    }

    #[test]
    fn config_aliases_are_accepted() {
        let mut config = AppConfig::default();
        config.defaults.backend_lang = "js".into();
        let draft = resolve_draft(&args(&["demo"]), &config).unwrap();
        assert_eq!(draft.lang, BackendLang::JavaScript);
    }

    #[test]
    fn unknown_config_value_is_a_config_error() {
        let mut config = AppConfig::default();
        config.defaults.frontend = "ember".into();
        let err = resolve_draft(&args(&["demo"]), &config).unwrap_err();
        assert!(matches!(err, CliError::ConfigError { .. }));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn bad_port_flag_is_a_user_error() {
        let err = resolve_draft(&args(&["demo", "--port", "70000"]), &AppConfig::default())
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_name_without_prompt_is_an_error() {
        let err = resolve_draft(&args(&[]), &AppConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::MissingArgument { name: "name" }));
    }

    #[test]
    fn profile_replaces_features_and_architecture() {
        let draft = resolve_draft(
            &args(&["demo", "--profile", "startup", "--feature", "auth", "--arch", "clean"]),
            &AppConfig::default(),
        )
        .unwrap();
        let project = draft.into_config().unwrap();
        let (features, architecture) = registry::expand_profile(Profile::Startup);
        assert_eq!(project.features(), &features);
        assert_eq!(project.architecture(), architecture);
    }

    #[test]
    fn no_connect_is_carried_into_config() {
        let draft = resolve_draft(
            &args(&["demo", "--frontend", "vanilla", "--no-connect"]),
            &AppConfig::default(),
        )
        .unwrap();
        assert!(!draft.into_config().unwrap().connect_to_backend());
    }

    #[test]
    fn invalid_name_fails_at_build() {
        let draft = resolve_draft(&args(&["Demo App"]), &AppConfig::default()).unwrap();
        assert!(matches!(
            draft.into_config(),
            Err(DomainError::InvalidProjectName { .. })
        ));
    }

    #[test]
    fn planned_files_cover_every_part() {
        let project = resolve_draft(
            &args(&["demo", "--frontend", "vanilla", "--db", "sqlite", "--ci", "--docker"]),
            &AppConfig::default(),
        )
        .unwrap()
        .into_config()
        .unwrap();

        let files = planned_files(&project, Path::new("/tmp/out/demo")).unwrap();
        for expected in [
            "backend/package.json",
            "backend/Dockerfile",
            "frontend/index.html",
            "README.md",
            ".github/workflows/ci.yml",
            PERSISTED_CONFIG_FILE,
        ] {
            assert!(files.contains(&PathBuf::from(expected)), "{expected}");
        }
        assert!(files.windows(2).all(|w| w[0] <= w[1]));
    }
}
