//! `stackforge inspect`: read back `stackforge.json` from a generated root.

use serde_json::json;
use tracing::instrument;

use stackforge_adapters::{LocalFilesystem, NoopProgress};
use stackforge_core::application::ProjectComposer;

use crate::{
    cli::InspectArgs,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all, fields(path = %args.path.display()))]
pub fn execute(args: InspectArgs, output: OutputManager) -> CliResult<()> {
    let filesystem = LocalFilesystem::new();
    let composer = ProjectComposer::new(Box::new(filesystem), Box::new(NoopProgress));

    let persisted = composer
        .load_persisted(&args.path)
        .with_cli_context(|| "loading project file")?;
    let files_on_disk = filesystem
        .list_files(&args.path)
        .with_cli_context(|| "listing project files")?
        .len();

    if output.is_json() {
        let mut value = serde_json::to_value(&persisted).map_err(std::io::Error::other)?;
        value["filesOnDisk"] = json!(files_on_disk);
        output.json(&value)?;
        return Ok(());
    }

    let config = &persisted.config;
    output.header(&format!("Project '{}'", config.name()))?;
    output.field("Description", config.description())?;
    output.field(
        "Backend",
        &format!("{} (port {})", config.backend_lang(), config.port()),
    )?;
    output.field("Architecture", config.architecture().as_str())?;
    output.field("Database", config.database().as_str())?;
    output.field("Frontend", config.frontend().as_str())?;
    if let Some(profile) = config.profile() {
        output.field("Profile", profile.as_str())?;
    }
    let features: Vec<&str> = config.features().iter().map(|f| f.as_str()).collect();
    output.field("Features", &features.join(", "))?;
    output.field("Docker", &config.docker().to_string())?;
    output.field("CI", &config.ci().to_string())?;
    output.print("")?;
    output.field("Generated", &persisted.generated_at.to_rfc3339())?;
    output.field("Generator", &persisted.generator_version)?;
    output.field("Generation", &persisted.generation_id.to_string())?;
    output.field("Files", &files_on_disk.to_string())?;
    Ok(())
}
