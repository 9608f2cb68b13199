//! `stackforge config`: inspect configuration values.

use std::path::PathBuf;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    config_file: Option<&PathBuf>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            if output.is_json() {
                output.json(&serde_json::json!({ "key": key, "value": value }))?;
            } else {
                // Bare value so scripts can capture it.
                println!("{value}");
            }
        }

        ConfigCommands::List => {
            if output.is_json() {
                let value = serde_json::to_value(&config).map_err(std::io::Error::other)?;
                output.json(&value)?;
                return Ok(());
            }
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            println!("{}", AppConfig::active_path(config_file).display());
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let d = &config.defaults;
    match key {
        "defaults.backend_lang" => Ok(d.backend_lang.clone()),
        "defaults.frontend" => Ok(d.frontend.clone()),
        "defaults.database" => Ok(d.database.clone()),
        "defaults.architecture" => Ok(d.architecture.clone()),
        "defaults.port" => Ok(d.port.to_string()),
        "defaults.docker" => Ok(d.docker.to_string()),
        "defaults.ci" => Ok(d.ci.to_string()),
        "defaults.git_init" => Ok(d.git_init.to_string()),
        "defaults.install_deps" => Ok(d.install_deps.to_string()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.progress" => Ok(config.output.progress.to_string()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_known_keys() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "defaults.backend_lang").unwrap(), "typescript");
        assert_eq!(get_config_value(&cfg, "defaults.port").unwrap(), "5000");
        assert_eq!(get_config_value(&cfg, "output.no_color").unwrap(), "false");
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
    }
}
