//! Terminal prompts.
//!
//! The wizard needs the `interactive` feature (dialoguer).  Confirmation
//! works in every build: without a terminal, or without the feature, it
//! falls back to reading one line from stdin.

use std::io::{self, BufRead, IsTerminal, Write};

use crate::error::{CliError, CliResult};

#[cfg(feature = "interactive")]
pub use wizard::run_wizard;

/// Ask a yes/no question; an empty answer means yes.
pub fn confirm(prompt: &str) -> CliResult<bool> {
    #[cfg(feature = "interactive")]
    if io::stdin().is_terminal() && io::stderr().is_terminal() {
        return dialoguer::Confirm::with_theme(&dialoguer::theme::ColorfulTheme::default())
            .with_prompt(prompt)
            .default(true)
            .interact()
            .map_err(prompt_error);
    }

    confirm_line(prompt, &mut io::stdin().lock())
}

fn confirm_line(prompt: &str, input: &mut impl BufRead) -> CliResult<bool> {
    let mut stderr = io::stderr();
    write!(stderr, "{prompt} [Y/n] ").map_err(|e| CliError::IoError {
        message: "failed to write prompt".into(),
        source: e,
    })?;
    stderr.flush().map_err(|e| CliError::IoError {
        message: "failed to flush stderr".into(),
        source: e,
    })?;

    let mut answer = String::new();
    input.read_line(&mut answer).map_err(|e| CliError::IoError {
        message: "failed to read confirmation input".into(),
        source: e,
    })?;

    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer.is_empty() || answer == "y" || answer == "yes")
}

#[cfg(feature = "interactive")]
fn prompt_error(e: dialoguer::Error) -> CliError {
    match e {
        dialoguer::Error::IO(source) if source.kind() == io::ErrorKind::Interrupted => {
            CliError::Cancelled
        }
        dialoguer::Error::IO(source) => CliError::IoError {
            message: "prompt failed".into(),
            source,
        },
    }
}

#[cfg(feature = "interactive")]
mod wizard {
    use std::fmt::Display;

    use dialoguer::{Confirm, Input, MultiSelect, Select, theme::ColorfulTheme};
    use stackforge_core::domain::{
        Architecture, BackendLang, DatabaseKind, DomainValidator, Feature, FrontendKind, Profile,
        registry,
    };

    use super::prompt_error;
    use crate::{
        cli::NewArgs,
        commands::new::Draft,
        error::{CliError, CliResult},
    };

    /// Prompt for every option the command line left unset, starting from
    /// the values already resolved in `draft`.
    pub fn run_wizard(args: &NewArgs, draft: &mut Draft) -> CliResult<()> {
        let theme = ColorfulTheme::default();

        if args.name.is_none() {
            draft.name = Input::<String>::with_theme(&theme)
                .with_prompt("Project name")
                .validate_with(|input: &String| {
                    DomainValidator::validate_project_name(input).map_err(|e| e.to_string())
                })
                .interact_text()
                .map_err(prompt_error)?;
        }

        if args.description.is_none() {
            let description: String = Input::with_theme(&theme)
                .with_prompt("Description")
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_error)?;
            draft.description = Some(description).filter(|d| !d.trim().is_empty());
        }

        if args.lang.is_none() {
            draft.lang = select(&theme, "Backend language", &BackendLang::ALL, draft.lang)?;
        }

        if args.frontend.is_none() {
            draft.frontend = select_with(
                &theme,
                "Frontend",
                &FrontendKind::ALL,
                draft.frontend,
                |kind| {
                    registry::find_frontend(*kind)
                        .map(|def| def.display_name.to_string())
                        .unwrap_or_else(|| "None (backend only)".into())
                },
            )?;
        }

        if args.database.is_none() {
            draft.database = select(&theme, "Database", &DatabaseKind::ALL, draft.database)?;
        }

        if args.port.is_none() {
            draft.port = Input::<String>::with_theme(&theme)
                .with_prompt("Backend port")
                .default(draft.port.to_string())
                .validate_with(|input: &String| {
                    DomainValidator::parse_port(input)
                        .map(|_| ())
                        .map_err(|e| e.to_string())
                })
                .interact_text()
                .map_err(prompt_error)
                .and_then(|raw| {
                    DomainValidator::parse_port(&raw).map_err(|e| CliError::Core(e.into()))
                })?;
        }

        if args.profile.is_none() && args.features.is_empty() && args.architecture.is_none() {
            let mut choices: Vec<Option<Profile>> = vec![None];
            choices.extend(Profile::ALL.map(Some));
            draft.profile = select_with(&theme, "Profile", &choices, draft.profile, |p| {
                p.map(|p| p.to_string())
                    .unwrap_or_else(|| "custom (pick features)".into())
            })?;

            if draft.profile.is_none() {
                draft.architecture =
                    select(&theme, "Architecture", &Architecture::ALL, draft.architecture)?;

                let checked: Vec<bool> = Feature::ALL
                    .iter()
                    .map(|f| draft.features.contains(f))
                    .collect();
                let labels: Vec<String> = Feature::ALL
                    .iter()
                    .map(|f| format!("{} ({})", f.label(), f))
                    .collect();
                let picked = MultiSelect::with_theme(&theme)
                    .with_prompt("Features (space to toggle)")
                    .items(&labels)
                    .defaults(&checked)
                    .interact()
                    .map_err(prompt_error)?;
                draft.features = picked.into_iter().map(|i| Feature::ALL[i]).collect();
            }
        }

        if !draft.frontend.is_none() && !args.no_connect {
            draft.connect = ask(&theme, "Connect the frontend to the backend API?", draft.connect)?;
        }
        if !args.docker {
            draft.docker = ask(&theme, "Generate Docker files?", draft.docker)?;
        }
        if !args.ci {
            draft.ci = ask(&theme, "Generate a CI workflow?", draft.ci)?;
        }
        if !args.install {
            draft.install = ask(&theme, "Install npm dependencies now?", draft.install)?;
        }
        if !args.git {
            draft.git = ask(&theme, "Initialise a git repository?", draft.git)?;
        }

        Ok(())
    }

    fn ask(theme: &ColorfulTheme, prompt: &str, default: bool) -> CliResult<bool> {
        Confirm::with_theme(theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn select<T: Copy + PartialEq + Display>(
        theme: &ColorfulTheme,
        prompt: &str,
        items: &[T],
        current: T,
    ) -> CliResult<T> {
        select_with(theme, prompt, items, current, |item| item.to_string())
    }

    fn select_with<T: Copy + PartialEq>(
        theme: &ColorfulTheme,
        prompt: &str,
        items: &[T],
        current: T,
        label: impl Fn(&T) -> String,
    ) -> CliResult<T> {
        let labels: Vec<String> = items.iter().map(&label).collect();
        let default = items.iter().position(|i| *i == current).unwrap_or(0);
        let index = Select::with_theme(theme)
            .with_prompt(prompt)
            .items(&labels)
            .default(default)
            .interact()
            .map_err(prompt_error)?;
        Ok(items[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_answer_means_yes() {
        assert!(confirm_line("Continue?", &mut "\n".as_bytes()).unwrap());
        assert!(confirm_line("Continue?", &mut "".as_bytes()).unwrap());
    }

    #[test]
    fn explicit_answers() {
        assert!(confirm_line("Continue?", &mut "Yes\n".as_bytes()).unwrap());
        assert!(!confirm_line("Continue?", &mut "n\n".as_bytes()).unwrap());
        assert!(!confirm_line("Continue?", &mut "later\n".as_bytes()).unwrap());
    }
}
