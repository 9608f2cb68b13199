//! `stackforge profiles`: what each profile expands to.

use serde_json::json;
use stackforge_core::domain::registry::PROFILE_REGISTRY;

use crate::{error::CliResult, output::OutputManager};

pub fn execute(output: OutputManager) -> CliResult<()> {
    if output.is_json() {
        let profiles: Vec<_> = PROFILE_REGISTRY
            .iter()
            .map(|def| {
                json!({
                    "name": def.profile,
                    "description": def.description,
                    "architecture": def.architecture,
                    "features": def.features,
                })
            })
            .collect();
        output.json(&json!(profiles))?;
        return Ok(());
    }

    output.header("Available Profiles")?;
    for def in PROFILE_REGISTRY {
        output.print("")?;
        output.print(&format!("  {}", def.profile))?;
        output.print(&format!("    {}", def.description))?;
        output.field("  Architecture", def.architecture.as_str())?;
        let features: Vec<&str> = def.features.iter().map(|f| f.as_str()).collect();
        output.field("  Features", &features.join(", "))?;
    }
    output.print("")?;
    output.info("A profile replaces --feature and --arch; other flags still apply.")?;
    Ok(())
}
