//! `stackforge frontends`: frontend kinds, ports and generation depth.

use serde_json::json;
use stackforge_core::domain::{
    FrontendCapability,
    registry::{FRONTEND_REGISTRY, FrontendDef},
};

use crate::{error::CliResult, output::OutputManager};

fn capability_label(def: &FrontendDef) -> &'static str {
    match def.capability {
        FrontendCapability::Supported => "complete",
        FrontendCapability::Stub => "stub (package.json + README)",
    }
}

pub fn execute(output: OutputManager) -> CliResult<()> {
    if output.is_json() {
        let frontends: Vec<_> = FRONTEND_REGISTRY
            .iter()
            .map(|def| {
                json!({
                    "name": def.kind,
                    "displayName": def.display_name,
                    "port": def.port,
                    "complete": def.capability == FrontendCapability::Supported,
                })
            })
            .collect();
        output.json(&json!(frontends))?;
        return Ok(());
    }

    output.header("Available Frontends")?;
    output.print("")?;
    output.print(&format!("  {:<10} {:<22} {:>5}  {}", "NAME", "FRAMEWORK", "PORT", "GENERATION"))?;
    for def in FRONTEND_REGISTRY {
        output.print(&format!(
            "  {:<10} {:<22} {:>5}  {}",
            def.kind.as_str(),
            def.display_name,
            def.port,
            capability_label(def)
        ))?;
    }
    output.print(&format!("  {:<10} {:<22} {:>5}  {}", "none", "(backend only)", "-", "-"))?;
    output.print("")?;
    output.info("The backend's CORS origin follows the frontend's port.")?;
    Ok(())
}
