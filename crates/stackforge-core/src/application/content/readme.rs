//! Root-level documentation of a generated project.

use crate::domain::registry::{self, FrontendCapability};
use crate::domain::{Feature, ProjectConfig};

fn check(enabled: bool) -> &'static str {
    if enabled { "✅" } else { "-" }
}

fn feature_matrix(config: &ProjectConfig) -> String {
    let mut out = String::from("| Feature | Enabled |\n|---------|---------|\n");
    for feature in Feature::ALL {
        out.push_str(&format!("| {} | {} |\n", feature.label(), check(config.has(feature))));
    }
    out.push_str(&format!("| Docker | {} |\n", check(config.docker())));
    out.push_str(&format!("| CI workflow | {} |\n", check(config.ci())));
    out
}

fn structure(config: &ProjectConfig) -> String {
    let mut out = format!("```\n{}/\n├── backend/\n", config.name());
    if config.has_frontend() {
        out.push_str("├── frontend/\n");
    }
    if config.ci() {
        out.push_str("├── .github/workflows/ci.yml\n");
    }
    out.push_str("├── stackforge.json\n└── README.md\n```\n");
    out
}

fn getting_started(config: &ProjectConfig) -> String {
    let mut out = String::from("### Backend\n\n```bash\ncd backend\n");
    if !config.install_deps() {
        out.push_str("npm install\n");
    }
    out.push_str("cp .env.example .env\nnpm run dev\n```\n\n");
    out.push_str(&format!(
        "The API listens on http://localhost:{}; health check at `/health`.\n",
        config.port()
    ));
    if config.has(Feature::Docs) {
        out.push_str(&format!(
            "API documentation is served at http://localhost:{}/api-docs.\n",
            config.port()
        ));
    }
    if config.docker() && config.has_database() {
        out.push_str("\nTo run the API together with its database:\n\n```bash\ncd backend\nnpm run docker:up\n```\n");
    }

    if let Some(def) = registry::find_frontend(config.frontend()) {
        out.push_str(&format!("\n### Frontend ({})\n\n", def.display_name));
        match def.capability {
            FrontendCapability::Supported => {
                out.push_str(&format!(
                    "```bash\ncd frontend\nnpm start\n```\n\nOpen http://localhost:{}.\n",
                    def.port
                ));
            }
            FrontendCapability::Stub => {
                out.push_str(
                    "Only the manifest was generated. See `frontend/README.md` to finish scaffolding.\n",
                );
            }
        }
    }
    out
}

/// Top-level `README.md`.
pub fn root_readme(config: &ProjectConfig) -> String {
    let mut prerequisites = String::from("- Node.js 16 or later\n- npm\n");
    if config.docker() {
        prerequisites.push_str("- Docker and Docker Compose\n");
    }

    let mut stack = format!(
        "- **Backend:** Express ({}), {} architecture\n",
        config.backend_lang(),
        config.architecture()
    );
    if let Some(def) = registry::find_frontend(config.frontend()) {
        stack.push_str(&format!("- **Frontend:** {}\n", def.display_name));
    }
    if let Some(def) = registry::find_database(config.database()) {
        stack.push_str(&format!("- **Database:** {}\n", def.display_name));
    }
    if let Some(profile) = config.profile() {
        stack.push_str(&format!("- **Profile:** {profile}\n"));
    }

    format!(
        "# {name}\n\n{description}\n\n## Stack\n\n{stack}\n## Features\n\n{matrix}\n\
## Prerequisites\n\n{prerequisites}\n## Project structure\n\n{structure}\n\
## Getting started\n\n{started}",
        name = config.name(),
        description = config.description(),
        matrix = feature_matrix(config),
        structure = structure(config),
        started = getting_started(config),
    )
}

/// Top-level `.gitignore`; sub-projects carry their own.
pub fn root_gitignore() -> String {
    ["node_modules/", ".env", ".DS_Store", "*.log", ".idea/", ".vscode/"].join("\n") + "\n"
}
