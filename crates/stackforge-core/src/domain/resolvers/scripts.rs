use std::collections::BTreeMap;

use crate::domain::entities::{ProjectConfig, TestFamily};

/// npm scripts of the backend manifest.
pub fn resolve_scripts(config: &ProjectConfig) -> BTreeMap<String, String> {
    let lang = config.backend_lang();
    let ext = lang.extension();
    let mut scripts = BTreeMap::new();
    let mut set = |k: &str, v: String| {
        scripts.insert(k.to_string(), v);
    };

    if lang.is_typescript() {
        set("dev", "nodemon".into());
        set("build", "tsc".into());
        set("typecheck", "tsc --noEmit".into());
        set("start", "node dist/index.js".into());
    } else {
        set("dev", "nodemon src/index.js".into());
        set("start", "node src/index.js".into());
    }

    set("lint", format!("eslint src --ext .{ext}"));
    set("lint:fix", format!("eslint src --ext .{ext} --fix"));
    set("format", format!("prettier --write \"src/**/*.{{{ext},json}}\""));

    match config.test_family() {
        Some(TestFamily::Vitest) => {
            set("test", "vitest run".into());
            set("test:watch", "vitest".into());
            set("test:coverage", "vitest run --coverage".into());
        }
        Some(TestFamily::Jest) => {
            set("test", "jest --runInBand".into());
            set("test:watch", "jest --watch".into());
            set("test:coverage", "jest --coverage".into());
        }
        None => {}
    }

    if config.docker() {
        let image = config.name();
        let port = config.port();
        set("docker:build", format!("docker build -t {image} ."));
        set(
            "docker:run",
            format!("docker run --rm -p {port}:{port} --env-file .env {image}"),
        );
        if config.has_database() {
            set("docker:up", "docker compose up -d".into());
            set("docker:down", "docker compose down".into());
        }
    }

    scripts
}
