use crate::domain::{
    entities::{DirectoryPlan, common::RelativePath},
    value_objects::Architecture,
};

pub const BASE_DIRS: &[&str] = &[
    "src",
    "src/controllers",
    "src/services",
    "src/models",
    "src/routes",
    "src/middlewares",
    "src/config",
    "src/utils",
    "src/dtos",
    "src/interfaces",
    "src/repositories",
    "src/validators",
    "tests/unit",
    "tests/integration",
    "logs",
    "docs",
];

fn architecture_dirs(architecture: Architecture) -> &'static [&'static str] {
    match architecture {
        Architecture::Clean => &["src/application", "src/domain", "src/infrastructure"],
        Architecture::Modular => &["src/modules"],
        Architecture::Microservices => &["src/events"],
        Architecture::Mvc | Architecture::Layered => &[],
    }
}

/// Backend directory plan: the fixed base set plus architecture additions.
pub fn resolve_directory_plan(architecture: Architecture) -> DirectoryPlan {
    let mut plan = DirectoryPlan::new();
    for dir in BASE_DIRS.iter().chain(architecture_dirs(architecture)) {
        if let Ok(path) = RelativePath::try_new(*dir) {
            plan.insert(path);
        }
    }
    plan
}
