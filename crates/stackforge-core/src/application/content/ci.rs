//! GitHub Actions rendering of a [`CiWorkflow`].

use serde_yaml::{Mapping, Value};

use super::yaml;
use crate::domain::entities::{CiJob, CiJobKind, CiWorkflow};
use crate::domain::{FrontendKind, ProjectConfig};
use crate::error::StackforgeResult;

const NODE_VERSION: &str = "20";

fn uses(action: &str) -> Value {
    yaml::map([("uses", action.into())])
}

fn uses_with(action: &str, with: Value) -> Value {
    yaml::map([("uses", action.into()), ("with", with)])
}

fn run_step(name: &str, command: &str, working_directory: &str) -> Value {
    yaml::map([
        ("name", name.into()),
        ("run", command.into()),
        ("working-directory", working_directory.into()),
    ])
}

fn node_steps(working_directory: &str) -> Vec<Value> {
    vec![
        uses("actions/checkout@v4"),
        uses_with(
            "actions/setup-node@v4",
            yaml::map([("node-version", NODE_VERSION.into())]),
        ),
        run_step("Install dependencies", "npm install", working_directory),
    ]
}

fn steps(job: &CiJob, config: &ProjectConfig) -> Vec<Value> {
    let wd = job.working_directory.as_deref().unwrap_or(".");
    match job.kind {
        CiJobKind::BackendTest => {
            let mut steps = node_steps(wd);
            steps.push(run_step("Lint", "npm run lint", wd));
            if config.backend_lang().is_typescript() {
                steps.push(run_step("Build", "npm run build", wd));
            }
            if config.test_family().is_some() {
                steps.push(run_step("Test", "npm test", wd));
            }
            steps
        }
        CiJobKind::FrontendBuild => {
            let mut steps = node_steps(wd);
            // The static frontend has nothing to build.
            if config.frontend() != FrontendKind::Vanilla {
                steps.push(run_step("Build", "npm run build --if-present", wd));
            }
            steps
        }
        CiJobKind::DockerPublish => vec![
            uses("actions/checkout@v4"),
            uses("docker/setup-buildx-action@v3"),
            uses_with(
                "docker/login-action@v3",
                yaml::map([
                    ("registry", "ghcr.io".into()),
                    ("username", "${{ github.actor }}".into()),
                    ("password", "${{ secrets.GITHUB_TOKEN }}".into()),
                ]),
            ),
            uses_with(
                "docker/build-push-action@v5",
                yaml::map([
                    ("context", wd.into()),
                    ("target", "production".into()),
                    ("push", true.into()),
                    (
                        "tags",
                        format!("ghcr.io/${{{{ github.repository }}}}/{}:latest", config.name())
                            .into(),
                    ),
                ]),
            ),
        ],
    }
}

fn job(job: &CiJob, config: &ProjectConfig) -> Value {
    let mut out = Mapping::new();
    out.insert("runs-on".into(), "ubuntu-latest".into());
    if !job.needs.is_empty() {
        out.insert("needs".into(), yaml::seq(job.needs.iter().map(String::as_str)));
    }
    if let Some(condition) = &job.condition {
        out.insert("if".into(), condition.as_str().into());
    }
    if job.kind == CiJobKind::DockerPublish {
        out.insert(
            "permissions".into(),
            yaml::map([("contents", "read".into()), ("packages", "write".into())]),
        );
    }
    out.insert("steps".into(), Value::Sequence(steps(job, config)));
    Value::Mapping(out)
}

/// `.github/workflows/ci.yml`.
pub fn workflow_yaml(workflow: &CiWorkflow, config: &ProjectConfig) -> StackforgeResult<String> {
    let branches = || yaml::map([("branches", yaml::seq([workflow.default_branch.as_str()]))]);
    let jobs: Mapping = workflow
        .jobs
        .iter()
        .map(|j| (Value::from(j.id.as_str()), job(j, config)))
        .collect();

    let doc = yaml::map([
        ("name", workflow.name.as_str().into()),
        ("on", yaml::map([("push", branches()), ("pull_request", branches())])),
        ("jobs", Value::Mapping(jobs)),
    ]);
    yaml::render(&doc, "ci.yml")
}
