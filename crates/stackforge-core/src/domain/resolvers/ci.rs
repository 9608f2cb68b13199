use crate::domain::entities::{CiJob, CiJobKind, CiWorkflow, ProjectConfig};

pub const DEFAULT_BRANCH: &str = "main";

/// Job graph of the generated CI workflow; `None` when CI is disabled.
///
/// Test jobs are independent of each other. The image job needs every test
/// job and only runs on pushes to the default branch.
pub fn resolve_ci_workflow(config: &ProjectConfig) -> Option<CiWorkflow> {
    if !config.ci() {
        return None;
    }

    let mut jobs = vec![CiJob {
        id: "backend-test".into(),
        kind: CiJobKind::BackendTest,
        needs: Vec::new(),
        condition: None,
        working_directory: Some("backend".into()),
    }];

    if config.has_frontend() {
        jobs.push(CiJob {
            id: "frontend-build".into(),
            kind: CiJobKind::FrontendBuild,
            needs: Vec::new(),
            condition: None,
            working_directory: Some("frontend".into()),
        });
    }

    if config.docker() {
        let needs = jobs.iter().map(|j| j.id.clone()).collect();
        jobs.push(CiJob {
            id: "docker".into(),
            kind: CiJobKind::DockerPublish,
            needs,
            condition: Some(format!(
                "github.event_name == 'push' && github.ref == 'refs/heads/{DEFAULT_BRANCH}'"
            )),
            working_directory: Some("backend".into()),
        });
    }

    Some(CiWorkflow {
        name: "CI".into(),
        default_branch: DEFAULT_BRANCH.into(),
        jobs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::FrontendKind;

    fn config(frontend: FrontendKind, docker: bool) -> ProjectConfig {
        ProjectConfig::builder()
            .name("app")
            .frontend(frontend)
            .docker(docker)
            .ci(true)
            .build()
            .unwrap()
    }

    #[test]
    fn disabled_ci_has_no_workflow() {
        let config = ProjectConfig::builder().name("app").build().unwrap();
        assert!(resolve_ci_workflow(&config).is_none());
    }

    #[test]
    fn backend_only_has_single_job() {
        let wf = resolve_ci_workflow(&config(FrontendKind::None, false)).unwrap();
        assert_eq!(wf.job_ids().collect::<Vec<_>>(), ["backend-test"]);
    }

    #[test]
    fn test_jobs_are_independent() {
        let wf = resolve_ci_workflow(&config(FrontendKind::Vanilla, false)).unwrap();
        assert_eq!(wf.jobs.len(), 2);
        assert!(wf.jobs.iter().all(|j| j.needs.is_empty()));
    }

    #[test]
    fn docker_job_needs_every_test_job_and_runs_on_main_only() {
        let wf = resolve_ci_workflow(&config(FrontendKind::Vanilla, true)).unwrap();
        let docker = wf.job("docker").unwrap();
        assert_eq!(docker.needs, ["backend-test", "frontend-build"]);
        assert!(docker.condition.as_deref().unwrap().contains("refs/heads/main"));
    }
}
