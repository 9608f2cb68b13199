/// A CI workflow as a job graph. Only the jobs, their dependencies and their
/// trigger conditions are modelled; step bodies are rendered elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiWorkflow {
    pub name: String,
    pub default_branch: String,
    pub jobs: Vec<CiJob>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CiJobKind {
    BackendTest,
    FrontendBuild,
    DockerPublish,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiJob {
    pub id: String,
    pub kind: CiJobKind,
    pub needs: Vec<String>,
    /// GitHub Actions `if:` expression.
    pub condition: Option<String>,
    /// Sub-project directory the job runs in.
    pub working_directory: Option<String>,
}

impl CiWorkflow {
    pub fn job(&self, id: &str) -> Option<&CiJob> {
        self.jobs.iter().find(|j| j.id == id)
    }

    pub fn job_ids(&self) -> impl Iterator<Item = &str> {
        self.jobs.iter().map(|j| j.id.as_str())
    }
}
