/// Build trigger configuration, read once at process start.
#[derive(Debug, Clone)]
pub struct TriggerConfig {
    /// CodeBuild project to start when a push qualifies.
    pub build_project: String,
    /// ECR repository name passed to the build as `ECR_REPO`.
    pub ecr_repo: String,
}

const BUILD_PROJECT_VAR: &str = "CODE_BUILD_PROJECT";
const ECR_REPO_VAR: &str = "ECR_REPO_NAME";

impl TriggerConfig {
    /// Load from the process environment. Both variables are required.
    pub fn from_env() -> crate::Result<Self> {
        Ok(Self {
            build_project: require(BUILD_PROJECT_VAR)?,
            ecr_repo: require(ECR_REPO_VAR)?,
        })
    }
}

fn require(name: &'static str) -> crate::Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(crate::Error::MissingEnv { name }),
    }
}
