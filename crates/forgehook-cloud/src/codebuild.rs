use crate::aws::AwsCliError;
use crate::executor::{AwsCliExecutor, CliExecutor};
use serde::Deserialize;

/// Parameters for one CodeBuild job start.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// CodeBuild project name.
    pub project_name: String,
    /// Commit id to build.
    pub source_version: String,
    /// Region hosting the repository and the build.
    pub region: String,
    /// CodeCommit repository name.
    pub repository: String,
    /// Account owning the repository, exposed to the build as
    /// `AWS_ACCOUNT_ID`.
    pub account_id: String,
    /// ECR repository to push the image to, exposed as `ECR_REPO`.
    pub ecr_repo: String,
}

impl BuildRequest {
    /// Clone URL override pointing the build at the pushed repository.
    pub fn source_location(&self) -> String {
        format!(
            "https://git-codecommit.{region}.amazonaws.com/v1/repos/{repo}",
            region = self.region,
            repo = self.repository,
        )
    }

    /// Plaintext environment overrides passed to the build job.
    fn environment_overrides(&self) -> serde_json::Value {
        serde_json::json!([
            { "name": "AWS_DEFAULT_REGION", "value": self.region, "type": "PLAINTEXT" },
            { "name": "ECR_REPO", "value": self.ecr_repo, "type": "PLAINTEXT" },
            { "name": "AWS_ACCOUNT_ID", "value": self.account_id, "type": "PLAINTEXT" },
        ])
    }
}

/// CodeBuild operations client, parameterized over the executor for
/// testability.
pub struct CodeBuildClient<E: AwsCliExecutor = CliExecutor> {
    executor: E,
}

impl CodeBuildClient<CliExecutor> {
    pub fn new() -> Self {
        Self {
            executor: CliExecutor,
        }
    }
}

impl Default for CodeBuildClient<CliExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: AwsCliExecutor> CodeBuildClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    /// Start one build of the request's source version. Returns the build
    /// id. The remote service validates the project, region, and source;
    /// a rejection surfaces as [`CodeBuildError::Start`].
    pub async fn start_build(&self, request: &BuildRequest) -> Result<String, CodeBuildError> {
        let overrides = request.environment_overrides().to_string();
        let location = request.source_location();

        let cmd = [
            "codebuild",
            "start-build",
            "--project-name",
            &request.project_name,
            "--source-version",
            &request.source_version,
            "--source-type-override",
            "CODECOMMIT",
            "--source-location-override",
            &location,
            "--environment-variables-override",
            &overrides,
            "--output",
            "json",
        ];
        let cmd_owned: Vec<String> = cmd.iter().map(|s| (*s).to_owned()).collect();

        let output = self
            .executor
            .exec(&cmd_owned)
            .await
            .map_err(|e| CodeBuildError::Start { source: e })?;

        let parsed: StartBuildOutput =
            serde_json::from_str(&output).map_err(|e| CodeBuildError::ResponseParse { source: e })?;
        Ok(parsed.build.id)
    }
}

// ── Response shapes ──

#[derive(Debug, Deserialize)]
struct StartBuildOutput {
    build: BuildDetail,
}

#[derive(Debug, Deserialize)]
struct BuildDetail {
    id: String,
}

// ── Error types ──

#[derive(Debug, thiserror::Error)]
pub enum CodeBuildError {
    #[error("failed to start build")]
    Start { source: AwsCliError },

    #[error("unexpected codebuild response")]
    ResponseParse { source: serde_json::Error },
}
