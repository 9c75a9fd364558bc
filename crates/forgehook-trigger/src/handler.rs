use forgehook_cloud::codebuild::{BuildRequest, CodeBuildClient, CodeBuildError};
use forgehook_cloud::codecommit::{CodeCommitClient, CodeCommitError};
use forgehook_cloud::executor::{AwsCliExecutor, CliExecutor};
use forgehook_core::{PushEvent, TriggerConfig, should_trigger_build};

/// Marker string returned to the invoking runtime on completion.
pub const SUCCESS_MARKER: &str = "Success.";

/// Result of one invocation that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A tracked file changed and a build was started.
    BuildStarted { build_id: String },
    /// No changed file matched the allow-lists; the build was suppressed.
    Skipped,
}

/// Push-to-build trigger over constructor-injected service clients.
pub struct ChangeTrigger<V: AwsCliExecutor = CliExecutor, B: AwsCliExecutor = CliExecutor> {
    codecommit: CodeCommitClient<V>,
    codebuild: CodeBuildClient<B>,
}

impl ChangeTrigger<CliExecutor, CliExecutor> {
    pub fn new() -> Self {
        Self {
            codecommit: CodeCommitClient::new(),
            codebuild: CodeBuildClient::new(),
        }
    }
}

impl Default for ChangeTrigger<CliExecutor, CliExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: AwsCliExecutor, B: AwsCliExecutor> ChangeTrigger<V, B> {
    pub fn with_clients(codecommit: CodeCommitClient<V>, codebuild: CodeBuildClient<B>) -> Self {
        Self {
            codecommit,
            codebuild,
        }
    }

    /// Run the full resolve → diff → decide → submit sequence for one
    /// push notification.
    pub async fn handle(
        &self,
        event: &PushEvent,
        config: &TriggerConfig,
    ) -> Result<TriggerOutcome, TriggerError> {
        let record = event.first_record()?;
        let reference = record.first_reference()?;
        let repository = record.repository_name();
        let region = record.aws_region.as_str();
        let account_id = record.account_id()?;

        // All-zero or null commit: the notification carries no tip, so
        // look it up from the branch before anything else.
        let commit_id = match reference.pushed_commit() {
            Some(id) => id.to_owned(),
            None => {
                self.codecommit
                    .get_branch_tip(repository, reference.branch_name())
                    .await?
            }
        };

        let previous = self
            .codecommit
            .get_parent_commit(repository, &commit_id)
            .await?;
        tracing::info!(
            commit = %commit_id,
            previous = previous.as_deref().unwrap_or("(initial commit)"),
            "resolved commit pair"
        );

        let changes = self
            .codecommit
            .get_differences(repository, previous.as_deref(), &commit_id)
            .await?;

        if !should_trigger_build(&changes) {
            tracing::info!("changed files match no trigger, image build suppressed");
            return Ok(TriggerOutcome::Skipped);
        }

        let request = BuildRequest {
            project_name: config.build_project.clone(),
            source_version: commit_id,
            region: region.to_owned(),
            repository: repository.to_owned(),
            account_id: account_id.to_owned(),
            ecr_repo: config.ecr_repo.clone(),
        };

        tracing::info!(repository, region, "building image from pushed repository");
        let build_id = self.codebuild.start_build(&request).await?;

        Ok(TriggerOutcome::BuildStarted { build_id })
    }
}

// ── Error types ──

#[derive(Debug, thiserror::Error)]
pub enum TriggerError {
    #[error("malformed push event")]
    Event {
        #[from]
        source: forgehook_core::Error,
    },

    #[error("codecommit call failed")]
    CodeCommit {
        #[from]
        source: CodeCommitError,
    },

    #[error("codebuild call failed")]
    CodeBuild {
        #[from]
        source: CodeBuildError,
    },
}
