use crate::aws::AwsCliError;
use crate::executor::{AwsCliExecutor, CliExecutor};
use forgehook_core::FileChange;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// CodeCommit operations client, parameterized over the executor for
/// testability.
pub struct CodeCommitClient<E: AwsCliExecutor = CliExecutor> {
    executor: E,
}

impl CodeCommitClient<CliExecutor> {
    pub fn new() -> Self {
        Self {
            executor: CliExecutor,
        }
    }
}

impl Default for CodeCommitClient<CliExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: AwsCliExecutor> CodeCommitClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    // ── Branch tip ──

    /// Commit id currently at the tip of a branch.
    pub async fn get_branch_tip(
        &self,
        repository: &str,
        branch: &str,
    ) -> Result<String, CodeCommitError> {
        let output = self
            .executor
            .exec(&args([
                "codecommit",
                "get-branch",
                "--repository-name",
                repository,
                "--branch-name",
                branch,
                "--output",
                "json",
            ]))
            .await
            .map_err(|e| CodeCommitError::BranchLookup { source: e })?;

        let parsed: GetBranchOutput = parse(&output)?;
        Ok(parsed.branch.commit_id)
    }

    // ── Commit metadata ──

    /// First parent of a commit, or `None` for an initial commit.
    pub async fn get_parent_commit(
        &self,
        repository: &str,
        commit_id: &str,
    ) -> Result<Option<String>, CodeCommitError> {
        let output = self
            .executor
            .exec(&args([
                "codecommit",
                "get-commit",
                "--repository-name",
                repository,
                "--commit-id",
                commit_id,
                "--output",
                "json",
            ]))
            .await
            .map_err(|e| CodeCommitError::CommitLookup { source: e })?;

        let parsed: GetCommitOutput = parse(&output)?;
        Ok(parsed.commit.parents.into_iter().next())
    }

    // ── Differences ──

    /// Changed files between two commits, following pagination until the
    /// response carries no continuation token.
    ///
    /// With `before` absent the diff is taken against the empty tree, so
    /// every file in `after` is reported. Differences without an after
    /// blob (pure deletions) carry no path and are skipped.
    pub async fn get_differences(
        &self,
        repository: &str,
        before: Option<&str>,
        after: &str,
    ) -> Result<Vec<FileChange>, CodeCommitError> {
        let mut changes = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut cmd = vec![
                "codecommit",
                "get-differences",
                "--repository-name",
                repository,
                "--after-commit-specifier",
                after,
            ];

            if let Some(before) = before {
                cmd.push("--before-commit-specifier");
                cmd.push(before);
            }
            if let Some(token) = next_token.as_deref() {
                cmd.push("--next-token");
                cmd.push(token);
            }
            cmd.push("--output");
            cmd.push("json");

            let cmd_owned: Vec<String> = cmd.iter().map(|s| (*s).to_owned()).collect();

            let output = self
                .executor
                .exec(&cmd_owned)
                .await
                .map_err(|e| CodeCommitError::Differences { source: e })?;

            let page: GetDifferencesOutput = parse(&output)?;
            changes.extend(page.differences.into_iter().filter_map(|d| {
                d.after_blob.map(|blob| FileChange {
                    path: blob.path,
                    blob_id: blob.blob_id,
                })
            }));

            match page.next_token {
                Some(token) => next_token = Some(token),
                None => break,
            }
        }

        tracing::debug!(changes = changes.len(), "collected differences");
        Ok(changes)
    }
}

// ── Helpers ──

fn args<const N: usize>(a: [&str; N]) -> Vec<String> {
    a.iter().map(|s| (*s).to_owned()).collect()
}

fn parse<T: DeserializeOwned>(output: &str) -> Result<T, CodeCommitError> {
    serde_json::from_str(output).map_err(|e| CodeCommitError::ResponseParse { source: e })
}

// ── Response shapes ──

#[derive(Debug, Deserialize)]
struct GetBranchOutput {
    branch: BranchDetail,
}

#[derive(Debug, Deserialize)]
struct BranchDetail {
    #[serde(rename = "commitId")]
    commit_id: String,
}

#[derive(Debug, Deserialize)]
struct GetCommitOutput {
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    #[serde(default)]
    parents: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GetDifferencesOutput {
    #[serde(default)]
    differences: Vec<Difference>,
    // Token casing differs across CLI versions
    #[serde(rename = "nextToken", alias = "NextToken")]
    next_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Difference {
    #[serde(rename = "afterBlob")]
    after_blob: Option<BlobRef>,
}

#[derive(Debug, Deserialize)]
struct BlobRef {
    path: String,
    #[serde(rename = "blobId")]
    blob_id: String,
}

// ── Error types ──

#[derive(Debug, thiserror::Error)]
pub enum CodeCommitError {
    #[error("branch lookup failed")]
    BranchLookup { source: AwsCliError },

    #[error("commit lookup failed")]
    CommitLookup { source: AwsCliError },

    #[error("failed to list differences")]
    Differences { source: AwsCliError },

    #[error("unexpected codecommit response")]
    ResponseParse { source: serde_json::Error },
}
