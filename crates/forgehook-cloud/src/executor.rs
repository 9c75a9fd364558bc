use crate::aws::AwsCliError;

/// Abstraction over aws CLI execution for testability.
///
/// Production code uses [`CliExecutor`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait AwsCliExecutor: Send + Sync {
    /// Execute an aws command and capture stdout.
    async fn exec(&self, args: &[String]) -> Result<String, AwsCliError>;
}

/// Real aws CLI executor.
pub struct CliExecutor;

impl AwsCliExecutor for CliExecutor {
    async fn exec(&self, args: &[String]) -> Result<String, AwsCliError> {
        use std::process::Stdio;

        let output = tokio::process::Command::new("aws")
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| AwsCliError::NotFound { source: e })?;

        if output.status.success() {
            String::from_utf8(output.stdout).map_err(|e| AwsCliError::InvalidUtf8 { source: e })
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            Err(AwsCliError::CommandFailed {
                args: args.to_vec(),
                stderr,
            })
        }
    }
}
