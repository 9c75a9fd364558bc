#[derive(Debug, thiserror::Error)]
pub enum AwsCliError {
    #[error("aws CLI not found — install: https://aws.amazon.com/cli/")]
    NotFound { source: std::io::Error },

    #[error("aws command failed: {args:?}\n{stderr}")]
    CommandFailed { args: Vec<String>, stderr: String },

    #[error("aws output was not valid UTF-8")]
    InvalidUtf8 { source: std::string::FromUtf8Error },
}
