//! AWS CodeCommit and CodeBuild operations for forgehook.
//!
//! Both services are driven through the `aws` CLI behind the
//! [`AwsCliExecutor`] trait, so every call can be mocked in tests.

pub mod aws;
pub mod codebuild;
pub mod codecommit;
pub mod executor;

pub use aws::AwsCliError;
pub use codebuild::{BuildRequest, CodeBuildClient, CodeBuildError};
pub use codecommit::{CodeCommitClient, CodeCommitError};
pub use executor::{AwsCliExecutor, CliExecutor};
