use forgehook_cloud::aws::AwsCliError;
use forgehook_cloud::codebuild::CodeBuildClient;
use forgehook_cloud::codecommit::CodeCommitClient;
use forgehook_cloud::executor::AwsCliExecutor;
use forgehook_core::{PushEvent, TriggerConfig};
use forgehook_trigger::{ChangeTrigger, SUCCESS_MARKER, TriggerError, TriggerOutcome};
use mockall::mock;

mock! {
    Executor {}

    impl AwsCliExecutor for Executor {
        async fn exec(&self, args: &[String]) -> Result<String, AwsCliError>;
    }
}

const ZERO: &str = "0000000000000000000000000000000000000000";

fn event(commit: &str) -> PushEvent {
    serde_json::from_value(serde_json::json!({
        "Records": [{
            "codecommit": {
                "references": [{ "commit": commit, "ref": "refs/heads/main" }]
            },
            "awsRegion": "eu-west-1",
            "eventSourceARN": "arn:aws:codecommit:eu-west-1:123456789012:my-repo"
        }]
    }))
    .unwrap()
}

fn config() -> TriggerConfig {
    TriggerConfig {
        build_project: "image-builder".to_owned(),
        ecr_repo: "my-images".to_owned(),
    }
}

/// CodeCommit executor scripted with a parent list and one diff page.
fn codecommit_mock(parents: &'static str, differences: &'static str) -> MockExecutor {
    let mut mock = MockExecutor::new();
    mock.expect_exec().returning(move |args| {
        if args.contains(&"get-commit".to_owned()) {
            Ok(format!(r#"{{"commit": {{"parents": {parents}}}}}"#))
        } else if args.contains(&"get-differences".to_owned()) {
            Ok(format!(r#"{{"differences": {differences}}}"#))
        } else {
            panic!("unexpected codecommit call: {args:?}");
        }
    });
    mock
}

fn started_build() -> MockExecutor {
    let mut mock = MockExecutor::new();
    mock.expect_exec()
        .returning(|_| Ok(r#"{"build": {"id": "image-builder:42"}}"#.to_owned()));
    mock
}

// ── End-to-end scenarios ──

#[tokio::test]
async fn qualifying_change_starts_build_with_pushed_commit() {
    let codecommit = codecommit_mock(
        r#"["def456"]"#,
        r#"[{"afterBlob": {"path": "src/app.py", "blobId": "b1"}}]"#,
    );

    let mut codebuild = MockExecutor::new();
    codebuild
        .expect_exec()
        .withf(|args| {
            args.contains(&"start-build".to_owned())
                && args.contains(&"image-builder".to_owned())
                && args.contains(&"abc123".to_owned())
        })
        .returning(|_| Ok(r#"{"build": {"id": "image-builder:42"}}"#.to_owned()));

    let trigger = ChangeTrigger::with_clients(
        CodeCommitClient::with_executor(codecommit),
        CodeBuildClient::with_executor(codebuild),
    );
    let outcome = trigger.handle(&event("abc123"), &config()).await.unwrap();

    assert_eq!(
        outcome,
        TriggerOutcome::BuildStarted {
            build_id: "image-builder:42".to_owned()
        }
    );
}

#[tokio::test]
async fn unmatched_changes_suppress_the_build() {
    let codecommit = codecommit_mock(
        r#"["def456"]"#,
        r#"[{"afterBlob": {"path": "README.md", "blobId": "b1"}}]"#,
    );

    // No expectations: any codebuild call panics the test.
    let codebuild = MockExecutor::new();

    let trigger = ChangeTrigger::with_clients(
        CodeCommitClient::with_executor(codecommit),
        CodeBuildClient::with_executor(codebuild),
    );
    let outcome = trigger.handle(&event("abc123"), &config()).await.unwrap();

    assert_eq!(outcome, TriggerOutcome::Skipped);
}

#[tokio::test]
async fn empty_diff_suppresses_the_build() {
    let codecommit = codecommit_mock(r#"["def456"]"#, "[]");
    let codebuild = MockExecutor::new();

    let trigger = ChangeTrigger::with_clients(
        CodeCommitClient::with_executor(codecommit),
        CodeBuildClient::with_executor(codebuild),
    );
    let outcome = trigger.handle(&event("abc123"), &config()).await.unwrap();

    assert_eq!(outcome, TriggerOutcome::Skipped);
}

// ── Sentinel resolution ──

#[tokio::test]
async fn zero_commit_resolves_branch_tip_before_diffing() {
    let mut codecommit = MockExecutor::new();
    codecommit.expect_exec().returning(|args| {
        if args.contains(&"get-branch".to_owned()) {
            assert!(args.contains(&"main".to_owned()), "branch from ref: {args:?}");
            Ok(r#"{"branch": {"commitId": "tip789"}}"#.to_owned())
        } else if args.contains(&"get-commit".to_owned()) {
            assert!(args.contains(&"tip789".to_owned()), "resolved tip: {args:?}");
            Ok(r#"{"commit": {"parents": ["def456"]}}"#.to_owned())
        } else if args.contains(&"get-differences".to_owned()) {
            Ok(r#"{"differences": [{"afterBlob": {"path": "Dockerfile", "blobId": "b1"}}]}"#
                .to_owned())
        } else {
            panic!("unexpected codecommit call: {args:?}");
        }
    });

    let trigger = ChangeTrigger::with_clients(
        CodeCommitClient::with_executor(codecommit),
        CodeBuildClient::with_executor(started_build()),
    );
    let outcome = trigger.handle(&event(ZERO), &config()).await.unwrap();

    assert!(matches!(outcome, TriggerOutcome::BuildStarted { .. }));
}

#[tokio::test]
async fn branch_lookup_failure_is_fatal() {
    let mut codecommit = MockExecutor::new();
    codecommit.expect_exec().returning(|args| {
        Err(AwsCliError::CommandFailed {
            args: args.to_vec(),
            stderr: "BranchDoesNotExistException".to_owned(),
        })
    });

    let trigger = ChangeTrigger::with_clients(
        CodeCommitClient::with_executor(codecommit),
        CodeBuildClient::with_executor(MockExecutor::new()),
    );
    let result = trigger.handle(&event(ZERO), &config()).await;

    assert!(matches!(result, Err(TriggerError::CodeCommit { .. })));
}

// ── Initial commit ──

#[tokio::test]
async fn initial_commit_diffs_against_empty_tree() {
    let mut codecommit = MockExecutor::new();
    codecommit.expect_exec().returning(|args| {
        if args.contains(&"get-commit".to_owned()) {
            Ok(r#"{"commit": {"parents": []}}"#.to_owned())
        } else if args.contains(&"get-differences".to_owned()) {
            assert!(
                !args.contains(&"--before-commit-specifier".to_owned()),
                "initial commit must diff against the empty tree: {args:?}"
            );
            Ok(r#"{"differences": [{"afterBlob": {"path": "setup.py", "blobId": "b1"}}]}"#
                .to_owned())
        } else {
            panic!("unexpected codecommit call: {args:?}");
        }
    });

    let trigger = ChangeTrigger::with_clients(
        CodeCommitClient::with_executor(codecommit),
        CodeBuildClient::with_executor(started_build()),
    );
    let outcome = trigger.handle(&event("abc123"), &config()).await.unwrap();

    assert!(matches!(outcome, TriggerOutcome::BuildStarted { .. }));
}

// ── Malformed events ──

#[tokio::test]
async fn event_without_records_is_rejected() {
    let event: PushEvent = serde_json::from_value(serde_json::json!({ "Records": [] })).unwrap();

    let trigger = ChangeTrigger::with_clients(
        CodeCommitClient::with_executor(MockExecutor::new()),
        CodeBuildClient::with_executor(MockExecutor::new()),
    );
    let result = trigger.handle(&event, &config()).await;

    assert!(matches!(result, Err(TriggerError::Event { .. })));
}

#[test]
fn success_marker_is_the_literal_string() {
    assert_eq!(SUCCESS_MARKER, "Success.");
}
