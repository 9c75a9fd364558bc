use serde::Deserialize;

/// Commit id CodeCommit sends when a branch was created or reset with no
/// prior tip. Signals "resolve the branch tip" rather than a real commit.
pub const ZERO_COMMIT: &str = "0000000000000000000000000000000000000000";

/// Branch used when the reference yields no usable branch name.
pub const DEFAULT_BRANCH: &str = "master";

/// CodeCommit push notification as delivered to the trigger.
#[derive(Debug, Clone, Deserialize)]
pub struct PushEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<PushRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PushRecord {
    pub codecommit: CodeCommitDetail,
    #[serde(rename = "awsRegion")]
    pub aws_region: String,
    #[serde(rename = "eventSourceARN")]
    pub event_source_arn: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CodeCommitDetail {
    #[serde(default)]
    pub references: Vec<ReferenceUpdate>,
}

/// One updated reference within a push record.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceUpdate {
    /// Pushed commit id; `None` or [`ZERO_COMMIT`] means the branch tip
    /// must be looked up instead.
    pub commit: Option<String>,
    /// Full ref name, e.g. `refs/heads/main`.
    #[serde(rename = "ref")]
    pub ref_name: String,
}

impl PushEvent {
    /// First record of the event. Notifications carry exactly one; an
    /// empty record list is a malformed event.
    pub fn first_record(&self) -> crate::Result<&PushRecord> {
        self.records.first().ok_or(crate::Error::NoRecords)
    }
}

impl PushRecord {
    /// First reference update of the record.
    pub fn first_reference(&self) -> crate::Result<&ReferenceUpdate> {
        self.codecommit
            .references
            .first()
            .ok_or(crate::Error::NoReferences)
    }

    /// Repository name, the final `:` field of the event source ARN.
    pub fn repository_name(&self) -> &str {
        self.event_source_arn
            .rsplit(':')
            .next()
            .unwrap_or(&self.event_source_arn)
    }

    /// Account id, field 4 of the event source ARN
    /// (`arn:aws:codecommit:<region>:<accountId>:<repoName>`).
    pub fn account_id(&self) -> crate::Result<&str> {
        self.event_source_arn
            .split(':')
            .nth(4)
            .ok_or_else(|| crate::Error::MalformedSourceArn {
                arn: self.event_source_arn.clone(),
            })
    }
}

impl ReferenceUpdate {
    /// Commit id as pushed, unless it is absent or the all-zero sentinel.
    pub fn pushed_commit(&self) -> Option<&str> {
        match self.commit.as_deref() {
            None => None,
            Some(ZERO_COMMIT) => None,
            Some(id) => Some(id),
        }
    }

    /// Branch name: the final path segment of the ref, falling back to
    /// [`DEFAULT_BRANCH`] when the ref has no usable segment.
    pub fn branch_name(&self) -> &str {
        match self.ref_name.rsplit('/').next() {
            Some(segment) if !segment.is_empty() => segment,
            _ => DEFAULT_BRANCH,
        }
    }
}
