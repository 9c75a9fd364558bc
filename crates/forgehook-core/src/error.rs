pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("environment variable {name} is not set")]
    MissingEnv { name: &'static str },

    // ── Malformed push event ──
    #[error("push event contains no records")]
    NoRecords,

    #[error("push event record contains no reference updates")]
    NoReferences,

    #[error("event source ARN {arn:?} has no account id field")]
    MalformedSourceArn { arn: String },
}
