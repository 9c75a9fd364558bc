//! Push-driven build trigger for forgehook.
//!
//! # Invocation pipeline
//!
//! ```text
//! push notification
//!   1. Resolve commit ── pushed id, or branch tip when null/all-zero
//!   2. Parent         ── first parent, absent for the initial commit
//!   3. Differences    ── paginated diff (empty tree when no parent)
//!   4. Decide         ── any tracked extension or Dockerfile changed?
//!   5. Build          ── codebuild start-build, once, no idempotency key
//! ```
//!
//! Every step is a synchronous call to CodeCommit or CodeBuild; any
//! failure aborts the whole invocation and propagates to the caller.

pub mod handler;

pub use handler::{ChangeTrigger, SUCCESS_MARKER, TriggerError, TriggerOutcome};
