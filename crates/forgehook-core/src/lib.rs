//! Core types and configuration for forgehook.
//!
//! This crate defines the inbound push notification model ([`PushEvent`]),
//! the change-filter predicate ([`should_trigger_build`]), and the
//! environment-backed configuration ([`TriggerConfig`]).

pub mod config;
pub mod error;
pub mod event;
pub mod filter;

pub use config::TriggerConfig;
pub use error::{Error, Result};
pub use event::{PushEvent, PushRecord, ReferenceUpdate};
pub use filter::{FileChange, should_trigger_build};
