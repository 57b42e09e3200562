//! Forgeflow build pipeline
//!
//! This crate wraps the external collaborators the build delegates to:
//! git repository queries, buildx command composition, and multi-platform
//! builder provisioning. All real work happens in subprocesses; this crate
//! owns their invocation and the structured errors they can produce.

pub mod builder;
pub mod command;
pub mod error;
pub mod git;
pub mod process;

pub use builder::BuilderProvisioner;
pub use command::{BuildCommand, BuildRequest, OutputMode};
pub use error::{BuildError, Result};
pub use git::{GitRepo, TreeState};
pub use process::{Captured, ProcessError};
