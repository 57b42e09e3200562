//! Forgeflow core functionality
//!
//! This crate provides the build-descriptor model and discovery logic for
//! Forgeflow, plus the configuration values the build pipeline carries
//! through a single invocation.

pub mod config;
pub mod descriptor;
pub mod error;

pub use config::{DEFAULT_BUILDER, ForgeConfig, PLATFORMS};
pub use descriptor::{DESCRIPTOR_SUFFIX, Descriptor, discover_descriptors, image_name};
pub use error::{ForgeError, Result};
