//! Core types for the pioe image builder
//!
//! This crate provides the fundamental data structures and error types
//! used throughout the pioe-images project.

pub mod error;
pub mod variant;

pub use error::{Error, Result};
pub use variant::{BuildResult, BuildSummary, Variant, container_name, image_name};
