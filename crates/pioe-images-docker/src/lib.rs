//! Docker integration for the pioe image builder
//!
//! This crate drives the `docker` command-line tool through a typed
//! argument-list abstraction. The exit status of each invocation is the
//! sole success signal; no output parsing is attempted.

pub mod cli;
pub mod command;
pub mod error;

pub use cli::{DockerCli, DockerCliTrait, RunSpec};
pub use command::{DockerCommand, validate_name};
pub use error::{DockerError, Result};
