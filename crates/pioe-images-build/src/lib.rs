//! Build orchestration for the pioe image builder
//!
//! This crate resolves the configured families into concrete build
//! variants, renders a recipe per variant and fans the builds out to
//! docker, sequentially or concurrently. A separate test runner drives
//! the already-built images as containers.

pub mod error;
pub mod executor;
pub mod orchestrator;
pub mod renderer;
pub mod resolver;
pub mod test_runner;

pub use error::{BuildError, Result};
pub use executor::{BuildExecutor, ExecutorConfig};
pub use orchestrator::{ConcurrencyMode, Orchestrator};
pub use renderer::{RecipeParams, RecipeRenderer};
pub use resolver::{parse_selectors, resolve};
pub use test_runner::{TestOptions, TestRunner};
