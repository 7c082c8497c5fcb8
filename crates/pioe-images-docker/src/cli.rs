//! Docker CLI trait and process-driving implementation

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::command::DockerCommand;
use crate::error::{DockerError, Result};

/// Parameters for running an already-built image as a container
#[derive(Debug, Clone)]
pub struct RunSpec {
    /// Image tag to run
    pub image: String,
    /// Container name
    pub container_name: String,
    /// Volume mounts in `host:container` form
    pub volumes: Vec<String>,
}

/// Docker operations needed by the build and test pipelines
#[async_trait]
pub trait DockerCliTrait: Send + Sync {
    /// Build an image from a recipe file, with the given build context
    async fn build_image(&self, tag: &str, recipe_file: &Path, context_dir: &Path) -> Result<()>;

    /// Force-remove an image
    async fn remove_image(&self, tag: &str) -> Result<()>;

    /// Remove a container
    async fn remove_container(&self, name: &str) -> Result<()>;

    /// Create and run a container, waiting for it to exit
    async fn run_container(&self, spec: &RunSpec) -> Result<()>;
}

/// Docker CLI driver invoking the `docker` binary
///
/// Every operation waits for the child process to exit; a hung docker
/// command therefore hangs the caller. No timeout is imposed here.
#[derive(Debug, Clone)]
pub struct DockerCli {
    program: String,
}

impl DockerCli {
    /// Create a driver for the `docker` binary on PATH
    pub fn new() -> Self {
        Self { program: "docker".to_string() }
    }

    /// Create a driver for a specific binary (used by tests)
    pub fn with_program(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    async fn run_checked(&self, cmd: DockerCommand, cwd: Option<&Path>) -> Result<()> {
        let command_line = cmd.display();
        debug!("Running: {}", command_line);

        let mut command = tokio::process::Command::new(&self.program);
        command.args(cmd.args());
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        let status = command
            .status()
            .await
            .map_err(|e| DockerError::Spawn { command: command_line.clone(), source: e })?;

        if status.success() {
            Ok(())
        } else {
            Err(DockerError::NonZeroExit {
                command: command_line,
                code: status.code().unwrap_or(-1),
            })
        }
    }
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DockerCliTrait for DockerCli {
    async fn build_image(&self, tag: &str, recipe_file: &Path, context_dir: &Path) -> Result<()> {
        let cmd = DockerCommand::build(tag, recipe_file)?;
        self.run_checked(cmd, Some(context_dir)).await
    }

    async fn remove_image(&self, tag: &str) -> Result<()> {
        let cmd = DockerCommand::remove_image(tag)?;
        self.run_checked(cmd, None).await
    }

    async fn remove_container(&self, name: &str) -> Result<()> {
        let cmd = DockerCommand::remove_container(name)?;
        self.run_checked(cmd, None).await
    }

    async fn run_container(&self, spec: &RunSpec) -> Result<()> {
        let cmd = DockerCommand::run(&spec.image, &spec.container_name, &spec.volumes)?;
        self.run_checked(cmd, None).await
    }
}
