//! Typed docker command construction
//!
//! Commands are built as explicit argument lists rather than shell
//! strings, so image names and paths can never corrupt command parsing.
//! Names used as tags or container names are validated before use.

use std::path::Path;

use crate::error::{DockerError, Result};

/// Validate an image tag or container name before passing it to docker
///
/// Accepts the docker reference charset (ASCII alphanumerics plus
/// `-`, `_` and `.`) and rejects names that could be parsed as a flag.
pub fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && !name.starts_with('-')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(DockerError::InvalidName { name: name.to_string() })
    }
}

/// One docker invocation, as a typed argument list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockerCommand {
    args: Vec<String>,
}

impl DockerCommand {
    /// `docker build -t <tag> -f <file> .`
    pub fn build(tag: &str, file: &Path) -> Result<Self> {
        validate_name(tag)?;
        Ok(Self {
            args: vec![
                "build".to_string(),
                "-t".to_string(),
                tag.to_string(),
                "-f".to_string(),
                file.to_string_lossy().into_owned(),
                ".".to_string(),
            ],
        })
    }

    /// `docker rmi -f <tag>`
    pub fn remove_image(tag: &str) -> Result<Self> {
        validate_name(tag)?;
        Ok(Self { args: vec!["rmi".to_string(), "-f".to_string(), tag.to_string()] })
    }

    /// `docker rm <name>`
    pub fn remove_container(name: &str) -> Result<Self> {
        validate_name(name)?;
        Ok(Self { args: vec!["rm".to_string(), name.to_string()] })
    }

    /// `docker run --rm [-v <mount>]... -t --name <name> <image>`
    pub fn run(image: &str, container_name: &str, volumes: &[String]) -> Result<Self> {
        validate_name(image)?;
        validate_name(container_name)?;

        let mut args = vec!["run".to_string(), "--rm".to_string()];
        for volume in volumes {
            args.push("-v".to_string());
            args.push(volume.clone());
        }
        args.push("-t".to_string());
        args.push("--name".to_string());
        args.push(container_name.to_string());
        args.push(image.to_string());

        Ok(Self { args })
    }

    /// Arguments passed to the docker binary
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Human-readable form for logs and diagnostics
    pub fn display(&self) -> String {
        format!("docker {}", self.args.join(" "))
    }
}
