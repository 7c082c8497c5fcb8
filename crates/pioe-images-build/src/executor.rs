//! Build executor for one variant
//!
//! Writes the rendered recipe to a per-variant temporary file, drives
//! the docker build and removes the file again on every exit path. A
//! failed build is reported through the returned `BuildResult`, never
//! as an `Err`, so one variant's failure cannot abort its siblings.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pioe_images_core::{BuildResult, Variant};
use pioe_images_docker::DockerCliTrait;
use tracing::{debug, info, warn};

use crate::error::Result;

/// Build executor configuration
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Build context directory, also where recipe files are written
    pub context_dir: PathBuf,
    /// Remove a stale image before building (failure ignored)
    pub remove_existing: bool,
    /// Render and write recipe files but skip all docker invocations
    pub dry_run: bool,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self { context_dir: PathBuf::from("."), remove_existing: true, dry_run: false }
    }
}

/// Build executor for running docker builds
pub struct BuildExecutor {
    config: ExecutorConfig,
    docker: Arc<dyn DockerCliTrait>,
}

impl BuildExecutor {
    /// Create a new build executor
    pub fn new(config: ExecutorConfig, docker: Arc<dyn DockerCliTrait>) -> Self {
        Self { config, docker }
    }

    /// Build one variant from its rendered recipe text
    ///
    /// The recipe file is keyed by the variant's image name, so
    /// concurrent executions never collide on the same path.
    pub async fn build(&self, variant: &Variant, recipe: &str) -> BuildResult {
        let recipe_path = self.config.context_dir.join(variant.recipe_file_name());

        if let Err(e) = tokio::fs::write(&recipe_path, recipe).await {
            return BuildResult::failed(
                variant.clone(),
                format!("Failed to write recipe file {}: {e}", recipe_path.display()),
            );
        }

        let outcome = self.run_build(variant, &recipe_path).await;

        // The recipe file must not outlive the attempt, whatever the
        // build outcome was.
        if let Err(e) = tokio::fs::remove_file(&recipe_path).await {
            warn!("Failed to remove recipe file {}: {}", recipe_path.display(), e);
        }

        match outcome {
            Ok(()) => {
                info!("Built {}", variant.image_name);
                BuildResult::ok(variant.clone())
            }
            Err(e) => {
                warn!("Build failed for {}: {}", variant.image_name, e);
                BuildResult::failed(variant.clone(), e.to_string())
            }
        }
    }

    async fn run_build(&self, variant: &Variant, recipe_path: &Path) -> Result<()> {
        if self.config.dry_run {
            info!("Dry run: skipping docker build for {}", variant.image_name);
            return Ok(());
        }

        if self.config.remove_existing {
            // The image may simply not exist yet.
            if let Err(e) = self.docker.remove_image(&variant.image_name).await {
                debug!("Ignoring failure to remove image {}: {}", variant.image_name, e);
            }
        }

        self.docker
            .build_image(&variant.image_name, recipe_path, &self.config.context_dir)
            .await?;

        Ok(())
    }
}
