//! Build command implementation

use std::path::PathBuf;
use std::sync::Arc;

use color_eyre::eyre::{Context, Result, eyre};
use pioe_images_build::{
    BuildExecutor, ConcurrencyMode, ExecutorConfig, Orchestrator, RecipeRenderer, resolve,
};
use pioe_images_config::Config;
use pioe_images_docker::DockerCli;
use tracing::{info, warn};

/// Build command implementation
pub struct BuildCommand {
    config_path: PathBuf,
    template_path: PathBuf,
    selectors: Vec<String>,
    noop: bool,
    multi: bool,
    keep: bool,
}

impl BuildCommand {
    pub fn new(
        config_path: PathBuf,
        template_path: PathBuf,
        selectors: Vec<String>,
        noop: bool,
        multi: bool,
        keep: bool,
    ) -> Self {
        Self { config_path, template_path, selectors, noop, multi, keep }
    }

    pub async fn execute(&self) -> Result<()> {
        // Load configuration; a config failure aborts before any build
        // starts.
        let config = Config::from_file(&self.config_path).with_context(|| {
            format!("Failed to load config from {}", self.config_path.display())
        })?;

        let variants = resolve(&config, &self.selectors)?;
        info!("Resolved {} variants from {} families", variants.len(), config.families.len());

        let renderer = RecipeRenderer::from_file(&self.template_path).with_context(|| {
            format!("Failed to load template from {}", self.template_path.display())
        })?;

        let executor_config = ExecutorConfig {
            context_dir: PathBuf::from("."),
            remove_existing: !self.keep,
            dry_run: self.noop,
        };
        let executor = BuildExecutor::new(executor_config, Arc::new(DockerCli::new()));
        let orchestrator = Orchestrator::new(renderer, executor);

        let mode = if self.multi { ConcurrencyMode::Concurrent } else { ConcurrencyMode::Sequential };
        let summary = orchestrator.run(variants, mode).await;

        for failure in summary.failures() {
            warn!(
                "Failed on {}: {}",
                failure.variant.from,
                failure.error.as_deref().unwrap_or("unknown error")
            );
        }

        if summary.succeeded() {
            println!("✨ Built {} images successfully", summary.len());
            Ok(())
        } else {
            Err(eyre!(
                "{} of {} image builds failed",
                summary.failures().count(),
                summary.len()
            ))
        }
    }
}
