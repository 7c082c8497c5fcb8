//! Test command implementation

use std::path::PathBuf;
use std::sync::Arc;

use color_eyre::eyre::{Context, Result, eyre};
use pioe_images_build::{TestOptions, TestRunner};
use pioe_images_config::Config;
use pioe_images_docker::DockerCli;
use tracing::info;

/// Test command implementation
pub struct TestCommand {
    config_path: PathBuf,
    with_packages: bool,
}

impl TestCommand {
    pub fn new(config_path: PathBuf, with_packages: bool) -> Self {
        Self { config_path, with_packages }
    }

    pub async fn execute(&self) -> Result<()> {
        let config = Config::from_file(&self.config_path).with_context(|| {
            format!("Failed to load config from {}", self.config_path.display())
        })?;

        let runner = TestRunner::new(Arc::new(DockerCli::new()));
        let options = TestOptions { with_packages: self.with_packages };
        let summary = runner.run(&config, &options).await;

        for failure in summary.failures() {
            eprintln!("Failed on {}", failure.variant.from);
        }

        if summary.succeeded() {
            info!("All {} image tests passed", summary.len());
            Ok(())
        } else {
            Err(eyre!("{} of {} image tests failed", summary.failures().count(), summary.len()))
        }
    }
}
