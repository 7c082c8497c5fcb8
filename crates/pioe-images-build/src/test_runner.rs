//! Test pipeline for already-built images
//!
//! Runs every declared variant's image as a container, sequentially.
//! CLI overrides are a build-time-only concept; only the families'
//! declared `from` lists are exercised here.

use std::sync::Arc;

use pioe_images_config::Config;
use pioe_images_core::{BuildResult, BuildSummary, Variant};
use pioe_images_docker::{DockerCliTrait, RunSpec};
use tracing::{debug, info};

/// Volume mount exposing build artifacts to the host
const PACKAGE_MOUNT: &str = "tmp:/tmp/pkg";

/// Test runner options
///
/// The package volume is always mounted so the container contract is
/// identical with and without artifact retrieval; `with_packages` only
/// announces where the artifacts ended up.
#[derive(Debug, Clone, Default)]
pub struct TestOptions {
    /// Report the package volume location after a successful run
    pub with_packages: bool,
}

/// Runs built images as containers and aggregates failures
pub struct TestRunner {
    docker: Arc<dyn DockerCliTrait>,
}

impl TestRunner {
    /// Create a new test runner
    pub fn new(docker: Arc<dyn DockerCliTrait>) -> Self {
        Self { docker }
    }

    /// Test every declared variant of every family, in declared order
    ///
    /// A stale container from a previous run is removed first; that
    /// removal failing is not a test failure. The container's exit
    /// status is the sole test signal.
    pub async fn run(&self, config: &Config, options: &TestOptions) -> BuildSummary {
        let mut summary = BuildSummary::default();

        for (name, family) in &config.families {
            for from in &family.from {
                let variant = Variant::new(name, &family.run, from);
                let container = variant.container_name();
                info!("Testing {} in container {}", variant.image_name, container);

                // The container may simply not exist.
                if let Err(e) = self.docker.remove_container(&container).await {
                    debug!("Ignoring failure to remove container {}: {}", container, e);
                }

                let spec = RunSpec {
                    image: variant.image_name.clone(),
                    container_name: container,
                    volumes: vec![PACKAGE_MOUNT.to_string()],
                };

                match self.docker.run_container(&spec).await {
                    Ok(()) => summary.push(BuildResult::ok(variant)),
                    Err(e) => summary.push(BuildResult::failed(variant, e.to_string())),
                }
            }
        }

        if options.with_packages {
            info!("Build artifacts are available in the {} volume", PACKAGE_MOUNT);
        }

        summary
    }
}
