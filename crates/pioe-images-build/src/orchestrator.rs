//! Build orchestration logic
//!
//! Fans resolved variants out to the executor under a concurrency
//! policy and aggregates per-variant results. Variants always run to
//! completion; there is no fail-fast and no cancellation of siblings.

use std::sync::Arc;

use futures::future::join_all;
use pioe_images_core::{BuildResult, BuildSummary, Variant};
use tracing::{debug, info};

use crate::executor::BuildExecutor;
use crate::renderer::RecipeRenderer;

/// Scheduling policy for one orchestration run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConcurrencyMode {
    /// Process each variant fully before starting the next
    #[default]
    Sequential,
    /// Launch every variant's render+build pipeline as its own task
    Concurrent,
}

/// Fans variants out to the executor and collects results
pub struct Orchestrator {
    renderer: Arc<RecipeRenderer>,
    executor: Arc<BuildExecutor>,
}

impl Orchestrator {
    /// Create a new orchestrator
    pub fn new(renderer: RecipeRenderer, executor: BuildExecutor) -> Self {
        Self { renderer: Arc::new(renderer), executor: Arc::new(executor) }
    }

    /// Run every variant to completion and aggregate the results
    ///
    /// The summary carries exactly one result per input variant. In
    /// sequential mode results appear in input order; in concurrent
    /// mode they appear in spawn order regardless of completion order,
    /// since each task's result flows back through its own join handle
    /// and no state is shared between tasks.
    pub async fn run(&self, variants: Vec<Variant>, mode: ConcurrencyMode) -> BuildSummary {
        info!("Building {} variants ({:?})", variants.len(), mode);

        let mut summary = BuildSummary::default();
        match mode {
            ConcurrencyMode::Sequential => {
                for variant in variants {
                    summary.push(
                        build_one(Arc::clone(&self.renderer), Arc::clone(&self.executor), variant)
                            .await,
                    );
                }
            }
            ConcurrencyMode::Concurrent => {
                let handles: Vec<_> = variants
                    .into_iter()
                    .map(|variant| {
                        let renderer = Arc::clone(&self.renderer);
                        let executor = Arc::clone(&self.executor);
                        let fallback = variant.clone();
                        let handle =
                            tokio::spawn(async move { build_one(renderer, executor, variant).await });
                        (fallback, handle)
                    })
                    .collect();

                let (fallbacks, handles): (Vec<_>, Vec<_>) = handles.into_iter().unzip();
                for (fallback, joined) in fallbacks.into_iter().zip(join_all(handles).await) {
                    match joined {
                        Ok(result) => summary.push(result),
                        Err(e) => summary
                            .push(BuildResult::failed(fallback, format!("Build task panicked: {e}"))),
                    }
                }
            }
        }

        summary
    }
}

/// Render and build a single variant
///
/// A template error fails this variant only, like any other build
/// failure.
async fn build_one(
    renderer: Arc<RecipeRenderer>,
    executor: Arc<BuildExecutor>,
    variant: Variant,
) -> BuildResult {
    info!("Processing {} ({})", variant.image_name, variant.from);

    match renderer.render(&variant) {
        Ok(recipe) => {
            debug!("Rendered recipe for {}:\n{}", variant.image_name, recipe);
            executor.build(&variant, &recipe).await
        }
        Err(e) => BuildResult::failed(variant, e.to_string()),
    }
}
