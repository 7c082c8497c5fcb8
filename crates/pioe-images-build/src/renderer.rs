//! Recipe template rendering
//!
//! Renders the build-recipe template once per variant. The template
//! sees exactly two bindings, `from` and `run`, passed as an explicit
//! parameter struct; nothing else from the caller's environment is in
//! scope. Undefined variables are rendering errors.

use std::path::Path;

use minijinja::{Environment, UndefinedBehavior};
use pioe_images_core::Variant;
use serde::Serialize;

use crate::error::{BuildError, Result};

const TEMPLATE_NAME: &str = "recipe";

/// The only bindings visible to the recipe template
#[derive(Debug, Serialize)]
pub struct RecipeParams<'a> {
    /// Base-image id of the current variant
    pub from: &'a str,
    /// The owning family's run command
    pub run: &'a str,
}

/// Renders the recipe template against a variant's parameters
pub struct RecipeRenderer {
    env: Environment<'static>,
}

impl RecipeRenderer {
    /// Create a renderer from template source text
    pub fn new(source: String) -> Result<Self> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        // The recipe is written to a file verbatim; keep the source's
        // final newline instead of minijinja's default trimming.
        env.set_keep_trailing_newline(true);
        env.add_template_owned(TEMPLATE_NAME.to_string(), source)
            .map_err(|e| BuildError::template(e.to_string()))?;

        Ok(Self { env })
    }

    /// Create a renderer from a template file, read once
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            BuildError::template(format!("Failed to read template {path:?}: {e}"))
        })?;

        Self::new(source)
    }

    /// Render the recipe for one variant
    pub fn render(&self, variant: &Variant) -> Result<String> {
        let template = self
            .env
            .get_template(TEMPLATE_NAME)
            .map_err(|e| BuildError::template(e.to_string()))?;

        template
            .render(RecipeParams { from: &variant.from, run: &variant.run })
            .map_err(|e| BuildError::template(e.to_string()))
    }
}
