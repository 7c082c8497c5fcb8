//! Build variants and per-variant results
//!
//! A variant is one concrete base-image-to-build pairing derived from a
//! family entry in the configuration. Its image name is a pure function
//! of the base-image id, so concurrent builds never collide on the same
//! tag or recipe file as long as the resolved variant list is free of
//! duplicate image names.

/// Tag prefix applied to every built image
pub const IMAGE_PREFIX: &str = "pioe-";

/// Name prefix applied to every test container
pub const CONTAINER_PREFIX: &str = "pioe-build-";

/// Derive the image tag for a base-image id
///
/// `:` and `/` are not valid in the final tag component, so both are
/// replaced with `-`. Deterministic: the same `from` always yields the
/// same name.
pub fn image_name(from: &str) -> String {
    format!("{IMAGE_PREFIX}{}", sanitize(from))
}

/// Derive the test container name for a base-image id
pub fn container_name(from: &str) -> String {
    format!("{CONTAINER_PREFIX}{}", sanitize(from))
}

fn sanitize(from: &str) -> String {
    from.replace([':', '/'], "-")
}

/// A single image to build, derived from one family entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    /// Name of the owning family (lookup key, not ownership)
    pub family: String,
    /// The family's run command, handed to the recipe template
    pub run: String,
    /// Base-image id this variant builds from
    pub from: String,
    /// Derived image tag, unique within one resolved variant list
    pub image_name: String,
}

impl Variant {
    /// Create a variant for a family entry, deriving the image name
    pub fn new(
        family: impl Into<String>,
        run: impl Into<String>,
        from: impl Into<String>,
    ) -> Self {
        let from = from.into();
        let image_name = image_name(&from);
        Self { family: family.into(), run: run.into(), from, image_name }
    }

    /// File name of the temporary recipe file for this variant
    pub fn recipe_file_name(&self) -> String {
        format!(".dockerfile.{}", self.image_name)
    }

    /// Name of the container used when testing this variant's image
    pub fn container_name(&self) -> String {
        container_name(&self.from)
    }
}

/// Outcome of one variant's build or test attempt
#[derive(Debug, Clone)]
pub struct BuildResult {
    /// The variant this result belongs to
    pub variant: Variant,
    /// Whether the attempt succeeded
    pub succeeded: bool,
    /// Diagnostic for failed attempts
    pub error: Option<String>,
}

impl BuildResult {
    /// Create a successful result
    pub fn ok(variant: Variant) -> Self {
        Self { variant, succeeded: true, error: None }
    }

    /// Create a failed result with a diagnostic
    pub fn failed(variant: Variant, error: impl Into<String>) -> Self {
        Self { variant, succeeded: false, error: Some(error.into()) }
    }
}

/// Aggregated results of one orchestration run
#[derive(Debug, Clone, Default)]
pub struct BuildSummary {
    results: Vec<BuildResult>,
}

impl BuildSummary {
    /// Record one variant's result
    pub fn push(&mut self, result: BuildResult) {
        self.results.push(result);
    }

    /// All recorded results, in completion order
    pub fn results(&self) -> &[BuildResult] {
        &self.results
    }

    /// Results for variants that failed
    pub fn failures(&self) -> impl Iterator<Item = &BuildResult> {
        self.results.iter().filter(|r| !r.succeeded)
    }

    /// True iff every recorded result succeeded
    pub fn succeeded(&self) -> bool {
        self.results.iter().all(|r| r.succeeded)
    }

    /// Number of recorded results
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True iff no results were recorded
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
