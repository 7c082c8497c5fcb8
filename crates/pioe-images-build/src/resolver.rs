//! Variant resolution
//!
//! Merges the configured family defaults with command-line selectors
//! into the concrete, ordered list of variants to build. Selectors
//! augment a family's defaults rather than replacing them: the declared
//! `from` list is always appended after any overrides.

use std::collections::HashSet;

use indexmap::IndexMap;
use pioe_images_config::Config;
use pioe_images_core::{Error, Variant};
use regex::Regex;
use tracing::debug;

use crate::error::Result;

/// Group selector tokens of the form `<family>-<base-image>` by family
///
/// Tokens starting with `-` and tokens without the separator pattern
/// are silently skipped, mirroring permissive flag handling. Order is
/// preserved within each family.
pub fn parse_selectors(args: &[String]) -> IndexMap<String, Vec<String>> {
    let selector_re = Regex::new(r"^(\w+)-(.+)$").expect("Invalid regex");

    let mut overrides: IndexMap<String, Vec<String>> = IndexMap::new();
    for arg in args {
        if arg.starts_with('-') {
            continue;
        }

        let Some(captures) = selector_re.captures(arg) else {
            debug!("Skipping unrecognized selector: {}", arg);
            continue;
        };

        overrides
            .entry(captures[1].to_string())
            .or_default()
            .push(captures[2].to_string());
    }

    overrides
}

/// Resolve the full variant list for this run
///
/// For each family, in declared order, the effective base-image list is
/// the family's overrides followed by its declared defaults. Selectors
/// naming unknown families never meet a declared family and are
/// dropped. Fails if two resolved variants derive the same image name,
/// since those builds would overwrite each other's recipe file and tag.
pub fn resolve(config: &Config, args: &[String]) -> Result<Vec<Variant>> {
    let overrides = parse_selectors(args);

    let mut variants = Vec::new();
    for (name, family) in &config.families {
        let mut froms: Vec<&str> = overrides
            .get(name)
            .map(|list| list.iter().map(String::as_str).collect())
            .unwrap_or_default();
        froms.extend(family.from.iter().map(String::as_str));

        for from in froms {
            variants.push(Variant::new(name, &family.run, from));
        }
    }

    let mut seen = HashSet::new();
    for variant in &variants {
        if !seen.insert(variant.image_name.as_str()) {
            return Err(Error::config(format!(
                "Duplicate image name {} (from {:?}); concurrent builds would collide",
                variant.image_name, variant.from
            ))
            .into());
        }
    }

    Ok(variants)
}

#[cfg(test)]
mod tests {
    use pioe_images_config::FamilyConfig;

    use super::*;

    fn config(families: &[(&str, &str, &[&str])]) -> Config {
        Config {
            families: families
                .iter()
                .map(|(name, run, from)| {
                    (
                        name.to_string(),
                        FamilyConfig {
                            run: run.to_string(),
                            from: from.iter().map(|s| s.to_string()).collect(),
                        },
                    )
                })
                .collect(),
        }
    }

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults_only() {
        let config = config(&[("web", "build.sh", &["debian:10"])]);
        let variants = resolve(&config, &[]).unwrap();

        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].from, "debian:10");
        assert_eq!(variants[0].image_name, "pioe-debian-10");
        assert_eq!(variants[0].family, "web");
        assert_eq!(variants[0].run, "build.sh");
    }

    #[test]
    fn test_overrides_augment_defaults() {
        let config = config(&[("web", "build.sh", &["debian:10"])]);
        let variants = resolve(&config, &args(&["web-ubuntu:20"])).unwrap();

        let froms: Vec<_> = variants.iter().map(|v| v.from.as_str()).collect();
        assert_eq!(froms, vec!["ubuntu:20", "debian:10"]);
    }

    #[test]
    fn test_family_order_then_list_order() {
        let config = config(&[
            ("web", "w.sh", &["debian:10", "debian:11"]),
            ("db", "d.sh", &["postgres:16"]),
        ]);
        let variants =
            resolve(&config, &args(&["db-postgres:15", "web-alpine:3.19"])).unwrap();

        let froms: Vec<_> = variants.iter().map(|v| v.from.as_str()).collect();
        assert_eq!(
            froms,
            vec!["alpine:3.19", "debian:10", "debian:11", "postgres:15", "postgres:16"]
        );
    }

    #[test]
    fn test_variant_count_property() {
        let config = config(&[("web", "w.sh", &["debian:10"]), ("db", "d.sh", &["postgres:16"])]);
        let variants = resolve(&config, &args(&["web-a:1", "web-b:2", "db-c:3"])).unwrap();

        // sum over families of (|overrides| + 1) for single-default families
        assert_eq!(variants.len(), (2 + 1) + (1 + 1));
    }

    #[test]
    fn test_flags_and_malformed_tokens_skipped() {
        let config = config(&[("web", "w.sh", &["debian:10"])]);
        let variants =
            resolve(&config, &args(&["--noop", "-v", "nodash", "web-ubuntu:20"])).unwrap();

        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].from, "ubuntu:20");
    }

    #[test]
    fn test_unknown_family_selector_ignored() {
        let config = config(&[("web", "w.sh", &["debian:10"])]);
        let variants = resolve(&config, &args(&["mail-alpine:3.19"])).unwrap();

        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].from, "debian:10");
    }

    #[test]
    fn test_selector_splits_on_first_dash() {
        let overrides = parse_selectors(&args(&["web-ubuntu-20.04"]));
        assert_eq!(overrides["web"], vec!["ubuntu-20.04"]);
    }

    #[test]
    fn test_image_name_collision_rejected() {
        // "debian:10" and "debian-10" both derive pioe-debian-10
        let config = config(&[("web", "w.sh", &["debian:10"])]);
        let err = resolve(&config, &args(&["web-debian-10"])).unwrap_err();
        assert!(err.to_string().contains("pioe-debian-10"));
    }
}
