//! Catalog adapters: discover and parse standard catalogs, rulepacks, and
//! environment snapshots.
//!
//! This crate is allowed to do filesystem IO. It should not spawn external
//! processes; snapshot collection happens out of band and is supplied as a
//! JSON file by the caller (typically the CLI).

#![forbid(unsafe_code)]

mod discover;
mod parse;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use complymap_domain::{EnvSnapshot, RuleSet, StandardRegistry};

pub use discover::discover_standard_files;

/// Fuzz-friendly API for testing parsing robustness without filesystem
/// access. These functions are designed to never panic on any input.
pub mod fuzz {
    use super::*;

    /// Parse arbitrary text as a standard catalog file.
    ///
    /// Returns `Ok(...)` on valid TOML that can be registered,
    /// `Err(...)` otherwise. **Never panics** on any input.
    pub fn parse_standard(text: &str) -> anyhow::Result<()> {
        let mut registry = StandardRegistry::new();
        parse::register_standard(&mut registry, text)?;
        Ok(())
    }

    /// Parse arbitrary text as a rulepack file against an empty registry.
    ///
    /// Most rules will be rejected (their identifiers are unknown), but the
    /// parse itself must **never panic** on any input.
    pub fn parse_rulepack(text: &str) -> anyhow::Result<()> {
        let registry = StandardRegistry::new();
        let mut rules = RuleSet::new();
        let _ = parse::register_rulepack(&mut rules, &registry, text);
        Ok(())
    }
}

/// Build the standard registry from a directory of `*.toml` catalog files.
pub fn load_standards(catalog_dir: &Utf8Path) -> anyhow::Result<StandardRegistry> {
    let files = discover::discover_standard_files(catalog_dir).context("discover catalogs")?;

    let mut registry = StandardRegistry::new();
    for path in files {
        let text = std::fs::read_to_string(&path).with_context(|| format!("read {}", path))?;
        parse::register_standard(&mut registry, &text)
            .with_context(|| format!("parse {}", path))?;
    }
    Ok(registry)
}

/// Load rulepack files into a rule set validated against the registry.
pub fn load_rulepacks(
    registry: &StandardRegistry,
    paths: &[Utf8PathBuf],
) -> anyhow::Result<RuleSet> {
    let mut rules = RuleSet::new();
    for path in paths {
        let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path))?;
        parse::register_rulepack(&mut rules, registry, &text)
            .with_context(|| format!("parse {}", path))?;
    }
    Ok(rules)
}

/// Load an environment snapshot from a JSON object file.
pub fn load_snapshot(path: &Utf8Path) -> anyhow::Result<EnvSnapshot> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path))?;
    parse::parse_snapshot(&text).with_context(|| format!("parse {}", path))
}
