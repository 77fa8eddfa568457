//! The `gap` use case: which required controls lack any rule coverage.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use complymap_domain::{DomainError, RuleSet, StandardRegistry};
use complymap_types::{GapReport, StandardId};

/// Input for the gap use case.
#[derive(Clone, Debug)]
pub struct GapInput<'a> {
    pub catalog_dir: &'a Utf8Path,
    pub rulepacks: &'a [Utf8PathBuf],
    /// Standard family to audit (e.g. `CIS-AWS`).
    pub standard: &'a str,
    /// Control sections required within that family (e.g. `1.4`).
    pub required_controls: &'a [String],
}

/// Compute the coverage gap for a standard family.
pub fn run_gap(input: GapInput<'_>) -> anyhow::Result<GapReport> {
    let registry =
        complymap_catalog::load_standards(input.catalog_dir).context("load standard catalogs")?;
    let rules =
        complymap_catalog::load_rulepacks(&registry, input.rulepacks).context("load rulepacks")?;

    compute_gap(&registry, &rules, input.standard, input.required_controls).map_err(Into::into)
}

fn compute_gap(
    registry: &StandardRegistry,
    rules: &RuleSet,
    standard: &str,
    required_controls: &[String],
) -> Result<GapReport, DomainError> {
    if registry.family(standard).is_none() {
        return Err(DomainError::UnknownIdentifier(StandardId::new(standard)));
    }

    let mut implemented = Vec::new();
    let mut missing = Vec::new();
    for control in required_controls {
        let id = StandardId::new(format!("{standard}-{control}"));
        if registry.contains(&id) && !rules.rules_for(&id).is_empty() {
            implemented.push(control.clone());
        } else {
            missing.push(control.clone());
        }
    }

    // An empty requirement set is trivially covered.
    let coverage_percent = if required_controls.is_empty() {
        100.0
    } else {
        implemented.len() as f64 / required_controls.len() as f64 * 100.0
    };

    Ok(GapReport {
        standard: standard.to_string(),
        required_controls: required_controls.to_vec(),
        implemented_controls: implemented,
        missing_controls: missing,
        coverage_percent,
    })
}
