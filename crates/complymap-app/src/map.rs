//! The `map` use case: resolve identifiers to rules without evaluating.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use complymap_domain::mapper;
use complymap_settings::expand_patterns;
use complymap_types::StandardId;

/// Input for the map use case.
#[derive(Clone, Debug)]
pub struct MapInput<'a> {
    pub catalog_dir: &'a Utf8Path,
    pub rulepacks: &'a [Utf8PathBuf],
    /// Identifier strings or glob patterns to resolve.
    pub identifiers: &'a [String],
}

/// Resolve identifiers strictly and return the mapping as pretty JSON.
///
/// Unlike batch evaluation, mapping is strict: an unknown identifier (or a
/// pattern that matches nothing) is an error.
pub fn run_map(input: MapInput<'_>) -> anyhow::Result<String> {
    let registry =
        complymap_catalog::load_standards(input.catalog_dir).context("load standard catalogs")?;
    let rules =
        complymap_catalog::load_rulepacks(&registry, input.rulepacks).context("load rulepacks")?;

    let expansion = expand_patterns(&registry, input.identifiers);
    let mut requested: Vec<StandardId> = Vec::new();
    for m in expansion {
        if m.ids.is_empty() {
            requested.push(StandardId::new(&m.pattern));
        } else {
            requested.extend(m.ids);
        }
    }

    let mapping = mapper::resolve(&registry, &rules, &requested)?;
    serde_json::to_string_pretty(&mapping).context("serialize mapping")
}
