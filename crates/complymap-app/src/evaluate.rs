//! The `evaluate` use case: resolve identifiers, run rules, produce a
//! report.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use complymap_domain::policy::dedup_requested;
use complymap_settings::{Overrides, ResolvedConfig, expand_patterns};
use complymap_types::{EvalReport, SCHEMA_REPORT_V1, StandardId, ToolMeta};
use time::OffsetDateTime;

/// Input for the evaluate use case.
#[derive(Clone, Debug)]
pub struct EvaluateInput<'a> {
    /// Directory of standard catalog files.
    pub catalog_dir: &'a Utf8Path,
    /// Rulepack files to load.
    pub rulepacks: &'a [Utf8PathBuf],
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    /// Environment snapshot file (JSON object).
    pub snapshot_path: &'a Utf8Path,
}

/// Output from the evaluate use case.
#[derive(Clone, Debug)]
pub struct EvaluateOutput {
    /// The generated report.
    pub report: EvalReport,
    /// The resolved configuration used.
    pub resolved: ResolvedConfig,
}

/// Run the evaluate use case: parse config, load catalogs and rules, map
/// identifiers, evaluate against the snapshot, produce a report.
pub fn run_evaluate(input: EvaluateInput<'_>) -> anyhow::Result<EvaluateOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        complymap_settings::ComplymapConfigV1::default()
    } else {
        complymap_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let resolved =
        complymap_settings::resolve_config(cfg, input.overrides.clone()).context("resolve config")?;

    let registry =
        complymap_catalog::load_standards(input.catalog_dir).context("load standard catalogs")?;
    let rules =
        complymap_catalog::load_rulepacks(&registry, input.rulepacks).context("load rulepacks")?;
    let snapshot =
        complymap_catalog::load_snapshot(input.snapshot_path).context("load snapshot")?;

    // Expand patterns against the registry. A pattern that matches nothing
    // is carried through verbatim so the engine reports it per item.
    let expansion = expand_patterns(&registry, &resolved.identifiers);
    let mut requested: Vec<StandardId> = Vec::new();
    for m in expansion {
        if m.ids.is_empty() {
            requested.push(StandardId::new(&m.pattern));
        } else {
            requested.extend(m.ids);
        }
    }
    let requested = dedup_requested(requested);

    let domain_report =
        complymap_domain::evaluate(&registry, &rules, &requested, &snapshot, &resolved.effective);

    let finished_at = OffsetDateTime::now_utc();

    let report = EvalReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "complymap".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at,
        verdict: domain_report.verdict,
        counts: domain_report.counts,
        results: domain_report.results,
        outcomes: domain_report.outcomes,
        data: domain_report.data,
    };

    Ok(EvaluateOutput { report, resolved })
}
