use crate::{model::ComplymapConfigV1, presets};
use anyhow::Context;
use complymap_domain::StandardRegistry;
use complymap_domain::policy::{EffectiveConfig, FailOn};
use complymap_types::StandardId;
use globset::Glob;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub max_results: Option<u32>,
    pub max_workers: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
    /// Ordered identifier strings/patterns from the config, deduplicated
    /// preserving first occurrence.
    pub identifiers: Vec<String>,
}

pub fn resolve_config(
    cfg: ComplymapConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());

    let mut effective = presets::preset(&profile);

    if let Some(mr) = overrides.max_results.or(cfg.max_results) {
        effective.max_results = mr as usize;
    }
    if let Some(mw) = overrides.max_workers.or(cfg.max_workers) {
        effective.max_workers = Some(mw as usize);
    }

    // fail_on override from config
    if let Some(fail_on_s) = cfg.fail_on.as_deref() {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    validate_patterns(&cfg.identifiers)?;

    let mut identifiers: Vec<String> = Vec::new();
    for id in cfg.identifiers {
        if !identifiers.contains(&id) {
            identifiers.push(id);
        }
    }

    Ok(ResolvedConfig {
        effective,
        identifiers,
    })
}

/// An identifier pattern with its registry matches, in request order.
/// Empty `ids` means the pattern matched nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternMatch {
    pub pattern: String,
    pub ids: Vec<StandardId>,
}

/// Expand identifier patterns against the registry.
///
/// A literal match wins outright; otherwise the pattern is compiled as a
/// glob and matched against every registered identifier.
pub fn expand_patterns(registry: &StandardRegistry, patterns: &[String]) -> Vec<PatternMatch> {
    patterns
        .iter()
        .map(|pattern| {
            let literal = StandardId::new(pattern);
            if registry.contains(&literal) {
                return PatternMatch {
                    pattern: pattern.clone(),
                    ids: vec![literal],
                };
            }

            // Patterns were validated at resolution time; a stray invalid
            // glob simply matches nothing.
            let ids = match Glob::new(pattern) {
                Ok(glob) => {
                    let matcher = glob.compile_matcher();
                    registry
                        .ids()
                        .filter(|id| matcher.is_match(id.as_str()))
                        .cloned()
                        .collect()
                }
                Err(_) => Vec::new(),
            };
            PatternMatch {
                pattern: pattern.clone(),
                ids,
            }
        })
        .collect()
}

fn validate_patterns(patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern).with_context(|| format!("invalid identifier pattern: {pattern}"))?;
    }
    Ok(())
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "fail" => Ok(FailOn::Fail),
        "unknown" => Ok(FailOn::Unknown),
        other => anyhow::bail!("unknown fail_on: {other} (expected fail|unknown)"),
    }
}
