//! Config parsing and profile/preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves
//! configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::ComplymapConfigV1;
pub use resolve::{Overrides, PatternMatch, ResolvedConfig, expand_patterns};

/// Parse `complymap.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<ComplymapConfigV1> {
    let cfg: ComplymapConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config used by the engine (profiles + overrides).
pub fn resolve_config(
    cfg: ComplymapConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
