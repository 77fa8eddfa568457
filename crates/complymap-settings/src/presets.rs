use complymap_domain::policy::{EffectiveConfig, FailOn};

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into repo
/// config.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "lenient" => lenient_profile(),
        // default
        _ => strict_profile(),
    }
}

fn strict_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "strict".to_string(),
        fail_on: FailOn::Unknown,
        max_results: 500,
        max_workers: None,
    }
}

fn lenient_profile() -> EffectiveConfig {
    // Lenient tolerates undecided identifiers; only definitive failures
    // fail the run.
    EffectiveConfig {
        profile: "lenient".to_string(),
        fail_on: FailOn::Fail,
        max_results: 500,
        max_workers: None,
    }
}
