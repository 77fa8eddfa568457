use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `complymap.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so
/// forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ComplymapConfigV1 {
    /// Optional schema string for tooling (`complymap.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Ordered standard identifiers (or glob patterns) to evaluate.
    #[serde(default)]
    pub identifiers: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// When to fail the run: `fail` or `unknown` (default per profile).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<String>,

    /// How many rule outcomes to emit before truncating the list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,

    /// Worker threads for rule evaluation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_workers: Option<u32>,
}
