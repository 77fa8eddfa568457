use crate::ids::{RuleId, StandardId};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// Stable schema identifier for complymap reports.
pub const SCHEMA_REPORT_V1: &str = "complymap.report.v1";

/// Outcome status for a rule or an identifier.
///
/// `Unknown` means the predicate could not be decided (missing data, type
/// mismatch, no mapped rules) and is distinct from a definitive `Fail`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Fail,
    Unknown,
}

/// Control severity as declared in standard catalogs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

/// Overall run verdict. Maps cleanly to CI signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Unknown,
    Fail,
}

/// Result of evaluating one policy rule against a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RuleOutcome {
    pub rule_id: RuleId,
    pub status: Status,
    pub reason: String,

    /// Stable identifier intended for dedup and trending. A hash of:
    /// `rule_id + status + salient clause key`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

/// Per-identifier result: status plus the rules that contributed to it.
///
/// Created fresh per evaluation run and never mutated afterwards. A status
/// other than `unknown` always references at least one rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ControlResult {
    pub status: Status,
    pub rule_ids: Vec<RuleId>,

    /// Per-item diagnostic (unknown identifier, no mapped rules).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StatusCounts {
    pub pass: u32,
    pub fail: u32,
    pub unknown: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Complymap-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct EvalData {
    pub profile: String,

    pub identifiers_requested: u32,
    pub identifiers_resolved: u32,
    pub rules_evaluated: u32,

    pub results_total: u32,
    pub results_emitted: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncated_reason: Option<String>,
}

/// A generic report envelope.
///
/// Keeping this generic allows complymap to embed tool-specific data while
/// still enforcing a stable outer shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = EvalData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    pub counts: StatusCounts,
    pub results: BTreeMap<StandardId, ControlResult>,
    pub outcomes: Vec<RuleOutcome>,
    pub data: TData,
}

pub type EvalReport = ReportEnvelope<EvalData>;

/// Coverage gap between required controls and controls backed by rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GapReport {
    pub standard: String,
    pub required_controls: Vec<String>,
    pub implemented_controls: Vec<String>,
    pub missing_controls: Vec<String>,
    pub coverage_percent: f64,
}
