use anyhow::Context;
use complymap_render::{
    RenderableData, RenderableEntry, RenderableOutcome, RenderableReport, RenderableStatus,
    RenderableVerdict,
};
use complymap_types::{
    ControlResult, EvalData, EvalReport, RuleId, RuleOutcome, SCHEMA_REPORT_V1, Status, StatusCounts,
    ToolMeta, Verdict, ids,
};
use time::OffsetDateTime;

pub fn serialize_report(report: &EvalReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn parse_report_json(text: &str) -> anyhow::Result<EvalReport> {
    let report: EvalReport = serde_json::from_str(text).context("parse report json")?;
    if report.schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {}", report.schema);
    }
    Ok(report)
}

pub fn to_renderable(report: &EvalReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdict::Pass,
            Verdict::Unknown => RenderableVerdict::Unknown,
            Verdict::Fail => RenderableVerdict::Fail,
        },
        entries: report
            .results
            .iter()
            .map(|(id, r)| renderable_entry(id.as_str(), r))
            .collect(),
        outcomes: report.outcomes.iter().map(renderable_outcome).collect(),
        data: RenderableData {
            identifiers_requested: report.data.identifiers_requested,
            rules_evaluated: report.data.rules_evaluated,
            results_emitted: report.data.results_emitted,
            results_total: report.data.results_total,
            truncated_reason: report.data.truncated_reason.clone(),
        },
    }
}

fn renderable_entry(identifier: &str, result: &ControlResult) -> RenderableEntry {
    RenderableEntry {
        identifier: identifier.to_string(),
        status: renderable_status(result.status),
        rule_ids: result.rule_ids.iter().map(|r| r.as_str().to_string()).collect(),
        note: result.note.clone(),
    }
}

fn renderable_outcome(outcome: &RuleOutcome) -> RenderableOutcome {
    RenderableOutcome {
        rule_id: outcome.rule_id.as_str().to_string(),
        status: renderable_status(outcome.status),
        reason: outcome.reason.clone(),
    }
}

fn renderable_status(status: Status) -> RenderableStatus {
    match status {
        Status::Pass => RenderableStatus::Pass,
        Status::Fail => RenderableStatus::Fail,
        Status::Unknown => RenderableStatus::Unknown,
    }
}

/// Report emitted when the tool itself fails before evaluation completes.
pub fn runtime_error_report(message: &str) -> EvalReport {
    let now = OffsetDateTime::now_utc();

    EvalReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "complymap".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at: now,
        finished_at: now,
        verdict: Verdict::Fail,
        counts: StatusCounts::default(),
        results: Default::default(),
        outcomes: vec![RuleOutcome {
            rule_id: RuleId::new(ids::RULE_TOOL_RUNTIME),
            status: Status::Fail,
            reason: message.to_string(),
            fingerprint: None,
        }],
        data: EvalData {
            profile: "unknown".to_string(),
            results_total: 1,
            results_emitted: 1,
            ..EvalData::default()
        },
    }
}

/// Map verdict to exit code: 0 = pass/unknown, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Unknown => 0,
        Verdict::Fail => 2,
    }
}
