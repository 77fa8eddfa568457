use crate::model::status_label;
use crate::{RenderableReport, RenderableVerdict};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Complymap report\n\n");
    let verdict = match report.verdict {
        RenderableVerdict::Pass => "PASS",
        RenderableVerdict::Unknown => "UNKNOWN",
        RenderableVerdict::Fail => "FAIL",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Identifiers: {}\n- Rule outcomes: {} (emitted) / {} (total)\n\n",
        verdict,
        report.data.identifiers_requested,
        report.data.results_emitted,
        report.data.results_total
    ));

    if let Some(r) = &report.data.truncated_reason {
        out.push_str(&format!("> Note: {}\n\n", r));
    }

    if report.entries.is_empty() {
        out.push_str("No identifiers evaluated.\n");
        return out;
    }

    out.push_str("## Identifiers\n\n");
    out.push_str("| Identifier | Status | Rules |\n|---|---|---|\n");
    for entry in &report.entries {
        let rules = if entry.rule_ids.is_empty() {
            entry.note.clone().unwrap_or_default()
        } else {
            entry.rule_ids.join(", ")
        };
        out.push_str(&format!(
            "| `{}` | {} | {} |\n",
            entry.identifier,
            status_label(entry.status),
            rules
        ));
    }

    if !report.outcomes.is_empty() {
        out.push_str("\n## Rule outcomes\n\n");
        for o in &report.outcomes {
            out.push_str(&format!(
                "- [{}] `{}` — {}\n",
                status_label(o.status),
                o.rule_id,
                o.reason
            ));
        }
    }

    out
}
