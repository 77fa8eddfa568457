use crate::RenderableReport;
use crate::model::status_word;
use std::collections::BTreeMap;

/// Render the report as CSV: one row per identifier/rule pair.
///
/// Identifiers without rules still get a row with empty rule columns so
/// every requested identifier appears in the export.
pub fn render_csv(report: &RenderableReport) -> String {
    let outcomes: BTreeMap<&str, &crate::RenderableOutcome> = report
        .outcomes
        .iter()
        .map(|o| (o.rule_id.as_str(), o))
        .collect();

    let mut out = String::new();
    out.push_str("identifier,status,rule_id,rule_status,reason\n");

    for entry in &report.entries {
        if entry.rule_ids.is_empty() {
            out.push_str(&format!(
                "{},{},,,{}\n",
                escape(&entry.identifier),
                status_word(entry.status),
                escape(entry.note.as_deref().unwrap_or_default())
            ));
            continue;
        }

        for rule_id in &entry.rule_ids {
            let (rule_status, reason) = match outcomes.get(rule_id.as_str()) {
                Some(o) => (status_word(o.status), o.reason.as_str()),
                None => ("", ""),
            };
            out.push_str(&format!(
                "{},{},{},{},{}\n",
                escape(&entry.identifier),
                status_word(entry.status),
                escape(rule_id),
                rule_status,
                escape(reason)
            ));
        }
    }

    out
}

/// Quote a field when it contains a comma, quote, or newline.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
