//! The `explain` use case: look up code documentation.

use complymap_types::explain::{self, Explanation};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    /// Found an explanation for the code.
    Found(Explanation),
    /// Unknown code; includes the available codes.
    NotFound {
        code: String,
        available_codes: &'static [&'static str],
    },
}

/// Look up an explanation for a code.
pub fn run_explain(code: &str) -> ExplainOutput {
    match explain::lookup_explanation(code) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            code: code.to_string(),
            available_codes: explain::all_codes(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(exp.title);
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\n");
    out.push_str("Remediation\n");
    out.push_str("-----------\n");
    out.push_str(exp.remediation);
    out.push_str("\n\n");
    out.push_str("Examples\n");
    out.push_str("--------\n\n");
    out.push_str("Before:\n");
    out.push_str("```toml\n");
    out.push_str(exp.examples.before);
    out.push('\n');
    out.push_str("```\n\n");
    out.push_str("After:\n");
    out.push_str("```toml\n");
    out.push_str(exp.examples.after);
    out.push('\n');
    out.push_str("```\n");

    out
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(code: &str, codes: &[&'static str]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown code: {}\n\n", code));
    out.push_str("Available codes:\n");
    for c in codes {
        out.push_str(&format!("  - {}\n", c));
    }

    out
}
