//! Explain registry for report and error codes.
//!
//! Maps stable codes to human-readable explanations with remediation
//! guidance.

use crate::ids;

/// Explanation entry for a code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the code.
    pub title: &'static str,
    /// What the code means and why it is reported.
    pub description: &'static str,
    /// How to resolve it.
    pub remediation: &'static str,
    /// Before/after configuration examples.
    pub examples: ExamplePair,
}

/// Before and after configuration examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Input that would trigger the code.
    pub before: &'static str,
    /// Input that avoids it.
    pub after: &'static str,
}

/// Look up an explanation by code.
///
/// Returns `None` if the code is not recognized.
pub fn lookup_explanation(code: &str) -> Option<Explanation> {
    match code {
        ids::CODE_UNKNOWN_IDENTIFIER => Some(explain_unknown_identifier()),
        ids::CODE_DUPLICATE_IDENTIFIER => Some(explain_duplicate_identifier()),
        ids::CODE_DUPLICATE_RULE => Some(explain_duplicate_rule()),
        ids::CODE_RULE_UNAVAILABLE => Some(explain_rule_unavailable()),
        ids::CODE_UNMAPPED_IDENTIFIER => Some(explain_unmapped_identifier()),
        _ => None,
    }
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_UNKNOWN_IDENTIFIER,
        ids::CODE_DUPLICATE_IDENTIFIER,
        ids::CODE_DUPLICATE_RULE,
        ids::CODE_RULE_UNAVAILABLE,
        ids::CODE_UNMAPPED_IDENTIFIER,
    ]
}

fn explain_unknown_identifier() -> Explanation {
    Explanation {
        title: "Unknown Identifier",
        description: "\
A requested standard identifier is not present in the registry.

This usually means:
- The identifier is misspelled (identifiers are case-sensitive)
- The standard catalog that defines it was not loaded
- A glob pattern matched nothing

Unknown identifiers are reported per item: the rest of the batch still
evaluates normally, and the affected identifier is reported as `unknown`.",
        remediation: "\
Check the identifier against the loaded catalogs:

    complymap map 'CIS-AWS-*'

Then either fix the spelling in complymap.toml or add the standard
catalog file that defines the identifier to the catalog directory.",
        examples: ExamplePair {
            before: r#"identifiers = ["CIS-AWS-1.99"]"#,
            after: r#"identifiers = ["CIS-AWS-1.4"]"#,
        },
    }
}

fn explain_duplicate_identifier() -> Explanation {
    Explanation {
        title: "Duplicate Identifier",
        description: "\
A standard identifier was registered twice.

Registry entries are immutable once created; a second registration with
the same identifier is rejected rather than silently overwriting the
first. This typically happens when two catalog files declare the same
standard id, or one file repeats a control id.",
        remediation: "\
Remove the duplicate control entry, or give the colliding standards
distinct ids. Each `<standard-id>-<control-id>` pair must be unique
across the whole catalog directory.",
        examples: ExamplePair {
            before: r#"[[controls]]
id = "1.4"
title = "Ensure MFA is enabled"

[[controls]]
id = "1.4"
title = "Ensure root keys are removed""#,
            after: r#"[[controls]]
id = "1.4"
title = "Ensure MFA is enabled"

[[controls]]
id = "1.5"
title = "Ensure root keys are removed""#,
        },
    }
}

fn explain_duplicate_rule() -> Explanation {
    Explanation {
        title: "Duplicate Rule",
        description: "\
A policy rule id was registered twice.

Rules are immutable after registration, so a rulepack that reuses an id
is rejected at load time instead of replacing the earlier rule.",
        remediation: "\
Rename one of the colliding rules. Rule ids must be unique across all
loaded rulepacks.",
        examples: ExamplePair {
            before: r#"[[rules]]
id = "iam-mfa"
satisfies = ["CIS-AWS-1.4"]

[[rules]]
id = "iam-mfa"
satisfies = ["NIST-800-53-IA-2"]"#,
            after: r#"[[rules]]
id = "iam-mfa"
satisfies = ["CIS-AWS-1.4"]

[[rules]]
id = "iam-mfa-nist"
satisfies = ["NIST-800-53-IA-2"]"#,
        },
    }
}

fn explain_rule_unavailable() -> Explanation {
    Explanation {
        title: "Rule Unavailable",
        description: "\
A rule's predicate could not be decided against the snapshot.

Common causes:
- A check references a key that is missing from the snapshot
- A comparison found a value of the wrong type (e.g. `gte` on a string)

The rule is reported as `unknown` for this run only. Sibling rules are
unaffected, and the batch never aborts because one predicate is
undecidable.",
        remediation: "\
Extend the snapshot collector to emit the missing key, or adjust the
check to match the collected shape. `exists` checks never become
`unknown` and can be used to guard optional data.",
        examples: ExamplePair {
            before: r#"[[rules.checks]]
key = "iam.mfa_enabled"
op = "eq"
value = true
# snapshot has no "iam.mfa_enabled" key"#,
            after: r#"[[rules.checks]]
key = "iam.mfa_enabled"
op = "exists"

[[rules.checks]]
key = "iam.mfa_enabled"
op = "eq"
value = true"#,
        },
    }
}

fn explain_unmapped_identifier() -> Explanation {
    Explanation {
        title: "Unmapped Identifier",
        description: "\
A registered identifier resolved to zero policy rules.

The identifier exists in the registry, but no loaded rulepack declares a
rule that satisfies it, so nothing can be checked and the identifier is
reported as `unknown` with an empty rule list.",
        remediation: "\
Write a rule that satisfies the identifier, or load the rulepack that
contains one:

    [[rules]]
    id = \"my-check\"
    satisfies = [\"CIS-AWS-1.4\"]

Use `complymap gap` to list which required controls are still missing
rules.",
        examples: ExamplePair {
            before: r#"[[rules]]
id = "encryption-at-rest"
satisfies = ["CIS-AWS-2.1"]
# CIS-AWS-1.4 requested but nothing satisfies it"#,
            after: r#"[[rules]]
id = "encryption-at-rest"
satisfies = ["CIS-AWS-2.1"]

[[rules]]
id = "iam-mfa"
satisfies = ["CIS-AWS-1.4"]"#,
        },
    }
}
