use anyhow::Context;
use complymap_domain::{
    CheckExpr, CheckOp, EnvSnapshot, FamilyMeta, PolicyRule, RuleSet, StandardMeta,
    StandardRegistry,
};
use complymap_types::{RuleId, Severity, StandardId};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeSet;

/// File model for a standard catalog (`[standard]` + `[[controls]]`).
#[derive(Debug, Deserialize)]
struct StandardFile {
    standard: StandardHeader,
    #[serde(default)]
    controls: Vec<ControlEntry>,
}

#[derive(Debug, Deserialize)]
struct StandardHeader {
    id: String,
    name: String,
    version: String,
}

#[derive(Debug, Deserialize)]
struct ControlEntry {
    id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    severity: Severity,
}

/// File model for a rulepack (`[[rules]]` with nested `[[rules.checks]]`).
#[derive(Debug, Deserialize)]
struct RulepackFile {
    #[serde(default)]
    rules: Vec<RuleEntry>,
}

#[derive(Debug, Deserialize)]
struct RuleEntry {
    id: String,
    #[serde(default)]
    description: String,
    satisfies: Vec<String>,
    #[serde(default)]
    checks: Vec<CheckEntry>,
}

#[derive(Debug, Deserialize)]
struct CheckEntry {
    key: String,
    op: CheckOp,
    #[serde(default)]
    value: Option<JsonValue>,
}

/// Parse a standard catalog file and register its controls.
///
/// Each control is registered as `<standard-id>-<control-id>`.
pub fn register_standard(registry: &mut StandardRegistry, text: &str) -> anyhow::Result<()> {
    let file: StandardFile = toml::from_str(text).context("parse standard catalog")?;

    registry
        .register_family(
            &file.standard.id,
            FamilyMeta {
                name: file.standard.name.clone(),
                version: file.standard.version.clone(),
            },
        )
        .with_context(|| format!("register standard {}", file.standard.id))?;

    for control in file.controls {
        let id = StandardId::new(format!("{}-{}", file.standard.id, control.id));
        let meta = StandardMeta {
            family: file.standard.id.clone(),
            title: control.title,
            section: control.id,
            severity: control.severity,
            description: control.description,
        };
        registry
            .register(id.clone(), meta)
            .with_context(|| format!("register control {}", id))?;
    }

    Ok(())
}

/// Parse a rulepack file and register its rules against the registry.
pub fn register_rulepack(
    rules: &mut RuleSet,
    registry: &StandardRegistry,
    text: &str,
) -> anyhow::Result<()> {
    let file: RulepackFile = toml::from_str(text).context("parse rulepack")?;

    for entry in file.rules {
        let rule = PolicyRule {
            id: RuleId::new(&entry.id),
            description: entry.description,
            satisfies: entry
                .satisfies
                .iter()
                .map(StandardId::new)
                .collect::<BTreeSet<_>>(),
            checks: entry
                .checks
                .into_iter()
                .map(|c| CheckExpr {
                    key: c.key,
                    op: c.op,
                    value: c.value,
                })
                .collect(),
        };
        rules
            .register(rule, registry)
            .with_context(|| format!("register rule {}", entry.id))?;
    }

    Ok(())
}

/// Parse a snapshot from JSON text. The top level must be an object.
pub fn parse_snapshot(text: &str) -> anyhow::Result<EnvSnapshot> {
    let value: JsonValue = serde_json::from_str(text).context("parse snapshot json")?;
    let JsonValue::Object(map) = value else {
        anyhow::bail!("snapshot must be a JSON object of key/value pairs");
    };
    Ok(map.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_standard_applies_severity_default() {
        let mut registry = StandardRegistry::new();
        register_standard(
            &mut registry,
            r#"[standard]
id = "PCI-DSS"
name = "PCI Data Security Standard"
version = "4.0"

[[controls]]
id = "8.3.1"
title = "MFA for all access into the CDE"
"#,
        )
        .expect("register");

        let meta = registry
            .lookup(&StandardId::new("PCI-DSS-8.3.1"))
            .expect("lookup");
        assert_eq!(meta.severity, Severity::Medium);
        assert_eq!(meta.section, "8.3.1");
        assert_eq!(meta.family, "PCI-DSS");
    }

    #[test]
    fn register_standard_rejects_duplicate_control() {
        let mut registry = StandardRegistry::new();
        let err = register_standard(
            &mut registry,
            r#"[standard]
id = "SOC2"
name = "SOC 2"
version = "2017"

[[controls]]
id = "CC6.1"
title = "Logical access security"

[[controls]]
id = "CC6.1"
title = "Repeated"
"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("duplicate identifier"));
    }

    #[test]
    fn register_rulepack_parses_checks() {
        let mut registry = StandardRegistry::new();
        register_standard(
            &mut registry,
            r#"[standard]
id = "CIS-AWS"
name = "CIS AWS Foundations Benchmark"
version = "1.4.0"

[[controls]]
id = "1.4"
title = "Ensure MFA is enabled for the root account"
"#,
        )
        .expect("standard");

        let mut rules = RuleSet::new();
        register_rulepack(
            &mut rules,
            &registry,
            r#"[[rules]]
id = "iam-mfa"
description = "Root account MFA is on"
satisfies = ["CIS-AWS-1.4"]

[[rules.checks]]
key = "iam.mfa_enabled"
op = "eq"
value = true

[[rules.checks]]
key = "iam.root_access_keys"
op = "exists"
"#,
        )
        .expect("rulepack");

        let rule = rules.get(&RuleId::new("iam-mfa")).expect("rule");
        assert_eq!(rule.checks.len(), 2);
        assert_eq!(rule.checks[0].op, CheckOp::Eq);
        assert_eq!(rule.checks[1].op, CheckOp::Exists);
        assert!(rule.checks[1].value.is_none());
    }

    #[test]
    fn register_rulepack_rejects_unknown_op() {
        let registry = StandardRegistry::new();
        let mut rules = RuleSet::new();
        let err = register_rulepack(
            &mut rules,
            &registry,
            r#"[[rules]]
id = "bad-op"
satisfies = []

[[rules.checks]]
key = "x"
op = "matches"
"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("parse rulepack"));
    }

    #[test]
    fn parse_snapshot_accepts_nested_values() {
        let snapshot = parse_snapshot(r#"{"regions": ["us-east-1"], "count": 3}"#).expect("parse");
        assert_eq!(snapshot.get("count"), Some(&serde_json::json!(3)));
    }
}
