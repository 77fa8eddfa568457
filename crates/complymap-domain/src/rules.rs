use crate::error::DomainError;
use crate::registry::StandardRegistry;
use crate::snapshot::EnvSnapshot;
use complymap_types::{RuleId, StandardId};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, BTreeSet};

/// Predicate operator for one check clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckOp {
    Exists,
    Eq,
    Ne,
    Contains,
    Gte,
    Lte,
}

/// One declarative predicate clause over the environment snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckExpr {
    pub key: String,
    pub op: CheckOp,
    pub value: Option<JsonValue>,
}

impl CheckExpr {
    /// Evaluate the clause against a snapshot.
    ///
    /// `Ok(bool)` is a definitive observation. `Err(reason)` means the
    /// clause is undecidable (missing key, missing expected value, type
    /// mismatch) and degrades the rule outcome to `unknown`. `exists` is
    /// always decidable.
    pub fn eval(&self, snapshot: &EnvSnapshot) -> Result<bool, String> {
        let actual = snapshot.get(&self.key);

        if self.op == CheckOp::Exists {
            return Ok(actual.is_some());
        }

        let Some(actual) = actual else {
            return Err(format!("key '{}' missing from snapshot", self.key));
        };
        let Some(expected) = &self.value else {
            return Err(format!("check on '{}' has no expected value", self.key));
        };

        match self.op {
            CheckOp::Exists => unreachable!("handled above"),
            CheckOp::Eq => Ok(actual == expected),
            CheckOp::Ne => Ok(actual != expected),
            CheckOp::Contains => match (actual, expected) {
                (JsonValue::String(s), JsonValue::String(needle)) => Ok(s.contains(needle)),
                (JsonValue::Array(items), needle) => Ok(items.contains(needle)),
                _ => Err(format!(
                    "contains on '{}' requires a string or array value",
                    self.key
                )),
            },
            CheckOp::Gte | CheckOp::Lte => {
                let (Some(a), Some(e)) = (actual.as_f64(), expected.as_f64()) else {
                    return Err(format!(
                        "numeric comparison on '{}' found a non-numeric value",
                        self.key
                    ));
                };
                Ok(match self.op {
                    CheckOp::Gte => a >= e,
                    _ => a <= e,
                })
            }
        }
    }
}

/// An automated check bound to one or more standard identifiers.
///
/// A rule passes when all of its clauses pass. Immutable after registration
/// in a [`RuleSet`].
#[derive(Clone, Debug, PartialEq)]
pub struct PolicyRule {
    pub id: RuleId,
    pub description: String,
    pub satisfies: BTreeSet<StandardId>,
    pub checks: Vec<CheckExpr>,
}

/// Registered policy rules, indexed by rule id and by satisfied identifier.
#[derive(Clone, Debug, Default)]
pub struct RuleSet {
    rules: BTreeMap<RuleId, PolicyRule>,
    by_identifier: BTreeMap<StandardId, BTreeSet<RuleId>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule.
    ///
    /// Fails with `DuplicateRule` on a reused rule id, and with
    /// `UnknownIdentifier` when the rule claims to satisfy an identifier
    /// that is not in the registry.
    pub fn register(
        &mut self,
        rule: PolicyRule,
        registry: &StandardRegistry,
    ) -> Result<(), DomainError> {
        if self.rules.contains_key(&rule.id) {
            return Err(DomainError::DuplicateRule(rule.id));
        }
        for id in &rule.satisfies {
            if !registry.contains(id) {
                return Err(DomainError::UnknownIdentifier(id.clone()));
            }
        }

        for id in &rule.satisfies {
            self.by_identifier
                .entry(id.clone())
                .or_default()
                .insert(rule.id.clone());
        }
        self.rules.insert(rule.id.clone(), rule);
        Ok(())
    }

    pub fn get(&self, id: &RuleId) -> Option<&PolicyRule> {
        self.rules.get(id)
    }

    /// Deterministic ordered set of rule ids satisfying an identifier.
    pub fn rules_for(&self, id: &StandardId) -> BTreeSet<RuleId> {
        self.by_identifier.get(id).cloned().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PolicyRule> {
        self.rules.values()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StandardMeta;
    use complymap_types::Severity;
    use serde_json::json;

    fn registry_with(ids: &[&str]) -> StandardRegistry {
        let mut registry = StandardRegistry::new();
        for id in ids {
            registry
                .register(
                    StandardId::new(id),
                    StandardMeta {
                        family: "TEST".to_string(),
                        title: id.to_string(),
                        section: "1".to_string(),
                        severity: Severity::Medium,
                        description: None,
                    },
                )
                .expect("register");
        }
        registry
    }

    fn rule(id: &str, satisfies: &[&str]) -> PolicyRule {
        PolicyRule {
            id: RuleId::new(id),
            description: String::new(),
            satisfies: satisfies.iter().map(StandardId::new).collect(),
            checks: Vec::new(),
        }
    }

    #[test]
    fn register_rejects_unknown_satisfied_identifier() {
        let registry = registry_with(&["CIS-AWS-1.4"]);
        let mut rules = RuleSet::new();

        let err = rules
            .register(rule("r1", &["CIS-AWS-1.4", "CIS-AWS-9.9"]), &registry)
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::UnknownIdentifier(StandardId::new("CIS-AWS-9.9"))
        );
        // Nothing was indexed for the rejected rule.
        assert!(rules.rules_for(&StandardId::new("CIS-AWS-1.4")).is_empty());
    }

    #[test]
    fn register_rejects_duplicate_rule_id() {
        let registry = registry_with(&["CIS-AWS-1.4"]);
        let mut rules = RuleSet::new();
        rules.register(rule("r1", &["CIS-AWS-1.4"]), &registry).expect("first");

        let err = rules.register(rule("r1", &["CIS-AWS-1.4"]), &registry).unwrap_err();
        assert_eq!(err, DomainError::DuplicateRule(RuleId::new("r1")));
    }

    #[test]
    fn rules_for_returns_all_satisfying_rules_in_order() {
        let registry = registry_with(&["CIS-AWS-1.4"]);
        let mut rules = RuleSet::new();
        rules.register(rule("zeta", &["CIS-AWS-1.4"]), &registry).expect("zeta");
        rules.register(rule("alpha", &["CIS-AWS-1.4"]), &registry).expect("alpha");

        let ids: Vec<String> = rules
            .rules_for(&StandardId::new("CIS-AWS-1.4"))
            .iter()
            .map(|r| r.as_str().to_string())
            .collect();
        assert_eq!(ids, vec!["alpha", "zeta"]);
    }

    #[test]
    fn check_exists_is_always_decidable() {
        let snap: EnvSnapshot =
            [("present".to_string(), json!(1))].into_iter().collect();
        let present = CheckExpr {
            key: "present".to_string(),
            op: CheckOp::Exists,
            value: None,
        };
        let absent = CheckExpr {
            key: "absent".to_string(),
            op: CheckOp::Exists,
            value: None,
        };
        assert_eq!(present.eval(&snap), Ok(true));
        assert_eq!(absent.eval(&snap), Ok(false));
    }

    #[test]
    fn check_eq_on_missing_key_is_undecidable() {
        let snap = EnvSnapshot::default();
        let check = CheckExpr {
            key: "iam.mfa_enabled".to_string(),
            op: CheckOp::Eq,
            value: Some(json!(true)),
        };
        let err = check.eval(&snap).unwrap_err();
        assert!(err.contains("missing from snapshot"));
    }

    #[test]
    fn check_contains_string_and_array() {
        let snap: EnvSnapshot = [
            ("regions".to_string(), json!(["us-east-1", "eu-west-1"])),
            ("policy".to_string(), json!("deny-all")),
        ]
        .into_iter()
        .collect();

        let in_array = CheckExpr {
            key: "regions".to_string(),
            op: CheckOp::Contains,
            value: Some(json!("eu-west-1")),
        };
        let in_string = CheckExpr {
            key: "policy".to_string(),
            op: CheckOp::Contains,
            value: Some(json!("deny")),
        };
        assert_eq!(in_array.eval(&snap), Ok(true));
        assert_eq!(in_string.eval(&snap), Ok(true));
    }

    #[test]
    fn check_numeric_comparisons() {
        let snap: EnvSnapshot =
            [("password.min_length".to_string(), json!(14))].into_iter().collect();

        let gte = CheckExpr {
            key: "password.min_length".to_string(),
            op: CheckOp::Gte,
            value: Some(json!(12)),
        };
        let lte = CheckExpr {
            key: "password.min_length".to_string(),
            op: CheckOp::Lte,
            value: Some(json!(12)),
        };
        assert_eq!(gte.eval(&snap), Ok(true));
        assert_eq!(lte.eval(&snap), Ok(false));
    }

    #[test]
    fn check_numeric_on_string_is_undecidable() {
        let snap: EnvSnapshot =
            [("password.min_length".to_string(), json!("fourteen"))].into_iter().collect();
        let check = CheckExpr {
            key: "password.min_length".to_string(),
            op: CheckOp::Gte,
            value: Some(json!(12)),
        };
        assert!(check.eval(&snap).is_err());
    }
}
