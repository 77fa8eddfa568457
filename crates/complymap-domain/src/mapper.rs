use crate::error::DomainError;
use crate::registry::StandardRegistry;
use crate::rules::RuleSet;
use complymap_types::{RuleId, StandardId};
use std::collections::{BTreeMap, BTreeSet};

/// Resolve requested identifiers to the rules that satisfy them.
///
/// Fails with `UnknownIdentifier` for any id not in the registry.
/// Deterministic: same registry state and same input always yield the same
/// mapping. An empty input yields an empty mapping.
pub fn resolve(
    registry: &StandardRegistry,
    rules: &RuleSet,
    ids: &[StandardId],
) -> Result<BTreeMap<StandardId, BTreeSet<RuleId>>, DomainError> {
    let mut mapping = BTreeMap::new();
    for id in ids {
        registry.lookup(id)?;
        mapping.insert(id.clone(), rules.rules_for(id));
    }
    Ok(mapping)
}

/// Per-item variant of [`resolve`] used by batch evaluation.
///
/// One result per requested identifier, in request order: a single bad
/// identifier never aborts the batch.
pub fn resolve_each(
    registry: &StandardRegistry,
    rules: &RuleSet,
    ids: &[StandardId],
) -> Vec<(StandardId, Result<BTreeSet<RuleId>, DomainError>)> {
    ids.iter()
        .map(|id| {
            let resolved = registry.lookup(id).map(|_| rules.rules_for(id));
            (id.clone(), resolved)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StandardMeta;
    use crate::rules::PolicyRule;
    use complymap_types::Severity;
    use proptest::prelude::*;

    fn fixture() -> (StandardRegistry, RuleSet) {
        let mut registry = StandardRegistry::new();
        for id in ["CIS-AWS-1.4", "NIST-800-53-AC-3"] {
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

        let mut rules = RuleSet::new();
        rules
            .register(
                PolicyRule {
                    id: RuleId::new("r1"),
                    description: String::new(),
                    satisfies: [StandardId::new("CIS-AWS-1.4")].into_iter().collect(),
                    checks: Vec::new(),
                },
                &registry,
            )
            .expect("register rule");
        (registry, rules)
    }

    #[test]
    fn resolve_empty_input_yields_empty_mapping() {
        let (registry, rules) = fixture();
        let mapping = resolve(&registry, &rules, &[]).expect("resolve");
        assert!(mapping.is_empty());
    }

    #[test]
    fn resolve_unregistered_identifier_fails() {
        let (registry, rules) = fixture();
        let err = resolve(&registry, &rules, &[StandardId::new("GDPR-ART-32")]).unwrap_err();
        assert_eq!(
            err,
            DomainError::UnknownIdentifier(StandardId::new("GDPR-ART-32"))
        );
    }

    #[test]
    fn resolve_maps_identifier_to_satisfying_rules() {
        let (registry, rules) = fixture();
        let mapping = resolve(
            &registry,
            &rules,
            &[StandardId::new("CIS-AWS-1.4"), StandardId::new("NIST-800-53-AC-3")],
        )
        .expect("resolve");

        assert_eq!(
            mapping[&StandardId::new("CIS-AWS-1.4")],
            [RuleId::new("r1")].into_iter().collect()
        );
        // Registered identifier with no satisfying rules maps to an empty set.
        assert!(mapping[&StandardId::new("NIST-800-53-AC-3")].is_empty());
    }

    #[test]
    fn resolve_each_reports_per_item() {
        let (registry, rules) = fixture();
        let results = resolve_each(
            &registry,
            &rules,
            &[StandardId::new("GDPR-ART-32"), StandardId::new("CIS-AWS-1.4")],
        );

        assert_eq!(results.len(), 2);
        assert!(results[0].1.is_err());
        assert!(results[1].1.is_ok());
    }

    proptest! {
        #[test]
        fn resolve_is_deterministic(ids in proptest::collection::vec("[A-Z]{2,8}-[0-9]\\.[0-9]", 0..8)) {
            let (registry, rules) = fixture();
            let ids: Vec<StandardId> = ids.iter().map(StandardId::new).collect();
            let a = resolve(&registry, &rules, &ids);
            let b = resolve(&registry, &rules, &ids);
            prop_assert_eq!(a, b);
        }
    }
}
