use crate::error::DomainError;
use complymap_types::{Severity, StandardId};
use std::collections::BTreeMap;

/// Metadata held by the registry for one control identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StandardMeta {
    /// The standard family the control belongs to (e.g. `CIS-AWS`).
    pub family: String,
    /// Human-readable control title.
    pub title: String,
    /// Section within the standard (e.g. `1.4`, `164.312(a)(1)`).
    pub section: String,
    pub severity: Severity,
    pub description: Option<String>,
}

/// Metadata for a standard family (e.g. `CIS-AWS` v1.4.0).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FamilyMeta {
    pub name: String,
    pub version: String,
}

/// Canonical registry of control identifiers and standard families.
///
/// Mutable only while catalogs are loaded; frozen before evaluation, after
/// which reads are shared and lock-free.
#[derive(Clone, Debug, Default)]
pub struct StandardRegistry {
    entries: BTreeMap<StandardId, StandardMeta>,
    families: BTreeMap<String, FamilyMeta>,
}

impl StandardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a control identifier. Entries are immutable once created.
    pub fn register(&mut self, id: StandardId, meta: StandardMeta) -> Result<(), DomainError> {
        if self.entries.contains_key(&id) {
            return Err(DomainError::DuplicateIdentifier(id));
        }
        self.entries.insert(id, meta);
        Ok(())
    }

    /// Register a standard family header.
    pub fn register_family(&mut self, id: &str, meta: FamilyMeta) -> Result<(), DomainError> {
        if self.families.contains_key(id) {
            return Err(DomainError::DuplicateIdentifier(StandardId::new(id)));
        }
        self.families.insert(id.to_string(), meta);
        Ok(())
    }

    pub fn lookup(&self, id: &StandardId) -> Result<&StandardMeta, DomainError> {
        self.entries
            .get(id)
            .ok_or_else(|| DomainError::UnknownIdentifier(id.clone()))
    }

    pub fn contains(&self, id: &StandardId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn family(&self, id: &str) -> Option<&FamilyMeta> {
        self.families.get(id)
    }

    /// Deterministic iteration over all registered identifiers.
    pub fn iter(&self) -> impl Iterator<Item = (&StandardId, &StandardMeta)> {
        self.entries.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &StandardId> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(title: &str) -> StandardMeta {
        StandardMeta {
            family: "CIS-AWS".to_string(),
            title: title.to_string(),
            section: "1.4".to_string(),
            severity: Severity::Medium,
            description: None,
        }
    }

    #[test]
    fn register_then_lookup_returns_same_metadata() {
        let mut registry = StandardRegistry::new();
        let id = StandardId::new("CIS-AWS-1.4");
        registry.register(id.clone(), meta("Ensure MFA")).expect("register");

        let first = registry.lookup(&id).expect("lookup").clone();
        let second = registry.lookup(&id).expect("lookup").clone();
        assert_eq!(first, second);
        assert_eq!(first.title, "Ensure MFA");
    }

    #[test]
    fn register_twice_fails_with_duplicate() {
        let mut registry = StandardRegistry::new();
        let id = StandardId::new("CIS-AWS-1.4");
        registry.register(id.clone(), meta("a")).expect("first");

        let err = registry.register(id.clone(), meta("b")).unwrap_err();
        assert_eq!(err, DomainError::DuplicateIdentifier(id.clone()));

        // First registration is untouched.
        assert_eq!(registry.lookup(&id).expect("lookup").title, "a");
    }

    #[test]
    fn lookup_absent_fails_with_unknown() {
        let registry = StandardRegistry::new();
        let id = StandardId::new("ISO-27001-A.9.1.2");
        let err = registry.lookup(&id).unwrap_err();
        assert_eq!(err, DomainError::UnknownIdentifier(id));
    }

    #[test]
    fn duplicate_family_rejected() {
        let mut registry = StandardRegistry::new();
        let fam = FamilyMeta {
            name: "CIS AWS Foundations".to_string(),
            version: "1.4.0".to_string(),
        };
        registry.register_family("CIS-AWS", fam.clone()).expect("first");
        assert!(registry.register_family("CIS-AWS", fam).is_err());
    }
}
