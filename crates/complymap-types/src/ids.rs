//! Opaque identifier newtypes and stable string codes.
//!
//! `StandardId` names a checkable control within a compliance standard
//! (e.g. `CIS-AWS-1.4`). `RuleId` names an automated policy rule. Both are
//! opaque tokens: immutable once created, ordered so registry and mapping
//! output is deterministic.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical identifier for a control within a compliance standard.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct StandardId(String);

impl StandardId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The standard family prefix, if the identifier carries one
    /// (`CIS-AWS-1.4` with family `CIS-AWS` yields `1.4`).
    pub fn strip_family<'a>(&'a self, family: &str) -> Option<&'a str> {
        self.0
            .strip_prefix(family)
            .and_then(|rest| rest.strip_prefix('-'))
    }
}

impl fmt::Display for StandardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StandardId {
    fn from(value: &str) -> Self {
        StandardId::new(value)
    }
}

/// Unique identifier for a policy rule.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct RuleId(String);

impl RuleId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RuleId {
    fn from(value: &str) -> Self {
        RuleId::new(value)
    }
}

// Error / status codes surfaced in reports and the explain registry.
pub const CODE_UNKNOWN_IDENTIFIER: &str = "unknown_identifier";
pub const CODE_DUPLICATE_IDENTIFIER: &str = "duplicate_identifier";
pub const CODE_DUPLICATE_RULE: &str = "duplicate_rule";
pub const CODE_RULE_UNAVAILABLE: &str = "rule_unavailable";
pub const CODE_UNMAPPED_IDENTIFIER: &str = "unmapped_identifier";

// Tool-level
pub const RULE_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
