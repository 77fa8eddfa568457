//! Typed errors for registry, mapping, and rule registration.

use complymap_types::{RuleId, StandardId};
use thiserror::Error;

/// Errors from the pure engine. All are per-item: callers that process a
/// batch report them item by item instead of aborting the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The identifier is not present in the registry.
    #[error("unknown identifier: {0}")]
    UnknownIdentifier(StandardId),

    /// The identifier was already registered.
    #[error("duplicate identifier: {0}")]
    DuplicateIdentifier(StandardId),

    /// The rule id was already registered.
    #[error("duplicate rule: {0}")]
    DuplicateRule(RuleId),

    /// A rule predicate could not be decided. Degrades the rule outcome to
    /// `unknown`; never aborts an evaluation batch.
    #[error("rule {rule_id} could not be evaluated: {message}")]
    RuleExecution { rule_id: RuleId, message: String },
}
