//! Pure mapping and evaluation engine for complymap.
//!
//! No I/O happens here: the registry, rule set, and snapshot are built by
//! adapter crates and handed in. Everything is deterministic for a given
//! registry state and input.

#![forbid(unsafe_code)]

pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod mapper;
pub mod policy;
pub mod registry;
pub mod report;
pub mod rules;
pub mod snapshot;

pub use engine::evaluate;
pub use error::DomainError;
pub use registry::{FamilyMeta, StandardMeta, StandardRegistry};
pub use rules::{CheckExpr, CheckOp, PolicyRule, RuleSet};
pub use snapshot::EnvSnapshot;
