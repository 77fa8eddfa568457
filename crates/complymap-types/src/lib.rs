//! Stable DTOs and IDs used across the complymap workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted evaluation report
//! - opaque identifier newtypes and stable string codes
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod report;

pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use ids::{RuleId, StandardId};
pub use report::{
    ControlResult, EvalData, EvalReport, GapReport, ReportEnvelope, RuleOutcome, Severity, Status,
    StatusCounts, ToolMeta, Verdict, SCHEMA_REPORT_V1,
};
