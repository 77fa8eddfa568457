//! Use case orchestration for complymap.
//!
//! This crate provides the application layer: use cases that coordinate the
//! domain, catalog, and render layers. It is intentionally thin and
//! delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod evaluate;
mod explain;
mod gap;
mod map;
mod report;

pub use evaluate::{EvaluateInput, EvaluateOutput, run_evaluate};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use gap::{GapInput, run_gap};
pub use map::{MapInput, run_map};
pub use report::{
    parse_report_json, runtime_error_report, serialize_report, to_renderable, verdict_exit_code,
};
