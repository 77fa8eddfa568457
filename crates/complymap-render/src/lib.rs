//! Deterministic renderers for complymap reports.
//!
//! Renderers consume a flat renderable projection of the report so they
//! never depend on envelope details.

#![forbid(unsafe_code)]

mod csv;
mod markdown;
mod model;

pub use csv::render_csv;
pub use markdown::render_markdown;
pub use model::{
    RenderableData, RenderableEntry, RenderableOutcome, RenderableReport, RenderableStatus,
    RenderableVerdict,
};
