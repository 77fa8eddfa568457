use complymap_types::{ControlResult, EvalData, RuleOutcome, Status, StatusCounts, Verdict};
use std::collections::BTreeMap;

use complymap_types::StandardId;

/// Count identifier statuses for the verdict block.
pub fn counts_from_results(results: &BTreeMap<StandardId, ControlResult>) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for r in results.values() {
        match r.status {
            Status::Pass => counts.pass += 1,
            Status::Fail => counts.fail += 1,
            Status::Unknown => counts.unknown += 1,
        }
    }
    counts
}

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub verdict: Verdict,
    pub results: BTreeMap<StandardId, ControlResult>,
    pub outcomes: Vec<RuleOutcome>,
    pub counts: StatusCounts,
    pub data: EvalData,
}
