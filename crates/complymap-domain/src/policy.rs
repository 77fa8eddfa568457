use std::collections::BTreeMap;

use complymap_types::StandardId;

/// When the run verdict becomes `fail`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    /// Only definitive failures fail the run.
    Fail,
    /// Undecided identifiers fail the run as well.
    Unknown,
}

/// Effective configuration consumed by the engine.
#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    pub fail_on: FailOn,
    /// Cap on emitted rule outcomes before truncation.
    pub max_results: usize,
    /// Worker threads for rule evaluation. `None` uses the pool default.
    pub max_workers: Option<usize>,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            profile: "strict".to_string(),
            fail_on: FailOn::Unknown,
            max_results: 500,
            max_workers: None,
        }
    }
}

/// The resolved request: ordered, deduplicated identifiers.
///
/// Order is preserved from the caller's configuration; duplicates keep
/// their first occurrence so reports stay stable.
pub fn dedup_requested(ids: Vec<StandardId>) -> Vec<StandardId> {
    let mut seen: BTreeMap<StandardId, ()> = BTreeMap::new();
    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
        if seen.insert(id.clone(), ()).is_none() {
            out.push(id);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_preserves_first_occurrence_order() {
        let ids = vec![
            StandardId::new("B"),
            StandardId::new("A"),
            StandardId::new("B"),
        ];
        let out = dedup_requested(ids);
        assert_eq!(out, vec![StandardId::new("B"), StandardId::new("A")]);
    }
}
