use crate::fingerprint::fingerprint_for_outcome;
use crate::mapper;
use crate::policy::{EffectiveConfig, FailOn};
use crate::registry::StandardRegistry;
use crate::report::{DomainReport, counts_from_results};
use crate::rules::{PolicyRule, RuleSet};
use crate::snapshot::EnvSnapshot;
use complymap_types::{ControlResult, EvalData, RuleId, RuleOutcome, StandardId, Status, Verdict};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

/// Evaluate the requested identifiers against a snapshot.
///
/// Resolution errors are reported per item: an unknown identifier becomes
/// an `unknown` entry and never aborts the batch. Each mapped rule is
/// evaluated exactly once even when several identifiers share it.
pub fn evaluate(
    registry: &StandardRegistry,
    rules: &RuleSet,
    requested: &[StandardId],
    snapshot: &EnvSnapshot,
    cfg: &EffectiveConfig,
) -> DomainReport {
    let resolution = mapper::resolve_each(registry, rules, requested);

    let mut mapped_rules: BTreeSet<RuleId> = BTreeSet::new();
    for (_, resolved) in &resolution {
        if let Ok(rule_ids) = resolved {
            mapped_rules.extend(rule_ids.iter().cloned());
        }
    }

    let to_run: Vec<&PolicyRule> = mapped_rules
        .iter()
        .filter_map(|id| rules.get(id))
        .collect();
    let outcomes = run_rules(&to_run, snapshot, cfg.max_workers);

    let mut results: BTreeMap<StandardId, ControlResult> = BTreeMap::new();
    let mut identifiers_resolved: u32 = 0;
    for (id, resolved) in resolution {
        let entry = match resolved {
            Err(err) => ControlResult {
                status: Status::Unknown,
                rule_ids: Vec::new(),
                note: Some(err.to_string()),
            },
            Ok(rule_ids) if rule_ids.is_empty() => {
                identifiers_resolved += 1;
                ControlResult {
                    status: Status::Unknown,
                    rule_ids: Vec::new(),
                    note: Some("no rules mapped to this identifier".to_string()),
                }
            }
            Ok(rule_ids) => {
                identifiers_resolved += 1;
                let rule_ids: Vec<RuleId> = rule_ids.into_iter().collect();
                ControlResult {
                    status: aggregate_status(&rule_ids, &outcomes),
                    rule_ids,
                    note: None,
                }
            }
        };
        results.insert(id, entry);
    }

    let counts = counts_from_results(&results);
    let verdict = compute_verdict(&counts, cfg.fail_on);

    // Deterministic ordering before truncation.
    let mut emitted: Vec<RuleOutcome> = outcomes.into_values().collect();
    emitted.sort_by(|a, b| a.rule_id.cmp(&b.rule_id));
    let total = emitted.len() as u32;

    let mut truncated_reason: Option<String> = None;
    if emitted.len() > cfg.max_results {
        emitted.truncate(cfg.max_results);
        truncated_reason = Some(format!(
            "rule outcomes truncated to max_results={}",
            cfg.max_results
        ));
    }

    let data = EvalData {
        profile: cfg.profile.clone(),
        identifiers_requested: requested.len() as u32,
        identifiers_resolved,
        rules_evaluated: to_run.len() as u32,
        results_total: total,
        results_emitted: emitted.len() as u32,
        truncated_reason,
    };

    DomainReport {
        verdict,
        results,
        outcomes: emitted,
        counts,
        data,
    }
}

/// Evaluate each rule once. Rules share no mutable state, so they run on a
/// bounded rayon pool when `max_workers` is set.
fn run_rules(
    rules: &[&PolicyRule],
    snapshot: &EnvSnapshot,
    max_workers: Option<usize>,
) -> BTreeMap<RuleId, RuleOutcome> {
    if let Some(n) = max_workers.filter(|n| *n > 0) {
        // Fall back to the shared pool if the bounded one cannot be built.
        if let Ok(pool) = rayon::ThreadPoolBuilder::new().num_threads(n).build() {
            return pool.install(|| run_rules_parallel(rules, snapshot));
        }
    }
    run_rules_parallel(rules, snapshot)
}

fn run_rules_parallel(
    rules: &[&PolicyRule],
    snapshot: &EnvSnapshot,
) -> BTreeMap<RuleId, RuleOutcome> {
    rules
        .par_iter()
        .map(|rule| (rule.id.clone(), evaluate_rule(rule, snapshot)))
        .collect()
}

/// Evaluate one rule's predicate against the snapshot.
///
/// All clauses are evaluated: a definitive false anywhere fails the rule
/// even when another clause is undecidable, matching the per-identifier
/// aggregation semantics.
pub fn evaluate_rule(rule: &PolicyRule, snapshot: &EnvSnapshot) -> RuleOutcome {
    let mut first_fail: Option<&crate::rules::CheckExpr> = None;
    let mut first_err: Option<(&crate::rules::CheckExpr, String)> = None;

    for check in &rule.checks {
        match check.eval(snapshot) {
            Ok(true) => {}
            Ok(false) => {
                if first_fail.is_none() {
                    first_fail = Some(check);
                }
            }
            Err(reason) => {
                if first_err.is_none() {
                    first_err = Some((check, reason));
                }
            }
        }
    }

    let (status, reason, clause_key) = if let Some(check) = first_fail {
        (
            Status::Fail,
            format!("check '{}' did not hold", check.key),
            Some(check.key.as_str()),
        )
    } else if let Some((check, reason)) = first_err {
        (Status::Unknown, reason, Some(check.key.as_str()))
    } else if rule.checks.is_empty() {
        (Status::Pass, "no checks declared".to_string(), None)
    } else {
        (
            Status::Pass,
            format!("all {} checks passed", rule.checks.len()),
            None,
        )
    };

    let fingerprint = fingerprint_for_outcome(rule.id.as_str(), status_str(status), clause_key);
    RuleOutcome {
        rule_id: rule.id.clone(),
        status,
        reason,
        fingerprint: Some(fingerprint),
    }
}

/// Per-identifier aggregation: pass only if all contributing rules pass,
/// fail if any fails, unknown if none fail but at least one is unknown.
fn aggregate_status(rule_ids: &[RuleId], outcomes: &BTreeMap<RuleId, RuleOutcome>) -> Status {
    let mut any_unknown = false;
    for id in rule_ids {
        match outcomes.get(id).map(|o| o.status) {
            Some(Status::Fail) => return Status::Fail,
            Some(Status::Unknown) | None => any_unknown = true,
            Some(Status::Pass) => {}
        }
    }
    if any_unknown { Status::Unknown } else { Status::Pass }
}

fn compute_verdict(counts: &complymap_types::StatusCounts, fail_on: FailOn) -> Verdict {
    if counts.fail > 0 {
        return Verdict::Fail;
    }
    if counts.unknown > 0 {
        return match fail_on {
            FailOn::Unknown => Verdict::Fail,
            FailOn::Fail => Verdict::Unknown,
        };
    }
    Verdict::Pass
}

fn status_str(status: Status) -> &'static str {
    match status {
        Status::Pass => "pass",
        Status::Fail => "fail",
        Status::Unknown => "unknown",
    }
}
