use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a rule outcome.
///
/// Identity fields:
/// - rule_id
/// - status
/// - salient clause key (if the outcome hinged on one)
pub fn fingerprint_for_outcome(rule_id: &str, status: &str, clause_key: Option<&str>) -> String {
    let mut parts = vec![rule_id, status];
    if let Some(key) = clause_key {
        parts.push(key);
    }
    let canonical = parts.join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
