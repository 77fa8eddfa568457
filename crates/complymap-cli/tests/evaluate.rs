//! End-to-end tests for `complymap evaluate` and the report renderers.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(deprecated)]
fn complymap_cmd() -> Command {
    Command::cargo_bin("complymap").unwrap()
}

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent");
    }
    std::fs::write(path, contents).expect("write file");
}

/// Write a minimal catalog, rulepack, snapshot, and config into `root`.
///
/// The fixture maps `CIS-AWS-1.4` to a passing rule and
/// `NIST-800-53-AC-3` to a failing one.
fn write_fixture(root: &Path) {
    write_file(
        &root.join("standards/cis-aws.toml"),
        r#"[standard]
id = "CIS-AWS"
name = "CIS AWS Foundations Benchmark"
version = "1.4.0"

[[controls]]
id = "1.4"
title = "Ensure MFA is enabled for the root account"
severity = "high"
"#,
    );
    write_file(
        &root.join("standards/nist.toml"),
        r#"[standard]
id = "NIST-800-53"
name = "NIST SP 800-53"
version = "r5"

[[controls]]
id = "AC-3"
title = "Access enforcement"
"#,
    );
    write_file(
        &root.join("rules.toml"),
        r#"[[rules]]
id = "iam-mfa"
description = "Root account MFA is on"
satisfies = ["CIS-AWS-1.4"]

[[rules.checks]]
key = "iam.mfa_enabled"
op = "eq"
value = true

[[rules]]
id = "access-enforcement"
description = "Access is enforced"
satisfies = ["NIST-800-53-AC-3"]

[[rules.checks]]
key = "iam.enforce"
op = "eq"
value = true
"#,
    );
    write_file(
        &root.join("snapshot.json"),
        r#"{"iam.mfa_enabled": true, "iam.enforce": false}"#,
    );
    write_file(
        &root.join("complymap.toml"),
        r#"identifiers = ["CIS-AWS-1.4", "NIST-800-53-AC-3"]
"#,
    );
}

fn report_path(root: &Path) -> PathBuf {
    root.join("artifacts/complymap/report.json")
}

#[test]
fn evaluate_fails_with_exit_code_2_and_writes_report() {
    let tmp = TempDir::new().expect("temp dir");
    write_fixture(tmp.path());

    complymap_cmd()
        .current_dir(tmp.path())
        .arg("evaluate")
        .assert()
        .code(2);

    let report = std::fs::read_to_string(report_path(tmp.path())).expect("report written");
    assert!(report.contains("\"schema\": \"complymap.report.v1\""));
    assert!(report.contains("\"verdict\": \"fail\""));
    assert!(report.contains("CIS-AWS-1.4"));
    assert!(report.contains("NIST-800-53-AC-3"));
}

#[test]
fn evaluate_passes_when_snapshot_is_compliant() {
    let tmp = TempDir::new().expect("temp dir");
    write_fixture(tmp.path());
    write_file(
        &tmp.path().join("snapshot.json"),
        r#"{"iam.mfa_enabled": true, "iam.enforce": true}"#,
    );

    complymap_cmd()
        .current_dir(tmp.path())
        .arg("evaluate")
        .assert()
        .success();

    let report = std::fs::read_to_string(report_path(tmp.path())).expect("report written");
    assert!(report.contains("\"verdict\": \"pass\""));
}

#[test]
fn unknown_identifier_is_reported_per_item_not_fatal() {
    let tmp = TempDir::new().expect("temp dir");
    write_fixture(tmp.path());
    write_file(
        &tmp.path().join("complymap.toml"),
        r#"identifiers = ["CIS-AWS-1.4", "GDPR-ART-32"]
profile = "lenient"
"#,
    );

    // Lenient: the unknown identifier yields an unknown entry, not a failure.
    complymap_cmd()
        .current_dir(tmp.path())
        .arg("evaluate")
        .assert()
        .success();

    let report = std::fs::read_to_string(report_path(tmp.path())).expect("report written");
    assert!(report.contains("GDPR-ART-32"));
    assert!(report.contains("unknown identifier"));
    assert!(report.contains("\"verdict\": \"unknown\""));
}

#[test]
fn missing_catalog_dir_exits_1_with_runtime_error_report() {
    let tmp = TempDir::new().expect("temp dir");
    write_fixture(tmp.path());

    complymap_cmd()
        .current_dir(tmp.path())
        .args(["--catalog-dir", "absent"])
        .arg("evaluate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("complymap error"));

    let report = std::fs::read_to_string(report_path(tmp.path())).expect("report written");
    assert!(report.contains("tool.runtime"));
}

#[test]
fn markdown_and_csv_render_from_written_report() {
    let tmp = TempDir::new().expect("temp dir");
    write_fixture(tmp.path());

    complymap_cmd()
        .current_dir(tmp.path())
        .args(["evaluate", "--write-markdown"])
        .assert()
        .code(2);

    let md = std::fs::read_to_string(tmp.path().join("artifacts/complymap/report.md"))
        .expect("markdown written");
    assert!(md.contains("# Complymap report"));
    assert!(md.contains("Verdict: **FAIL**"));

    complymap_cmd()
        .current_dir(tmp.path())
        .arg("csv")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "identifier,status,rule_id,rule_status,reason",
        ))
        .stdout(predicate::str::contains("NIST-800-53-AC-3,fail"));

    complymap_cmd()
        .current_dir(tmp.path())
        .arg("md")
        .assert()
        .success()
        .stdout(predicate::str::contains("Verdict: **FAIL**"));
}

#[test]
fn map_prints_mapping_and_rejects_unknown() {
    let tmp = TempDir::new().expect("temp dir");
    write_fixture(tmp.path());

    complymap_cmd()
        .current_dir(tmp.path())
        .args(["map", "CIS-AWS-*"])
        .assert()
        .success()
        .stdout(predicate::str::contains("iam-mfa"));

    complymap_cmd()
        .current_dir(tmp.path())
        .args(["map", "GDPR-ART-32"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown identifier"));
}

#[test]
fn gap_reports_missing_controls() {
    let tmp = TempDir::new().expect("temp dir");
    write_fixture(tmp.path());

    complymap_cmd()
        .current_dir(tmp.path())
        .args([
            "gap",
            "--standard",
            "CIS-AWS",
            "--control",
            "1.4",
            "--control",
            "2.1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"implemented_controls\""))
        .stdout(predicate::str::contains("2.1"))
        .stdout(predicate::str::contains("50.0"));
}
