//! End-to-end runs of the `fzt` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../fixtures").join(name)
}

fn fzt() -> Command {
    let mut cmd = Command::cargo_bin("fzt").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn read_json(p: &Path) -> serde_json::Value {
    serde_json::from_slice(&fs::read(p).unwrap()).unwrap()
}

/// Write params/ratings into `dir` and return their paths.
fn write_inputs(dir: &Path, params: &str, ratings: &str) -> (PathBuf, PathBuf) {
    let p = dir.join("params.csv");
    let r = dir.join("ratings.csv");
    fs::write(&p, params).unwrap();
    fs::write(&r, ratings).unwrap();
    (p, r)
}

#[test]
fn manifest_run_writes_artifacts() {
    let out = tempfile::tempdir().unwrap();
    fzt()
        .arg("--manifest")
        .arg(fixture("basic/manifest.json"))
        .arg("--out")
        .arg(out.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("ranked"));

    let result = read_json(&out.path().join("result.json"));
    assert!(result["id"].as_str().unwrap().starts_with("RES:"));
    assert_eq!(result["ranking"].as_array().unwrap().len(), 3);
    assert_eq!(result["ranking"][2], "S3");

    let run = read_json(&out.path().join("run_record.json"));
    assert_eq!(run["outputs"]["result_id"], result["id"]);
    assert!(run["id"].as_str().unwrap().starts_with("RUN:"));

    let csv = fs::read_to_string(out.path().join("result.csv")).unwrap();
    assert!(csv.starts_with("Alternative,Quality,Cost,Delivery,D_plus,D_minus,CCI,Rank\n"));
    assert!(!out.path().join("rating.csv").exists());
}

#[test]
fn explicit_paths_with_sheets_and_reports() {
    let dir = fixture("basic");
    let out = tempfile::tempdir().unwrap();
    fzt()
        .arg("--params")
        .arg(dir.join("params.csv"))
        .arg("--ratings")
        .arg(dir.join("ratings.csv"))
        .args(["--sheets", "--render", "json", "html", "--precision", "4", "--quiet"])
        .arg("--out")
        .arg(out.path())
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    for name in [
        "result.json",
        "run_record.json",
        "rating.csv",
        "fuzzy_rating.csv",
        "combined.csv",
        "normalized.csv",
        "result.csv",
        "report.json",
        "report.html",
    ] {
        assert!(out.path().join(name).is_file(), "missing {name}");
    }
    let fuzzy = fs::read_to_string(out.path().join("fuzzy_rating.csv")).unwrap();
    assert!(fuzzy.contains("\"(0.7500, 0.9000, 1.0000)\""));
    let report = read_json(&out.path().join("report.json"));
    assert_eq!(report["precision"], 4);
}

#[test]
fn result_json_is_byte_identical_across_runs() {
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    for out in [&a, &b] {
        fzt()
            .arg("--manifest")
            .arg(fixture("basic/manifest.json"))
            .arg("--out")
            .arg(out.path())
            .arg("--quiet")
            .assert()
            .success();
    }
    assert_eq!(
        fs::read(a.path().join("result.json")).unwrap(),
        fs::read(b.path().join("result.json")).unwrap()
    );
    assert_eq!(
        fs::read(a.path().join("result.csv")).unwrap(),
        fs::read(b.path().join("result.csv")).unwrap()
    );
}

#[test]
fn seed_flag_selects_seeded_ties() {
    let dir = fixture("ties");
    let out = tempfile::tempdir().unwrap();
    fzt()
        .arg("--params")
        .arg(dir.join("params.csv"))
        .arg("--ratings")
        .arg(dir.join("ratings.csv"))
        .arg("--scale")
        .arg(dir.join("scale.json"))
        .args(["--seed", "0x2A"])
        .arg("--out")
        .arg(out.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("seeded shuffle"));

    let result = read_json(&out.path().join("result.json"));
    assert_eq!(result["tie_policy"], "seeded");
    assert_eq!(result["tie_seed"], 42);
    assert_eq!(result["tie_groups"], 1);
}

#[test]
fn validate_only_writes_nothing() {
    let out = tempfile::tempdir().unwrap();
    fzt()
        .arg("--manifest")
        .arg(fixture("basic/manifest.json"))
        .arg("--out")
        .arg(out.path())
        .arg("--validate-only")
        .assert()
        .success()
        .stderr(predicate::str::contains("inputs OK"));
    assert!(!out.path().join("result.json").exists());
}

#[test]
fn unknown_grade_exits_with_validation_code() {
    let dir = tempfile::tempdir().unwrap();
    let (p, r) = write_inputs(dir.path(), "Parameter,Weight\nCost,1\n", "Expert,Alternative,Cost\nE1,X,A\nE1,Y,Z\n");
    fzt()
        .arg("--params")
        .arg(&p)
        .arg("--ratings")
        .arg(&r)
        .arg("--out")
        .arg(dir.path().join("out"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown grade").and(predicate::str::contains("criterion Cost")));
}

#[test]
fn degenerate_closeness_exits_with_engine_code() {
    let dir = tempfile::tempdir().unwrap();
    let (p, r) = write_inputs(dir.path(), "Parameter,Weight\nCost,1\n", "Expert,Alternative,Cost\nE1,X,B\nE1,Y,B\n");
    fzt()
        .arg("--params")
        .arg(&p)
        .arg("--ratings")
        .arg(&r)
        .arg("--out")
        .arg(dir.path().join("out"))
        .assert()
        .code(5);
    assert!(!dir.path().join("out/result.json").exists());
}

#[test]
fn overflowing_weights_exit_with_engine_code() {
    let dir = tempfile::tempdir().unwrap();
    let crits: Vec<String> = (1..=10).map(|i| format!("C{i}")).collect();
    let params: String = std::iter::once("Parameter,Weight\n".to_string())
        .chain(crits.iter().map(|c| format!("{c},1e308\n")))
        .collect();
    let mut ratings = format!("Expert,Alternative,{}\n", crits.join(","));
    for (alt, grade) in [("X", "A"), ("Y", "C"), ("Z", "F")] {
        ratings.push_str(&format!("E1,{alt},{}\n", vec![grade; crits.len()].join(",")));
    }
    let (p, r) = write_inputs(dir.path(), &params, &ratings);
    fzt()
        .arg("--params")
        .arg(&p)
        .arg("--ratings")
        .arg(&r)
        .arg("--out")
        .arg(dir.path().join("out"))
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .code(5)
        .stderr(predicate::str::contains("non-finite"));
    assert!(!dir.path().join("out/result.json").exists());
}

#[test]
fn digest_mismatch_exits_with_self_verify_code() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path(), "Parameter,Weight\nCost,1\n", "Expert,Alternative,Cost\nE1,X,A\nE1,Y,F\n");
    let manifest = dir.path().join("manifest.json");
    fs::write(
        &manifest,
        format!(
            r#"{{"params_path":"params.csv","ratings_path":"ratings.csv","inputs_sha256":{{"ratings_path":"{}"}}}}"#,
            "0".repeat(64)
        ),
    )
    .unwrap();
    fzt()
        .arg("--manifest")
        .arg(&manifest)
        .arg("--validate-only")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("sha256 mismatch"));
}

#[test]
fn bad_invocations_exit_with_validation_code() {
    fzt().args(["--params", "https://example.org/p.csv", "--ratings", "r.csv"]).assert().code(2);
    fzt().args(["--params", "no/such/params.csv", "--ratings", "no/such/ratings.csv"]).assert().code(2);
    fzt()
        .arg("--manifest")
        .arg(fixture("basic/manifest.json"))
        .args(["--tie-policy", "seeded", "--validate-only"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("tie_seed"));
}
