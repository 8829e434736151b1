//! End-to-end tests for the wada-match binary.
//!
//! These run the compiled CLI against the embedded catalog and against
//! scratch catalogs written to temporary directories.

use assert_cmd::Command;
use predicates::prelude::*;

fn wada() -> Command {
    Command::cargo_bin("wada-match").expect("binary should build")
}

fn write_catalog(dir: &std::path::Path, colors: &str, combinations: &str) {
    std::fs::write(dir.join("colors.json"), colors).unwrap();
    std::fs::write(dir.join("combinations.json"), combinations).unwrap();
}

#[test]
fn test_search_json_shape() {
    let output = wada()
        .args(["--format", "json", "search", "#C8A98D"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["input"], "#C8A98D");
    assert_eq!(value["input_lab"].as_array().unwrap().len(), 3);
    assert_eq!(value["matches"][0]["name"], "Fawn");
    assert_eq!(value["matches"][0]["distance"], 0.0);
    assert!(value["matches"].as_array().unwrap().len() <= 5);

    let combinations = value["combinations"].as_array().unwrap();
    assert!(!combinations.is_empty());
    assert!(combinations.len() <= 10);
    assert!(value["total_combinations"].as_u64().unwrap() >= combinations.len() as u64);
    for combination in combinations {
        assert!(combination["id"].is_u64());
        assert!(combination["page"].is_u64());
        assert!(combination["colors"].is_array());
    }
}

#[test]
fn test_search_accepts_bare_hex() {
    wada()
        .args(["search", "c8a98d"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fawn"));
}

#[test]
fn test_search_trims_pasted_color() {
    wada()
        .args(["--format", "json", "search", "  #C8A98D\n"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"input\": \"#C8A98D\""));
}

#[test]
fn test_search_no_match_is_success() {
    let dir = tempfile::tempdir().unwrap();
    write_catalog(
        dir.path(),
        r##"[
            {"name": "Fawn", "hex": "#C8A98D", "lab": [70.6, 5.79, 15.28], "combinations": [1]},
            {"name": "Sepia", "hex": "#4F3B2B", "lab": [26.74, 5.53, 11.36], "combinations": [1]}
        ]"##,
        r##"[{"id": 1, "colors": [{"name": "Fawn", "hex": "#C8A98D"}, {"name": "Sepia", "hex": "#4F3B2B"}]}]"##,
    );

    let output = wada()
        .args(["--format", "json", "search", "#FF00FF", "--catalog-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["matches"], serde_json::json!([]));
    assert_eq!(value["combinations"], serde_json::json!([]));
    assert_eq!(value["total_combinations"], 0);
}

#[test]
fn test_search_result_cap() {
    let output = wada()
        .args(["--format", "json", "search", "#C8A98D", "-n", "1"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["combinations"].as_array().unwrap().len(), 1);
    assert!(value["total_combinations"].as_u64().unwrap() > 1);
}

#[test]
fn test_search_malformed_color_fails() {
    wada()
        .args(["search", "#12345"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("#12345"));
}

#[test]
fn test_search_negative_distance_rejected() {
    wada()
        .args(["search", "#C8A98D", "-d=-5"])
        .assert()
        .failure();
}

#[test]
fn test_search_tsv() {
    wada()
        .args(["--format", "tsv", "search", "#C8A98D"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("id\tpage\tnames\thexes"));
}

#[test]
fn test_search_writes_report() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("report.html");

    wada()
        .args(["search", "#C8A98D", "--report"])
        .arg(&report)
        .assert()
        .success()
        .stderr(predicate::str::contains("Report written to"));

    let html = std::fs::read_to_string(&report).unwrap();
    assert!(html.contains("\"input\":\"#C8A98D\""));
}

#[test]
fn test_corrupt_catalog_fails_with_record() {
    let dir = tempfile::tempdir().unwrap();
    write_catalog(
        dir.path(),
        r##"[{"name": "Fawn", "hex": "#C8A98D", "lab": [70.6, 5.79, 15.28], "combinations": [1, 2]}]"##,
        r##"[{"id": 1, "colors": [{"name": "Fawn", "hex": "#C8A98D"}]}]"##,
    );

    wada()
        .args(["search", "#C8A98D", "--catalog-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Catalog corrupt"))
        .stderr(predicate::str::contains("Fawn"));
}

#[test]
fn test_color_without_combinations_field_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_catalog(
        dir.path(),
        r##"[{"name": "Fawn", "hex": "#C8A98D", "lab": [70.6, 5.79, 15.28]}]"##,
        "[]",
    );

    wada()
        .args(["search", "#C8A98D", "--catalog-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("reference colors"));
}

#[test]
fn test_missing_catalog_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("colors.json"), "[]").unwrap();

    wada()
        .args(["search", "#C8A98D", "--catalog-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("combinations"));
}

#[test]
fn test_swatch_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("swatch.html");

    let result = wada()
        .args(["--format", "json", "search", "#3C4D31"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    wada()
        .args(["swatch", "-"])
        .arg(&report)
        .arg("--no-open")
        .write_stdin(result)
        .assert()
        .success()
        .stdout(predicate::str::contains("swatch.html"));

    let html = std::fs::read_to_string(&report).unwrap();
    assert!(html.contains("Lincoln Green"));
}

#[test]
fn test_swatch_rejects_garbage() {
    wada()
        .args(["swatch", "-", "--no-open"])
        .write_stdin("not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a search result"));
}

#[test]
fn test_catalog_verify_embedded() {
    wada()
        .args(["catalog", "verify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Integrity OK"));
}

#[test]
fn test_catalog_verify_detects_drift() {
    let dir = tempfile::tempdir().unwrap();
    write_catalog(
        dir.path(),
        r##"[{"name": "Hinoki", "hex": "#D9C7A3", "lab": [84.0, 2.1, 14.3], "combinations": [7]}]"##,
        r##"[{"id": 7, "colors": [{"name": "Hinoki", "hex": "#D9C7A3"}]}]"##,
    );

    wada()
        .args(["catalog", "verify", "--catalog-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("different illuminant"));
}

#[test]
fn test_catalog_verify_rejects_bad_tolerance() {
    for tolerance in ["--tolerance=NaN", "--tolerance=-1"] {
        wada().args(["catalog", "verify", tolerance]).assert().failure();
    }
}

#[test]
fn test_catalog_show_repeated_name() {
    let dir = tempfile::tempdir().unwrap();
    write_catalog(
        dir.path(),
        r##"[
            {"name": "Slate", "hex": "#6C6F70", "lab": [46.8, -0.94, -0.83], "combinations": [1]},
            {"name": "Slate", "hex": "#707880", "lab": [49.5, -1.0, -6.5], "combinations": [2]}
        ]"##,
        r##"[
            {"id": 1, "colors": [{"name": "Slate", "hex": "#6C6F70"}]},
            {"id": 2, "colors": [{"name": "Slate", "hex": "#707880"}]}
        ]"##,
    );

    wada()
        .args(["catalog", "show", "slate", "--catalog-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("#6C6F70"))
        .stdout(predicate::str::contains("#707880"));
}

#[test]
fn test_catalog_show() {
    wada()
        .args(["catalog", "show", "fawn"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#C8A98D"));

    wada()
        .args(["catalog", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Combination 1"));

    wada()
        .args(["catalog", "show", "No Such Color"])
        .assert()
        .failure();
}

#[test]
fn test_catalog_export_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("exported");

    wada()
        .args(["catalog", "export"])
        .arg(&export)
        .assert()
        .success();

    assert!(export.join("manifest.json").exists());

    wada()
        .args(["search", "#C8A98D", "--catalog-dir"])
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("Fawn"));
}
