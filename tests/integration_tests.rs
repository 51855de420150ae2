//! Integration tests for the bizdesk CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.
//! Every test gets its own store under a temp directory and a config path
//! that does not exist, so the user's real config and data are never read.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get a bizdesk command bound to the temp store
fn bizdesk(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bizdesk").unwrap();
    cmd.current_dir(tmp.path())
        .env("BIZDESK_CONFIG", tmp.path().join("no-such-config.yaml"))
        .env_remove("BIZDESK_STORE")
        .env_remove("BIZDESK_ERROR_LIMIT")
        .env_remove("RUST_LOG")
        .arg("--store")
        .arg(tmp.path().join("store.db"));
    cmd
}

/// Helper to write a CSV file into the temp directory
fn write_csv(tmp: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = tmp.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Export a collection as JSON and return the parsed array
fn export_json(tmp: &TempDir, kind: &str) -> Vec<serde_json::Value> {
    let output = bizdesk(tmp)
        .args(["export", kind, "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

// ============================================================================
// Basics
// ============================================================================

#[test]
fn test_help_displays() {
    Command::cargo_bin("bizdesk")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("export"));
}

#[test]
fn test_version_displays() {
    Command::cargo_bin("bizdesk")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bizdesk"));
}

#[test]
fn test_unknown_entity_type_fails() {
    let tmp = TempDir::new().unwrap();
    bizdesk(&tmp)
        .args(["list", "widgets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("widgets"));
}

// ============================================================================
// Import scenarios
// ============================================================================

#[test]
fn test_import_valid_products() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, "products.csv", "name,price\nWidget,19.99\nGadget,9.99\n");

    bizdesk(&tmp)
        .args(["import", "product"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 2 product record(s)"));

    let records = export_json(&tmp, "product");
    assert_eq!(records.len(), 2);
    assert_ne!(records[0]["id"], records[1]["id"]);
    assert!(records[0]["id"].as_str().unwrap().starts_with("PRD-"));
    assert_eq!(records[0]["fields"]["price"], serde_json::json!(19.99));
    assert_eq!(records[1]["fields"]["price"], serde_json::json!(9.99));
    assert_eq!(records[1]["fields"]["name"], "Gadget");
}

#[test]
fn test_import_missing_required_commits_nothing() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, "customers.csv", "name,contact\nAcme,555-1000\n,555-2000\n");

    bizdesk(&tmp)
        .args(["import", "customer"])
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("row 3: name required"));

    assert!(export_json(&tmp, "customer").is_empty());
}

#[test]
fn test_import_bad_number_commits_nothing() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, "products.csv", "name,price\nWidget,19.99\nGadget,abc\n");

    bizdesk(&tmp)
        .args(["import", "product"])
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("row 3: price must be a number"));

    assert!(export_json(&tmp, "product").is_empty());
}

#[test]
fn test_failed_import_keeps_existing_records() {
    let tmp = TempDir::new().unwrap();
    let good = write_csv(&tmp, "good.csv", "name,contact\nAcme,555-1000\n");
    let bad = write_csv(&tmp, "bad.csv", "name,contact\nGlobex,555-3000\n,555-2000\n");

    bizdesk(&tmp).args(["import", "customer"]).arg(&good).assert().success();
    bizdesk(&tmp).args(["import", "customer"]).arg(&bad).assert().failure();

    let records = export_json(&tmp, "customer");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["fields"]["name"], "Acme");
}

#[test]
fn test_import_twice_appends_twice() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, "products.csv", "name,price\nWidget,19.99\nGadget,9.99\n");

    bizdesk(&tmp).args(["import", "product"]).arg(&csv).assert().success();
    bizdesk(&tmp)
        .args(["import", "product"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("4 product record(s) in store"));

    let records = export_json(&tmp, "product");
    assert_eq!(records.len(), 4);
    let mut ids: Vec<&str> = records.iter().map(|r| r["id"].as_str().unwrap()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 4);
}

#[test]
fn test_store_env_var_selects_store() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, "customers.csv", "name,contact\nAcme,555-1000\n");

    Command::cargo_bin("bizdesk")
        .unwrap()
        .current_dir(tmp.path())
        .env("BIZDESK_CONFIG", tmp.path().join("no-such-config.yaml"))
        .env("BIZDESK_STORE", tmp.path().join("store.db"))
        .args(["import", "customer"])
        .arg(&csv)
        .assert()
        .success();

    let records = export_json(&tmp, "customer");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["fields"]["name"], "Acme");
}

#[test]
fn test_import_dry_run_adds_nothing() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, "products.csv", "name,price\nWidget,19.99\n");

    bizdesk(&tmp)
        .args(["import", "product", "--dry-run"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("would be added"));

    assert!(export_json(&tmp, "product").is_empty());
}

#[test]
fn test_import_missing_column_fails() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, "products.csv", "name,category\nWidget,Tools\n");

    bizdesk(&tmp)
        .args(["import", "product"])
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("price"));
}

#[test]
fn test_import_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    bizdesk(&tmp)
        .args(["import", "product", "nope.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.csv"));
}

#[test]
fn test_import_header_only_fails() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, "empty.csv", "name,price\n");

    bizdesk(&tmp)
        .args(["import", "product"])
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one data row"));
}

#[test]
fn test_import_error_list_is_capped() {
    let tmp = TempDir::new().unwrap();
    let mut contents = String::from("name,price\n");
    for _ in 0..12 {
        contents.push_str(",1\n");
    }
    let csv = write_csv(&tmp, "products.csv", &contents);

    bizdesk(&tmp)
        .args(["import", "product"])
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("row 11: name"))
        .stderr(predicate::str::contains("row 12: name").not())
        .stderr(predicate::str::contains("...and 2 more"));
}

#[test]
fn test_error_limit_from_env() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, "products.csv", "name,price\n,1\n,2\n,3\n");

    bizdesk(&tmp)
        .env("BIZDESK_ERROR_LIMIT", "1")
        .args(["import", "product"])
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("row 2: name"))
        .stderr(predicate::str::contains("...and 2 more"));
}

#[test]
fn test_import_localized_headers() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(
        &tmp,
        "products.csv",
        "\u{feff}機種,仕切り価格,備考\r\nX-200,125000,冷却ユニット付き\r\n",
    );

    bizdesk(&tmp).args(["import", "products"]).arg(&csv).assert().success();

    let records = export_json(&tmp, "product");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["fields"]["name"], "X-200");
    assert_eq!(records[0]["fields"]["price"], serde_json::json!(125000.0));
    assert_eq!(records[0]["fields"]["notes"], "冷却ユニット付き");
}

// ============================================================================
// Template
// ============================================================================

#[test]
fn test_template_imports_cleanly() {
    let tmp = TempDir::new().unwrap();
    let output = bizdesk(&tmp)
        .args(["import", "--template", "product"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let template = String::from_utf8(output.stdout).unwrap();
    assert!(template.starts_with("name,"));
    let csv = write_csv(&tmp, "template.csv", &template);

    bizdesk(&tmp)
        .args(["import", "product"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 1 product record(s)"));
}

#[test]
fn test_template_requires_entity_type() {
    let tmp = TempDir::new().unwrap();
    bizdesk(&tmp)
        .args(["import", "--template"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Entity type required"));
}

// ============================================================================
// Export
// ============================================================================

#[test]
fn test_export_roundtrip_preserves_values() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(
        &tmp,
        "customers.csv",
        "name,contact\n\"Acme, Inc.\",\"say \"\"hi\"\"\"\n\"Multi\nLine\",555\n",
    );
    bizdesk(&tmp).args(["import", "customer"]).arg(&csv).assert().success();

    let exported = tmp.path().join("export.csv");
    bizdesk(&tmp)
        .args(["export", "customer", "--output"])
        .arg(&exported)
        .assert()
        .success();

    let text = fs::read_to_string(&exported).unwrap();
    assert!(text.starts_with('\u{feff}'));
    assert!(text.contains("\"Acme, Inc.\""));
    assert!(text.contains("\"say \"\"hi\"\"\""));

    let other = TempDir::new().unwrap();
    bizdesk(&other).args(["import", "customer"]).arg(&exported).assert().success();

    let original = export_json(&tmp, "customer");
    let reimported = export_json(&other, "customer");
    assert_eq!(original.len(), reimported.len());
    for (a, b) in original.iter().zip(&reimported) {
        assert_eq!(a["fields"], b["fields"]);
        assert_ne!(a["id"], b["id"]);
    }
}

#[test]
fn test_export_tsv_without_bom_with_id() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, "customers.csv", "name,contact\nAcme,555-1000\n");
    bizdesk(&tmp).args(["import", "customer"]).arg(&csv).assert().success();

    let output = bizdesk(&tmp)
        .args(["export", "customer", "--format", "tsv", "--no-bom", "--with-id"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("id\tname\tcontact"));
    let row = lines.next().unwrap();
    assert!(row.starts_with("CUS-"));
    assert!(row.ends_with("\tAcme\t555-1000"));
}

#[test]
fn test_export_empty_collection_has_header() {
    let tmp = TempDir::new().unwrap();
    bizdesk(&tmp)
        .args(["export", "customer", "--no-bom"])
        .assert()
        .success()
        .stdout("name,contact\n");
}

// ============================================================================
// List and schema
// ============================================================================

#[test]
fn test_list_shows_records() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, "products.csv", "name,price\nWidget,19.99\nGadget,9.99\n");
    bizdesk(&tmp).args(["import", "product"]).arg(&csv).assert().success();

    bizdesk(&tmp)
        .args(["list", "product"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Widget"))
        .stdout(predicate::str::contains("19.99"))
        .stdout(predicate::str::contains("2 product record(s) found"));

    bizdesk(&tmp)
        .args(["list", "product", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Widget"))
        .stdout(predicate::str::contains("Gadget").not());
}

#[test]
fn test_list_empty_collection() {
    let tmp = TempDir::new().unwrap();
    bizdesk(&tmp)
        .args(["list", "lead"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No lead records found"));
}

#[test]
fn test_schema_list_and_show() {
    let tmp = TempDir::new().unwrap();
    bizdesk(&tmp)
        .args(["schema", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("contract"))
        .stdout(predicate::str::contains("lead_number"));

    bizdesk(&tmp)
        .args(["schema", "show", "product"])
        .assert()
        .success()
        .stdout(predicate::str::contains("price"))
        .stdout(predicate::str::contains("number"));
}

#[test]
fn test_completions_generate() {
    let tmp = TempDir::new().unwrap();
    bizdesk(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bizdesk"));
}
