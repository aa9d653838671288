//! Binary tests for the swood-export command line

#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

mod common;

use assert_cmd::Command;
use common::*;
use predicates::prelude::*;
use tempfile::TempDir;

fn swood_export() -> Command {
    let mut cmd = Command::cargo_bin("swood-export").unwrap();
    cmd.env_remove("SWOOD_EXPORT_OUTPUT_DIR").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_missing_workbook_fails() {
    swood_export()
        .arg("/nonexistent/Outil_Material_Import.xlsm")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Workbook not found"));
}

#[test]
fn test_cli_unknown_export_type_fails() {
    let dir = TempDir::new().unwrap();
    let workbook = material_catalog(dir.path());

    swood_export()
        .arg(&workbook)
        .arg("pdf")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown export type: pdf"));
}

#[test]
fn test_cli_default_export_is_txt() {
    let dir = TempDir::new().unwrap();
    let workbook = material_catalog(dir.path());
    let out = TempDir::new().unwrap();

    swood_export()
        .arg(&workbook)
        .arg("--output-dir")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Written:"));

    single_output(out.path(), "Materiaux_a_importer_Optiplanning_");
}

#[test]
fn test_cli_output_dir_from_env() {
    let dir = TempDir::new().unwrap();
    let workbook = tagged_catalog(dir.path(), true);
    let out = TempDir::new().unwrap();

    swood_export()
        .env("SWOOD_EXPORT_OUTPUT_DIR", out.path())
        .arg(&workbook)
        .arg("edgebands")
        .assert()
        .success();

    single_output(out.path(), "Import_Swood_Chants_");
}

#[test]
fn test_cli_json_report() {
    let dir = TempDir::new().unwrap();
    let workbook = tagged_catalog(dir.path(), true);
    let out = TempDir::new().unwrap();

    let output = swood_export()
        .arg(&workbook)
        .arg("materials")
        .arg("-o")
        .arg(out.path())
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["kind"], "materials");
    assert_eq!(report["summary"]["materials"]["materials"], 2);
    assert_eq!(report["summary"]["materials"]["edgebands"], 1);
    let path = report["path"].as_str().unwrap();
    assert_eq!(
        std::path::Path::new(path),
        single_output(out.path(), "Import_Swood_Materiaux_")
    );
}

#[test]
fn test_cli_export_failure_exit_code() {
    let dir = TempDir::new().unwrap();
    let workbook = unrelated_workbook(dir.path());

    swood_export()
        .arg(&workbook)
        .arg("nesting")
        .arg("-o")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Materials"));
}

#[test]
fn test_cli_empty_catalog_txt_fails() {
    let dir = TempDir::new().unwrap();
    let workbook = empty_catalog(dir.path());

    swood_export()
        .arg(&workbook)
        .arg("txt")
        .assert()
        .failure();
}
