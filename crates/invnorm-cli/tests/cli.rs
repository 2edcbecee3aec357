//! End-to-end tests for the invnorm binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn invnorm() -> Command {
    Command::cargo_bin("invnorm").unwrap()
}

#[test]
fn process_single_invoice_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("inv.txt");
    fs::write(
        &input,
        "Aenean Curae Corp\nINVOICE\nInvoice #12345\nDate: 2024-03-15\nTotal 1,250.00",
    )
    .unwrap();

    invnorm()
        .arg("process")
        .arg(&input)
        .args(["--id", "7", "--due-date", "20-03-2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Invoice No\": \"12345\""))
        .stdout(predicate::str::contains("\"Invoice Date\": \"15-03-2024\""))
        .stdout(predicate::str::contains("\"Total Due\": \"1.250,00\""));
}

#[test]
fn process_fails_without_invoice_number() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("inv.txt");
    fs::write(&input, "Date: 2024-03-15\nTotal 10,00").unwrap();

    invnorm()
        .arg("process")
        .arg(&input)
        .args(["--id", "7", "--due-date", "20-03-2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required field"));
}

#[test]
fn batch_writes_six_column_csv_and_skips_failures() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("a.txt"),
        "Invoice #1\nDate: 2024-03-15\nTotal 10,00\nLorem Corp",
    )
    .unwrap();
    fs::write(dir.path().join("b.txt"), "completely unreadable").unwrap();
    fs::write(
        dir.path().join("manifest.csv"),
        "id,due_date,text_file\nA1,01-04-2024,a.txt\nB2,02-04-2024,b.txt\n",
    )
    .unwrap();
    let output = dir.path().join("out.csv");

    invnorm()
        .arg("batch")
        .arg(dir.path().join("manifest.csv"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful, 1 failed"));

    let written = fs::read_to_string(&output).unwrap();
    let mut lines = written.lines();
    assert_eq!(
        lines.next().unwrap(),
        "ID,Due Date,Invoice No,Invoice Date,Company Name,Total Due"
    );
    assert_eq!(
        lines.next().unwrap(),
        "A1,01-04-2024,1,15-03-2024,Lorem Corp,\"10,00\""
    );
    assert!(lines.next().is_none());
}

#[test]
fn batch_due_by_skips_invoices_not_yet_due() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("a.txt"),
        "Invoice #1\nDate: 2024-03-15\nTotal 10,00\nLorem Corp",
    )
    .unwrap();
    fs::write(
        dir.path().join("b.txt"),
        "Invoice #2\nDate: 2024-03-16\nTotal 20,00\nIpsum Corp",
    )
    .unwrap();
    fs::write(
        dir.path().join("manifest.csv"),
        "id,due_date,text_file\nA1,01-04-2024,a.txt\nB2,01-06-2024,b.txt\n",
    )
    .unwrap();
    let output = dir.path().join("out.csv");

    invnorm()
        .arg("batch")
        .arg(dir.path().join("manifest.csv"))
        .arg("--output")
        .arg(&output)
        .args(["--due-by", "30-04-2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 not yet due, skipped"));

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("A1"));
    assert!(!written.contains("B2"));
}

#[test]
fn batch_strict_aborts_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bad.txt"), "nothing here").unwrap();
    fs::write(
        dir.path().join("manifest.csv"),
        "id,due_date,text_file\nX,01-04-2024,bad.txt\n",
    )
    .unwrap();

    invnorm()
        .arg("batch")
        .arg(dir.path().join("manifest.csv"))
        .arg("--output")
        .arg(dir.path().join("out.csv"))
        .arg("--strict")
        .assert()
        .failure();
}

#[test]
fn known_company_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    fs::write(
        &config,
        r#"{"extraction": {"known_companies": ["Gravida Partners LLC"]}}"#,
    )
    .unwrap();

    let input = dir.path().join("inv.txt");
    fs::write(&input, "GRAVIDA  partners llc\nInvoice #5\nTotal 12,00").unwrap();

    invnorm()
        .arg("process")
        .arg(&input)
        .args(["--id", "1", "--due-date", "01-01-2024"])
        .arg("--config")
        .arg(&config)
        .args(["--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Company: Gravida Partners LLC"));
}

#[test]
fn config_show_prints_defaults() {
    invnorm()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown Company"));
}
