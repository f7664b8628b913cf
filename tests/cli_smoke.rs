//! CLI smoke tests against an isolated data directory.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;

fn budgetbook_cmd(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("budgetbook"));
    cmd.env("BUDGETBOOK_DATA_DIR", home.path());
    cmd
}

#[test]
fn config_shows_paths() {
    let home = tempfile::tempdir().unwrap();
    budgetbook_cmd(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Base directory"))
        .stdout(predicate::str::contains("Default rollover"));
}

#[test]
fn budget_add_and_list() {
    let home = tempfile::tempdir().unwrap();

    budgetbook_cmd(&home)
        .args([
            "budget", "add", "Groceries", "500", "--period", "monthly", "--start-date",
            "2025-01-15", "--rollover-day", "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created budget Groceries"));

    budgetbook_cmd(&home)
        .args(["budget", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("$500.00 monthly"));
}

#[test]
fn transaction_add_and_list() {
    let home = tempfile::tempdir().unwrap();

    budgetbook_cmd(&home)
        .args([
            "txn", "add", "Corner Store", "12.50", "--date", "2025-03-10", "--category",
            "Groceries",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded"));

    budgetbook_cmd(&home)
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Corner Store"))
        .stdout(predicate::str::contains("-$12.50"));
}

#[test]
fn import_chase_csv_file() {
    let home = tempfile::tempdir().unwrap();

    let csv_path = home.path().join("chase.csv");
    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "Transaction Date,Post Date,Description,Category,Type,Amount,Memo").unwrap();
    writeln!(file, "10/26/2025,10/27/2025,Starbucks,Food & Drink,Sale,-12.50,").unwrap();
    writeln!(file, "10/27/2025,10/28/2025,Whole Foods,Groceries,Sale,-80.00,").unwrap();

    budgetbook_cmd(&home)
        .args(["txn", "import", csv_path.to_str().unwrap(), "--format", "chase"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 transaction(s)"));

    // Importing the same file again finds only duplicates
    budgetbook_cmd(&home)
        .args(["txn", "import", csv_path.to_str().unwrap(), "--format", "chase"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 transaction(s)"))
        .stdout(predicate::str::contains("2 duplicate(s) skipped"));

    budgetbook_cmd(&home)
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food & Dining"));
}

#[test]
fn import_wrong_format_fails() {
    let home = tempfile::tempdir().unwrap();

    let csv_path = home.path().join("not-chase.csv");
    std::fs::write(&csv_path, "Date,Amount\n10/26/2025,-5.00\n").unwrap();

    budgetbook_cmd(&home)
        .args(["txn", "import", csv_path.to_str().unwrap(), "--format", "chase"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No transactions imported"));
}

#[test]
fn export_csv_includes_transactions() {
    let home = tempfile::tempdir().unwrap();

    budgetbook_cmd(&home)
        .args(["txn", "add", "Corner Store", "12.50", "--date", "2025-03-10"])
        .assert()
        .success();

    budgetbook_cmd(&home)
        .args(["export", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ID,Date,Description"))
        .stdout(predicate::str::contains("Corner Store"));
}
