use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const BIN_NAME: &str = "budget";

fn budget(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env_remove("BUDGET_DATA_DIR")
        .env_remove("RUST_LOG")
        .arg("--dir")
        .arg(root);
    cmd
}

fn read_json(path: &Path) -> serde_json::Value {
    let text = fs::read_to_string(path).expect("file exists");
    serde_json::from_str(&text).expect("valid json")
}

#[test]
fn init_writes_starter_config_once() {
    let root = TempDir::new().unwrap();

    budget(root.path())
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Initialization complete!"))
        .stdout(contains("8 categories"));

    let config_path = root.path().join("budget-data/config.json");
    let first = fs::read_to_string(&config_path).unwrap();
    assert!(first.contains("\n  \"categories\""));

    budget(root.path())
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Already initialized."));
    assert_eq!(fs::read_to_string(&config_path).unwrap(), first);
}

#[test]
fn init_over_unreadable_config_reports_the_reseed() {
    let root = TempDir::new().unwrap();
    let data_dir = root.path().join("budget-data");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("config.json"), "{ not json").unwrap();

    budget(root.path())
        .arg("init")
        .assert()
        .success()
        .stdout(contains("could not be read"))
        .stdout(contains("config.json.corrupt"))
        .stdout(contains("Already initialized.").not());

    assert_eq!(
        fs::read_to_string(data_dir.join("config.json.corrupt")).unwrap(),
        "{ not json"
    );
    assert_eq!(read_json(&data_dir.join("config.json"))["categories"].as_array().unwrap().len(), 8);
}

#[test]
fn month_expense_does_not_save_suggested_income() {
    let root = TempDir::new().unwrap();

    budget(root.path())
        .args(["source", "add", "Salary", "--start", "2024-01", "--gross", "3000", "--tax", "500"])
        .assert()
        .success();

    budget(root.path())
        .args(["month", "expense", "rent", "1500", "--period", "2024-03"])
        .assert()
        .success();

    let month = read_json(&root.path().join("budget-data/2024/03-march.json"));
    assert!(month["income"].as_array().unwrap().is_empty());
}

#[test]
fn missing_root_is_access_denied() {
    let root = TempDir::new().unwrap();
    let missing = root.path().join("nowhere");

    budget(&missing)
        .arg("init")
        .assert()
        .failure()
        .stderr(contains("Access denied"));
    assert!(!missing.exists());
}

#[test]
fn config_shows_paths_without_touching_disk() {
    let root = TempDir::new().unwrap();

    budget(root.path())
        .arg("config")
        .assert()
        .success()
        .stdout(contains("budget-data"));
    assert!(!root.path().join("budget-data").exists());
}

#[test]
fn saved_month_shows_up_in_year_view() {
    let root = TempDir::new().unwrap();

    budget(root.path())
        .args(["month", "expense", "rent", "1500", "--period", "2024-03"])
        .assert()
        .success()
        .stdout(contains("£1500.00 spent on Rent/Mortgage"));

    let month = read_json(&root.path().join("budget-data/2024/03-march.json"));
    assert_eq!(month["year"], 2024);
    assert_eq!(month["month"], 3);
    assert_eq!(month["expenses"].as_array().unwrap().len(), 8);
    assert_eq!(month["expenses"][0]["categoryId"], "rent");
    assert_eq!(month["expenses"][0]["actualAmount"], 1500);

    budget(root.path())
        .args(["month", "show", "--period", "2024-03"])
        .assert()
        .success()
        .stdout(contains("March 2024"))
        .stdout(contains("£1500.00 of £3500.00"));

    budget(root.path())
        .args(["year", "show", "--year", "2024"])
        .assert()
        .success()
        .stdout(contains("Year 2024"))
        .stdout(contains("Worst month:     Mar"));
}

#[test]
fn viewing_an_empty_month_writes_nothing() {
    let root = TempDir::new().unwrap();

    budget(root.path())
        .args(["month", "show", "--period", "2030-07"])
        .assert()
        .success()
        .stdout(contains("July 2030"));

    assert!(!root.path().join("budget-data/2030").exists());
}

#[test]
fn apply_fixed_sets_fixed_categories() {
    let root = TempDir::new().unwrap();

    budget(root.path())
        .args(["month", "apply-fixed", "--period", "2024-04"])
        .assert()
        .success()
        .stdout(contains("set 3 fixed categories"));

    let month = read_json(&root.path().join("budget-data/2024/04-april.json"));
    let expenses = month["expenses"].as_array().unwrap();
    let utilities = expenses
        .iter()
        .find(|e| e["categoryId"] == "utilities")
        .unwrap();
    assert_eq!(utilities["actualAmount"], 200);
}

#[test]
fn category_lifecycle() {
    let root = TempDir::new().unwrap();

    budget(root.path())
        .args(["category", "add", "Kids Clubs", "--budget", "80"])
        .assert()
        .success()
        .stdout(contains("ID: kids-clubs"));

    budget(root.path())
        .args(["category", "add", "Groceries"])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    budget(root.path())
        .args(["category", "edit", "kids-clubs", "--budget", "95.50"])
        .assert()
        .success();

    budget(root.path())
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(contains("Kids Clubs").and(contains("£95.50")));

    budget(root.path())
        .args(["category", "remove", "Kids Clubs"])
        .assert()
        .success()
        .stdout(contains("Removed category: Kids Clubs"));

    budget(root.path())
        .args(["month", "expense", "kids-clubs", "10"])
        .assert()
        .failure()
        .stderr(contains("not found"));
}

#[test]
fn income_source_with_mismatched_net_is_saved_with_warning() {
    let root = TempDir::new().unwrap();

    budget(root.path())
        .args([
            "source", "add", "Salary", "--start", "2024-01", "--gross", "1000", "--pension",
            "100", "--ni", "100", "--tax", "100", "--net", "800",
        ])
        .assert()
        .success()
        .stdout(contains("Added income source: Salary"))
        .stdout(contains("Warning: Net should be £700.00 based on deductions"));

    let config = read_json(&root.path().join("budget-data/config.json"));
    let source = &config["incomeSources"][0];
    assert_eq!(source["startDate"], "2024-01");
    assert!(source["endDate"].is_null());
    assert_eq!(source["defaultNet"], 800);

    budget(root.path())
        .args(["month", "suggest", "--period", "2024-05"])
        .assert()
        .success()
        .stdout(contains("Salary"));

    budget(root.path())
        .args(["month", "suggest", "--period", "2023-12"])
        .assert()
        .success()
        .stdout(contains("No income sources are active"));
}

#[test]
fn end_before_start_is_rejected() {
    let root = TempDir::new().unwrap();

    budget(root.path())
        .args(["source", "add", "Contract", "--start", "2024-06", "--end", "2024-05"])
        .assert()
        .failure()
        .stderr(contains("Validation error"));
}

#[test]
fn month_income_records_net_and_year_totals() {
    let root = TempDir::new().unwrap();

    budget(root.path())
        .args(["source", "add", "Salary", "--start", "2024-01", "--gross", "3000", "--tax", "500"])
        .assert()
        .success()
        .stdout(contains("Warning").not());

    budget(root.path())
        .args(["month", "income", "Salary", "--period", "2024-02", "--defaults"])
        .assert()
        .success()
        .stdout(contains("net £2500.00"));

    let month = read_json(&root.path().join("budget-data/2024/02-february.json"));
    assert_eq!(month["income"][0]["gross"], 3000);
    assert_eq!(month["income"][0]["net"], 2500);

    budget(root.path())
        .args(["year", "show", "--year", "2024", "--through", "2"])
        .assert()
        .success()
        .stdout(contains("£2500.00"));
}

#[test]
fn year_export_csv_has_a_row_per_month() {
    let root = TempDir::new().unwrap();

    budget(root.path())
        .args(["month", "expense", "groceries", "450.25", "--period", "2024-01"])
        .assert()
        .success();

    let output = budget(root.path())
        .args(["year", "export", "--year", "2024", "--format", "csv"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let csv_text = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<_> = csv_text.lines().collect();
    assert_eq!(lines.len(), 13);
    assert!(lines[1].starts_with("2024-01,3500.00,450.25,"));
}

#[test]
fn year_export_json_to_file() {
    let root = TempDir::new().unwrap();
    let out = root.path().join("export.json");

    budget(root.path())
        .args(["year", "export", "--year", "2024", "--format", "json", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(contains("Exported 2024"));

    let export = read_json(&out);
    assert_eq!(export["year"], 2024);
    assert_eq!(export["months"].as_array().unwrap().len(), 12);
    assert!(root.path().join("budget-data/2024").is_dir());
}
