use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn tutorbook(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tutorbook").unwrap();
    cmd.env("HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

/// Fresh home with settings pointing at `<home>/data` and the demo loaded.
fn demo_home() -> tempfile::TempDir {
    let home = tempfile::tempdir().unwrap();
    let data = home.path().join("data");
    tutorbook(home.path())
        .args(["init", "--data-dir", data.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized tutorbook"));
    tutorbook(home.path())
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Demo data loaded!"));
    home
}

#[test]
fn init_writes_settings_and_workbook() {
    let home = tempfile::tempdir().unwrap();
    let data = home.path().join("data");
    tutorbook(home.path())
        .args(["init", "--data-dir", data.to_str().unwrap(), "--currency", "$"])
        .assert()
        .success();

    assert!(home.path().join(".config/tutorbook/settings.json").exists());
    assert!(data.join("workbook.json").exists());
    assert!(data.join("exports").is_dir());

    tutorbook(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Currency:   $"))
        .stdout(predicate::str::contains("Courses:      0"));
}

#[test]
fn demo_is_loaded_once() {
    let home = demo_home();
    tutorbook(home.path())
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("already loaded"));
    tutorbook(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Courses:      3"))
        .stdout(predicate::str::contains("Teachers:     1"));
}

#[test]
fn list_filters_by_status() {
    let home = demo_home();
    tutorbook(home.path())
        .args(["courses", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Zhang San"))
        .stdout(predicate::str::contains("Qian Qi"))
        .stdout(predicate::str::contains("3 courses"));

    tutorbook(home.path())
        .args(["courses", "list", "--status", "completed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Qian Qi"))
        .stdout(predicate::str::contains("Zhang San").not())
        .stdout(predicate::str::contains("1 courses"));
}

#[test]
fn list_searches_parent_name() {
    let home = demo_home();
    tutorbook(home.path())
        .args(["courses", "list", "--search", "zhao"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wang Wu"))
        .stdout(predicate::str::contains("Qian Qi").not());
}

#[test]
fn from_alone_filters_on_lower_bound() {
    let home = demo_home();
    // Demo purchase dates: 2023-06-01, 2023-05-15, 2023-04-20.
    tutorbook(home.path())
        .args(["courses", "list", "--from", "2023-05-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Zhang San"))
        .stdout(predicate::str::contains("Wang Wu"))
        .stdout(predicate::str::contains("Qian Qi").not())
        .stdout(predicate::str::contains("2 courses"));

    tutorbook(home.path())
        .args(["courses", "list", "--from", "2023-06-01", "--to", "2023-05-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("before it starts"));
}

#[test]
fn price_above_original_is_rejected_and_nothing_changes() {
    let home = demo_home();
    tutorbook(home.path())
        .args(["courses", "edit", "1", "--current-price", "1300"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds original price"));

    tutorbook(home.path())
        .args(["courses", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1,000.00"));
}

#[test]
fn settlement_updates_profit() {
    let home = demo_home();
    tutorbook(home.path())
        .args(["settlements", "add", "1", "--month", "2023-07", "--amount", "200", "--hours", "5"])
        .assert()
        .success();

    // 1000 / 20 * 10 - 450
    tutorbook(home.path())
        .args(["courses", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total settled:   10 hours"))
        .stdout(predicate::str::contains("Profit:          \u{a5}50.00"));
}

#[test]
fn unknown_course_fails() {
    let home = demo_home();
    tutorbook(home.path())
        .args(["courses", "show", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No course with ID 99"));
}

#[test]
fn export_writes_filtered_csv() {
    let home = demo_home();
    let out = home.path().join("active.csv");
    tutorbook(home.path())
        .args(["courses", "export", "--status", "active", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 2 courses"));

    let content = std::fs::read_to_string(&out).unwrap();
    let mut lines = content.lines();
    assert!(lines.next().unwrap().starts_with("Teacher,Parent,Contact"));
    assert_eq!(lines.count(), 2);
    assert!(content.contains("Zhang San,Li Si,13800138000"));
    assert!(!content.contains("Qian Qi"));
}

#[test]
fn teachers_add_list_and_delete() {
    let home = demo_home();
    tutorbook(home.path())
        .args([
            "teachers",
            "add",
            "--name",
            "Li Lei",
            "--id-number",
            "110101199202021234",
            "--phone",
            "13600136000",
            "--hire-date",
            "2023-03-01",
            "--bank-account",
            "6222000011112222",
            "--bank-name",
            "CCB",
            "--province",
            "Shanghai",
        ])
        .assert()
        .success();

    tutorbook(home.path())
        .args(["teachers", "list", "--search", "li lei"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shanghai"));

    tutorbook(home.path())
        .args(["teachers", "delete", "2"])
        .assert()
        .success();

    tutorbook(home.path())
        .args(["teachers", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Li Lei").not());
}

#[test]
fn purchase_edit_keeps_omitted_fields() {
    let home = demo_home();
    // Course 1 gets record 1 (top-up) then record 2 (settlement).
    tutorbook(home.path())
        .args(["purchases", "edit", "1", "1", "--hours", "8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated purchase record 1 on course 1"));

    tutorbook(home.path())
        .args(["courses", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total purchased: 28 hours, \u{a5}1,200.00"))
        .stdout(predicate::str::contains("\u{a5}240.00"))
        .stdout(predicate::str::contains("2023-07-10"));
}

#[test]
fn deleting_unknown_settlement_fails() {
    let home = demo_home();
    tutorbook(home.path())
        .args(["settlements", "delete", "1", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No settlement record with ID 999"));

    tutorbook(home.path())
        .args(["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settlements:  3"));
}

#[test]
fn demo_is_not_reloaded_after_a_delete() {
    let home = demo_home();
    tutorbook(home.path())
        .args(["courses", "delete", "1"])
        .assert()
        .success();
    tutorbook(home.path())
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("already loaded"));
    tutorbook(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Courses:      2"))
        .stdout(predicate::str::contains("Teachers:     1"));
}
