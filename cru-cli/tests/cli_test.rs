use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const VALID: &str = "\
+AP03
1,D1,MA,10:00-12:00,P202/24,1
2,CM,L,8:00-10:00,B103/90,0
+Algorithms101
idx1,CM,L,8:00-10:00,A101/30,0
";

fn cru_cmd() -> Command {
    let mut cmd = Command::cargo_bin("cru").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("CRU_CONFIG")
        .env_remove("CRU_DATA_DIR");
    cmd
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_check_valid_file() {
    let dir = TempDir::new().unwrap();
    let file = write(dir.path(), "edt.cru", VALID);

    cru_cmd()
        .arg("check")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("is a valid cru file"))
        .stdout(predicate::str::contains("Parsed entries: 3"));
}

#[test]
fn test_check_reports_every_error() {
    let dir = TempDir::new().unwrap();
    let file = write(
        dir.path(),
        "broken.cru",
        "+AP03\n1,D1,ZZ,10:00-12:00,P202/24,1\n2,CM,L,8:00-10:00,B103/90,10\n",
    );

    cru_cmd()
        .arg("check")
        .arg(&file)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("contains errors"))
        .stdout(predicate::str::contains(":2:6: error: unknown day code 'ZZ'"))
        .stdout(predicate::str::contains(":3:"))
        .stderr(predicate::str::contains("2 error(s)"));
}

#[test]
fn test_check_missing_file() {
    cru_cmd()
        .arg("check")
        .arg("/nonexistent/edt.cru")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"))
        .stderr(predicate::str::contains("Error: I/O error"));
}

#[test]
fn test_check_show_symbols_does_not_change_the_outcome() {
    let dir = TempDir::new().unwrap();
    let file = write(dir.path(), "edt.cru", VALID);

    cru_cmd()
        .args(["check", "-s", "-t"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Parsed entries: 3"))
        .stderr(predicate::str::contains("session-line"));
}

#[test]
fn test_check_traces_options_from_config() {
    let dir = TempDir::new().unwrap();
    let file = write(dir.path(), "edt.cru", VALID);
    let config = write(dir.path(), "options.json", r#"{"trace_grammar": true}"#);

    cru_cmd()
        .arg("--config")
        .arg(&config)
        .arg("check")
        .arg(&file)
        .assert()
        .success()
        .stderr(predicate::str::contains("session-line"));

    cru_cmd()
        .arg("check")
        .arg(&file)
        .assert()
        .success()
        .stderr(predicate::str::contains("session-line").not());
}

#[test]
fn test_search_by_needle_and_day() {
    let dir = TempDir::new().unwrap();
    let file = write(dir.path(), "edt.cru", VALID);

    let output = cru_cmd()
        .arg("search")
        .arg(&file)
        .args(["-n", "b103", "-d", "L"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let sessions: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let indexes: Vec<&str> = sessions
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["index"].as_str().unwrap())
        .collect();
    assert_eq!(indexes, vec!["2"]);
}

#[test]
fn test_search_by_needle() {
    let dir = TempDir::new().unwrap();
    let file = write(dir.path(), "edt.cru", VALID);

    cru_cmd()
        .arg("search")
        .arg(&file)
        .args(["--needle", "algorithms"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"course\": \"Algorithms101\""))
        .stdout(predicate::str::contains("AP03").not());
}

#[test]
fn test_search_by_day() {
    let dir = TempDir::new().unwrap();
    let file = write(dir.path(), "edt.cru", VALID);

    let output = cru_cmd()
        .arg("search")
        .arg(&file)
        .args(["-d", "L"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let sessions: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let indexes: Vec<&str> = sessions
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["index"].as_str().unwrap())
        .collect();
    assert_eq!(indexes, vec!["2", "idx1"]);
}

#[test]
fn test_search_rejects_unknown_day() {
    let dir = TempDir::new().unwrap();
    let file = write(dir.path(), "edt.cru", VALID);

    cru_cmd()
        .arg("search")
        .arg(&file)
        .args(["-d", "S"])
        .assert()
        .failure();
}

#[test]
fn test_search_preview() {
    let dir = TempDir::new().unwrap();
    let mut source = String::from("+AP03\n");
    for i in 0..15 {
        source.push_str(&format!("{},TD,V,8-10,R{}/10,0\n", i, i));
    }
    let file = write(dir.path(), "big.cru", &source);

    let output = cru_cmd().arg("search").arg(&file).output().unwrap();
    assert!(output.status.success());
    let sessions: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(sessions.as_array().unwrap().len(), 10);
}

#[test]
fn test_rooms_across_data_dir() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "AB/edt.cru",
        "+AP03\n1,D1,MA,10:00-12:00,P202/24,1\n2,CM,L,8:00-10:00,B103/90,0\n",
    );
    write(
        dir.path(),
        "CD/edt.cru",
        "+AP03\n3,TD,J,14-16,P202/24,2\n4,TD,J,16-18,C005/24,2\n+BD01\n1,CM,V,8-10,Z9/10,0\n",
    );

    let output = cru_cmd()
        .args(["rooms", "AP03", "--data-dir"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let view: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(view["course"], "AP03");
    assert_eq!(
        view["rooms"],
        serde_json::json!(["P202", "B103", "C005"])
    );
}

#[test]
fn test_rooms_reads_data_dir_from_env() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "edt.cru", VALID);

    cru_cmd()
        .env("CRU_DATA_DIR", dir.path())
        .args(["rooms", "Algorithms101"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A101"));
}

#[test]
fn test_config_widens_the_day_window() {
    let dir = TempDir::new().unwrap();
    let file = write(dir.path(), "late.cru", "+AP03\n1,D1,MA,20:00-22:00,P202/24,1\n");
    let config = write(
        dir.path(),
        "options.json",
        r#"{"day_window": {"closes": "22:00"}}"#,
    );

    cru_cmd().arg("check").arg(&file).assert().failure();

    cru_cmd()
        .arg("--config")
        .arg(&config)
        .arg("check")
        .arg(&file)
        .assert()
        .success();
}
