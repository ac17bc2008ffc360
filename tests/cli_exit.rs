// tests/cli_exit.rs - binary exit codes and output formats
use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn cohort() -> TempDir {
    let d = tempfile::tempdir().unwrap();
    fs::write(d.path().join("ann.py"), "print(a, b)\n").unwrap();
    fs::write(d.path().join("bob.py"), "# copied\nprint(a, b)\n").unwrap();
    fs::write(d.path().join("cy.py"), "total = sum(values)\n").unwrap();
    d
}

fn run(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_codematch"))
        .args(args)
        .current_dir(dir.path())
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap()
}

#[test]
fn test_check_json_lists_every_pair() {
    let d = cohort();
    let out = run(&d, &["check", ".", "--format", "json"]);
    assert_eq!(out.status.code(), Some(0));
    let value = stdout_json(&out);
    let results = value["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["work_1"]["user"], "ann");
    assert_eq!(results[0]["work_2"]["user"], "bob");
    assert_eq!(results[0]["similarity"]["jaccard_similarity"], 100.0);
}

#[test]
fn test_fail_above_exits_6() {
    let d = cohort();
    let out = run(&d, &["check", ".", "--fail-above", "90"]);
    assert_eq!(out.status.code(), Some(6));
    let out = run(&d, &["compare", "ann.py", "cy.py", "--fail-above", "90"]);
    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn test_empty_directory_exits_2() {
    let d = tempfile::tempdir().unwrap();
    fs::create_dir_all(d.path().join("subs")).unwrap();
    let out = run(&d, &["check", "subs"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_matrix_over_empty_directory_with_members() {
    let d = tempfile::tempdir().unwrap();
    fs::create_dir_all(d.path().join("subs")).unwrap();
    let out = run(&d, &["matrix", "subs", "--members", "a,b,c", "--format", "json"]);
    assert_eq!(out.status.code(), Some(0));
    let value = stdout_json(&out);
    assert_eq!(value["matrix"]["members"], serde_json::json!(["a", "b", "c"]));
    let cells = value["matrix"]["cells"].as_array().unwrap();
    assert_eq!(cells.len(), 3);
    assert!(cells.iter().flat_map(|row| row.as_array().unwrap()).all(|c| c == "-"));

    let out = run(&d, &["matrix", "subs"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_non_utf8_compare_exits_2() {
    let d = cohort();
    fs::write(d.path().join("blob.py"), [0xff, 0xfe, 0x00]).unwrap();
    let out = run(&d, &["compare", "ann.py", "blob.py"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_malformed_config_exits_1() {
    let d = cohort();
    fs::write(d.path().join("codematch.toml"), "[scoring\n").unwrap();
    let out = run(&d, &["check", "."]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_matrix_json_with_members() {
    let d = cohort();
    let out = run(&d, &["matrix", ".", "--members", "bob,ann,zed", "--format", "json"]);
    assert_eq!(out.status.code(), Some(0));
    let value = stdout_json(&out);
    assert_eq!(value["matrix"]["members"], serde_json::json!(["bob", "ann", "zed"]));
    let cells = &value["matrix"]["cells"];
    assert_eq!(cells[0][0], "-");
    assert_eq!(cells[2], serde_json::json!(["-", "-", "-"]));
    assert!(cells[0][1].as_str().unwrap().ends_with('%'));
}

#[test]
fn test_compare_terminal_reports_ratio_line() {
    let d = cohort();
    let out = run(&d, &["compare", "ann.py", "ann.py"]);
    assert_eq!(out.status.code(), Some(0));
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("Similarity: 100.00%"));
    assert!(text.contains("100.00%"));
}
