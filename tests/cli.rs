use assert_cmd::Command;
use std::fs;

#[test]
fn runs() {
    let mut cmd = Command::cargo_bin("panconv").unwrap();
    cmd.assert().success();
}

#[test]
fn outputs_tool_name() {
    let mut cmd = Command::cargo_bin("panconv").unwrap();
    cmd.arg("-V");
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("panconv"));
}

// Detect subcommand tests

#[test]
fn detect_reports_json() {
    let mut cmd = Command::cargo_bin("panconv").unwrap();
    cmd.args(["detect", "tests/fixtures/sample.json"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("sample.json: json"));
}

#[test]
fn detect_reports_csv_and_toml() {
    let mut cmd = Command::cargo_bin("panconv").unwrap();
    cmd.args([
        "detect",
        "tests/fixtures/sample.csv",
        "tests/fixtures/sample.toml",
    ]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("sample.csv: csv"))
        .stdout(predicates::str::contains("sample.toml: toml"));
}

#[test]
fn detect_reports_unknown_for_binary_garbage() {
    let mut cmd = Command::cargo_bin("panconv").unwrap();
    cmd.args(["detect", "tests/fixtures/garbage.bin"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("garbage.bin: unknown"));
}

#[test]
fn detect_json_output_format() {
    let mut cmd = Command::cargo_bin("panconv").unwrap();
    cmd.args([
        "detect",
        "tests/fixtures/sample.json",
        "--output",
        "json",
    ]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("\"format\": \"json\""));
}

#[test]
fn detect_nonexistent_file_fails() {
    let mut cmd = Command::cargo_bin("panconv").unwrap();
    cmd.args(["detect", "nonexistent_file.json"]);
    cmd.assert().failure();
}

// Convert subcommand tests

#[test]
fn convert_json_to_csv() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let output = dir.path().join("out.csv");

    let mut cmd = Command::cargo_bin("panconv").unwrap();
    cmd.args(["convert", "tests/fixtures/sample.json"])
        .arg(&output)
        .args(["--to", "csv"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Converted"));

    let written = fs::read_to_string(&output).expect("read output");
    assert_eq!(written, "age,name,tags\n30,Ann,\"[a, b]\"\n");
}

#[test]
fn convert_infers_target_from_output_extension() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let output = dir.path().join("out.yaml");

    let mut cmd = Command::cargo_bin("panconv").unwrap();
    cmd.args(["convert", "tests/fixtures/sample.json"]).arg(&output);
    cmd.assert().success();

    let written = fs::read_to_string(&output).expect("read output");
    assert!(written.contains("name: Ann"));
    assert!(written.contains("age: 30"));
}

#[test]
fn convert_csv_to_pretty_json() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let output = dir.path().join("out.json");

    let mut cmd = Command::cargo_bin("panconv").unwrap();
    cmd.args(["convert", "tests/fixtures/sample.csv"])
        .arg(&output)
        .args(["--to", "json", "--pretty"]);
    cmd.assert().success();

    let written = fs::read_to_string(&output).expect("read output");
    assert!(written.contains("\"name\": \"Ann\""));
    assert!(written.contains("\"age\": 30"));
}

#[test]
fn convert_rejects_unsupported_target() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let output = dir.path().join("out.parquet");

    let mut cmd = Command::cargo_bin("panconv").unwrap();
    cmd.args(["convert", "tests/fixtures/sample.json"])
        .arg(&output)
        .args(["--to", "parquet"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("unsupported format"));
}

#[test]
fn convert_rejects_undetectable_input() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let output = dir.path().join("out.json");

    let mut cmd = Command::cargo_bin("panconv").unwrap();
    cmd.args(["convert", "tests/fixtures/garbage.bin"])
        .arg(&output)
        .args(["--to", "json"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("could not detect"));
}

// Batch subcommand tests

#[test]
fn batch_converts_directory_and_skips_failures() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let input_dir = dir.path().join("in");
    let output_dir = dir.path().join("out");
    fs::create_dir_all(&input_dir).expect("create input dir");

    fs::write(input_dir.join("a.json"), "{\"x\": 1}").expect("write a.json");
    fs::write(input_dir.join("b.csv"), "k,v\nname,2\n").expect("write b.csv");
    // Content is garbage even though the extension looks convertible.
    fs::write(input_dir.join("broken.json"), "\x00\x01\x02").expect("write broken.json");

    let mut cmd = Command::cargo_bin("panconv").unwrap();
    cmd.arg("batch")
        .arg(&input_dir)
        .arg(&output_dir)
        .args(["--to", "yaml"]);
    cmd.assert()
        .success()
        .stderr(predicates::str::contains("Warning: error processing"));

    assert!(output_dir.join("a.yaml").exists());
    assert!(output_dir.join("b.yaml").exists());
    assert!(!output_dir.join("broken.yaml").exists());
}

#[test]
fn batch_without_target_keeps_per_file_formats() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let input_dir = dir.path().join("in");
    let output_dir = dir.path().join("out");
    fs::create_dir_all(&input_dir).expect("create input dir");

    fs::write(input_dir.join("a.json"), "{\"x\": 1}").expect("write a.json");
    fs::write(input_dir.join("noext"), "{\"x\": 1}").expect("write noext");

    let mut cmd = Command::cargo_bin("panconv").unwrap();
    cmd.arg("batch").arg(&input_dir).arg(&output_dir);
    cmd.assert()
        .success()
        .stderr(predicates::str::contains("unknown target format"));

    assert!(output_dir.join("a.json").exists());
}
