//! Integration tests for the contractgen CLI

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MANIFEST: &str = r#"
contracts:
  - name: com.example.Assets
    methods:
      - name: readme
        returns: { name: String }
        markers: { resource: readme.txt }
  - name: com.example.Users
    methods:
      - name: get
        params:
          - { name: id, type: { name: long } }
        returns:
          name: contractgen.runtime.Promise
          args: [{ name: com.example.User }]
        markers: { path: /users, verbs: [GET] }
"#;

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let resources = dir.path().join("src/main/resources/com/example");
    std::fs::create_dir_all(&resources).unwrap();
    std::fs::write(resources.join("readme.txt"), "read me").unwrap();
    std::fs::write(dir.path().join("contracts.yaml"), MANIFEST).unwrap();
    dir
}

#[test]
fn test_generate_writes_sources() {
    let dir = project();
    let output = dir.path().join("out");
    let mut cmd = Command::cargo_bin("contractgen").unwrap();

    cmd.arg("generate")
        .arg("--declarations")
        .arg(dir.path().join("contracts.yaml"))
        .arg("--search-root")
        .arg(dir.path())
        .arg("--output-dir")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 3 source file(s)"));

    let service = std::fs::read_to_string(output.join("com/example/UsersImpl.java")).unwrap();
    assert!(service.contains(".queryParam(\"id\", String.valueOf(id))"));
    assert!(output.join("com/example/AssetsImpl.java").exists());
}

#[test]
fn test_generate_dry_run_lists_names() {
    let dir = project();
    let output = dir.path().join("out");
    let mut cmd = Command::cargo_bin("contractgen").unwrap();

    cmd.arg("generate")
        .arg("--declarations")
        .arg(dir.path().join("contracts.yaml"))
        .arg("--search-root")
        .arg(dir.path())
        .arg("--output-dir")
        .arg(&output)
        .arg("--generator")
        .arg("services")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("com.example.UsersImpl"))
        .stdout(predicate::str::contains("AssetsImpl").not());

    assert!(!output.exists());
}

#[test]
fn test_generate_reports_configuration_errors() {
    let dir = project();
    std::fs::write(
        dir.path().join("broken.yaml"),
        MANIFEST.replace("verbs: [GET]", "verbs: [GET, POST]"),
    )
    .unwrap();
    let mut cmd = Command::cargo_bin("contractgen").unwrap();

    cmd.arg("generate")
        .arg("--declarations")
        .arg(dir.path().join("broken.yaml"))
        .arg("--search-root")
        .arg(dir.path())
        .arg("--output-dir")
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Generation pass failed"));

    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_generate_rejects_zero_chunk_size() {
    let dir = project();
    let config = dir.path().join("contractgen.toml");
    std::fs::write(&config, "[embedding]\nchunk_size = 0\n").unwrap();
    let mut cmd = Command::cargo_bin("contractgen").unwrap();

    cmd.arg("generate")
        .arg("--declarations")
        .arg(dir.path().join("contracts.yaml"))
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_resolve_command() {
    let dir = project();
    let mut cmd = Command::cargo_bin("contractgen").unwrap();

    cmd.arg("resolve")
        .arg("com/example/readme.txt")
        .arg("--search-root")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("readme.txt"));

    let mut cmd = Command::cargo_bin("contractgen").unwrap();
    cmd.arg("resolve")
        .arg("com/example/contractgen-absent-7f3a.txt")
        .arg("--search-root")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
