//! Integration tests for the CLI interface

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn mapsat() -> Command {
    let mut cmd = Command::cargo_bin("mapsat").unwrap();
    cmd.env_remove("MAPSAT_LOG_LEVEL")
        .env_remove("MAPSAT_TOLERANCE")
        .env_remove("MAPSAT_FIXTURES");
    cmd
}

#[test]
fn test_cli_help() {
    mapsat()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("fixtures"));
}

#[test]
fn test_list_shows_all_classifiers() {
    mapsat()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("palindrome"))
        .stdout(predicate::str::contains("has_rhyme_pair (uses group context)"))
        .stdout(predicate::str::contains("three_set_bits"));
}

#[test]
fn test_run_with_inline_groups() {
    mapsat()
        .args([
            "run",
            "palindrome",
            "--group",
            "a1551a,parc,ana,minim,1pcl3",
            "--group",
            "calabalac,tivit,leu,zece10,ploaie,9ana9",
            "--group",
            "lalalal,tema,papa,ger",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("2.333"));
}

#[test]
fn test_run_fraction_from_groups_file() {
    let mut file = NamedTempFile::with_suffix(".json").unwrap();
    write!(file, r#"[["ana", "parc"], ["minim", "leu"]]"#).unwrap();

    mapsat()
        .args(["run", "palindrome", "--fraction", "--groups-file"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0.500"));
}

#[test]
fn test_unknown_classifier_fails() {
    mapsat()
        .args(["run", "is_prime", "--group", "2,3,4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown classifier 'is_prime'"));
}

#[test]
fn test_run_without_groups_fails() {
    mapsat()
        .args(["run", "palindrome"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty group set"));
}

#[test]
fn test_builtin_fixtures_pass() {
    let dir = TempDir::new().unwrap();
    mapsat()
        .current_dir(dir.path())
        .arg("fixtures")
        .assert()
        .success()
        .stdout(predicate::str::contains("palindrome"))
        .stdout(predicate::str::contains("FAILED").not());
}

#[test]
fn test_failing_fixture_file_exits_nonzero() {
    let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
    write!(
        file,
        "- name: palindrome\n  groups: [[ana, parc]]\n  expected: 2.0\n"
    )
    .unwrap();

    mapsat()
        .arg("fixtures")
        .arg("--file")
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAILED"))
        .stderr(predicate::str::contains("Failed fixtures: [1]"));
}

#[test]
fn test_config_file_tolerance_is_used() {
    let dir = TempDir::new().unwrap();
    let fixtures_path = dir.path().join("suite.yaml");
    std::fs::write(
        &fixtures_path,
        "- name: palindrome\n  groups: [[ana, parc]]\n  expected: 1.4\n",
    )
    .unwrap();
    let config_path = dir.path().join("mapsat.toml");
    std::fs::write(
        &config_path,
        format!("tolerance = 0.5\nfixtures = {:?}\n", fixtures_path),
    )
    .unwrap();

    mapsat()
        .current_dir(dir.path())
        .args(["fixtures", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"passed\": true"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut file = NamedTempFile::with_suffix(".toml").unwrap();
    write!(file, "tolerance = \"loose\"").unwrap();

    mapsat()
        .arg("--config")
        .arg(file.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
