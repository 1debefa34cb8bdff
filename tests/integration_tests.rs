//! Integration tests for the wordfreq CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Binary pinned to a scratch directory, with no ambient configuration
fn wordfreq(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("wordfreq").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("RUST_LOG")
        .env_remove("WORDFREQ_REPORT__ORDER")
        .env_remove("WORDFREQ_COUNTER__MODE");
    cmd
}

/// Report header with `spaces` between the labels
fn header(spaces: usize) -> String {
    format!("Word{}Frequency", " ".repeat(spaces))
}

fn stdout_lines(output: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(output)
        .lines()
        .map(str::to_string)
        .collect()
}

/// Test CLI binary exists and responds to --help
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("wordfreq").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Count word frequencies"));
}

/// Test CLI responds to --version
#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("wordfreq").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wordfreq"));
}

/// Test invalid subcommand shows error
#[test]
fn test_invalid_subcommand() {
    let mut cmd = Command::cargo_bin("wordfreq").unwrap();
    cmd.arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_alphabetical_report() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("one.txt"), "cat bat ant bat\n").unwrap();
    fs::write(temp_dir.path().join("two.txt"), "Bat, ANT; bat cat ant!").unwrap();

    let assert = wordfreq(&temp_dir)
        .args(["count", "one.txt", "two.txt"])
        .assert()
        .success();

    assert_eq!(
        stdout_lines(&assert.get_output().stdout),
        vec![header(10).as_str(), "ant 3", "bat 4", "cat 2"]
    );
}

#[test]
fn test_ranked_report() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("words.txt"),
        "cat cat bat bat bat bat bat ant ant ant ant ant",
    )
    .unwrap();

    let assert = wordfreq(&temp_dir)
        .args(["count", "--order", "ranked", "words.txt"])
        .assert()
        .success();

    let lines = stdout_lines(&assert.get_output().stdout);
    assert_eq!(lines.len(), 4);
    assert!(lines[1].ends_with(" 5") && lines[2].ends_with(" 5"));
    assert!(lines[3].starts_with("cat"));
}

#[test]
fn test_missing_file_is_reported_but_not_fatal() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("valid.txt"), "hello hello world").unwrap();

    wordfreq(&temp_dir)
        .args(["count", "valid.txt", "missing.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello 2"))
        .stdout(predicate::str::contains("world 1"))
        .stderr(predicate::str::contains("failed to open missing.txt"));
}

#[test]
fn test_directory_argument_is_walked() {
    let temp_dir = TempDir::new().unwrap();
    let docs = temp_dir.path().join("docs");
    fs::create_dir_all(docs.join("nested")).unwrap();
    fs::write(docs.join("a.txt"), "river stone").unwrap();
    fs::write(docs.join("nested").join("b.txt"), "river").unwrap();

    wordfreq(&temp_dir)
        .args(["count", "docs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("river 2"))
        .stdout(predicate::str::contains("stone 1"));
}

#[test]
fn test_json_output_with_limit_and_stats() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "go Go GO stop stop").unwrap();

    let assert = wordfreq(&temp_dir)
        .args([
            "count", "--ranked", "--format", "json", "-n", "1", "--stats", "a.txt", "gone.txt",
        ])
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(value["order"], "ranked");
    assert_eq!(value["words"].as_array().map(Vec::len), Some(1));
    assert_eq!(value["words"][0]["word"], "go");
    assert_eq!(value["words"][0]["count"], 3);
    assert_eq!(value["stats"]["files_requested"], 2);
    assert_eq!(value["stats"]["files_failed"], 1);
    assert_eq!(value["stats"]["total_words"], 5);
}

#[test]
fn test_sequential_mode_matches_parallel() {
    let temp_dir = TempDir::new().unwrap();
    for (name, text) in [
        ("a.txt", "one two three two"),
        ("b.txt", "three three four"),
        ("c.txt", "Four, four; ONE"),
    ] {
        fs::write(temp_dir.path().join(name), text).unwrap();
    }
    let files = ["a.txt", "b.txt", "c.txt"];

    let parallel = wordfreq(&temp_dir)
        .args(["count", "--mode", "parallel"])
        .args(files)
        .output()
        .unwrap();
    let sequential = wordfreq(&temp_dir)
        .args(["count", "--mode", "sequential"])
        .args(files)
        .output()
        .unwrap();

    assert!(parallel.status.success());
    assert_eq!(parallel.stdout, sequential.stdout);
}

#[test]
fn test_repository_config_sets_defaults() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("wordfreq.toml"),
        "[report]\norder = \"ranked\"\nlimit = 1\n",
    )
    .unwrap();
    fs::write(temp_dir.path().join("a.txt"), "ab cd cd").unwrap();

    let assert = wordfreq(&temp_dir)
        .args(["count", "a.txt"])
        .assert()
        .success();

    assert_eq!(
        stdout_lines(&assert.get_output().stdout),
        vec![header(11).as_str(), "cd 2"]
    );
}

#[test]
fn test_cli_flag_beats_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("custom.toml");
    fs::write(&config, "[report]\norder = \"ranked\"\n").unwrap();
    fs::write(temp_dir.path().join("a.txt"), "zz yy yy").unwrap();

    let assert = wordfreq(&temp_dir)
        .arg("--config")
        .arg(&config)
        .args(["count", "--order", "alphabetical", "a.txt"])
        .assert()
        .success();

    assert_eq!(
        stdout_lines(&assert.get_output().stdout),
        vec![header(11).as_str(), "yy 2", "zz 1"]
    );
}

#[test]
fn test_config_show() {
    let temp_dir = TempDir::new().unwrap();

    wordfreq(&temp_dir)
        .args(["config", "show", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mode\": \"auto\""));

    wordfreq(&temp_dir)
        .args(["config", "get", "report.order"])
        .assert()
        .success()
        .stdout(predicate::str::diff("alphabetical\n"));
}

#[test]
fn test_no_files_prints_empty_report() {
    let temp_dir = TempDir::new().unwrap();

    wordfreq(&temp_dir)
        .arg("count")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", header(14))));
}
