//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn granulize() -> Command {
    Command::cargo_bin("granulize").expect("binary exists")
}

#[test]
fn process_stdin_emits_annotated_markup() {
    granulize()
        .args(["process", "--quiet"])
        .write_stdin("Hello world.")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"data-grain="word word-Hello""#))
        .stdout(predicate::str::contains("--word-index: 1"));
}

#[test]
fn process_json_format_reports_counts() {
    granulize()
        .args(["process", "--quiet", "--format", "json"])
        .write_stdin("<b>Hi</b> there")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""tagCount": 1"#))
        .stdout(predicate::str::contains(r#""wordCount": 2"#))
        .stdout(predicate::str::contains(r#""source": "stdin""#));
}

#[test]
fn process_summary_format() {
    granulize()
        .args(["process", "--quiet", "--format", "summary"])
        .write_stdin("Hi. Bye.")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "stdin: tags=0 words=2 characters=0 sentences=2 phrases=1",
        ));
}

#[test]
fn process_characters_flag_enables_character_grains() {
    granulize()
        .args(["process", "--quiet", "--characters"])
        .write_stdin("hi")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"data-grain="char char-h""#));
}

#[test]
fn process_files_and_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("fragment.html");
    let output = temp_dir.path().join("out.html");
    fs::write(&input, "<p>one two</p>").unwrap();

    granulize()
        .args([
            "process",
            "--quiet",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains(r#"<p data-grain="tag tag-p""#));
    assert!(written.contains(r#"word word-two"#));
}

#[test]
fn process_glob_pattern_handles_multiple_files() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.html"), "one").unwrap();
    fs::write(temp_dir.path().join("b.html"), "two three").unwrap();

    let pattern = format!("{}/*.html", temp_dir.path().display());
    granulize()
        .args(["process", "--quiet", "--format", "summary", "-i", &pattern])
        .assert()
        .success()
        .stdout(predicate::str::contains("words=1"))
        .stdout(predicate::str::contains("words=2"));
}

#[test]
fn process_missing_file_fails() {
    granulize()
        .args(["process", "--quiet", "-i", "/nonexistent/*.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files found"));
}

#[test]
fn process_with_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("granulize.toml");
    fs::write(&config, "attribute = \"data-unit\"\n").unwrap();

    granulize()
        .args(["process", "--quiet", "--config", config.to_str().unwrap()])
        .write_stdin("hi")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"data-unit="word word-hi""#));
}

#[test]
fn validate_accepts_good_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("granulize.toml");
    fs::write(&config, "characters = true\n").unwrap();

    granulize()
        .args(["validate", "--config", config.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn validate_rejects_broken_pattern() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("granulize.toml");
    fs::write(&config, "interpunction_pattern = \"[,;\"\n").unwrap();

    granulize()
        .args(["validate", "--config", config.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Configuration is invalid"));
}

#[test]
fn generate_config_then_validate() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("granulize.toml");

    granulize()
        .args(["generate-config", "--output", config.to_str().unwrap()])
        .assert()
        .success();

    granulize()
        .args(["validate", "--config", config.to_str().unwrap()])
        .assert()
        .success();
}

#[test]
fn help_lists_subcommands() {
    granulize()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("generate-config"));
}
