//! Integration tests for the lectio CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{name}")
}

fn lectio() -> Command {
    let mut cmd = Command::cargo_bin("lectio").unwrap();
    cmd.env_remove("LECTIO_PARSERS_CONFIG");
    cmd
}

#[test]
fn test_parse_english_text() {
    let mut cmd = lectio();
    cmd.arg("parse")
        .arg("-i")
        .arg(fixture_path("english-sample.txt"))
        .arg("-c")
        .arg(fixture_path("english.toml"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("[Alice] [walked] [to] [the] [market]."))
        .stdout(predicate::str::contains("[She] [bought] [apples] [and] [pears]!"))
        .stdout(predicate::str::contains("[Did] [she] [pay]?"));
}

#[test]
fn test_parse_legacy_column_names() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("de.txt");
    fs::write(&input, "Grüße aus Köln! Schön.").unwrap();

    let mut cmd = lectio();
    cmd.arg("parse")
        .arg("-i")
        .arg(&input)
        .arg("-c")
        .arg(fixture_path("legacy-german.toml"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("[Grüße] [aus] [Köln]!"))
        .stdout(predicate::str::contains("[Schön]."));
}

#[test]
fn test_parse_character_language() {
    let mut cmd = lectio();
    cmd.arg("parse")
        .arg("-i")
        .arg(fixture_path("chinese-sample.txt"))
        .arg("-c")
        .arg(fixture_path("chinese.toml"))
        .arg("-f")
        .arg("tokens");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("W\t中\nW\t文\nW\t很\nW\t好\nN\t。\n\nW\t我"));
}

#[test]
fn test_json_output() {
    let mut cmd = lectio();
    cmd.arg("parse")
        .arg("-i")
        .arg(fixture_path("english-sample.txt"))
        .arg("-c")
        .arg(fixture_path("english.toml"))
        .arg("-f")
        .arg("json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let sentences = value.as_array().unwrap();
    assert_eq!(sentences.len(), 4);
    assert_eq!(sentences[0]["text"], "Alice walked to the market.");
    assert_eq!(sentences[3]["word_count"], 1);
}

#[test]
fn test_output_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_file = temp_dir.path().join("output.txt");

    let mut cmd = lectio();
    cmd.arg("parse")
        .arg("-i")
        .arg(fixture_path("english-sample.txt"))
        .arg("-c")
        .arg(fixture_path("english.toml"))
        .arg("-o")
        .arg(&output_file);

    cmd.assert().success().stdout(predicate::str::is_empty());

    let content = fs::read_to_string(&output_file).unwrap();
    assert_eq!(content.lines().count(), 4);
    assert!(content.contains("[Yes]."));
}

#[test]
fn test_glob_pattern() {
    let mut cmd = lectio();
    cmd.arg("parse")
        .arg("-i")
        .arg(fixture_path("english-*.txt"))
        .arg("-c")
        .arg(fixture_path("english.toml"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("[Alice]"));
}

#[test]
fn test_invalid_file() {
    let mut cmd = lectio();
    cmd.arg("parse")
        .arg("-i")
        .arg("nonexistent.txt")
        .arg("-c")
        .arg(fixture_path("english.toml"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("File not found: nonexistent.txt"));
}

#[test]
fn test_invalid_language_config() {
    let mut cmd = lectio();
    cmd.arg("parse")
        .arg("-i")
        .arg(fixture_path("english-sample.txt"))
        .arg("-c")
        .arg(fixture_path("invalid-language.toml"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid word_characters pattern"));
}

#[test]
fn test_unavailable_parser_fails() {
    let mut cmd = lectio();
    cmd.arg("parse")
        .arg("-i")
        .arg(fixture_path("english-sample.txt"))
        .arg("-c")
        .arg(fixture_path("english.toml"))
        .arg("--parser")
        .arg("ghost")
        .arg("--parsers-config")
        .arg(fixture_path("parsers.toml"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Parser 'ghost' is unavailable"));
}

#[test]
fn test_unknown_parser_fails() {
    let mut cmd = lectio();
    cmd.arg("parse")
        .arg("-i")
        .arg(fixture_path("english-sample.txt"))
        .arg("-c")
        .arg(fixture_path("english.toml"))
        .arg("--parser")
        .arg("jieba");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown parser type: jieba"));
}

#[cfg(unix)]
#[test]
fn test_external_parser_from_env() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("words.txt");
    fs::write(&input, "word1\nword2\nword3").unwrap();

    let mut cmd = lectio();
    cmd.env("LECTIO_PARSERS_CONFIG", fixture_path("parsers.toml"))
        .arg("parse")
        .arg("-i")
        .arg(&input)
        .arg("-c")
        .arg(fixture_path("english.toml"))
        .arg("-p")
        .arg("echo")
        .arg("-f")
        .arg("tokens");

    cmd.assert()
        .success()
        .stdout("W\tword\nN\t1\nW\tword\nN\t2\nW\tword\nN\t3\n");
}

#[test]
fn test_help_command() {
    let mut cmd = lectio();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("parse"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn test_list_parsers() {
    let mut cmd = lectio();
    cmd.arg("list")
        .arg("parsers")
        .arg("--parsers-config")
        .arg(fixture_path("parsers.toml"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("character"))
        .stdout(predicate::str::contains("regex"))
        .stdout(predicate::str::contains("Echo (one token per line)"))
        .stdout(predicate::str::contains("ghost"))
        .stdout(predicate::str::contains("unavailable"));
}

#[test]
fn test_list_parsers_json() {
    let mut cmd = lectio();
    cmd.arg("list").arg("parsers").arg("--json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let types: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, vec!["character", "mecab", "regex"]);
}

#[test]
fn test_list_formats() {
    let mut cmd = lectio();
    cmd.arg("list").arg("formats");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("text"))
        .stdout(predicate::str::contains("json"))
        .stdout(predicate::str::contains("tokens"));
}

#[test]
fn test_validate_language_config() {
    let mut cmd = lectio();
    cmd.arg("validate")
        .arg("--language-config")
        .arg(fixture_path("chinese.toml"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("Parser type: character"));
}

#[test]
fn test_validate_invalid_language_config() {
    let mut cmd = lectio();
    cmd.arg("validate")
        .arg("-c")
        .arg(fixture_path("invalid-language.toml"));

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("Configuration is invalid"));
}

#[test]
fn test_validate_parsers_config() {
    let mut cmd = lectio();
    cmd.arg("validate")
        .arg("--parsers-config")
        .arg(fixture_path("invalid-parsers.toml"));

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("✓ echo"))
        .stdout(predicate::str::contains("✗ nobinary"))
        .stderr(predicate::str::contains("1 invalid parser entry"));
}

#[test]
fn test_shipped_example_parsers_config_is_valid() {
    let mut cmd = lectio();
    cmd.arg("validate")
        .arg("--parsers-config")
        .arg("../config/parsers.example.toml");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("✓ jieba"))
        .stdout(predicate::str::contains("✓ mecab"));
}

#[test]
fn test_validate_rejects_shadowed_builtin() {
    let mut cmd = lectio();
    cmd.arg("validate")
        .arg("--parsers-config")
        .arg(fixture_path("shadow-parsers.toml"));

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("✗ regex"))
        .stdout(predicate::str::contains("✓ mecab"));
}

#[test]
fn test_validate_requires_target() {
    let mut cmd = lectio();
    cmd.arg("validate");

    cmd.assert().failure();
}
