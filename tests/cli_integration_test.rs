//! End-to-end tests of the valuemap binary.

use assert_cmd::Command;

fn valuemap() -> Command {
    Command::cargo_bin("valuemap").unwrap()
}

#[test]
fn industries_lists_the_builtin_catalog() {
    let output = valuemap().arg("industries").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Automotive"));
    assert!(stdout.contains("Retail"));
    assert!(stdout.contains("Telecommunications"));
}

#[test]
fn industries_json_is_a_twelve_element_array() {
    let output = valuemap()
        .args(["industries", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let names: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(names.len(), 12);
}

#[test]
fn estimate_emits_a_parseable_json_report() {
    let output = valuemap()
        .args([
            "estimate",
            "--industry",
            "Retail",
            "--entities",
            "10",
            "--products",
            "listings",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["snapshot"]["industry"], "Retail");
    assert_eq!(report["snapshot"]["multiplier"], 3);
    assert!(report["generated_at"].is_string());
}

#[test]
fn estimate_renders_the_three_value_sections_on_the_terminal() {
    let output = valuemap()
        .args([
            "estimate",
            "--industry",
            "Retail",
            "--entities",
            "10",
            "--products",
            "listings,reviews",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Operational Value"));
    assert!(stdout.contains("Marketing Value"));
    assert!(stdout.contains("Conversion Value"));
}

#[test]
fn estimate_rejects_an_unknown_industry() {
    let output = valuemap()
        .args(["estimate", "--industry", "Alchemy"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("unknown industry"));
    assert!(stderr.contains("Retail"));
}

#[test]
fn estimate_rejects_non_numeric_entities() {
    let output = valuemap()
        .args(["estimate", "--industry", "Retail", "--entities", "lots"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("--entities"));
}

#[test]
fn estimate_rejects_an_unknown_product() {
    let output = valuemap()
        .args([
            "estimate",
            "--industry",
            "Retail",
            "--products",
            "billing",
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("unknown product"));
}

#[test]
fn estimate_markdown_contains_the_breakdown_table() {
    let output = valuemap()
        .args([
            "estimate",
            "--industry",
            "Retail",
            "--entities",
            "10",
            "--products",
            "listings",
            "--format",
            "markdown",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("# Valuemap Estimate"));
    assert!(stdout.contains("| Industry | Retail |"));
    assert!(stdout.contains("**Total value**"));
}

#[test]
fn session_processes_piped_commands() {
    let output = valuemap()
        .arg("session")
        .write_stdin("industry Retail\nentities 10\ntoggle listings on\nshow\nquit\n")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Operational Value"));
}

#[test]
fn session_reports_invalid_numeric_input_without_dying() {
    let output = valuemap()
        .arg("session")
        .write_stdin("entities banana\nquit\n")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("not a valid non-negative number"));
}
