//! CLI command contract tests
//!
//! Runs the `tinct` binary as a subprocess and checks:
//! - Deterministic output for every command
//! - Exit codes and actionable error messages on failure
//! - Config file and flag precedence

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tinct() -> Command {
    let mut cmd = Command::cargo_bin("tinct").expect("tinct binary");
    cmd.env_remove("RUST_LOG").env_remove("TINCT_CONFIG");
    cmd
}

// =============================================================================
// render
// =============================================================================

#[test]
fn render_defaults_to_hex() {
    tinct()
        .args(["render", "rgb(0, 10, 100)"])
        .assert()
        .success()
        .stdout("#000a64\n");
}

#[test]
fn render_with_preset() {
    tinct()
        .args(["render", "#aaa", "--preset", "rgb"])
        .assert()
        .success()
        .stdout("rgb(170, 170, 170)\n");
}

#[test]
fn render_with_template() {
    tinct()
        .args(["render", "#ff8000", "--template", "RR/GR/BR AR"])
        .assert()
        .success()
        .stdout("255/128/0 255\n");
}

#[test]
fn render_flattens_json_collections() {
    tinct()
        .args(["render", r##"["#f00", {"r": 0, "g": 0, "b": 255}]"##])
        .assert()
        .success()
        .stdout("#ff0000\n#0000ff\n");
}

#[test]
fn render_json_flag_reads_numbers() {
    tinct()
        .args(["--json", "render", "51"])
        .assert()
        .success()
        .stdout("#333333\n");
}

#[test]
fn seeded_random_is_repeatable() {
    let first = tinct()
        .args(["--seed", "9", "render", "random"])
        .output()
        .expect("run tinct");
    let second = tinct()
        .args(["--seed", "9", "render", "random"])
        .output()
        .expect("run tinct");
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn template_and_preset_conflict() {
    tinct()
        .args(["render", "#fff", "--template", "RH", "--preset", "hex"])
        .assert()
        .failure();
}

// =============================================================================
// inspect
// =============================================================================

#[test]
fn inspect_emits_all_views() {
    let output = tinct()
        .args(["inspect", "#ff0000"])
        .output()
        .expect("run tinct");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(value["hex"], "#ff0000");
    assert_eq!(value["rgb"]["r"], 255);
    assert_eq!(value["hsv"]["s"], 1.0);
    assert_eq!(value["cmyk"]["m"], 1.0);
    assert_eq!(value["gray"], false);
}

#[test]
fn inspect_collection_is_an_array() {
    let output = tinct()
        .args(["inspect", r##"["#000", "#fff"]"##])
        .output()
        .expect("run tinct");
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(value.as_array().map(Vec::len), Some(2));
}

// =============================================================================
// sort / average / contrast
// =============================================================================

#[test]
fn sort_by_hue() {
    tinct()
        .args(["sort", "#00f", "#f00", "#0f0"])
        .assert()
        .success()
        .stdout("#ff0000\n#00ff00\n#0000ff\n");
}

#[test]
fn sort_by_brightness_reversed() {
    tinct()
        .args(["sort", "--by", "brightness", "--reverse", "#333", "#fff", "#000"])
        .assert()
        .success()
        .stdout("#ffffff\n#333333\n#000000\n");
}

#[test]
fn unknown_sort_key_is_rejected() {
    tinct()
        .args(["sort", "--by", "chroma", "#000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown sort key"));
}

#[test]
fn average_of_black_and_white() {
    tinct()
        .args(["average", "#000", "#fff", "--preset", "rgb"])
        .assert()
        .success()
        .stdout("rgb(127, 127, 127)\n");
}

#[test]
fn contrast_on_white_is_black() {
    tinct()
        .args(["contrast", "#fff"])
        .assert()
        .success()
        .stdout("#000000\n");
}

#[test]
fn contrast_on_black_is_white() {
    tinct()
        .args(["contrast", "#000"])
        .assert()
        .success()
        .stdout("#ffffff\n");
}

// =============================================================================
// errors
// =============================================================================

#[test]
fn malformed_input_fails_with_remediation() {
    tinct()
        .args(["render", "not-a-color"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Format was not recognized"))
        .stderr(predicate::str::contains("To fix:"))
        .stderr(predicate::str::contains("rgb(0, 10, 100)"));
}

#[test]
fn lab_reports_not_implemented() {
    tinct()
        .args(["render", "lab(0.1, 0.2, 0.3)"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not implemented"));
}

#[test]
fn deeply_nested_input_is_rejected() {
    let text = format!(
        "{}#a00{}",
        "randomval(\"".repeat(5_000),
        "\")".repeat(5_000)
    );
    tinct()
        .args(["render", &text])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nesting too deep"));
}

#[test]
fn invalid_json_is_reported() {
    tinct()
        .args(["render", "{not json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input is not valid JSON"));
}

// =============================================================================
// configuration
// =============================================================================

#[test]
fn config_file_sets_preset() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("tinct.toml");
    std::fs::write(&path, "[output]\npreset = \"css-color\"\n").expect("write config");

    tinct()
        .arg("--config")
        .arg(&path)
        .args(["render", "#abc"])
        .assert()
        .success()
        .stdout("color: #aabbcc;\n");
}

#[test]
fn flag_preset_wins_over_config() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("tinct.toml");
    std::fs::write(&path, "[output]\npreset = \"css-color\"\n").expect("write config");

    tinct()
        .arg("--config")
        .arg(&path)
        .args(["render", "#abc", "--preset", "hex"])
        .assert()
        .success()
        .stdout("#aabbcc\n");
}

#[test]
fn precision_flag_changes_float_output() {
    tinct()
        .args(["--precision", "3", "render", "#aaa", "--template", "RF"])
        .assert()
        .success()
        .stdout("0.667\n");
}

#[test]
fn missing_config_file_fails() {
    tinct()
        .args(["--config", "/nonexistent/tinct.toml", "render", "#fff"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn precision_out_of_range_fails() {
    tinct()
        .args(["--precision", "99", "render", "#fff"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("precision"));
}

#[test]
fn coarse_precision_fails() {
    tinct()
        .args(["--precision", "1", "render", "f(0.5, 0.5, 0.5)", "--template", "RR"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 3 and 15"));
}
