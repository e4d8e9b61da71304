//! Integration tests for the wilda CLI.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn write_test_photo(dir: &std::path::Path, name: &str, rgb: [u8; 3]) -> std::path::PathBuf {
    let path = dir.join(name);
    let photo = image::RgbImage::from_pixel(64, 48, image::Rgb(rgb));
    photo.save(&path).expect("write test photo");
    path
}

#[test]
fn test_catalog_list_shows_bundled_species() {
    let mut cmd = cargo_bin_cmd!("wilda");
    cmd.arg("catalog").arg("list");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Dugite"))
        .stdout(predicate::str::contains("Redback Spider"))
        .stdout(predicate::str::contains("lethal"));
}

#[test]
fn test_catalog_show_prints_safety_guidance() {
    let mut cmd = cargo_bin_cmd!("wilda");
    cmd.arg("catalog").arg("show").arg("dugite");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Pseudonaja affinis"))
        .stdout(predicate::str::contains("First aid:"))
        .stdout(predicate::str::contains("Call 000"));
}

#[test]
fn test_catalog_show_unknown_species_fails() {
    let mut cmd = cargo_bin_cmd!("wilda");
    cmd.arg("catalog").arg("show").arg("drop-bear");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not found in catalog"));
}

#[test]
fn test_no_inputs_prints_help() {
    let mut cmd = cargo_bin_cmd!("wilda");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_identify_photo_in_fallback_mode() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let photo = write_test_photo(dir.path(), "backyard.jpg", [140, 110, 70]);

    // No model is configured, so identification runs on the heuristic path.
    let mut cmd = cargo_bin_cmd!("wilda");
    cmd.arg(&photo).arg("--quiet");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Species:"))
        .stdout(predicate::str::contains("Confidence:"))
        .stdout(predicate::str::contains("heuristic"));
}

#[test]
fn test_identify_with_missing_model_still_succeeds() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let photo = write_test_photo(dir.path(), "backyard.png", [60, 160, 60]);

    let mut cmd = cargo_bin_cmd!("wilda");
    cmd.arg(&photo)
        .arg("--model-path")
        .arg("/nonexistent/wildlife.onnx")
        .arg("--quiet");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Species:"));
}

#[test]
fn test_identify_writes_json_output() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let photo = write_test_photo(dir.path(), "shed.png", [40, 40, 40]);
    let out_dir = dir.path().join("results");
    std::fs::create_dir_all(&out_dir).expect("create output dir");

    let mut cmd = cargo_bin_cmd!("wilda");
    cmd.arg(&photo)
        .arg("--format")
        .arg("json")
        .arg("--output-dir")
        .arg(&out_dir)
        .arg("--quiet");

    cmd.assert().success();

    let output_path = out_dir.join("shed.wilda.json");
    let content = std::fs::read_to_string(&output_path).expect("JSON output exists");
    let parsed: serde_json::Value = serde_json::from_str(&content).expect("valid JSON");

    assert_eq!(parsed["source_file"], "shed.png");
    assert_eq!(parsed["classifier_mode"], "heuristic");
    let confidence = parsed["confidence"].as_f64().expect("confidence is a number");
    assert!((0.70..=0.98).contains(&confidence));
}

#[test]
fn test_identify_writes_csv_output() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let photo = write_test_photo(dir.path(), "garden.png", [90, 140, 80]);

    let mut cmd = cargo_bin_cmd!("wilda");
    cmd.arg(&photo).arg("--format").arg("csv").arg("--quiet");

    cmd.assert().success();

    let output_path = dir.path().join("garden.wilda.results.csv");
    let content = std::fs::read_to_string(&output_path).expect("CSV output exists");
    assert!(content.contains("File,Species,Scientific name"));
}

#[test]
fn test_identify_nonexistent_input_fails() {
    let mut cmd = cargo_bin_cmd!("wilda");
    cmd.arg("/nonexistent/photo.jpg");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no valid image files"));
}

#[test]
fn test_corrupt_image_reports_error_without_crashing() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("broken.jpg");
    std::fs::write(&path, b"definitely not a jpeg").expect("write corrupt file");

    // The file decode fails; the run completes and reports the error count.
    let mut cmd = cargo_bin_cmd!("wilda");
    cmd.arg(&path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Failed to process"));
}

#[test]
fn test_config_path_prints_toml_location() {
    let mut cmd = cargo_bin_cmd!("wilda");
    cmd.arg("config").arg("path");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
