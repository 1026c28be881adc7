//! End-to-end tests driving the `extract_landsat_hms` binary

mod common;

use assert_cmd::Command;

use common::{gdal_metadata, hdf_scene, tiff_scene, write_scene};

fn extractor() -> Command {
    Command::cargo_bin("extract_landsat_hms").unwrap()
}

#[test]
fn test_prints_hhmmss_without_newline() {
    let scene = write_scene(&hdf_scene(&[("SENSING_TIME", "2021-03-15T07:05:09.123456")]), ".hdf");

    extractor()
        .arg(scene.path())
        .assert()
        .success()
        .stdout("070509");
}

#[test]
fn test_geotiff_input() {
    let xml = gdal_metadata(&[("SENSING_TIME", "2021-01-01T00:00:00.0")]);
    let scene = write_scene(&tiff_scene(&xml), ".tif");

    extractor()
        .arg(scene.path())
        .assert()
        .success()
        .stdout("000000");
}

#[test]
fn test_missing_file_fails_without_output() {
    let output = extractor().arg("/no/such/LC08_scene.hdf").output().unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no such file"));
}

#[test]
fn test_directory_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = extractor().arg(dir.path()).output().unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("is a directory"));
}

#[test]
fn test_missing_tag_fails_without_output() {
    let scene = write_scene(&hdf_scene(&[("SPACECRAFT", "LANDSAT_8")]), ".hdf");
    let output = extractor().arg(scene.path()).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("SENSING_TIME"));
}

#[test]
fn test_value_without_t_separator_fails() {
    let scene = write_scene(&hdf_scene(&[("SENSING_TIME", "2021-03-15 07:05:09")]), ".hdf");
    let output = extractor().arg(scene.path()).output().unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_list_attributes() {
    let scene = write_scene(&hdf_scene(&[
        ("SENSING_TIME", "2021-03-15T07:05:09.123456"),
        ("SPACECRAFT", "LANDSAT_8"),
    ]), ".hdf");

    extractor()
        .arg("--list-attributes")
        .arg(scene.path())
        .assert()
        .success()
        .stdout("SENSING_TIME=2021-03-15T07:05:09.123456\nSPACECRAFT=LANDSAT_8\n");
}

#[test]
fn test_verbose_diagnostics_stay_on_stderr() {
    let scene = write_scene(&hdf_scene(&[("SENSING_TIME", "2021-03-15T23:59:00")]), ".hdf");
    let output = extractor().arg("-v").arg(scene.path()).output().unwrap();

    assert!(output.status.success());
    assert_eq!(output.stdout, b"235900");
    assert!(String::from_utf8_lossy(&output.stderr).contains("[DEBUG]"));
}

#[test]
fn test_log_file_option() {
    let scene = write_scene(&hdf_scene(&[("SENSING_TIME", "2021-03-15T23:59:00")]), ".hdf");
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("extract.log");

    extractor()
        .arg("--verbose")
        .arg("--log-file")
        .arg(&log_path)
        .arg(scene.path())
        .assert()
        .success()
        .stdout("235900");

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("SENSING_TIME"));
}
