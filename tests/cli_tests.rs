// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI integration tests.
//!
//! These tests run the actual odin-vds binary and verify its behavior.

mod common;

use std::path::PathBuf;
use std::process::{Command, Output};

use common::{expected_pixels, read_dataset};

/// Path to the built odin-vds binary
fn odin_vds_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_odin-vds"))
}

/// Run odin-vds with arguments
fn run(args: &[&str]) -> Output {
    let bin = odin_vds_bin();
    Command::new(&bin)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|_| panic!("Failed to run {:?}", bin))
}

/// Run odin-vds and assert success
fn run_ok(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        output.status.success(),
        "Command failed: {:?}\nstdout: {}\nstderr: {}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run odin-vds and assert failure
fn run_err(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        !output.status.success(),
        "Command should have failed but succeeded: {:?}",
        args
    );
    String::from_utf8_lossy(&output.stderr).to_string()
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_cli_help() {
    let output = run_ok(&["--help"]);
    assert!(output.contains("Interleaved HDF5 virtual datasets"));
    assert!(output.contains("plan"));
    assert!(output.contains("create"));
    assert!(output.contains("simulate"));
}

#[test]
fn test_cli_version() {
    let output = run_ok(&["--version"]);
    assert!(output.contains("odin-vds"));
}

#[test]
fn test_cli_invalid_subcommand() {
    let stderr = run_err(&["nonexistent"]);
    assert!(stderr.contains("unrecognized") || stderr.contains("unknown"));
}

// ============================================================================
// Plan Tests
// ============================================================================

#[test]
fn test_plan_table() {
    let output = run_ok(&[
        "plan", "--prefix", "test", "--frames", "19", "-b", "2", "--blocks-per-file", "2",
    ]);
    assert!(output.contains("Writers: 4"));
    assert!(output.contains("test_000006.h5"));
    assert!(!output.contains("test_000007.h5"));
    assert!(output.contains("Files: 6"));
}

#[test]
fn test_plan_json() {
    let output = run_ok(&[
        "plan", "--frames", "105", "-b", "10", "--blocks-per-file", "3", "--json",
    ]);
    let plan: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(plan["frames_per_writer"], serde_json::json!([30, 30, 25, 20]));
    assert_eq!(plan["files"].as_array().unwrap().len(), 4);
    assert_eq!(plan["files"][2]["remainder_frames"], 5);
}

#[test]
fn test_plan_rejects_zero_block() {
    let stderr = run_err(&["plan", "--frames", "10", "-b", "0"]);
    assert!(stderr.contains("Error"));
    assert!(stderr.contains("frames_per_block"));
}

// ============================================================================
// Simulate / Create Tests
// ============================================================================

#[test]
fn test_simulate_with_vds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().to_string_lossy().to_string();

    let output = run_ok(&[
        "simulate",
        "--path",
        &path,
        "--prefix",
        "test",
        "--frames",
        "19",
        "-b",
        "2",
        "--blocks-per-file",
        "2",
        "--shape",
        "2x2",
        "--vds",
    ]);
    assert!(output.contains("Wrote 6 source files"));

    let (shape, data) = read_dataset::<f64>(&dir.path().join("test_vds.h5"), "data");
    assert_eq!(shape, vec![19, 2, 2]);
    assert_eq!(data, expected_pixels(19, (2, 2), 1.0));
}

#[test]
fn test_create_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().to_string_lossy().to_string();

    run_ok(&[
        "simulate",
        "--path",
        &path,
        "--prefix",
        "scan",
        "--frames",
        "25",
        "-b",
        "5",
        "--blocks-per-file",
        "1",
        "--shape",
        "1x1",
        "--bit-depth",
        "16",
    ]);

    let config = dir.path().join("acquisition.toml");
    std::fs::write(
        &config,
        format!(
            "path = {:?}\nprefix = \"scan\"\nframe_count = 25\nframes_per_block = 5\n\
             blocks_per_file = 1\nframe_shape = [1, 1]\ndtype = \"uint16\"\n",
            path
        ),
    )
    .unwrap();

    let output = run_ok(&["create", "--config", &config.to_string_lossy()]);
    assert!(output.contains("scan_vds.h5"));
    assert!(output.contains("Source files: 5"));

    let (_, data) = read_dataset::<u16>(&dir.path().join("scan_vds.h5"), "data");
    assert_eq!(data, (0..25).collect::<Vec<u16>>());
}

#[test]
fn test_create_missing_config() {
    let stderr = run_err(&["create", "--config", "/nonexistent/acquisition.toml"]);
    assert!(stderr.contains("Error"));
}
