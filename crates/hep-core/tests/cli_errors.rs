//! CLI error handling tests for hep-core.
//!
//! These tests verify that invalid arguments, configuration and event files
//! produce appropriate error messages and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Get a Command for the hep-core binary with configuration isolated from
/// the host environment.
fn hep_core(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("hep-core").expect("hep-core binary should exist");
    cmd.env("HEP_SIM_CONFIG", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env_remove("HEP_LOG")
        .env_remove("RUST_LOG");
    cmd
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

// ============================================================================
// Argument Errors
// ============================================================================

mod invalid_arguments {
    use super::*;

    #[test]
    fn unknown_command_exits_args_error() {
        let home = TempDir::new().unwrap();
        hep_core(&home)
            .arg("nonexistent-command")
            .assert()
            .code(10)
            .stderr(predicate::str::contains("error"));
    }

    #[test]
    fn missing_subcommand_exits_args_error() {
        let home = TempDir::new().unwrap();
        hep_core(&home).assert().code(10);
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let home = TempDir::new().unwrap();
        let reference = fixture("reference_events.txt");
        hep_core(&home)
            .args(["compare", "--strategy", "bayes"])
            .arg(&reference)
            .arg(&reference)
            .assert()
            .code(10)
            .stderr(predicate::str::contains("unknown test strategy"));
    }

    #[test]
    fn unknown_observable_is_rejected() {
        let home = TempDir::new().unwrap();
        let reference = fixture("reference_events.txt");
        hep_core(&home)
            .args(["compare", "--observable", "rapidity"])
            .arg(&reference)
            .arg(&reference)
            .assert()
            .code(10);
    }

    #[test]
    fn non_numeric_event_count_is_rejected() {
        let home = TempDir::new().unwrap();
        hep_core(&home)
            .args(["generate", "--events", "many"])
            .assert()
            .code(10);
    }

    #[test]
    fn help_exits_cleanly() {
        let home = TempDir::new().unwrap();
        hep_core(&home)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("generate"));
    }
}

// ============================================================================
// Event File Errors
// ============================================================================

mod event_files {
    use super::*;

    #[test]
    fn malformed_line_exits_parse_error_with_line_number() {
        let home = TempDir::new().unwrap();
        hep_core(&home)
            .arg("compare")
            .arg(fixture("malformed_events.txt"))
            .arg(fixture("reference_events.txt"))
            .assert()
            .code(12)
            .stderr(predicate::str::contains("\"line\": 3"))
            .stderr(predicate::str::contains("ERR_PARSE"));
    }

    #[test]
    fn malformed_line_human_format() {
        let home = TempDir::new().unwrap();
        hep_core(&home)
            .args(["--format", "human", "--no-color", "compare"])
            .arg(fixture("malformed_events.txt"))
            .arg(fixture("reference_events.txt"))
            .assert()
            .code(12)
            .stderr(predicate::str::contains("parse error at line 3"))
            .stderr(predicate::str::contains("Fix:"));
    }

    #[test]
    fn missing_file_exits_io_error() {
        let home = TempDir::new().unwrap();
        hep_core(&home)
            .arg("compare")
            .arg(home.path().join("absent.txt"))
            .arg(fixture("reference_events.txt"))
            .assert()
            .code(21);
    }

    #[test]
    fn unequal_event_counts_exit_args_error() {
        let home = TempDir::new().unwrap();
        let short = home.path().join("short.txt");
        let text = std::fs::read_to_string(fixture("reference_events.txt")).unwrap();
        let first_two: String = text.split("\n\n").take(2).collect::<Vec<_>>().join("\n\n");
        std::fs::write(&short, first_two).unwrap();

        hep_core(&home)
            .arg("compare")
            .arg(&short)
            .arg(fixture("reference_events.txt"))
            .assert()
            .code(10)
            .stderr(predicate::str::contains("differ in length"));
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

mod configuration {
    use super::*;

    #[test]
    fn explicit_missing_catalog_exits_config_error() {
        let home = TempDir::new().unwrap();
        hep_core(&home)
            .arg("catalog")
            .arg("--catalog")
            .arg(home.path().join("missing.json"))
            .assert()
            .code(11)
            .stderr(predicate::str::contains("ERR_CONFIG"))
            .stderr(predicate::str::contains("not found"));
    }

    #[test]
    fn wrong_typed_catalog_field_is_reported() {
        let home = TempDir::new().unwrap();
        std::fs::write(
            home.path().join("particles.json"),
            r#"[{"name": 11, "pdg": 11, "category": "lepton", "mass": 0.0005, "charge": -1, "stable": true}]"#,
        )
        .unwrap();

        hep_core(&home)
            .arg("catalog")
            .assert()
            .code(11)
            .stderr(predicate::str::contains("particles[0].name"));
    }

    #[test]
    fn process_with_unknown_particle_exits_config_error() {
        let home = TempDir::new().unwrap();
        std::fs::write(
            home.path().join("process.json"),
            r#"{"name": "x", "model": "QED", "sqrt_s": 10.0, "incoming": [13, -13], "outgoing": [999, -999]}"#,
        )
        .unwrap();

        hep_core(&home)
            .args(["generate", "--events", "1", "--seed", "1"])
            .assert()
            .code(11)
            .stderr(predicate::str::contains("unknown particle"));
    }

    #[test]
    fn non_positive_sqrt_s_override_is_rejected() {
        let home = TempDir::new().unwrap();
        hep_core(&home)
            .args(["generate", "--events", "1", "--sqrt-s", "0"])
            .assert()
            .code(11)
            .stderr(predicate::str::contains("sqrt_s"));
    }
}
