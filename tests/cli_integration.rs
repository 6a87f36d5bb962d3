//! CLI Integration Tests
//!
//! Runs the built `checkout-form` binary against the sample files in
//! `demos/` and checks exit codes and JSON output.

use std::path::PathBuf;
use std::process::{Command, Output};

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_checkout-form"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("checkout-form binary should run")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({}): {}",
            e,
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

#[test]
fn test_derive_subdomain_command() {
    let output = run(&["derive-subdomain", "Acme Corp!"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "acmecorp");
}

#[test]
fn test_validate_blocks_unchecked_terms() {
    let form = demo("signup_form.json");
    let output = run(&["validate", form.to_str().unwrap(), "--output", "json"]);
    assert_eq!(output.status.code(), Some(1));

    let report = stdout_json(&output);
    assert_eq!(report["outcome"]["outcome"], "cancelled");
    assert_eq!(report["subdomain_state"], "auto_filled");
}

#[test]
fn test_validate_with_events_proceeds() {
    let form = demo("signup_form.json");
    let events = demo("signup_events.json");
    let output = run(&[
        "validate",
        form.to_str().unwrap(),
        "--events",
        events.to_str().unwrap(),
        "--output",
        "json",
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report = stdout_json(&output);
    assert_eq!(report["outcome"]["outcome"], "proceed");
    assert_eq!(report["subdomain_state"], "user_edited");
}

#[test]
fn test_check_submission_with_taken_subdomain() {
    let submission = demo("submission.json");
    let output = run(&[
        "check-submission",
        submission.to_str().unwrap(),
        "--taken",
        "acmecorp",
        "--output",
        "json",
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let resolved = stdout_json(&output);
    assert_eq!(resolved["subdomain"], "acmecorp1");
    assert_eq!(resolved["billing_period"], "yearly");
    assert_eq!(resolved["company_email"], "info@acme.com");
}

#[test]
fn test_config_file_flag() {
    let config = demo("checkout.toml");
    let output = run(&["--config", config.to_str().unwrap(), "derive-subdomain", "Globex"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "globex");
}

#[test]
fn test_missing_config_file_fails() {
    let output = run(&["--config", "/nonexistent/checkout.toml", "derive-subdomain", "Globex"]);
    assert_eq!(output.status.code(), Some(78));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load configuration"));
}

#[test]
fn test_unknown_output_format_fails() {
    let output = run(&["derive-subdomain", "Acme", "--output", "yaml"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unsupported output format"));
}

#[test]
fn test_missing_form_file_exits_with_io_code() {
    let output = run(&["validate", "/nonexistent/form.json"]);
    assert_eq!(output.status.code(), Some(74));
}

#[test]
fn test_malformed_form_file_exits_with_io_code() {
    let events = demo("signup_events.json");
    // An event list is not a form snapshot
    let output = run(&["validate", events.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(74));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Parsing form snapshot"));
}
