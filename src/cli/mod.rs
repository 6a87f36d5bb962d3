//! # Command Line Interface
//!
//! Runs the checkout form validators against JSON files: form snapshots
//! (optionally with a recorded event sequence) and posted submissions.

pub mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::debug;

use crate::config::AppConfig;
use crate::domain::CheckoutForm;
use crate::errors::CheckoutError;
use crate::observability::init_observability;
use crate::services::{FormController, FormEvent, SubdomainState, SubmitOutcome};
use crate::validation::{derive_subdomain_with_limit, CheckoutSubmission};
use output::{FieldReport, OutputFormat, ValidationReport};

#[derive(Parser)]
#[command(name = "checkout-form")]
#[command(about = "Checkout form validation tooling")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (json or text)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a form snapshot as if it were submitted
    Validate {
        /// JSON file with a `fields` array
        file: PathBuf,

        /// JSON file with events to replay before submitting
        #[arg(long)]
        events: Option<PathBuf>,
    },

    /// Print the subdomain derived from a company name
    DeriveSubdomain {
        company_name: String,
    },

    /// Run the server-side checks on a posted checkout submission
    CheckSubmission {
        /// JSON file with the submission fields
        file: PathBuf,

        /// Subdomains already in use, comma separated
        #[arg(long, value_delimiter = ',')]
        taken: Vec<String>,
    },
}

/// Run CLI commands
pub fn run_cli() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if cli.verbose {
        config.observability.log_level = "debug".to_string();
    }
    init_observability(&config)?;

    let format = OutputFormat::parse(&cli.output)?;

    match cli.command {
        Commands::Validate { file, events } => {
            handle_validate(&config, &file, events.as_deref(), format)
        }
        Commands::DeriveSubdomain { company_name } => {
            let derived = derive_subdomain_with_limit(&company_name, config.form.subdomain_max_length);
            match format {
                OutputFormat::Json => output::print_json(&serde_json::json!({
                    "company_name": company_name,
                    "subdomain": derived,
                }))?,
                OutputFormat::Text => println!("{}", derived),
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::CheckSubmission { file, taken } => {
            handle_check_submission(&config, &file, &taken, format)
        }
    }
}

/// Load a form, replay recorded events and report the outcome.
///
/// Every event is dispatched in order at one instant, so a second submit
/// after a passing one is `Ignored` just as on the page. The report carries
/// the outcome of the last submit; a recording without one is submitted once
/// at the end.
pub fn validate_file(
    config: &AppConfig,
    file: &Path,
    events: Option<&Path>,
) -> Result<ValidationReport> {
    let form = CheckoutForm::from_path(file)?;
    let mut controller = FormController::new(form, &config.form);
    let now = Instant::now();
    let mut last_outcome = None;

    if let Some(events_path) = events {
        let raw = std::fs::read_to_string(events_path)
            .with_context(|| format!("Failed to read events from {}", events_path.display()))?;
        let events: Vec<FormEvent> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse events in {}", events_path.display()))?;
        debug!(count = events.len(), "Replaying form events");

        for event in &events {
            if let Some(outcome) = controller.dispatch(event, now)? {
                last_outcome = Some(outcome);
            }
        }
    }

    let outcome = match last_outcome {
        Some(outcome) => outcome,
        None => controller.submit(now),
    };
    let subdomain_state = controller
        .form()
        .field(&config.form.subdomain_field_id)
        .map(SubdomainState::of);
    let fields = controller.form().fields().iter().map(FieldReport::from).collect();

    Ok(ValidationReport {
        outcome,
        subdomain_state,
        fields,
    })
}

/// Process exit code for a failed command: the code of the first
/// [`CheckoutError`] in the chain, 1 otherwise
pub fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    let code = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<CheckoutError>())
        .map_or(1, CheckoutError::exit_code);
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn handle_validate(
    config: &AppConfig,
    file: &Path,
    events: Option<&Path>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let report = validate_file(config, file, events)?;
    output::print_validation_report(&report, format)?;

    Ok(match report.outcome {
        SubmitOutcome::Proceed { .. } => ExitCode::SUCCESS,
        _ => ExitCode::from(1),
    })
}

fn handle_check_submission(
    config: &AppConfig,
    file: &Path,
    taken: &[String],
    format: OutputFormat,
) -> Result<ExitCode> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read submission from {}", file.display()))?;
    let submission = CheckoutSubmission::from_json(&raw)?;

    let taken: HashSet<&str> = taken.iter().map(|s| s.trim()).filter(|s| !s.is_empty()).collect();
    match submission.resolve(&config.form, |s| taken.contains(s)) {
        Ok(resolved) => {
            output::print_resolved_checkout(&resolved, format)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            match format {
                OutputFormat::Json => output::print_json(&serde_json::json!({
                    "error": err.to_string(),
                    "field": err.field(),
                }))?,
                OutputFormat::Text => eprintln!("{}", err),
            }
            Ok(ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check_submission_taken_list() {
        let cli = Cli::parse_from([
            "checkout-form",
            "check-submission",
            "submission.json",
            "--taken",
            "acme,acme1",
        ]);
        match cli.command {
            Commands::CheckSubmission { taken, .. } => assert_eq!(taken, vec!["acme", "acme1"]),
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn test_validate_file_blocks_invalid_form() {
        let form = write_temp(
            r#"{"fields": [
                {"id": "company_name", "required": true, "value": "Acme Corp!"},
                {"id": "contact_email", "kind": "email", "required": true, "value": "not-an-email"},
                {"id": "preferred_subdomain"},
                {"id": "terms_agreed", "kind": "checkbox"}
            ]}"#,
        );

        let report = validate_file(&AppConfig::default(), form.path(), None).unwrap();
        match &report.outcome {
            SubmitOutcome::Cancelled { result } => {
                assert_eq!(result.failed_fields(), vec!["contact_email", "terms_agreed"]);
            }
            other => panic!("expected cancel, got {:?}", other),
        }
        let subdomain = report.fields.iter().find(|f| f.id == "preferred_subdomain").unwrap();
        assert_eq!(subdomain.value, "acmecorp");
        assert!(subdomain.auto_generated);
    }

    #[test]
    fn test_validate_file_replays_events() {
        let form = write_temp(
            r#"{"fields": [
                {"id": "company_name", "required": true},
                {"id": "preferred_subdomain"},
                {"id": "terms_agreed", "kind": "checkbox"}
            ]}"#,
        );
        let events = write_temp(
            r#"[
                {"event": "input", "field": "company_name", "value": "Globex"},
                {"event": "input", "field": "preferred_subdomain", "value": "globex-eu"},
                {"event": "toggle", "field": "terms_agreed", "checked": true},
                {"event": "submit"}
            ]"#,
        );

        let report =
            validate_file(&AppConfig::default(), form.path(), Some(events.path())).unwrap();
        assert!(report.outcome.is_proceed());
        assert_eq!(report.subdomain_state, Some(SubdomainState::UserEdited));
    }

    #[test]
    fn test_validate_file_replays_intermediate_submits() {
        let form = write_temp(
            r#"{"fields": [
                {"id": "company_name", "required": true},
                {"id": "preferred_subdomain"},
                {"id": "terms_agreed", "kind": "checkbox"}
            ]}"#,
        );
        let events = write_temp(
            r#"[
                {"event": "submit"},
                {"event": "input", "field": "company_name", "value": "Globex"},
                {"event": "toggle", "field": "terms_agreed", "checked": true},
                {"event": "submit"}
            ]"#,
        );

        // The first submit fails and annotates the form; the fix then passes
        let report =
            validate_file(&AppConfig::default(), form.path(), Some(events.path())).unwrap();
        assert!(report.outcome.is_proceed());
        assert_eq!(report.subdomain_state, Some(SubdomainState::AutoFilled));
    }

    #[test]
    fn test_validate_file_double_submit_is_ignored() {
        let form = write_temp(
            r#"{"fields": [
                {"id": "company_name", "required": true, "value": "Globex"},
                {"id": "terms_agreed", "kind": "checkbox", "checked": true}
            ]}"#,
        );
        let events = write_temp(r#"[{"event": "submit"}, {"event": "submit"}]"#);

        let report =
            validate_file(&AppConfig::default(), form.path(), Some(events.path())).unwrap();
        assert_eq!(report.outcome, SubmitOutcome::Ignored);
    }

    #[test]
    fn test_exit_code_for_checkout_errors() {
        let io: anyhow::Error = CheckoutError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ))
        .into();
        assert_eq!(exit_code_for(&io), ExitCode::from(74));

        let config = anyhow::Error::from(CheckoutError::config("bad"))
            .context("Failed to load configuration");
        assert_eq!(exit_code_for(&config), ExitCode::from(78));

        assert_eq!(exit_code_for(&anyhow::anyhow!("plain failure")), ExitCode::from(1));
    }

    #[test]
    fn test_validate_file_missing() {
        let result = validate_file(&AppConfig::default(), Path::new("/no/such/form.json"), None);
        assert!(result.is_err());
    }
}
