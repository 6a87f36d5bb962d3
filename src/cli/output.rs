//! Shared output formatting utilities for CLI commands
//!
//! Every command builds a serializable report; `json` prints it as is and
//! `text` renders a short human-readable summary.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::domain::{FieldKind, FormField, Validity};
use crate::services::{SubdomainState, SubmitOutcome};
use crate::validation::ResolvedCheckout;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            _ => anyhow::bail!("Unsupported output format: '{}'. Use 'json' or 'text'.", s),
        }
    }
}

/// Per-field line of a validation report
#[derive(Debug, Clone, Serialize)]
pub struct FieldReport {
    pub id: String,
    pub kind: FieldKind,
    pub value: String,
    pub validity: Validity,
    pub auto_generated: bool,
}

impl From<&FormField> for FieldReport {
    fn from(field: &FormField) -> Self {
        Self {
            id: field.id.clone(),
            kind: field.kind,
            value: if field.kind == FieldKind::Checkbox {
                field.checked.to_string()
            } else {
                field.value.clone()
            },
            validity: field.validity(),
            auto_generated: field.is_auto_generated(),
        }
    }
}

/// Result of the `validate` command
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub outcome: SubmitOutcome,
    pub subdomain_state: Option<SubdomainState>,
    pub fields: Vec<FieldReport>,
}

/// Print data as JSON
pub fn print_json<T: Serialize>(data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}

pub fn print_validation_report(report: &ValidationReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Text => {
            print!("{}", render_validation_report(report));
            Ok(())
        }
    }
}

pub fn print_resolved_checkout(resolved: &ResolvedCheckout, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(resolved),
        OutputFormat::Text => {
            print!("{}", render_resolved_checkout(resolved));
            Ok(())
        }
    }
}

fn render_validation_report(report: &ValidationReport) -> String {
    let mut out = String::new();
    for field in &report.fields {
        let marker = match &field.validity {
            Validity::Valid => "ok".green().to_string(),
            Validity::Invalid(_) => "error".red().to_string(),
        };
        let mut line = format!("{:<7} {:<24} {}", marker, field.id, field.value);
        if field.auto_generated {
            line.push_str(&format!(" {}", "(auto-generated)".dimmed()));
        }
        if let Validity::Invalid(message) = &field.validity {
            line.push_str(&format!("\n        {}", message.red()));
        }
        out.push_str(&line);
        out.push('\n');
    }

    let summary = match &report.outcome {
        SubmitOutcome::Proceed { .. } => "Submission allowed".green().to_string(),
        SubmitOutcome::Cancelled { result } => {
            format!("Submission blocked: {} field(s) invalid", result.errors().len())
                .red()
                .to_string()
        }
        SubmitOutcome::Ignored => "Submission ignored: already in flight".yellow().to_string(),
    };
    out.push_str(&summary);
    out.push('\n');
    out
}

fn render_resolved_checkout(resolved: &ResolvedCheckout) -> String {
    let subdomain = if resolved.subdomain_derived {
        format!("{} {}", resolved.subdomain, "(derived from company name)".dimmed())
    } else {
        resolved.subdomain.clone()
    };
    format!(
        "{}\n{:<16} {}\n{:<16} {}\n{:<16} {}\n{:<16} {}\n{:<16} {}\n",
        "Checkout accepted".green(),
        "Company:",
        resolved.company_name,
        "Subdomain:",
        subdomain,
        "Company email:",
        resolved.company_email.as_deref().unwrap_or("--"),
        "Billing period:",
        resolved.billing_period,
        "Instance URL:",
        resolved.instance_url,
    )
}
