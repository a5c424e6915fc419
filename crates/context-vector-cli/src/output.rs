//! Output formatting for the ctxvec CLI
//!
//! Validation results render as JSON, YAML, or a colored table.

use clap::ValueEnum;
use colored::Colorize;
use context_vector_core::{ValidationError, Violation};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::CliError;

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable table format with colors
    #[default]
    Table,
    /// JSON format for machine processing
    Json,
    /// YAML format
    Yaml,
}

/// Validation output structure for rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationOutput {
    /// Input file
    pub input: String,
    /// Overall validation status
    pub valid: bool,
    /// Every violation found
    pub violations: Vec<Violation>,
    /// Fingerprint of the snapshot when valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    /// Summary message
    pub summary: String,
}

impl ValidationOutput {
    /// Output for an accepted snapshot
    pub fn accepted(input: impl Into<String>, fingerprint: String) -> Self {
        Self {
            input: input.into(),
            valid: true,
            violations: Vec::new(),
            fingerprint: Some(fingerprint),
            summary: "Context vector is valid".to_string(),
        }
    }

    /// Output for a rejected snapshot
    pub fn rejected(input: impl Into<String>, error: ValidationError) -> Self {
        let violations = error.into_violations();
        Self {
            input: input.into(),
            valid: false,
            summary: format!("Context vector has {} violation(s)", violations.len()),
            violations,
            fingerprint: None,
        }
    }

    /// Render output in the specified format
    pub fn render_to<W: Write>(&self, format: OutputFormat, out: &mut W) -> Result<(), CliError> {
        match format {
            OutputFormat::Json => {
                writeln!(out, "{}", serde_json::to_string_pretty(self)?)?;
            }
            OutputFormat::Yaml => {
                write!(out, "{}", serde_yaml::to_string(self)?)?;
            }
            OutputFormat::Table => self.render_table(out)?,
        }
        Ok(())
    }

    fn render_table<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let status = if self.valid {
            "VALID".green().bold()
        } else {
            "INVALID".red().bold()
        };

        writeln!(out, "{}", format!("Context vector: {}", self.input).cyan().bold())?;
        writeln!(out, "Status: {}", status)?;

        if !self.violations.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", "Violations:".red().bold())?;
            for violation in &self.violations {
                writeln!(
                    out,
                    "  {} [{}] {}",
                    "x".red(),
                    violation.category,
                    violation.field_path.bold()
                )?;
                writeln!(
                    out,
                    "    {} {}",
                    "expected:".dimmed(),
                    violation.expected
                )?;
                writeln!(
                    out,
                    "    {} {}",
                    "actual:  ".dimmed(),
                    violation.actual.yellow()
                )?;
            }
        }

        if let Some(fingerprint) = &self.fingerprint {
            writeln!(out, "Fingerprint: {}", fingerprint.dimmed())?;
        }

        writeln!(out)?;
        writeln!(out, "{}", self.summary)
    }
}
