//! CLI command definitions for ctxvec
//!
//! Clap-based commands for validating, converting and fingerprinting
//! context vector snapshots stored as JSON or YAML files.

use clap::{Parser, Subcommand, ValueEnum};
use context_vector_core::{codec, ContextError, ContextVector, Encoding, SchemaConfig};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::CliError;
use crate::output::{OutputFormat, ValidationOutput};
use crate::ExitCode;

/// Context vector CLI
///
/// Validate, convert and fingerprint context vector snapshots.
#[derive(Parser, Debug)]
#[command(name = "ctxvec")]
#[command(about = "Validate and convert context vector snapshots", long_about = None)]
#[command(version)]
pub struct ContextCli {
    /// Output verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors; command output is still printed
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML schema configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: ContextCommands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum ContextCommands {
    /// Validate a snapshot file and report every violation
    Validate {
        /// Snapshot file (.json, .yaml or .yml)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format for validation results
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Re-encode a valid snapshot to stdout
    Convert {
        /// Snapshot file (.json, .yaml or .yml)
        #[arg(short, long)]
        input: PathBuf,

        /// Target encoding; defaults to the configured encoding
        #[arg(long, value_enum)]
        to: Option<WireEncoding>,
    },

    /// Print the fingerprint of a valid snapshot
    Fingerprint {
        /// Snapshot file (.json, .yaml or .yml)
        #[arg(short, long)]
        input: PathBuf,
    },
}

/// Wire encodings selectable on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum WireEncoding {
    Json,
    Yaml,
}

impl From<WireEncoding> for Encoding {
    fn from(encoding: WireEncoding) -> Self {
        match encoding {
            WireEncoding::Json => Encoding::Json,
            WireEncoding::Yaml => Encoding::Yaml,
        }
    }
}

/// Load the configuration file, or defaults when none is given
pub fn load_config(path: Option<&Path>) -> Result<SchemaConfig, CliError> {
    match path {
        Some(path) => SchemaConfig::from_file(path).map_err(|e| match e {
            ContextError::Io(e) => CliError::FileError(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            )),
            other => other.into(),
        }),
        None => Ok(SchemaConfig::default()),
    }
}

/// Execute the validate command
pub fn execute_validate<W: Write>(
    input: &Path,
    format: OutputFormat,
    config: &SchemaConfig,
    out: &mut W,
) -> Result<ExitCode, CliError> {
    let output = match read_snapshot(input, config) {
        Ok(vector) => {
            ValidationOutput::accepted(input.display().to_string(), codec::fingerprint(&vector)?)
        }
        Err(CliError::Rejected(err)) => ValidationOutput::rejected(input.display().to_string(), err),
        Err(other) => return Err(other),
    };

    output.render_to(format, out)?;
    info!(input = %input.display(), valid = output.valid, "Validated snapshot");

    if output.valid {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::ValidationFailed)
    }
}

/// Execute the convert command
pub fn execute_convert<W: Write>(
    input: &Path,
    to: Option<WireEncoding>,
    config: &SchemaConfig,
    out: &mut W,
) -> Result<ExitCode, CliError> {
    let vector = read_snapshot(input, config)?;
    let encoding = to.map(Encoding::from).unwrap_or(config.encoding);
    let bytes = codec::encode(&vector, encoding)?;

    out.write_all(&bytes)?;
    if encoding == Encoding::Json {
        writeln!(out)?;
    }
    info!(input = %input.display(), %encoding, "Converted snapshot");
    Ok(ExitCode::Success)
}

/// Execute the fingerprint command
pub fn execute_fingerprint<W: Write>(
    input: &Path,
    config: &SchemaConfig,
    out: &mut W,
) -> Result<ExitCode, CliError> {
    let vector = read_snapshot(input, config)?;
    writeln!(out, "{}", codec::fingerprint(&vector)?)?;
    Ok(ExitCode::Success)
}

/// Read, decode and validate a snapshot file
fn read_snapshot(path: &Path, config: &SchemaConfig) -> Result<ContextVector, CliError> {
    let encoding = Encoding::from_path(path).ok_or_else(|| {
        CliError::InvalidInput(format!(
            "Unsupported file format: {}. Supported formats: json, yaml, yml",
            path.display()
        ))
    })?;

    let bytes = std::fs::read(path).map_err(|e| {
        CliError::FileError(format!(
            "Failed to read snapshot file '{}': {}",
            path.display(),
            e
        ))
    })?;

    Ok(codec::decode(&bytes, encoding, &config.validation)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_JSON: &str = r#"{"schemaVersion":1,"contextVector":{"semanticContext":{"coding":0.8},"temporalContext":{"recentActivityTimestamp":1700000000,"interactionFrequency":3.2},"userPreferenceContext":{"verbosity":0.4,"detailLevel":0.6},"inference":{"activity":0.9},"affect":{"valence":0.5,"arousal":0.2,"focus":"focused"}}}"#;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_cli_parses_validate() {
        let cli = ContextCli::try_parse_from([
            "ctxvec", "-vv", "validate", "--input", "snap.json", "--format", "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            ContextCommands::Validate { input, format } => {
                assert_eq!(input, PathBuf::from("snap.json"));
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_parses_convert_with_global_config() {
        let cli = ContextCli::try_parse_from([
            "ctxvec", "convert", "-i", "snap.yaml", "--to", "json", "--config", "ctx.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("ctx.toml")));
        assert!(matches!(
            cli.command,
            ContextCommands::Convert { to: Some(WireEncoding::Json), .. }
        ));
    }

    #[test]
    fn test_validate_valid_file() {
        let file = write_temp(".json", VALID_JSON);
        let mut out = Vec::new();
        let code = execute_validate(file.path(), OutputFormat::Json, &SchemaConfig::default(), &mut out)
            .unwrap();
        assert_eq!(code, ExitCode::Success);

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["valid"], true);
        assert_eq!(value["fingerprint"].as_str().unwrap().len(), 64);
    }

    #[test]
    fn test_validate_reports_violations() {
        let content = VALID_JSON
            .replace("\"focused\"", "\"bored\"")
            .replace("\"verbosity\":0.4", "\"verbosity\":-0.4");
        let file = write_temp(".json", &content);
        let mut out = Vec::new();
        let code = execute_validate(file.path(), OutputFormat::Json, &SchemaConfig::default(), &mut out)
            .unwrap();
        assert_eq!(code, ExitCode::ValidationFailed);

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let paths: Vec<&str> = value["violations"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["field_path"].as_str().unwrap())
            .collect();
        assert_eq!(paths, vec!["userPreferenceContext.verbosity", "affect.focus"]);
    }

    #[test]
    fn test_validate_unsupported_extension() {
        let file = write_temp(".txt", VALID_JSON);
        let mut out = Vec::new();
        let err = execute_validate(file.path(), OutputFormat::Table, &SchemaConfig::default(), &mut out)
            .unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::InvalidInput);
    }

    #[test]
    fn test_validate_missing_file() {
        let mut out = Vec::new();
        let err = execute_validate(
            Path::new("/nonexistent/snap.json"),
            OutputFormat::Table,
            &SchemaConfig::default(),
            &mut out,
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::FileError);
    }

    #[test]
    fn test_convert_json_to_yaml_and_back() {
        let json_file = write_temp(".json", VALID_JSON);
        let mut yaml = Vec::new();
        execute_convert(json_file.path(), Some(WireEncoding::Yaml), &SchemaConfig::default(), &mut yaml)
            .unwrap();

        let yaml_file = write_temp(".yaml", std::str::from_utf8(&yaml).unwrap());
        let mut json = Vec::new();
        execute_convert(yaml_file.path(), None, &SchemaConfig::default(), &mut json).unwrap();
        assert_eq!(std::str::from_utf8(&json).unwrap().trim_end(), VALID_JSON);
    }

    #[test]
    fn test_convert_rejects_invalid_snapshot() {
        let file = write_temp(".json", &VALID_JSON.replace("\"activity\":0.9", "\"activity\":9.0"));
        let mut out = Vec::new();
        let err = execute_convert(file.path(), None, &SchemaConfig::default(), &mut out).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::ValidationFailed);
        assert!(out.is_empty());
    }

    #[test]
    fn test_fingerprint_is_stable_across_encodings() {
        let json_file = write_temp(".json", VALID_JSON);
        let mut yaml = Vec::new();
        execute_convert(json_file.path(), Some(WireEncoding::Yaml), &SchemaConfig::default(), &mut yaml)
            .unwrap();
        let yaml_file = write_temp(".yml", std::str::from_utf8(&yaml).unwrap());

        let mut a = Vec::new();
        let mut b = Vec::new();
        execute_fingerprint(json_file.path(), &SchemaConfig::default(), &mut a).unwrap();
        execute_fingerprint(yaml_file.path(), &SchemaConfig::default(), &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_cli_quiet_flag_is_global() {
        let cli = ContextCli::try_parse_from(["ctxvec", "fingerprint", "-i", "snap.json", "-q"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_validate_output_ignores_quiet_flag() {
        let file = write_temp(".json", VALID_JSON);
        let cli = ContextCli::try_parse_from([
            "ctxvec",
            "-q",
            "validate",
            "--input",
            file.path().to_str().unwrap(),
        ])
        .unwrap();
        let ContextCommands::Validate { input, format } = cli.command else {
            panic!("expected validate");
        };
        let mut out = Vec::new();
        execute_validate(&input, format, &SchemaConfig::default(), &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("VALID"));
    }

    #[test]
    fn test_load_missing_config_is_file_error() {
        let err = load_config(Some(Path::new("/nonexistent/ctxvec.toml"))).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::FileError);
        assert!(err.to_string().contains("/nonexistent/ctxvec.toml"));
    }

    #[test]
    fn test_load_config() {
        assert_eq!(load_config(None).unwrap(), SchemaConfig::default());

        let file = write_temp(".toml", "[validation]\nsemantic_weights = \"unit\"\n");
        let config = load_config(Some(file.path())).unwrap();
        let strict_input = write_temp(".json", &VALID_JSON.replace("\"coding\":0.8", "\"coding\":1.8"));
        let mut out = Vec::new();
        let code = execute_validate(strict_input.path(), OutputFormat::Json, &config, &mut out).unwrap();
        assert_eq!(code, ExitCode::ValidationFailed);
    }
}
