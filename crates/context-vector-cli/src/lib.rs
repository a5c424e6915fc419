//! ctxvec: command-line front end for context vector snapshots
//!
//! ```bash
//! # Validate a snapshot and list every violation
//! ctxvec validate --input snapshot.json --format table
//!
//! # Re-encode a snapshot as YAML
//! ctxvec convert --input snapshot.json --to yaml
//!
//! # Fingerprint a snapshot under a strict weight policy
//! ctxvec --config ctxvec.toml fingerprint --input snapshot.yaml
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Snapshot failed validation
//! - 3: Invalid input, arguments or configuration
//! - 4: File not found or inaccessible
//! - 10: Internal error

pub mod commands;
pub mod error;
pub mod output;

pub use commands::{ContextCli, ContextCommands, WireEncoding};
pub use error::CliError;
pub use output::{OutputFormat, ValidationOutput};

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful execution
    Success = 0,
    /// Snapshot failed validation
    ValidationFailed = 1,
    /// Invalid input, arguments or configuration
    InvalidInput = 3,
    /// File not found or inaccessible
    FileError = 4,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

/// Install the tracing subscriber; `-v` raises and `-q` lowers the default level
pub fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        tracing::Level::ERROR
    } else {
        match verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the parsed command, writing results to stdout
pub fn run(cli: ContextCli) -> Result<ExitCode, CliError> {
    let config = commands::load_config(cli.config.as_deref())?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        ContextCommands::Validate { input, format } => {
            commands::execute_validate(&input, format, &config, &mut out)
        }
        ContextCommands::Convert { input, to } => {
            commands::execute_convert(&input, to, &config, &mut out)
        }
        ContextCommands::Fingerprint { input } => {
            commands::execute_fingerprint(&input, &config, &mut out)
        }
    }
}

/// Run the CLI application, reporting errors on stderr
pub fn run_cli(cli: ContextCli) -> ExitCode {
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}
