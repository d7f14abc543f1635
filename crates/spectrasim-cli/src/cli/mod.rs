mod commands;
mod terminal;

use clap::Parser;
use spectrasim_core::domain::SpectraError;
use tracing_subscriber::EnvFilter;

pub fn run_from_env() -> i32 {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let spectra_error = error.as_spectra_error();
            eprintln!("{}", spectra_error.diagnostic_line());
            if let Some(summary_line) = spectra_error.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            spectra_error.exit_code()
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("spectrasim".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();

    match Cli::try_parse_from(&full_args) {
        Ok(cli) => dispatch_parsed(cli.command),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "spectrasim",
    version,
    about = "Spectroscopy simulation parameter form"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// List the form fields with their kinds, defaults and descriptions
    Fields,
    /// Fill the form from a values file and overrides, then submit it once
    Simulate(commands::SimulateArgs),
    /// Validate a saved simulation parameters document
    Check(commands::CheckArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Fields => commands::run_fields_command(),
        CliCommand::Simulate(args) => commands::run_simulate_command(args),
        CliCommand::Check(args) => commands::run_check_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Spectra(#[from] SpectraError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_spectra_error(&self) -> SpectraError {
        match self {
            Self::Usage(message) => {
                SpectraError::input_validation("INPUT.CLI_USAGE", message.clone())
            }
            Self::Spectra(error) => error.clone(),
            Self::Internal(error) => SpectraError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CliError, run};
    use spectrasim_core::domain::{ErrorCategory, SpectraError};

    #[test]
    fn unknown_command_is_a_usage_error() {
        let error = run(["bogus"]).expect_err("unknown command should fail");
        assert!(matches!(error, CliError::Usage(_)));
        assert_eq!(error.as_spectra_error().exit_code(), 2);
    }

    #[test]
    fn help_exits_cleanly() {
        assert_eq!(run(["--help"]).expect("help should succeed"), 0);
    }

    #[test]
    fn internal_errors_map_to_io_category() {
        let error = CliError::from(anyhow::anyhow!("disk unplugged"));
        let mapped = error.as_spectra_error();
        assert_eq!(mapped.category(), ErrorCategory::IoSystemError);
        assert_eq!(mapped.placeholder(), "IO.CLI");
        assert_eq!(mapped.message(), "disk unplugged");
    }

    #[test]
    fn core_errors_pass_through_unchanged() {
        let source = SpectraError::input_validation("INPUT.PARSE", "bad token");
        let error = CliError::from(source.clone());
        assert_eq!(error.as_spectra_error(), source);
    }
}
