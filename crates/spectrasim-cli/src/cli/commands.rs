use super::CliError;
use super::terminal::TerminalSurface;
use anyhow::Context;
use spectrasim_core::domain::{ErrorCategory, FieldId, FieldValue, ParameterError, SpectraError};
use spectrasim_core::form::{FIELD_DEFINITIONS, SimulateForm, field_definition};
use spectrasim_core::parameters::RawParameters;
use spectrasim_core::serialization::{read_parameters_json, read_raw_values, write_parameters_json};
use std::io::Write;
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct SimulateArgs {
    /// JSON object of form values keyed by field id
    #[arg(long)]
    values: Option<PathBuf>,

    /// Override one field, e.g. `--set seed=42`
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    overrides: Vec<String>,

    /// Write the accepted parameters as JSON
    #[arg(long)]
    output: Option<PathBuf>,

    /// Do not echo the accepted parameters; diagnostics are still printed
    #[arg(long)]
    quiet: bool,
}

#[derive(clap::Args)]
pub(super) struct CheckArgs {
    /// Saved simulation parameters document
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Also require the five component sequences to share one length
    #[arg(long)]
    strict: bool,
}

pub(super) fn run_fields_command() -> Result<i32, CliError> {
    let stdout = std::io::stdout();
    let mut form = SimulateForm::new(TerminalSurface::new(RawParameters::default(), stdout.lock()));
    form.display();
    flush_stdout()?;
    Ok(0)
}

pub(super) fn run_simulate_command(args: SimulateArgs) -> Result<i32, CliError> {
    let values = collect_values(&args)?;

    let (outcome, result) = if args.quiet {
        let mut form = SimulateForm::new(TerminalSurface::new(values, Vec::new()));
        let outcome = form.submit();
        let (surface, result) = form.into_parts();
        if !outcome.is_accepted() {
            std::io::stdout()
                .write_all(&surface.into_writer())
                .context("failed to write diagnostics to standard output")?;
        }
        (outcome, result)
    } else {
        let stdout = std::io::stdout();
        let mut form = SimulateForm::new(TerminalSurface::new(values, stdout.lock()));
        let outcome = form.submit();
        (outcome, form.into_parts().1)
    };
    flush_stdout()?;

    let Some(parameters) = result else {
        tracing::debug!(?outcome, "submission rejected");
        return Ok(ErrorCategory::InputValidationError.exit_code());
    };

    if let Some(output) = &args.output {
        write_parameters_json(output, &parameters)?;
        tracing::info!(path = %output.display(), "wrote simulation parameters");
    }

    Ok(0)
}

pub(super) fn run_check_command(args: CheckArgs) -> Result<i32, CliError> {
    let parameters = read_parameters_json(&args.path)?;

    if args.strict {
        parameters
            .ensure_consistent_components()
            .map_err(|error| SpectraError::from(ParameterError::SchemaValidation(error)))?;
    }

    println!("{}", parameters);
    flush_stdout()?;
    Ok(0)
}

/// Widget defaults, then the values file, then `--set` overrides.
fn collect_values(args: &SimulateArgs) -> Result<RawParameters, CliError> {
    let mut values: RawParameters = FIELD_DEFINITIONS
        .iter()
        .map(|definition| (definition.id, definition.default.to_value()))
        .collect();

    if let Some(path) = &args.values {
        for (field, value) in read_raw_values(path)?.iter() {
            values.set(field, value.clone());
        }
    }

    for raw in &args.overrides {
        let (field, value) = parse_override(raw)?;
        values.set(field, value);
    }

    Ok(values)
}

fn parse_override(raw: &str) -> Result<(FieldId, FieldValue), CliError> {
    let (key, value) = raw.split_once('=').ok_or_else(|| {
        CliError::Usage(format!(
            "Override '{}' must have the form FIELD=VALUE",
            raw
        ))
    })?;

    let field = key.parse::<FieldId>()?;
    let kind = field_definition(field).kind;
    Ok((field, FieldValue::from_raw(kind, value)))
}

fn flush_stdout() -> Result<(), CliError> {
    std::io::stdout()
        .flush()
        .context("failed to flush standard output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{SimulateArgs, collect_values, parse_override};
    use crate::cli::CliError;
    use spectrasim_core::domain::{FieldId, FieldValue};
    use std::fs;
    use tempfile::TempDir;

    fn args_with(values: Option<std::path::PathBuf>, overrides: &[&str]) -> SimulateArgs {
        SimulateArgs {
            values,
            overrides: overrides.iter().map(|raw| raw.to_string()).collect(),
            output: None,
            quiet: false,
        }
    }

    #[test]
    fn overrides_follow_the_field_kind() {
        assert_eq!(
            parse_override("seed=42").expect("seed override should parse"),
            (FieldId::Seed, FieldValue::Integer(42))
        );
        assert_eq!(
            parse_override("decay_rates=1.0,2.0").expect("list override should parse"),
            (FieldId::DecayRates, FieldValue::text("1.0,2.0"))
        );
        assert_eq!(
            parse_override("seed=1.0").expect("integral seed override should parse"),
            (FieldId::Seed, FieldValue::Integer(1))
        );
        assert_eq!(
            parse_override("add_gaussian_irf=true").expect("flag override should parse"),
            (FieldId::AddGaussianIrf, FieldValue::Bool(true))
        );
    }

    #[test]
    fn malformed_overrides_are_rejected() {
        assert!(matches!(
            parse_override("seed"),
            Err(CliError::Usage(message)) if message.contains("FIELD=VALUE")
        ));
        assert!(matches!(
            parse_override("sead=1"),
            Err(CliError::Spectra(error)) if error.placeholder() == "INPUT.UNKNOWN_FIELD"
        ));
    }

    #[test]
    fn values_layer_defaults_file_and_overrides() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("values.json");
        fs::write(&path, r#"{ "seed": 5, "decay_rates": "1,2" }"#)
            .expect("values should be written");

        let values = collect_values(&args_with(Some(path), &["seed=8"]))
            .expect("values should collect");

        assert_eq!(values.len(), 16);
        assert_eq!(values.get(FieldId::Seed), Some(&FieldValue::Integer(8)));
        assert_eq!(
            values.get(FieldId::DecayRates),
            Some(&FieldValue::text("1,2"))
        );
        assert_eq!(values.get(FieldId::IrfWidth), Some(&FieldValue::Number(0.0)));
    }
}
