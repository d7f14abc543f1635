use super::parser::ParsedSequences;
use super::{RawParameters, SimulationParameters, TimepointAxis, WavelengthAxis};
use crate::domain::{FieldId, FieldValue, SchemaProblem, SchemaValidationError, integral_value};

pub(crate) const MODEL_NAME: &str = "SimulationParameters";

const FIELD_REQUIRED: &str = "Field required";

pub(crate) fn coerce_float(
    field: FieldId,
    value: Option<&FieldValue>,
) -> Result<f64, SchemaProblem> {
    let invalid = |value: &FieldValue| {
        SchemaProblem::at_field(
            field,
            format!(
                "Input should be a valid number, got {} '{}'",
                value.type_name(),
                value
            ),
        )
    };

    let Some(value) = value else {
        return Err(SchemaProblem::at_field(field, FIELD_REQUIRED));
    };
    match value {
        FieldValue::Number(number) => Ok(*number),
        FieldValue::Integer(integer) => Ok(*integer as f64),
        FieldValue::Text(text) => text.trim().parse::<f64>().map_err(|_| invalid(value)),
        FieldValue::Bool(_) => Err(invalid(value)),
    }
}

pub(crate) fn coerce_integer(
    field: FieldId,
    value: Option<&FieldValue>,
) -> Result<i64, SchemaProblem> {
    let invalid = |value: &FieldValue| {
        SchemaProblem::at_field(
            field,
            format!(
                "Input should be a valid integer, got {} '{}'",
                value.type_name(),
                value
            ),
        )
    };

    let Some(value) = value else {
        return Err(SchemaProblem::at_field(field, FIELD_REQUIRED));
    };
    match value {
        FieldValue::Integer(integer) => Ok(*integer),
        FieldValue::Number(number) => integral_value(*number).ok_or_else(|| invalid(value)),
        FieldValue::Text(text) => text.trim().parse::<i64>().map_err(|_| invalid(value)),
        FieldValue::Bool(_) => Err(invalid(value)),
    }
}

pub(crate) fn coerce_bool(
    field: FieldId,
    value: Option<&FieldValue>,
) -> Result<bool, SchemaProblem> {
    let invalid = |value: &FieldValue| {
        SchemaProblem::at_field(
            field,
            format!(
                "Input should be a valid boolean, got {} '{}'",
                value.type_name(),
                value
            ),
        )
    };

    let Some(value) = value else {
        return Err(SchemaProblem::at_field(field, FIELD_REQUIRED));
    };
    match value {
        FieldValue::Bool(flag) => Ok(*flag),
        FieldValue::Integer(0) => Ok(false),
        FieldValue::Integer(1) => Ok(true),
        FieldValue::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(invalid(value)),
        },
        _ => Err(invalid(value)),
    }
}

fn record<T>(result: Result<T, SchemaProblem>, problems: &mut Vec<SchemaProblem>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(problem) => {
            problems.push(problem);
            None
        }
    }
}

fn float_field(
    raw: &RawParameters,
    field: FieldId,
    problems: &mut Vec<SchemaProblem>,
) -> Option<f64> {
    record(coerce_float(field, raw.get(field)), problems)
}

pub(crate) fn validate_timepoints(
    raw: &RawParameters,
) -> Result<TimepointAxis, Vec<SchemaProblem>> {
    let mut problems = Vec::new();
    let max = float_field(raw, FieldId::TimepointsMax, &mut problems);
    let stepsize = float_field(raw, FieldId::TimepointsStepsize, &mut problems);

    match (max, stepsize) {
        (Some(max), Some(stepsize)) => Ok(TimepointAxis { max, stepsize }),
        _ => Err(problems),
    }
}

pub(crate) fn validate_wavelength(
    raw: &RawParameters,
) -> Result<WavelengthAxis, Vec<SchemaProblem>> {
    let mut problems = Vec::new();
    let min = float_field(raw, FieldId::WavelengthMin, &mut problems);
    let max = float_field(raw, FieldId::WavelengthMax, &mut problems);
    let stepsize = float_field(raw, FieldId::WavelengthStepsize, &mut problems);

    match (min, max, stepsize) {
        (Some(min), Some(max), Some(stepsize)) => Ok(WavelengthAxis { min, max, stepsize }),
        _ => Err(problems),
    }
}

fn validate_sequences(sequences: &ParsedSequences) -> Vec<SchemaProblem> {
    [
        (FieldId::DecayRates, &sequences.decay_rates),
        (FieldId::Amplitudes, &sequences.amplitudes),
        (FieldId::LocationMean, &sequences.location_mean),
        (FieldId::Width, &sequences.width),
        (FieldId::Skewness, &sequences.skewness),
    ]
    .into_iter()
    .filter(|(_, values)| values.is_empty())
    .map(|(field, _)| SchemaProblem::at_field(field, "List should have at least 1 item"))
    .collect()
}

/// Assembles the record, collecting every schema problem before failing.
pub(crate) fn assemble(
    sequences: ParsedSequences,
    raw: &RawParameters,
) -> Result<SimulationParameters, SchemaValidationError> {
    let mut problems = validate_sequences(&sequences);

    let timepoints = record_all(validate_timepoints(raw), &mut problems);
    let wavelength = record_all(validate_wavelength(raw), &mut problems);
    let stdev_noise = float_field(raw, FieldId::StdevNoise, &mut problems);
    let seed = record(coerce_integer(FieldId::Seed, raw.get(FieldId::Seed)), &mut problems);
    let add_gaussian_irf = record(
        coerce_bool(FieldId::AddGaussianIrf, raw.get(FieldId::AddGaussianIrf)),
        &mut problems,
    );
    let irf_location = float_field(raw, FieldId::IrfLocation, &mut problems);
    let irf_width = float_field(raw, FieldId::IrfWidth, &mut problems);
    let use_sequential_scheme = record(
        coerce_bool(
            FieldId::UseSequentialScheme,
            raw.get(FieldId::UseSequentialScheme),
        ),
        &mut problems,
    );

    match (
        timepoints,
        wavelength,
        stdev_noise,
        seed,
        add_gaussian_irf,
        irf_location,
        irf_width,
        use_sequential_scheme,
    ) {
        (
            Some(timepoints),
            Some(wavelength),
            Some(stdev_noise),
            Some(seed),
            Some(add_gaussian_irf),
            Some(irf_location),
            Some(irf_width),
            Some(use_sequential_scheme),
        ) if problems.is_empty() => Ok(SimulationParameters {
            decay_rates: sequences.decay_rates,
            amplitudes: sequences.amplitudes,
            location_mean: sequences.location_mean,
            width: sequences.width,
            skewness: sequences.skewness,
            timepoints,
            wavelength,
            stdev_noise,
            seed,
            add_gaussian_irf,
            irf_location,
            irf_width,
            use_sequential_scheme,
        }),
        _ => Err(SchemaValidationError::new(MODEL_NAME, problems)),
    }
}

fn record_all<T>(
    result: Result<T, Vec<SchemaProblem>>,
    problems: &mut Vec<SchemaProblem>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(found) => {
            problems.extend(found);
            None
        }
    }
}
