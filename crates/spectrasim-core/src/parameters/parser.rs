use super::RawParameters;
use crate::domain::{FieldId, FieldValue, ParameterError};

/// Parsed contents of the five comma-separated list fields.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedSequences {
    pub(crate) decay_rates: Vec<f64>,
    pub(crate) amplitudes: Vec<f64>,
    pub(crate) location_mean: Vec<f64>,
    pub(crate) width: Vec<f64>,
    pub(crate) skewness: Vec<f64>,
}

/// Splits `raw` on commas and parses every token as a real number.
///
/// Surrounding ASCII whitespace on a token is tolerated; empty tokens and
/// interior whitespace are not. On failure the offending token is returned.
pub fn parse_float_list(raw: &str) -> Result<Vec<f64>, String> {
    raw.split(',')
        .map(|token| {
            token
                .trim_matches(|c: char| c.is_ascii_whitespace())
                .parse::<f64>()
                .map_err(|_| token.to_string())
        })
        .collect()
}

pub(crate) fn list_field_text(raw: &RawParameters, field: FieldId) -> String {
    match raw.get(field) {
        Some(FieldValue::Text(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

pub(crate) fn parse_list_field(field: FieldId, text: &str) -> Result<Vec<f64>, ParameterError> {
    if text.is_empty() {
        return Err(ParameterError::MissingField {
            field,
            label: field.label(),
        });
    }

    parse_float_list(text).map_err(|token| ParameterError::Parse {
        field,
        label: field.label(),
        token,
    })
}

/// Checks every list field in one pass and only yields sequences when all
/// five parsed.
pub(crate) fn parse_sequences(
    raw: &RawParameters,
) -> Result<ParsedSequences, Vec<ParameterError>> {
    let mut errors = Vec::new();
    let mut parsed: Vec<Vec<f64>> = Vec::with_capacity(FieldId::LIST_FIELDS.len());

    for field in FieldId::LIST_FIELDS {
        match parse_list_field(field, &list_field_text(raw, field)) {
            Ok(values) => parsed.push(values),
            Err(error) => errors.push(error),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let mut parsed = parsed.into_iter();
    let mut next = || parsed.next().unwrap_or_default();
    Ok(ParsedSequences {
        decay_rates: next(),
        amplitudes: next(),
        location_mean: next(),
        width: next(),
        skewness: next(),
    })
}
