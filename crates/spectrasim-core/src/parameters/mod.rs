//! Validated simulation parameters and the builder that produces them from
//! raw form values.
//!
//! Building runs in two stages. The five comma-separated list fields are
//! checked together so every missing or unparseable field is reported in one
//! pass. Only when all five parse is the record assembled, at which point the
//! composite axes and scalar fields are schema-checked and coerced.

mod parser;
mod real;
mod schema;

pub use parser::parse_float_list;

use crate::domain::{FieldId, FieldValue, ParameterError, SchemaProblem, SchemaValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Snapshot of every slot value captured at submission time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawParameters {
    values: BTreeMap<FieldId, FieldValue>,
}

impl RawParameters {
    pub fn get(&self, field: FieldId) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    pub fn set(&mut self, field: FieldId, value: impl Into<FieldValue>) {
        self.values.insert(field, value.into());
    }

    pub fn remove(&mut self, field: FieldId) -> Option<FieldValue> {
        self.values.remove(&field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &FieldValue)> {
        self.values.iter().map(|(field, value)| (*field, value))
    }
}

impl FromIterator<(FieldId, FieldValue)> for RawParameters {
    fn from_iter<I: IntoIterator<Item = (FieldId, FieldValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimepointAxis {
    #[serde(with = "real")]
    pub max: f64,
    #[serde(with = "real")]
    pub stepsize: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WavelengthAxis {
    #[serde(with = "real")]
    pub min: f64,
    #[serde(with = "real")]
    pub max: f64,
    #[serde(with = "real")]
    pub stepsize: f64,
}

/// Parameters for one spectroscopy simulation run.
///
/// Only produced by [`build_parameters`] or by deserializing a document that
/// passes the same checks, so every instance is complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ParametersDocument")]
pub struct SimulationParameters {
    #[serde(serialize_with = "real::list::serialize")]
    decay_rates: Vec<f64>,
    #[serde(serialize_with = "real::list::serialize")]
    amplitudes: Vec<f64>,
    #[serde(serialize_with = "real::list::serialize")]
    location_mean: Vec<f64>,
    #[serde(serialize_with = "real::list::serialize")]
    width: Vec<f64>,
    #[serde(serialize_with = "real::list::serialize")]
    skewness: Vec<f64>,
    timepoints: TimepointAxis,
    wavelength: WavelengthAxis,
    #[serde(serialize_with = "real::serialize")]
    stdev_noise: f64,
    seed: i64,
    add_gaussian_irf: bool,
    #[serde(serialize_with = "real::serialize")]
    irf_location: f64,
    #[serde(serialize_with = "real::serialize")]
    irf_width: f64,
    use_sequential_scheme: bool,
}

impl SimulationParameters {
    pub const FIELD_DESCRIPTIONS: [(&'static str, &'static str); 13] = [
        ("decay_rates", "Decay rates as a list of floats"),
        ("amplitudes", "Amplitudes as a list of floats"),
        (
            "location_mean",
            "Location (mean) of spectra (cm-1) as a list of floats",
        ),
        ("width", "Width of spectra (cm-1) as a list of floats"),
        ("skewness", "Skewness of spectra (cm-1) as a list of floats"),
        ("timepoints", "Timepoints with max and stepsize as floats"),
        (
            "wavelength",
            "Wavelength (nm) with min, max, and stepsize as floats",
        ),
        ("stdev_noise", "Standard deviation of noise as a float"),
        ("seed", "Seed as an integer"),
        ("add_gaussian_irf", "Boolean to add Gaussian IRF"),
        ("irf_location", "IRF location as a float"),
        ("irf_width", "IRF width as a float"),
        ("use_sequential_scheme", "Boolean to use sequential scheme"),
    ];

    /// Description of the record field a form slot feeds. Axis slots share
    /// the description of their parent mapping.
    pub fn description_for(field: FieldId) -> &'static str {
        let key = field.key();
        let top_level = key.split('.').next().unwrap_or(key);
        Self::FIELD_DESCRIPTIONS
            .iter()
            .find(|(name, _)| *name == top_level)
            .map(|(_, description)| *description)
            .unwrap_or_default()
    }

    pub fn decay_rates(&self) -> &[f64] {
        &self.decay_rates
    }

    pub fn amplitudes(&self) -> &[f64] {
        &self.amplitudes
    }

    pub fn location_mean(&self) -> &[f64] {
        &self.location_mean
    }

    pub fn width(&self) -> &[f64] {
        &self.width
    }

    pub fn skewness(&self) -> &[f64] {
        &self.skewness
    }

    pub fn timepoints(&self) -> TimepointAxis {
        self.timepoints
    }

    pub fn wavelength(&self) -> WavelengthAxis {
        self.wavelength
    }

    pub fn stdev_noise(&self) -> f64 {
        self.stdev_noise
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn add_gaussian_irf(&self) -> bool {
        self.add_gaussian_irf
    }

    pub fn irf_location(&self) -> f64 {
        self.irf_location
    }

    pub fn irf_width(&self) -> f64 {
        self.irf_width
    }

    pub fn use_sequential_scheme(&self) -> bool {
        self.use_sequential_scheme
    }

    /// Number of spectral components, taken from `decay_rates`.
    pub fn component_count(&self) -> usize {
        self.decay_rates.len()
    }

    fn sequences(&self) -> [(FieldId, &[f64]); 5] {
        [
            (FieldId::DecayRates, self.decay_rates.as_slice()),
            (FieldId::Amplitudes, self.amplitudes.as_slice()),
            (FieldId::LocationMean, self.location_mean.as_slice()),
            (FieldId::Width, self.width.as_slice()),
            (FieldId::Skewness, self.skewness.as_slice()),
        ]
    }

    pub fn component_lengths_consistent(&self) -> bool {
        let expected = self.component_count();
        self.sequences()
            .iter()
            .all(|(_, values)| values.len() == expected)
    }

    /// Fails with one problem per sequence whose length differs from
    /// `decay_rates`.
    pub fn ensure_consistent_components(&self) -> Result<(), SchemaValidationError> {
        let expected = self.component_count();
        let problems: Vec<_> = self
            .sequences()
            .iter()
            .filter(|(_, values)| values.len() != expected)
            .map(|(field, values)| {
                SchemaProblem::at_field(
                    *field,
                    format!(
                        "List should have {} items to match decay_rates, got {}",
                        expected,
                        values.len()
                    ),
                )
            })
            .collect();

        if problems.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError::new(schema::MODEL_NAME, problems))
        }
    }
}

fn write_sequence(f: &mut Formatter<'_>, name: &str, values: &[f64]) -> std::fmt::Result {
    write!(f, "\n  {}: [", name)?;
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{:?}", value)?;
    }
    f.write_str("]")
}

impl Display for SimulationParameters {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(schema::MODEL_NAME)?;
        for (field, values) in self.sequences() {
            write_sequence(f, field.key(), values)?;
        }
        write!(
            f,
            "\n  timepoints: {{max: {:?}, stepsize: {:?}}}",
            self.timepoints.max, self.timepoints.stepsize
        )?;
        write!(
            f,
            "\n  wavelength: {{min: {:?}, max: {:?}, stepsize: {:?}}}",
            self.wavelength.min, self.wavelength.max, self.wavelength.stepsize
        )?;
        write!(f, "\n  stdev_noise: {:?}", self.stdev_noise)?;
        write!(f, "\n  seed: {}", self.seed)?;
        write!(f, "\n  add_gaussian_irf: {}", self.add_gaussian_irf)?;
        write!(f, "\n  irf_location: {:?}", self.irf_location)?;
        write!(f, "\n  irf_width: {:?}", self.irf_width)?;
        write!(f, "\n  use_sequential_scheme: {}", self.use_sequential_scheme)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ParametersDocument {
    #[serde(deserialize_with = "real::list::deserialize")]
    decay_rates: Vec<f64>,
    #[serde(deserialize_with = "real::list::deserialize")]
    amplitudes: Vec<f64>,
    #[serde(deserialize_with = "real::list::deserialize")]
    location_mean: Vec<f64>,
    #[serde(deserialize_with = "real::list::deserialize")]
    width: Vec<f64>,
    #[serde(deserialize_with = "real::list::deserialize")]
    skewness: Vec<f64>,
    timepoints: TimepointAxis,
    wavelength: WavelengthAxis,
    #[serde(deserialize_with = "real::deserialize")]
    stdev_noise: f64,
    seed: i64,
    add_gaussian_irf: bool,
    #[serde(deserialize_with = "real::deserialize")]
    irf_location: f64,
    #[serde(deserialize_with = "real::deserialize")]
    irf_width: f64,
    use_sequential_scheme: bool,
}

impl TryFrom<ParametersDocument> for SimulationParameters {
    type Error = SchemaValidationError;

    fn try_from(document: ParametersDocument) -> Result<Self, Self::Error> {
        let parameters = Self {
            decay_rates: document.decay_rates,
            amplitudes: document.amplitudes,
            location_mean: document.location_mean,
            width: document.width,
            skewness: document.skewness,
            timepoints: document.timepoints,
            wavelength: document.wavelength,
            stdev_noise: document.stdev_noise,
            seed: document.seed,
            add_gaussian_irf: document.add_gaussian_irf,
            irf_location: document.irf_location,
            irf_width: document.irf_width,
            use_sequential_scheme: document.use_sequential_scheme,
        };

        let problems: Vec<_> = parameters
            .sequences()
            .iter()
            .filter(|(_, values)| values.is_empty())
            .map(|(field, _)| SchemaProblem::at_field(*field, "List should have at least 1 item"))
            .collect();
        if problems.is_empty() {
            Ok(parameters)
        } else {
            Err(SchemaValidationError::new(schema::MODEL_NAME, problems))
        }
    }
}

/// Every problem found in one build attempt, in the order detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<ParameterError>,
}

impl ValidationReport {
    pub fn errors(&self) -> &[ParameterError] {
        &self.errors
    }

    pub fn diagnostic_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.errors.iter().map(ToString::to_string)
    }

    pub fn mentions_field(&self, field: FieldId) -> bool {
        self.errors.iter().any(|error| error.field() == Some(field))
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

/// Validates raw slot values and builds the record.
///
/// List-field problems are all reported together and stop the build before
/// assembly; a schema failure is reported as a single aggregated error.
pub fn build_parameters(raw: &RawParameters) -> Result<SimulationParameters, ValidationReport> {
    let sequences = parser::parse_sequences(raw).map_err(|errors| ValidationReport { errors })?;

    let parameters = schema::assemble(sequences, raw).map_err(|error| ValidationReport {
        errors: vec![ParameterError::SchemaValidation(error)],
    })?;

    if !parameters.component_lengths_consistent() {
        tracing::warn!(
            components = parameters.component_count(),
            "spectral component sequences have differing lengths"
        );
    }

    Ok(parameters)
}
