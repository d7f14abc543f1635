pub mod errors;

pub use errors::{
    ErrorCategory, ParameterError, SchemaProblem, SchemaValidationError, SpectraError,
    SpectraResult,
};

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Identifier of one input slot on the simulation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FieldId {
    DecayRates,
    Amplitudes,
    LocationMean,
    Width,
    Skewness,
    TimepointsMax,
    TimepointsStepsize,
    WavelengthMin,
    WavelengthMax,
    WavelengthStepsize,
    StdevNoise,
    Seed,
    AddGaussianIrf,
    IrfLocation,
    IrfWidth,
    UseSequentialScheme,
}

impl FieldId {
    pub const ALL: [FieldId; 16] = [
        Self::DecayRates,
        Self::Amplitudes,
        Self::LocationMean,
        Self::Width,
        Self::Skewness,
        Self::TimepointsMax,
        Self::TimepointsStepsize,
        Self::WavelengthMin,
        Self::WavelengthMax,
        Self::WavelengthStepsize,
        Self::StdevNoise,
        Self::Seed,
        Self::AddGaussianIrf,
        Self::IrfLocation,
        Self::IrfWidth,
        Self::UseSequentialScheme,
    ];

    /// The five comma-separated list fields, in form order.
    pub const LIST_FIELDS: [FieldId; 5] = [
        Self::DecayRates,
        Self::Amplitudes,
        Self::LocationMean,
        Self::Width,
        Self::Skewness,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::DecayRates => "decay_rates",
            Self::Amplitudes => "amplitudes",
            Self::LocationMean => "location_mean",
            Self::Width => "width",
            Self::Skewness => "skewness",
            Self::TimepointsMax => "timepoints.max",
            Self::TimepointsStepsize => "timepoints.stepsize",
            Self::WavelengthMin => "wavelength.min",
            Self::WavelengthMax => "wavelength.max",
            Self::WavelengthStepsize => "wavelength.stepsize",
            Self::StdevNoise => "stdev_noise",
            Self::Seed => "seed",
            Self::AddGaussianIrf => "add_gaussian_irf",
            Self::IrfLocation => "irf_location",
            Self::IrfWidth => "irf_width",
            Self::UseSequentialScheme => "use_sequential_scheme",
        }
    }

    /// Human label shown next to the slot and used in diagnostics.
    pub const fn label(self) -> &'static str {
        match self {
            Self::DecayRates => "Decay rates",
            Self::Amplitudes => "Amplitudes",
            Self::LocationMean => "Location (mean) of spectra (cm-1)",
            Self::Width => "Width of spectra (cm-1)",
            Self::Skewness => "Skewness of spectra (cm-1)",
            Self::TimepointsMax => "Max Timepoint",
            Self::TimepointsStepsize => "Stepsize Timepoint",
            Self::WavelengthMin => "Min Wavelength (nm)",
            Self::WavelengthMax => "Max Wavelength (nm)",
            Self::WavelengthStepsize => "Stepsize Wavelength (nm)",
            Self::StdevNoise => "Stdev Noise",
            Self::Seed => "Seed",
            Self::AddGaussianIrf => "Add Gaussian IRF",
            Self::IrfLocation => "IRF Location",
            Self::IrfWidth => "IRF Width",
            Self::UseSequentialScheme => "Use Sequential Scheme",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let normalized = key.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.key().eq_ignore_ascii_case(normalized))
    }

    pub fn is_list(self) -> bool {
        Self::LIST_FIELDS.contains(&self)
    }
}

impl Display for FieldId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FieldId {
    type Err = SpectraError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_key(value).ok_or_else(|| {
            SpectraError::input_validation(
                "INPUT.UNKNOWN_FIELD",
                format!("unknown form field '{}'", value),
            )
        })
    }
}

impl TryFrom<String> for FieldId {
    type Error = SpectraError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldId> for String {
    fn from(field: FieldId) -> Self {
        field.key().to_string()
    }
}

/// Capability of a slot: what kind of widget captures it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Numeric,
    Integer,
    Boolean,
}

impl FieldKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Numeric => "numeric",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Whole-number value of `number`, if it is finite, has no fractional part
/// and fits an `i64`.
pub fn integral_value(number: f64) -> Option<i64> {
    let in_range = number.is_finite()
        && number.fract() == 0.0
        && number >= i64::MIN as f64
        && number < i64::MAX as f64;
    in_range.then_some(number as i64)
}

/// Raw value held by a slot at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Interprets a raw command-line string according to the slot kind.
    /// Strings that do not fit the kind stay text so schema checks can
    /// report them.
    pub fn from_raw(kind: FieldKind, raw: &str) -> Self {
        let trimmed = raw.trim();
        match kind {
            FieldKind::Text => Self::Text(raw.to_string()),
            FieldKind::Numeric => trimmed
                .parse::<f64>()
                .map(Self::Number)
                .unwrap_or_else(|_| Self::Text(raw.to_string())),
            FieldKind::Integer => trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(integral_value))
                .map(Self::Integer)
                .unwrap_or_else(|| Self::Text(raw.to_string())),
            FieldKind::Boolean => trimmed
                .parse::<bool>()
                .map(Self::Bool)
                .unwrap_or_else(|_| Self::Text(raw.to_string())),
        }
    }

    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Integer(_) => "int",
            Self::Number(_) => "float",
            Self::Text(_) => "str",
        }
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{}", value),
            Self::Integer(value) => write!(f, "{}", value),
            Self::Number(value) => write!(f, "{:?}", value),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldId, FieldKind, FieldValue, integral_value};

    #[test]
    fn field_keys_resolve_back_to_ids() {
        for field in FieldId::ALL {
            assert_eq!(FieldId::from_key(field.key()), Some(field));
        }
        assert_eq!(
            FieldId::from_key(" Timepoints.Max "),
            Some(FieldId::TimepointsMax)
        );
        assert!(FieldId::from_key("timepoints").is_none());
        assert!("bogus".parse::<FieldId>().is_err());
    }

    #[test]
    fn only_the_five_sequences_are_list_fields() {
        let lists: Vec<_> = FieldId::ALL
            .into_iter()
            .filter(|field| field.is_list())
            .collect();
        assert_eq!(lists, FieldId::LIST_FIELDS.to_vec());
    }

    #[test]
    fn raw_strings_follow_the_slot_kind() {
        assert_eq!(
            FieldValue::from_raw(FieldKind::Numeric, " 0.25 "),
            FieldValue::Number(0.25)
        );
        assert_eq!(
            FieldValue::from_raw(FieldKind::Integer, "42"),
            FieldValue::Integer(42)
        );
        assert_eq!(
            FieldValue::from_raw(FieldKind::Boolean, "true"),
            FieldValue::Bool(true)
        );
        assert_eq!(
            FieldValue::from_raw(FieldKind::Integer, "4.5"),
            FieldValue::text("4.5")
        );
        assert_eq!(
            FieldValue::from_raw(FieldKind::Text, "1.0, 2.0"),
            FieldValue::text("1.0, 2.0")
        );
    }

    #[test]
    fn integral_reals_count_as_integer_overrides() {
        assert_eq!(
            FieldValue::from_raw(FieldKind::Integer, "1.0"),
            FieldValue::Integer(1)
        );
        assert_eq!(
            FieldValue::from_raw(FieldKind::Integer, "inf"),
            FieldValue::text("inf")
        );
        assert_eq!(integral_value(-3.0), Some(-3));
        assert_eq!(integral_value(f64::NAN), None);
        assert_eq!(integral_value(1e19), None);
    }

    #[test]
    fn json_values_map_onto_field_values() {
        let parsed: Vec<FieldValue> =
            serde_json::from_str(r#"[true, 7, 0.5, "1,2"]"#).expect("values should parse");
        assert_eq!(
            parsed,
            vec![
                FieldValue::Bool(true),
                FieldValue::Integer(7),
                FieldValue::Number(0.5),
                FieldValue::text("1,2"),
            ]
        );
    }
}
