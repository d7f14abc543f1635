//! Serde representation for reals that keeps `inf`, `-inf` and `NaN`.
//!
//! JSON has no literal for non-finite numbers, so those are written as the
//! strings `"inf"`, `"-inf"` and `"NaN"`. Finite values stay plain numbers.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum Real {
    Number(f64),
    Named(String),
}

impl From<f64> for Real {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            Self::Number(value)
        } else {
            Self::Named(value.to_string())
        }
    }
}

impl Real {
    fn into_f64(self) -> Result<f64, String> {
        match self {
            Self::Number(value) => Ok(value),
            Self::Named(name) => name
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| !value.is_finite())
                .ok_or_else(|| {
                    format!("expected a number, 'inf', '-inf' or 'NaN', got '{}'", name)
                }),
        }
    }
}

pub(crate) fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    Real::from(*value).serialize(serializer)
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Real::deserialize(deserializer)?
        .into_f64()
        .map_err(D::Error::custom)
}

pub(crate) mod list {
    use super::Real;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(values.iter().map(|value| Real::from(*value)))
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<Real>::deserialize(deserializer)?
            .into_iter()
            .map(Real::into_f64)
            .collect::<Result<_, _>>()
            .map_err(D::Error::custom)
    }
}
