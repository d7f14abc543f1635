use crate::domain::{FieldId, FieldKind, FieldValue};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldDefault {
    Text(&'static str),
    Number(f64),
    Integer(i64),
    Flag(bool),
}

impl FieldDefault {
    pub fn to_value(self) -> FieldValue {
        match self {
            Self::Text(text) => FieldValue::text(text),
            Self::Number(number) => FieldValue::Number(number),
            Self::Integer(integer) => FieldValue::Integer(integer),
            Self::Flag(flag) => FieldValue::Bool(flag),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDefinition {
    pub id: FieldId,
    pub kind: FieldKind,
    pub placeholder: &'static str,
    pub default: FieldDefault,
}

impl FieldDefinition {
    pub const fn label(&self) -> &'static str {
        self.id.label()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerDefinition {
    pub label: &'static str,
    pub tooltip: &'static str,
}

pub const SIMULATE_TRIGGER: TriggerDefinition = TriggerDefinition {
    label: "Simulate",
    tooltip: "Click to simulate",
};

const fn list_field(id: FieldId, placeholder: &'static str) -> FieldDefinition {
    FieldDefinition {
        id,
        kind: FieldKind::Text,
        placeholder,
        default: FieldDefault::Text(""),
    }
}

const fn numeric_field(id: FieldId) -> FieldDefinition {
    FieldDefinition {
        id,
        kind: FieldKind::Numeric,
        placeholder: "",
        default: FieldDefault::Number(0.0),
    }
}

const fn flag_field(id: FieldId) -> FieldDefinition {
    FieldDefinition {
        id,
        kind: FieldKind::Boolean,
        placeholder: "",
        default: FieldDefault::Flag(false),
    }
}

/// Form slots in display order.
pub const FIELD_DEFINITIONS: [FieldDefinition; 16] = [
    list_field(
        FieldId::DecayRates,
        "Enter decay rates as comma-separated floats",
    ),
    list_field(
        FieldId::Amplitudes,
        "Enter amplitudes as comma-separated floats",
    ),
    list_field(
        FieldId::LocationMean,
        "Enter location of spectra (cm-1) as comma-separated floats",
    ),
    list_field(
        FieldId::Width,
        "Enter width of spectra (cm-1) as comma-separated floats",
    ),
    list_field(
        FieldId::Skewness,
        "Enter skewness of spectra (cm-1) as comma-separated floats",
    ),
    numeric_field(FieldId::TimepointsMax),
    numeric_field(FieldId::TimepointsStepsize),
    numeric_field(FieldId::WavelengthMin),
    numeric_field(FieldId::WavelengthMax),
    numeric_field(FieldId::WavelengthStepsize),
    numeric_field(FieldId::StdevNoise),
    FieldDefinition {
        id: FieldId::Seed,
        kind: FieldKind::Integer,
        placeholder: "",
        default: FieldDefault::Integer(0),
    },
    flag_field(FieldId::AddGaussianIrf),
    numeric_field(FieldId::IrfLocation),
    numeric_field(FieldId::IrfWidth),
    flag_field(FieldId::UseSequentialScheme),
];

/// Table rows follow `FieldId` declaration order.
pub fn field_definition(field: FieldId) -> &'static FieldDefinition {
    &FIELD_DEFINITIONS[field as usize]
}
