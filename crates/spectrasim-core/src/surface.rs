use crate::domain::{FieldId, FieldValue};
use crate::form::{FIELD_DEFINITIONS, FieldDefinition, TriggerDefinition};
use crate::parameters::RawParameters;

/// Rendering collaborator of the form: shows slots, hands back their current
/// values, and carries diagnostic output.
pub trait DisplaySurface {
    fn render(&mut self, fields: &[FieldDefinition], trigger: &TriggerDefinition);

    fn value(&self, field: FieldId) -> Option<FieldValue>;

    fn print(&mut self, line: &str);

    fn clear(&mut self);
}

/// In-memory surface holding slot values and captured output lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BufferedSurface {
    values: RawParameters,
    output: Vec<String>,
    rendered: Vec<FieldId>,
}

impl BufferedSurface {
    /// Surface with every slot at its widget default.
    pub fn with_defaults() -> Self {
        Self {
            values: FIELD_DEFINITIONS
                .iter()
                .map(|definition| (definition.id, definition.default.to_value()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn from_values(values: RawParameters) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    pub fn set_value(&mut self, field: FieldId, value: impl Into<FieldValue>) {
        self.values.set(field, value);
    }

    pub fn clear_value(&mut self, field: FieldId) {
        self.values.remove(field);
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn output_text(&self) -> String {
        self.output.join("\n")
    }

    pub fn rendered_fields(&self) -> &[FieldId] {
        &self.rendered
    }
}

impl DisplaySurface for BufferedSurface {
    fn render(&mut self, fields: &[FieldDefinition], _trigger: &TriggerDefinition) {
        self.rendered = fields.iter().map(|definition| definition.id).collect();
    }

    fn value(&self, field: FieldId) -> Option<FieldValue> {
        self.values.get(field).cloned()
    }

    fn print(&mut self, line: &str) {
        self.output.extend(line.lines().map(str::to_string));
    }

    fn clear(&mut self) {
        self.output.clear();
    }
}
