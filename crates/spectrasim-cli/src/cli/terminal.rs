use spectrasim_core::domain::{FieldId, FieldValue};
use spectrasim_core::form::{FieldDefault, FieldDefinition, TriggerDefinition};
use spectrasim_core::parameters::{RawParameters, SimulationParameters};
use spectrasim_core::surface::DisplaySurface;
use std::io::Write;

/// Surface that writes form output straight to a terminal stream.
pub(super) struct TerminalSurface<W: Write> {
    values: RawParameters,
    writer: W,
}

impl<W: Write> TerminalSurface<W> {
    pub(super) fn new(values: RawParameters, writer: W) -> Self {
        Self { values, writer }
    }

    pub(super) fn into_writer(self) -> W {
        self.writer
    }
}

fn render_default(default: FieldDefault) -> String {
    match default {
        FieldDefault::Text(text) => format!("{:?}", text),
        other => other.to_value().to_string(),
    }
}

impl<W: Write> DisplaySurface for TerminalSurface<W> {
    fn render(&mut self, fields: &[FieldDefinition], trigger: &TriggerDefinition) {
        for definition in fields {
            self.print(&format!(
                "{:<22} {:<8} {:<36} default {}",
                definition.id.key(),
                definition.kind.as_str(),
                definition.label(),
                render_default(definition.default),
            ));
            self.print(&format!(
                "    {}",
                SimulationParameters::description_for(definition.id)
            ));
            if !definition.placeholder.is_empty() {
                self.print(&format!("    hint: {}", definition.placeholder));
            }
        }
        self.print(&format!("[ {} ]  {}", trigger.label, trigger.tooltip));
    }

    fn value(&self, field: FieldId) -> Option<FieldValue> {
        self.values.get(field).cloned()
    }

    fn print(&mut self, line: &str) {
        if let Err(error) = writeln!(self.writer, "{}", line) {
            tracing::warn!(%error, "failed to write form output");
        }
    }

    fn clear(&mut self) {
        if let Err(error) = self.writer.flush() {
            tracing::warn!(%error, "failed to flush form output");
        }
    }
}
