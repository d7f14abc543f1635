//! Form controller: owns the slot table, the surface it is shown on, and the
//! last successfully built parameters.

mod fields;

pub use fields::{
    FIELD_DEFINITIONS, FieldDefault, FieldDefinition, SIMULATE_TRIGGER, TriggerDefinition,
    field_definition,
};

use crate::parameters::{RawParameters, SimulationParameters, ValidationReport, build_parameters};
use crate::surface::DisplaySurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected { error_count: usize },
}

impl SubmitOutcome {
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

#[derive(Debug)]
pub struct SimulateForm<S> {
    surface: S,
    result: Option<SimulationParameters>,
}

impl<S: DisplaySurface> SimulateForm<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            result: None,
        }
    }

    pub fn display(&mut self) {
        self.surface.render(&FIELD_DEFINITIONS, &SIMULATE_TRIGGER);
    }

    /// Reads every slot from the surface in form order.
    pub fn capture(&self) -> RawParameters {
        FIELD_DEFINITIONS
            .iter()
            .filter_map(|definition| {
                self.surface
                    .value(definition.id)
                    .map(|value| (definition.id, value))
            })
            .collect()
    }

    /// Handles one trigger press. Output on the surface is replaced by either
    /// the new record or the diagnostics; a rejected submission keeps the
    /// previous result.
    pub fn submit(&mut self) -> SubmitOutcome {
        let raw = self.capture();
        self.surface.clear();
        tracing::debug!(slots = raw.len(), "captured form values");

        match build_parameters(&raw) {
            Ok(parameters) => {
                tracing::info!(
                    components = parameters.component_count(),
                    seed = parameters.seed(),
                    "simulation parameters accepted"
                );
                self.surface.print(&parameters.to_string());
                self.result = Some(parameters);
                SubmitOutcome::Accepted
            }
            Err(report) => {
                tracing::debug!(errors = report.errors().len(), "simulation parameters rejected");
                self.report(&report);
                SubmitOutcome::Rejected {
                    error_count: report.errors().len(),
                }
            }
        }
    }

    fn report(&mut self, report: &ValidationReport) {
        for line in report.diagnostic_lines() {
            self.surface.print(&line);
        }
    }

    pub fn result(&self) -> Option<&SimulationParameters> {
        self.result.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_parts(self) -> (S, Option<SimulationParameters>) {
        (self.surface, self.result)
    }
}
