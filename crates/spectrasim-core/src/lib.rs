//! Parameter form for spectroscopy simulations: slot definitions, input
//! validation, and the structured parameter record handed to simulators.

pub mod domain;
pub mod form;
pub mod parameters;
pub mod serialization;
pub mod surface;

pub use domain::{FieldId, FieldKind, FieldValue, ParameterError, SpectraError, SpectraResult};
pub use form::{SimulateForm, SubmitOutcome};
pub use parameters::{RawParameters, SimulationParameters, ValidationReport, build_parameters};
pub use surface::{BufferedSurface, DisplaySurface};
