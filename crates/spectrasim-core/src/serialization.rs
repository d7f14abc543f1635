use crate::domain::{SpectraError, SpectraResult};
use crate::parameters::{RawParameters, SimulationParameters};
use std::fs;
use std::path::Path;

pub fn normalize_text_artifact(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

pub fn write_text_artifact(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, normalize_text_artifact(content))
}

pub fn parameters_to_json(parameters: &SimulationParameters) -> SpectraResult<String> {
    serde_json::to_string_pretty(parameters).map_err(|source| {
        SpectraError::internal(
            "SYS.PARAMETERS_ENCODE",
            format!("failed to encode simulation parameters: {}", source),
        )
    })
}

pub fn write_parameters_json(path: &Path, parameters: &SimulationParameters) -> SpectraResult<()> {
    let json = parameters_to_json(parameters)?;
    write_text_artifact(path, &json).map_err(|source| {
        SpectraError::io_system(
            "IO.PARAMETERS_WRITE",
            format!(
                "failed to write simulation parameters '{}': {}",
                path.display(),
                source
            ),
        )
    })
}

pub fn read_parameters_json(path: &Path) -> SpectraResult<SimulationParameters> {
    let source = read_source(path, "IO.PARAMETERS_READ")?;
    serde_json::from_str(&source).map_err(|error| {
        SpectraError::input_validation(
            "INPUT.PARAMETERS_DOCUMENT",
            format!(
                "invalid simulation parameters in '{}': {}",
                path.display(),
                error
            ),
        )
    })
}

/// Reads raw slot values from a JSON object keyed by field id.
pub fn read_raw_values(path: &Path) -> SpectraResult<RawParameters> {
    let source = read_source(path, "IO.VALUES_READ")?;
    parse_raw_values(&source).map_err(|error| {
        SpectraError::input_validation(
            error.placeholder(),
            format!("{} (in '{}')", error.message(), path.display()),
        )
    })
}

pub fn parse_raw_values(source: &str) -> SpectraResult<RawParameters> {
    serde_json::from_str(source).map_err(|error| {
        SpectraError::input_validation(
            "INPUT.VALUES_DOCUMENT",
            format!("invalid form values document: {}", error),
        )
    })
}

fn read_source(path: &Path, placeholder: &'static str) -> SpectraResult<String> {
    fs::read_to_string(path).map_err(|source| {
        SpectraError::io_system(
            placeholder,
            format!("failed to read '{}': {}", path.display(), source),
        )
    })
}
