use super::FieldId;
use std::fmt::{Display, Formatter};

pub type SpectraResult<T> = Result<T, SpectraError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Success,
    InputValidationError,
    IoSystemError,
    InternalError,
}

impl ErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::InternalError => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::InternalError => "InternalError",
        }
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpectraError {
    category: ErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl SpectraError {
    pub fn new(
        category: ErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    pub fn input_validation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::InputValidationError, placeholder, message)
    }

    pub fn io_system(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::IoSystemError, placeholder, message)
    }

    pub fn internal(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::InternalError, placeholder, message)
    }

    pub const fn category(&self) -> ErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        let severity = if self.category.is_fatal() {
            "ERROR"
        } else {
            "INFO"
        };
        format!("{}: [{}] {}", severity, self.placeholder, self.message)
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        self.category
            .is_fatal()
            .then(|| format!("FATAL EXIT CODE: {}", self.exit_code()))
    }
}

impl Display for SpectraError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.as_str(),
            self.placeholder,
            self.message
        )
    }
}

impl std::error::Error for SpectraError {}

/// One failed schema check, located by the dotted field key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaProblem {
    pub location: String,
    pub message: String,
}

impl SchemaProblem {
    pub fn new(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
        }
    }

    pub fn at_field(field: FieldId, message: impl Into<String>) -> Self {
        Self::new(field.key(), message)
    }
}

/// Aggregated schema failures for one assembly attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaValidationError {
    model: &'static str,
    problems: Vec<SchemaProblem>,
}

impl SchemaValidationError {
    pub fn new(model: &'static str, problems: Vec<SchemaProblem>) -> Self {
        Self { model, problems }
    }

    pub fn problems(&self) -> &[SchemaProblem] {
        &self.problems
    }

    pub fn mentions(&self, location: &str) -> bool {
        self.problems
            .iter()
            .any(|problem| problem.location == location)
    }
}

impl Display for SchemaValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let count = self.problems.len();
        write!(
            f,
            "{} validation error{} for {}",
            count,
            if count == 1 { "" } else { "s" },
            self.model
        )?;
        for problem in &self.problems {
            write!(f, "\n{}\n  {}", problem.location, problem.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaValidationError {}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParameterError {
    #[error("Please fill in the mandatory field: {label}")]
    MissingField { field: FieldId, label: &'static str },
    #[error("Invalid input in field: {label}. Please enter comma-separated floats.")]
    Parse {
        field: FieldId,
        label: &'static str,
        token: String,
    },
    #[error("Input validation error: {0}")]
    SchemaValidation(#[from] SchemaValidationError),
}

impl ParameterError {
    pub const fn placeholder(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "INPUT.MISSING_FIELD",
            Self::Parse { .. } => "INPUT.PARSE",
            Self::SchemaValidation(_) => "INPUT.SCHEMA",
        }
    }

    pub const fn field(&self) -> Option<FieldId> {
        match self {
            Self::MissingField { field, .. } | Self::Parse { field, .. } => Some(*field),
            Self::SchemaValidation(_) => None,
        }
    }
}

impl From<&ParameterError> for SpectraError {
    fn from(error: &ParameterError) -> Self {
        SpectraError::input_validation(error.placeholder(), error.to_string())
    }
}

impl From<ParameterError> for SpectraError {
    fn from(error: ParameterError) -> Self {
        Self::from(&error)
    }
}
